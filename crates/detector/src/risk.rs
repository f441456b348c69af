use crate::types::RiskLevel;

/// Map the overall score and red-flag count to a verdict. First match wins.
pub fn classify(score: f64, suspicious_count: usize) -> RiskLevel {
    if score > 0.8 || suspicious_count > 3 {
        RiskLevel::PotentialClone
    } else if score > 0.6 || suspicious_count > 2 {
        RiskLevel::HighRisk
    } else if score > 0.4 || suspicious_count > 1 {
        RiskLevel::MediumRisk
    } else {
        RiskLevel::LowRisk
    }
}
