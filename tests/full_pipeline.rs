mod common;

use std::io::Write;
use std::sync::Arc;

use clonescan::{
    build_engine, build_engine_with_client, ClonescanConfig, CloneDetectionResult, Detector,
    RiskLevel,
};
use common::{ACME, ACME_CLONE, BAKERY};
use tempfile::NamedTempFile;

async fn detector_for(cfg: &ClonescanConfig, original: &str) -> Detector {
    let engine = build_engine_with_client(cfg, None).expect("valid config");
    let mut detector = Detector::new(Arc::new(engine));
    detector.set_original(original, "https://acme.example").await;
    detector
}

#[tokio::test]
async fn edited_copy_is_flagged_as_potential_clone() {
    let detector = detector_for(&ClonescanConfig::default(), ACME).await;
    let result = detector
        .detect_clone(ACME_CLONE, "https://acme-safety-login.example")
        .await
        .expect("reference set");

    assert_eq!(result.url, "https://acme-safety-login.example");
    assert!(result.similarity_score >= 0.9, "{}", result.similarity_score);
    assert_eq!(result.recommendation, RiskLevel::PotentialClone);

    assert_eq!(result.analysis.structure_similarity, 1.0);
    assert_eq!(result.analysis.design_similarity, 1.0);
    assert_eq!(result.analysis.branding_similarity, 1.0);
    assert!(result.analysis.content_similarity > 0.8);

    assert!(result
        .suspicious_elements
        .contains(&"Identical page title".to_string()));
    assert!(result
        .suspicious_elements
        .contains(&"Identical meta description".to_string()));
    assert!(result
        .suspicious_elements
        .contains(&"High branding similarity".to_string()));
    assert!(result
        .suspicious_elements
        .iter()
        .any(|e| e.ends_with("identical key phrases")));

    assert!(result.narrative.starts_with("High similarity detected"));
}

#[tokio::test]
async fn unrelated_business_is_low_risk() {
    let detector = detector_for(&ClonescanConfig::default(), ACME).await;
    let result = detector
        .detect_clone(BAKERY, "https://rosies.example")
        .await
        .expect("reference set");

    assert!(result.similarity_score < 0.3, "{}", result.similarity_score);
    assert_eq!(result.recommendation, RiskLevel::LowRisk);
    assert!(result.suspicious_elements.is_empty());
    assert_eq!(result.analysis.branding_similarity, 0.0);
    assert!(result.narrative.starts_with("Low similarity"));
}

#[tokio::test]
async fn result_serializes_to_the_documented_shape() {
    let detector = detector_for(&ClonescanConfig::default(), ACME).await;
    let result = detector
        .detect_clone(ACME_CLONE, "https://acme-clone.example")
        .await
        .expect("reference set");

    let json = serde_json::to_value(&result).expect("serialize");
    assert_eq!(json["url"], "https://acme-clone.example");
    assert_eq!(json["recommendation"], "potential_clone");
    for key in [
        "content_similarity",
        "structure_similarity",
        "design_similarity",
        "branding_similarity",
    ] {
        assert!(json["analysis"][key].is_number(), "missing {key}");
    }
    assert!(json["suspicious_elements"].is_array());
    assert!(json["narrative"].is_string());
    let timestamp = json["timestamp"].as_str().expect("timestamp string");
    assert!(looks_rfc3339(timestamp), "{timestamp}");

    let back: CloneDetectionResult = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back.timestamp, result.timestamp);
    assert_eq!(back.recommendation, result.recommendation);
    assert_eq!(back.suspicious_elements, result.suspicious_elements);
}

fn looks_rfc3339(s: &str) -> bool {
    s.len() >= 20 && s.as_bytes()[4] == b'-' && s.contains('T')
}

#[tokio::test]
async fn yaml_weights_change_the_overall_score() {
    let yaml = r#"
version: "1.0"
name: "branding-only"
similarity:
  overall: { content: 0.0, structure: 0.0, design: 0.0, branding: 1.0 }
detector:
  llm_phrases: false
  llm_narrative: false
"#;
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(yaml.as_bytes()).expect("write yaml");
    let cfg = ClonescanConfig::from_file(file.path()).expect("valid yaml");

    let engine = build_engine(&cfg).expect("valid config");
    assert_eq!(engine.phrase_strategy(), "frequency");
    assert_eq!(engine.narrative_strategy(), "template");

    let mut detector = Detector::new(Arc::new(engine));
    detector.set_original(ACME, "https://acme.example").await;

    let clone = detector
        .detect_clone(ACME_CLONE, "https://acme-clone.example")
        .await
        .expect("reference set");
    assert_eq!(clone.similarity_score, 1.0);

    let bakery = detector
        .detect_clone(BAKERY, "https://rosies.example")
        .await
        .expect("reference set");
    assert_eq!(bakery.similarity_score, 0.0);
}

#[tokio::test]
async fn a_new_reference_replaces_the_old_one() {
    let mut detector = detector_for(&ClonescanConfig::default(), ACME).await;
    detector.set_original(BAKERY, "https://rosies.example").await;
    assert_eq!(
        detector.reference().map(|r| r.url.as_str()),
        Some("https://rosies.example")
    );

    let result = detector
        .detect_clone(BAKERY, "https://rosies-copy.example")
        .await
        .expect("reference set");
    assert_eq!(result.similarity_score, 1.0);
    assert_eq!(result.recommendation, RiskLevel::PotentialClone);
}
