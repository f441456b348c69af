use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clonescan::{build_engine, ClonescanConfig, Detector};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: clonescan <original.html> <suspect.html> [suspect-url]\n\
                     env: CLONESCAN_CONFIG=<file.yaml>, CLONESCAN_LLM_API_KEY, RUST_LOG, CLONESCAN_LOG_JSON=1";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("CLONESCAN_LOG_JSON").is_ok_and(|v| v == "1");
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let mut args = std::env::args().skip(1);
    let (Some(original_path), Some(suspect_path)) = (args.next(), args.next()) else {
        bail!(USAGE);
    };
    let original_path = PathBuf::from(original_path);
    let suspect_path = PathBuf::from(suspect_path);
    let suspect_url = args
        .next()
        .unwrap_or_else(|| suspect_path.display().to_string());

    let config = match std::env::var("CLONESCAN_CONFIG") {
        Ok(path) => ClonescanConfig::from_file(&path)
            .with_context(|| format!("loading config from {path}"))?,
        Err(_) => ClonescanConfig::default(),
    };

    let original_html = tokio::fs::read_to_string(&original_path)
        .await
        .with_context(|| format!("reading {}", original_path.display()))?;
    let suspect_html = tokio::fs::read_to_string(&suspect_path)
        .await
        .with_context(|| format!("reading {}", suspect_path.display()))?;

    let engine = Arc::new(build_engine(&config)?);
    tracing::debug!(
        phrases = engine.phrase_strategy(),
        narrative = engine.narrative_strategy(),
        "engine ready"
    );
    let mut detector = Detector::new(engine);
    detector
        .set_original(&original_html, &original_path.display().to_string())
        .await;

    let result = detector.detect_clone(&suspect_html, &suspect_url).await?;
    tracing::info!(
        suspect = %suspect_url,
        score = result.similarity_score,
        risk = %result.recommendation,
        flags = result.suspicious_elements.len(),
        "scan complete"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
