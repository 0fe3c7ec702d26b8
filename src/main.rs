//! SQL injection detector entrypoint: train once from the labeled CSV, then serve the tester page
//! and JSON API until Ctrl+C.

use sqli_detector::{
    config::DetectorConfig,
    dataset,
    detector::DetectorCell,
    logging::StructuredLogger,
    web,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("SQLI_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = DetectorConfig::load(&config_path);
    config.validate()?;

    StructuredLogger::init(config.log.json, &config.log.level);

    info!(path = ?config.dataset.path, "loading dataset");
    let corpus = dataset::load_csv(&config.dataset)?;
    info!(
        rows = corpus.len(),
        positives = corpus.positives(),
        negatives = corpus.negatives(),
        "dataset loaded"
    );

    let cell = Arc::new(DetectorCell::new());
    let detector = {
        let cell = Arc::clone(&cell);
        let features = config.features.clone();
        let model = config.model.clone();
        tokio::task::spawn_blocking(move || cell.fit(corpus, &features, &model)).await??
    };

    let report = detector.report();
    info!(
        vocabulary_size = report.vocabulary_size,
        iterations = report.iterations,
        converged = report.converged,
        final_loss = report.final_loss,
        corpus_sha256 = %report.corpus_sha256,
        "model trained"
    );

    web::serve(&config.server, cell).await?;
    Ok(())
}
