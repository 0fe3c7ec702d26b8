//! CSV loader: header row required, text and 0/1 label columns located by name.

use super::{Sample, TrainingCorpus};
use crate::config::DatasetConfig;
use crate::error::{DetectorError, Result};
use std::io::Read;
use tracing::debug;

pub fn load_csv(config: &DatasetConfig) -> Result<TrainingCorpus> {
    let file = std::fs::File::open(&config.path)?;
    read_corpus(file, &config.text_column, &config.label_column)
}

pub(crate) fn read_corpus<R: Read>(
    reader: R,
    text_column: &str,
    label_column: &str,
) -> Result<TrainingCorpus> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h.trim() == name);
    let (Some(text_idx), Some(label_idx)) = (position(text_column), position(label_column)) else {
        return Err(DetectorError::training_data(format!(
            "expected columns '{}' and '{}' in the CSV, found {:?}",
            text_column,
            label_column,
            headers.iter().collect::<Vec<_>>()
        )));
    };

    let mut samples = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let row = i + 1;
        let record = record?;
        let text = record.get(text_idx).ok_or_else(|| {
            DetectorError::training_data(format!("row {row}: missing '{text_column}' field"))
        })?;
        let label = record.get(label_idx).ok_or_else(|| {
            DetectorError::training_data(format!("row {row}: missing '{label_column}' field"))
        })?;

        if text.trim().is_empty() {
            return Err(DetectorError::training_data(format!("row {row}: empty text")));
        }
        let injection = parse_label(label).ok_or_else(|| {
            DetectorError::training_data(format!("row {row}: label {label:?} is not 0 or 1"))
        })?;
        samples.push(Sample::new(text, injection));
    }

    debug!(rows = samples.len(), "dataset parsed");
    Ok(TrainingCorpus::new(samples))
}

fn parse_label(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "1.0" => Some(true),
        "0" | "0.0" => Some(false),
        other if other.eq_ignore_ascii_case("true") => Some(true),
        other if other.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}
