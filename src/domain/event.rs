use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

/// A real-world occurrence from the events reference dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Event {
    #[serde(rename = "Event_Date")]
    pub date: NaiveDate,
    #[serde(rename = "Event_Description")]
    pub description: String,
    #[serde(rename = "Event_Type", default)]
    pub event_type: Option<String>,
}

impl Event {
    pub fn type_label(&self) -> &str {
        match self.event_type.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => "-",
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("line {line}: {message}")]
    Record { line: u64, message: String },
    #[error("csv error: {0}")]
    Csv(String),
}

pub fn load_events(path: &Path) -> Result<Vec<Event>, CatalogError> {
    let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let events = parse_events(file)?;
    tracing::info!(path = %path.display(), count = events.len(), "loaded events catalog");
    Ok(events)
}

pub fn parse_events<R: Read>(input: R) -> Result<Vec<Event>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut events = Vec::new();
    for record in reader.deserialize::<Event>() {
        match record {
            Ok(event) => events.push(event),
            Err(e) => {
                return Err(match e.position() {
                    Some(pos) => CatalogError::Record {
                        line: pos.line(),
                        message: record_error_message(&e),
                    },
                    None => CatalogError::Csv(e.to_string()),
                });
            }
        }
    }
    Ok(events)
}

fn record_error_message(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => err.to_string(),
    }
}
