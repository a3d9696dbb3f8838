use thiserror::Error;

/// Failure to read the input table. Never escapes [`crate::load_index`],
/// which degrades to an empty index instead.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("input source {path} could not be read: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("input source {path} is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("input source {path} is not valid CSV: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("input source {path} must be a JSON array of row objects")]
    NotAnArray { path: String },
}
