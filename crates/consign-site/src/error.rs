use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("sitemap could not be written: {0}")]
    Xml(String),

    #[error("output {path} could not be written: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
