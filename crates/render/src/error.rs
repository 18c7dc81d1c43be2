use thiserror::Error;

/// Failure of a single export. Engine state is never affected.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("html template failed: {0}")]
    Template(#[from] askama::Error),

    #[error("pdf encoding failed: {0}")]
    Pdf(String),

    #[error("invalid shop profile: {0}")]
    Config(#[from] serde_json::Error),
}

impl RenderError {
    pub fn pdf(msg: impl ToString) -> Self {
        Self::Pdf(msg.to_string())
    }
}
