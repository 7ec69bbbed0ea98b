use thiserror::Error;

/// Error type that captures catalog loading and model validation failures.
///
/// "No applicable date" situations are not errors anywhere in this crate;
/// calculators surface those as `Option::None`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid card: {0}")]
    InvalidCard(String),
    #[error("Invalid benefit: {0}")]
    InvalidBenefit(String),
}
