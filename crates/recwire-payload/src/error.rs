/// Errors raised at the dynamic-input boundary.
///
/// Serialization itself never fails; these only surface when payload text
/// has to be parsed or read first.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The payload text is not valid JSON.
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The payload could not be read.
    #[error("failed reading payload: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PayloadError>;
