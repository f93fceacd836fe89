use thiserror::Error;

#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("Cannot fingerprint an empty buffer")]
    EmptyBuffer,

    #[error("Fingerprint generation failed: {0}")]
    Generation(String),

    #[error("Invalid audio format: {0}")]
    InvalidFormat(String),

    #[error("Fingerprint comparison failed: {0}")]
    Comparison(String),
}
