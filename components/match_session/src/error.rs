use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("invalid sweep settings: {0}")]
    InvalidSettings(String),
}
