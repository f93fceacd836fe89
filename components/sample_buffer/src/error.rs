use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BufferError {
    #[error("failed to open audio file {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("failed to allocate sample storage for {frames} frames")]
    Allocation { frames: usize },

    #[error("failed to allocate window of {length} frames at frame {start}")]
    Extraction { start: usize, length: usize },

    #[error("window {start}..{end} exceeds buffer of {total} frames")]
    WindowOutOfBounds {
        start: usize,
        end: usize,
        total: usize,
    },

    #[error("invalid buffer layout: {0}")]
    InvalidLayout(String),
}

impl BufferError {
    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BufferError::FileOpen {
            path: path.into(),
            source,
        }
    }

    pub fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        BufferError::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
