mod buffer;
mod decode;
mod error;
mod window;

pub use buffer::AudioBuffer;
pub use decode::load;
pub use error::BufferError;
pub use window::{
    WindowDescriptor, WindowPlan, Windows, DEFAULT_CHUNK_SECS, DEFAULT_OVERLAP_SECS,
};
