/// An opaque acoustic fingerprint generated from audio content
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioFingerprint(Vec<u32>);

impl AudioFingerprint {
    pub fn new(data: Vec<u32>) -> Self {
        Self(data)
    }

    pub fn raw_data(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A stretch of audio where two fingerprints agree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedSpan {
    /// Offset into the queried fingerprint, in seconds
    pub query_offset_secs: f32,
    /// Offset into the reference fingerprint, in seconds
    pub reference_offset_secs: f32,
    pub duration_secs: f32,
}
