// Synthetic reference recordings for the catalog tests
use std::path::{Path, PathBuf};

pub const TEST_RATE: u32 = 11025;

/// A deterministic "song": a new pseudo-random chord every quarter second
pub fn song_samples(seed: u32, seconds: f32) -> Vec<f32> {
    let frames = (TEST_RATE as f32 * seconds) as usize;
    let chord_frames = TEST_RATE as usize / 4;
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    let mut notes = [0.0f32; 3];

    (0..frames)
        .map(|i| {
            if i % chord_frames == 0 {
                for note in notes.iter_mut() {
                    state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                    let semitone = ((state >> 16) % 36) as f32;
                    *note = 110.0 * 2f32.powf(semitone / 12.0);
                }
            }
            let t = i as f32 / TEST_RATE as f32;
            notes
                .iter()
                .map(|f| (2.0 * std::f32::consts::PI * f * t).sin() * 0.25)
                .sum()
        })
        .collect()
}

pub fn write_reference(dir: &Path, name: &str, seed: u32, seconds: f32) -> PathBuf {
    let path = dir.join(name);
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: TEST_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for sample in song_samples(seed, seconds) {
        writer
            .write_sample((sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
            .unwrap();
    }
    writer.finalize().unwrap();
    path
}
