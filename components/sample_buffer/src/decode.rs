// components/sample_buffer/src/decode.rs
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use symphonia::core::{
    audio::SampleBuffer,
    codecs::DecoderOptions,
    errors::Error as SymphoniaError,
    formats::FormatOptions,
    io::MediaSourceStream,
    meta::MetadataOptions,
    probe::Hint,
};

use crate::buffer::AudioBuffer;
use crate::error::BufferError;

/// Decode the whole file at `path` into memory.
///
/// Either the complete signal is returned or an error; a failure halfway
/// through never yields a truncated buffer.
pub fn load(path: impl AsRef<Path>) -> Result<AudioBuffer, BufferError> {
    let path = path.as_ref();
    tracing::debug!("Opening file: {:?}", path);

    let file = File::open(path).map_err(|e| BufferError::file_open(path, e))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|s| s.to_str()) {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| BufferError::decode(path, e))?;
    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| BufferError::decode(path, "no default track found"))?;
    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| BufferError::decode(path, "unknown sample rate"))?;
    let declared_channels = track.codec_params.channels.map(|c| c.count());
    let declared_frames = track.codec_params.n_frames;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| BufferError::decode(path, e))?;

    let mut planar: Vec<Vec<f32>> = Vec::new();
    let mut interleaved: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(BufferError::decode(path, e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(reason)) => {
                tracing::debug!("Skipping undecodable packet in {:?}: {}", path, reason);
                continue;
            }
            Err(e) => return Err(BufferError::decode(path, e)),
        };

        let spec = *decoded.spec();
        let channel_count = spec.channels.count();
        let frames = decoded.frames();
        if frames == 0 {
            continue;
        }

        if planar.is_empty() {
            planar = allocate_channels(channel_count, declared_frames)?;
        } else if planar.len() != channel_count {
            return Err(BufferError::decode(
                path,
                format!(
                    "channel count changed mid-stream from {} to {}",
                    planar.len(),
                    channel_count
                ),
            ));
        }

        if interleaved
            .as_ref()
            .is_some_and(|buffer| buffer.capacity() < decoded.capacity() * channel_count)
        {
            interleaved = None;
        }
        let sample_buffer = interleaved
            .get_or_insert_with(|| SampleBuffer::new(decoded.capacity() as u64, spec));
        sample_buffer.copy_interleaved_ref(decoded);

        for channel in planar.iter_mut() {
            channel
                .try_reserve(frames)
                .map_err(|_| BufferError::Allocation {
                    frames: channel.len() + frames,
                })?;
        }
        for frame in sample_buffer.samples().chunks_exact(channel_count) {
            for (channel, sample) in planar.iter_mut().zip(frame) {
                channel.push(*sample);
            }
        }
    }

    if planar.is_empty() {
        planar = vec![Vec::new(); declared_channels.unwrap_or(1).max(1)];
    }

    let buffer = AudioBuffer::from_planar(sample_rate, planar)?;
    tracing::info!(
        "Loaded {:?}: {} Hz, {} channel(s), {} frames ({:.1}s)",
        path,
        buffer.sample_rate(),
        buffer.channel_count(),
        buffer.frame_count(),
        buffer.duration().as_secs_f64()
    );
    Ok(buffer)
}

fn allocate_channels(
    channel_count: usize,
    declared_frames: Option<u64>,
) -> Result<Vec<Vec<f32>>, BufferError> {
    let frames = declared_frames.unwrap_or(0) as usize;
    (0..channel_count.max(1))
        .map(|_| {
            let mut channel = Vec::new();
            channel
                .try_reserve_exact(frames)
                .map_err(|_| BufferError::Allocation { frames })?;
            Ok(channel)
        })
        .collect()
}
