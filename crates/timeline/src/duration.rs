//! Playback duration of synthesized section audio.
//!
//! Sections are synthesized as MPEG audio (MP3). Duration comes from the
//! container's own frame accounting: the Xing/Info header frame count when
//! the stream carries one, otherwise the sum of every frame's sample count.
//!
//! The reader is lenient. Without a Xing/Info header the demuxer may estimate
//! the frame count from the byte length, so trailing junk lengthens the result
//! slightly, and a stream cut off mid-frame still resolves to `Ok` with the
//! length of what is there. Only input with no recognizable MPEG audio at all
//! is a [`DecodeError`].

use std::io::Cursor;

use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::build::AUDIO_MIME;

/// Audio bytes could not be read as the expected container.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("audio stream is empty")]
    Empty,

    #[error("malformed audio stream: {0}")]
    Malformed(#[from] SymphoniaError),

    #[error("audio stream has no playable track")]
    NoTrack,

    #[error("audio track does not declare a sample rate")]
    NoSampleRate,
}

impl From<DecodeError> for scriptcast_common::ScriptcastError {
    fn from(err: DecodeError) -> Self {
        scriptcast_common::ScriptcastError::decode(err.to_string())
    }
}

/// Resolves the playback length of one section's audio.
pub trait DurationResolver {
    /// Duration in seconds.
    fn duration(&self, audio: &[u8]) -> Result<f64, DecodeError>;
}

impl<F> DurationResolver for F
where
    F: Fn(&[u8]) -> Result<f64, DecodeError>,
{
    fn duration(&self, audio: &[u8]) -> Result<f64, DecodeError> {
        self(audio)
    }
}

/// Duration resolver for MP3 section audio.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mp3DurationResolver;

impl DurationResolver for Mp3DurationResolver {
    fn duration(&self, audio: &[u8]) -> Result<f64, DecodeError> {
        if audio.is_empty() {
            return Err(DecodeError::Empty);
        }

        let source = Cursor::new(audio.to_vec());
        let stream = MediaSourceStream::new(Box::new(source), MediaSourceStreamOptions::default());

        let mut hint = Hint::new();
        hint.with_extension("mp3").mime_type(AUDIO_MIME);

        let probed = symphonia::default::get_probe().format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )?;
        let mut format = probed.format;

        let track = format.default_track().ok_or(DecodeError::NoTrack)?;
        let track_id = track.id;
        let declared_frames = track.codec_params.n_frames;
        let sample_rate = track
            .codec_params
            .sample_rate
            .filter(|rate| *rate > 0)
            .ok_or(DecodeError::NoSampleRate)?;

        let frames = match declared_frames {
            Some(frames) => frames,
            None => count_frames(format.as_mut(), track_id)?,
        };

        Ok(frames as f64 / f64::from(sample_rate))
    }
}

/// Walk every packet of a track, summing sample counts.
fn count_frames(format: &mut dyn FormatReader, track_id: u32) -> Result<u64, DecodeError> {
    let mut frames = 0u64;
    loop {
        match format.next_packet() {
            Ok(packet) => {
                if packet.track_id() == track_id {
                    frames += packet.dur();
                }
            }
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(frames)
}
