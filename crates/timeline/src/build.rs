//! Script-level build artifacts.
//!
//! Both builds are pure functions of a [`ResolvedSection`] snapshot and can
//! run concurrently for different scripts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::concat::concatenate;
use crate::duration::DurationResolver;
use crate::flatten::flatten;
use crate::snapshot::ResolvedSection;
use crate::subtitles::{render_srt, render_vtt};

/// MIME type of built script audio.
pub const AUDIO_MIME: &str = "audio/mpeg";

/// MIME type of SRT subtitles.
pub const SRT_MIME: &str = "application/x-subrip; charset=utf-8";

/// MIME type of WebVTT subtitles.
pub const VTT_MIME: &str = "text/vtt; charset=utf-8";

/// Caption output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    #[default]
    Srt,
    Vtt,
}

impl SubtitleFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "srt",
            SubtitleFormat::Vtt => "vtt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            SubtitleFormat::Srt => SRT_MIME,
            SubtitleFormat::Vtt => VTT_MIME,
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for SubtitleFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "srt" => Ok(SubtitleFormat::Srt),
            "vtt" | "webvtt" => Ok(SubtitleFormat::Vtt),
            other => Err(format!("Unknown subtitle format: {other}. Use: srt, vtt")),
        }
    }
}

/// Suggested download filename for a script's audio.
pub fn audio_filename(script_id: &str) -> String {
    format!("{script_id}.mp3")
}

/// Suggested download filename for a script's subtitles.
pub fn subtitle_filename(script_id: &str, format: SubtitleFormat) -> String {
    format!("{script_id}.{}", format.extension())
}

/// Build the single audio track for a script.
pub fn build_audio(sections: &[ResolvedSection]) -> Vec<u8> {
    concatenate(sections)
}

/// Build the caption track for a script.
pub fn build_subtitles(
    sections: &[ResolvedSection],
    resolver: &impl DurationResolver,
    format: SubtitleFormat,
) -> String {
    let timeline = flatten(sections, resolver);
    match format {
        SubtitleFormat::Srt => render_srt(&timeline.words),
        SubtitleFormat::Vtt => render_vtt(&timeline.words),
    }
}
