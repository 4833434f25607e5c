//! Subtitle generation in SRT and VTT formats.
//!
//! Timestamps are clamped to zero when negative and rounded to whole
//! milliseconds with ties going to the even millisecond.

use crate::flatten::TimedWord;

/// Generate SRT subtitle content from time-sorted caption entries.
///
/// Each entry is a 1-based index line, a time range line, the text and a
/// blank line; lines are joined with `\n`. No entries yields an empty string.
pub fn render_srt(words: &[TimedWord]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(words.len() * 4);

    for (i, word) in words.iter().enumerate() {
        lines.push((i + 1).to_string());
        lines.push(format!(
            "{} --> {}",
            format_srt_time(word.start),
            format_srt_time(word.end),
        ));
        lines.push(word.text.clone());
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Generate WebVTT subtitle content from time-sorted caption entries.
pub fn render_vtt(words: &[TimedWord]) -> String {
    let mut lines: Vec<String> = vec!["WEBVTT".to_string(), String::new()];

    for word in words {
        lines.push(format!(
            "{} --> {}",
            format_vtt_time(word.start),
            format_vtt_time(word.end),
        ));
        lines.push(word.text.clone());
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Whole milliseconds for a caption time.
fn to_millis(secs: f64) -> u64 {
    if secs.is_nan() || secs <= 0.0 {
        return 0;
    }
    (secs * 1000.0).round_ties_even() as u64
}

fn format_time(secs: f64, separator: char) -> String {
    let total_ms = to_millis(secs);
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02}{separator}{millis:03}")
}

/// Format seconds as SRT timestamp: HH:MM:SS,mmm
pub fn format_srt_time(secs: f64) -> String {
    format_time(secs, ',')
}

/// Format seconds as VTT timestamp: HH:MM:SS.mmm
pub fn format_vtt_time(secs: f64) -> String {
    format_time(secs, '.')
}
