//! Scriptcast Timeline Assembly
//!
//! Turns independently synthesized narration sections into script-wide
//! artifacts:
//! - **Duration:** Playback length of each section's MP3 audio
//! - **Flattening:** Section-relative word timings onto one absolute clock
//! - **Concatenation:** One audio track from all section audio
//! - **Subtitles:** SRT/VTT output from the flattened words
//! - **Synthesis:** SSML marks in, word timings out, for an injected TTS client
//!
//! Everything except [`snapshot::load_snapshot`] and
//! [`synthesis::synthesize_section`] is pure and performs no I/O.

pub mod build;
pub mod concat;
pub mod duration;
pub mod flatten;
pub mod snapshot;
pub mod subtitles;
pub mod synthesis;

pub use build::*;
pub use concat::concatenate;
pub use duration::{DecodeError, DurationResolver, Mp3DurationResolver};
pub use flatten::{flatten, FlatTimeline, TimedWord};
pub use snapshot::{load_snapshot, ResolvedSection};
pub use subtitles::*;
pub use synthesis::*;
