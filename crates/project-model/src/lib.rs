//! Scriptcast Project Model
//!
//! Defines the core data contracts for Scriptcast projects:
//! - **Sections:** Narration units and their (optionally timed) words
//! - **Script:** Top-level metadata, narration order, and visual scenes
//! - **Store:** The on-disk project bundle and the audio object store
//!
//! Word timestamps are seconds relative to the start of the owning
//! section's synthesized audio.

pub mod script;
pub mod section;
pub mod store;

pub use script::*;
pub use section::*;
pub use store::*;
