//! Immutable input snapshot for a build.
//!
//! Builds never read the store while computing. Everything a build needs is
//! fetched up front into an owned list of [`ResolvedSection`]s.

use scriptcast_common::ScriptcastResult;
use scriptcast_project_model::{audio_key, AudioStore, ProjectDir, Section};

/// A section together with its synthesized audio, if any was fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSection {
    pub section: Section,
    pub audio: Option<Vec<u8>>,
}

impl ResolvedSection {
    pub fn new(section: Section, audio: Option<Vec<u8>>) -> Self {
        Self { section, audio }
    }

    /// Audio bytes for a generated section. `None` for every other state.
    pub fn generated_audio(&self) -> Option<&[u8]> {
        if self.section.is_generated() {
            self.audio.as_deref()
        } else {
            None
        }
    }
}

/// Load every section of a project in narration order along with the audio
/// of each generated section.
///
/// A missing section document fails the whole load. A generated section
/// whose audio object is missing is kept with no audio.
pub fn load_snapshot(
    project: &ProjectDir,
    store: &dyn AudioStore,
) -> ScriptcastResult<Vec<ResolvedSection>> {
    let sections = project.resolve_sections()?;
    let mut resolved = Vec::with_capacity(sections.len());

    for section in sections {
        let audio = if section.is_generated() {
            let audio = store.get(&audio_key(&section.id))?;
            if audio.is_none() {
                tracing::warn!(
                    section_id = %section.id,
                    "Generated section has no stored audio"
                );
            }
            audio
        } else {
            None
        };
        resolved.push(ResolvedSection::new(section, audio));
    }

    tracing::debug!(
        script_id = %project.script.id,
        sections = resolved.len(),
        "Loaded build snapshot"
    );
    Ok(resolved)
}
