//! Speech synthesis seam.
//!
//! The synthesis service itself is external. This module builds the SSML
//! request (one `<mark>` in front of every word), defines the trait an
//! injected client implements, and turns the reported mark timepoints back
//! into word start offsets.

use serde::{Deserialize, Serialize};

use scriptcast_project_model::{audio_key, AudioStore, ProjectError, Section, SectionKind, Word};

/// Offset within synthesized audio at which a named mark was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timepoint {
    pub mark_name: String,
    pub seconds: f64,
}

/// What a synthesis call returns.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOutput {
    pub audio: Vec<u8>,
    pub timepoints: Vec<Timepoint>,
}

/// Errors raised while synthesizing a section.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("Section {id} is blank and has nothing to synthesize")]
    BlankSection { id: String },

    #[error("Section {id} has no text")]
    NoText { id: String },

    #[error("Speech service failed: {message}")]
    Service { message: String },

    #[error(transparent)]
    Storage(#[from] ProjectError),
}

impl From<SynthesisError> for scriptcast_common::ScriptcastError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::Storage(e) => e.into(),
            other => scriptcast_common::ScriptcastError::synthesis(other.to_string()),
        }
    }
}

/// A text-to-speech client.
pub trait SpeechSynthesizer {
    fn synthesize(&self, ssml: &str) -> Result<SynthesisOutput, SynthesisError>;
}

/// Synthesizer that replays audio and timepoints rendered elsewhere.
#[derive(Debug, Clone)]
pub struct PrerecordedSynthesizer {
    output: SynthesisOutput,
}

impl PrerecordedSynthesizer {
    pub fn new(audio: Vec<u8>, timepoints: Vec<Timepoint>) -> Self {
        Self {
            output: SynthesisOutput { audio, timepoints },
        }
    }
}

impl SpeechSynthesizer for PrerecordedSynthesizer {
    fn synthesize(&self, _ssml: &str) -> Result<SynthesisOutput, SynthesisError> {
        Ok(self.output.clone())
    }
}

/// Mark name placed before the word at `index`.
pub fn mark_name(index: usize) -> String {
    format!("w{index}")
}

fn parse_mark(name: &str) -> Option<usize> {
    name.strip_prefix('w')?.parse().ok()
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the SSML document for a list of words.
///
/// Empty words are skipped but keep their index, so mark names always refer
/// to positions in the original list.
pub fn build_ssml(words: &[Word]) -> String {
    let body = words
        .iter()
        .enumerate()
        .filter(|(_, w)| !w.text.trim().is_empty())
        .map(|(i, w)| format!("<mark name='{}'/>{}", mark_name(i), escape_xml(&w.text)))
        .collect::<Vec<_>>()
        .join(" ");
    format!("<speak>{body}</speak>")
}

/// Apply reported timepoints to a section's words.
///
/// Words whose mark was not reported stay untimed. The returned section is
/// generated and keeps the original id and delay.
pub fn apply_synthesis(section: &Section, timepoints: &[Timepoint]) -> Result<Section, SynthesisError> {
    if section.is_blank() {
        return Err(SynthesisError::BlankSection {
            id: section.id.clone(),
        });
    }

    let mut words: Vec<Word> = section.words().iter().map(Word::untimed).collect();
    for tp in timepoints {
        match parse_mark(&tp.mark_name).and_then(|i| words.get_mut(i)) {
            Some(word) => word.start = Some(tp.seconds.max(0.0)),
            None => tracing::debug!(
                section_id = %section.id,
                mark = %tp.mark_name,
                "Ignoring timepoint for unknown mark"
            ),
        }
    }

    Ok(Section {
        id: section.id.clone(),
        delay: section.delay,
        kind: SectionKind::Generated { words },
    })
}

/// Synthesize a section, store its audio, and return the generated section.
///
/// On failure the section is left untouched and remains not generated.
pub fn synthesize_section(
    synthesizer: &dyn SpeechSynthesizer,
    store: &dyn AudioStore,
    section: &Section,
) -> Result<Section, SynthesisError> {
    if section.is_blank() {
        return Err(SynthesisError::BlankSection {
            id: section.id.clone(),
        });
    }
    if section.text().is_empty() {
        return Err(SynthesisError::NoText {
            id: section.id.clone(),
        });
    }

    let ssml = build_ssml(section.words());
    let output = synthesizer.synthesize(&ssml)?;
    if output.audio.is_empty() {
        return Err(SynthesisError::Service {
            message: format!("no audio returned for section {}", section.id),
        });
    }

    let generated = apply_synthesis(section, &output.timepoints)?;
    store.put(&audio_key(&section.id), &output.audio)?;

    tracing::info!(
        section_id = %section.id,
        bytes = output.audio.len(),
        timepoints = output.timepoints.len(),
        "Synthesized section"
    );
    Ok(generated)
}
