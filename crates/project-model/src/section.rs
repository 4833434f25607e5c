//! Narration sections and their words.
//!
//! A section is one narration unit of a script. Its lifecycle is encoded in
//! [`SectionKind`]: blank sections have no words at all, pending sections have
//! words without timing, and generated sections own synthesized audio whose
//! words carry offsets relative to the start of that audio.

use serde::{Deserialize, Serialize};

/// A single word of narration text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Word {
    /// Raw token sent to speech synthesis.
    pub text: String,

    /// Form shown in captions. May differ from `text` when a long token is
    /// split across several caption fragments.
    pub displayed_text: String,

    /// Whether this word is a fragment produced by caption splitting.
    #[serde(default)]
    pub is_caption_split: bool,

    /// Start offset in seconds from the beginning of the owning section's
    /// audio. Absent until synthesis reports a timepoint for this word.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
}

impl Word {
    /// A word whose caption form equals its spoken form.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            displayed_text: text.clone(),
            text,
            is_caption_split: false,
            start: None,
        }
    }

    /// Same word, with a section-relative start offset.
    pub fn at(mut self, start: f64) -> Self {
        self.start = Some(start);
        self
    }

    /// Empty placeholder word held by freshly created sections.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Copy of this word with timing stripped.
    pub fn untimed(&self) -> Self {
        Self {
            start: None,
            ..self.clone()
        }
    }
}

/// Split plain text into words on whitespace.
pub fn words_from_text(text: &str) -> Vec<Word> {
    text.split_whitespace().map(Word::new).collect()
}

/// Lifecycle state of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionKind {
    /// A slot with no narration. Never produces audio or captions.
    Blank,

    /// Narration text awaiting synthesis.
    Pending { words: Vec<Word> },

    /// Synthesis completed; audio is stored under the section's audio key.
    Generated { words: Vec<Word> },
}

/// One narration unit of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier.
    pub id: String,

    /// Caption offset in seconds applied to every word of this section.
    /// Does not move the section's audio.
    #[serde(default)]
    pub delay: f64,

    #[serde(flatten)]
    pub kind: SectionKind,
}

impl Section {
    /// Create a pending section holding a single placeholder word.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            delay: 0.0,
            kind: SectionKind::Pending {
                words: vec![Word::placeholder()],
            },
        }
    }

    /// Create a blank section.
    pub fn blank(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            delay: 0.0,
            kind: SectionKind::Blank,
        }
    }

    /// Create a generated section from already-timed words.
    pub fn generated(id: impl Into<String>, delay: f64, words: Vec<Word>) -> Self {
        Self {
            id: id.into(),
            delay,
            kind: SectionKind::Generated { words },
        }
    }

    /// Whether synthesis has completed for this section.
    pub fn is_generated(&self) -> bool {
        matches!(self.kind, SectionKind::Generated { .. })
    }

    /// Whether this is a blank section.
    pub fn is_blank(&self) -> bool {
        matches!(self.kind, SectionKind::Blank)
    }

    /// Words in reading order. Blank sections have none.
    pub fn words(&self) -> &[Word] {
        match &self.kind {
            SectionKind::Blank => &[],
            SectionKind::Pending { words } | SectionKind::Generated { words } => words,
        }
    }

    /// Words that carry timing. Only generated sections can have any.
    pub fn timed_words(&self) -> impl Iterator<Item = (f64, &Word)> {
        let words: &[Word] = match &self.kind {
            SectionKind::Generated { words } => words,
            _ => &[],
        };
        words.iter().filter_map(|w| w.start.map(|s| (s, w)))
    }

    /// Plain narration text, words joined by single spaces.
    pub fn text(&self) -> String {
        self.words()
            .iter()
            .map(|w| w.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Replace the narration text. The section returns to the pending
    /// state, discarding any previous timing.
    pub fn set_text(&mut self, text: &str) {
        let mut words = words_from_text(text);
        if words.is_empty() {
            words.push(Word::placeholder());
        }
        self.kind = SectionKind::Pending { words };
    }

    /// Drop generated timing, keeping the words.
    pub fn invalidate(&mut self) {
        if let SectionKind::Generated { words } = &self.kind {
            let words = words.iter().map(Word::untimed).collect();
            self.kind = SectionKind::Pending { words };
        }
    }
}
