//! Script audio assembly.
//!
//! Section audio is joined byte-for-byte in narration order. MPEG audio frames
//! are self-delimiting, so streams from one encoder configuration concatenate
//! into a playable stream without re-encoding. Nothing checks that the inputs
//! actually share a configuration, and no silence is inserted for sections
//! without audio or for section delays.

use crate::snapshot::ResolvedSection;

/// Concatenate the audio of every generated section.
///
/// Returns an empty buffer when no section has audio.
pub fn concatenate(sections: &[ResolvedSection]) -> Vec<u8> {
    let total: usize = sections
        .iter()
        .filter_map(ResolvedSection::generated_audio)
        .map(<[u8]>::len)
        .sum();

    let mut output = Vec::with_capacity(total);
    for audio in sections.iter().filter_map(ResolvedSection::generated_audio) {
        output.extend_from_slice(audio);
    }

    tracing::debug!(
        sections = sections.len(),
        bytes = output.len(),
        "Concatenated section audio"
    );
    output
}
