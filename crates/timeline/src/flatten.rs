//! Timeline flattening.
//!
//! Each section's words carry start offsets relative to that section's own
//! audio. Flattening projects them onto one script-wide clock:
//!
//! ```text
//! absolute_start = cursor + section.delay + word.start
//! ```
//!
//! where `cursor` is the summed audio duration of all earlier sections.
//! `delay` shifts captions only; it never advances the cursor, so the audio
//! track gains no gap for it.
//!
//! A word ends where the next word (in time order) starts. The last word ends
//! at the end of all audio.

use crate::duration::DurationResolver;
use crate::snapshot::ResolvedSection;

/// A caption entry on the script-wide clock.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedWord {
    /// Absolute start in seconds.
    pub start: f64,
    /// Absolute end in seconds.
    pub end: f64,
    /// Caption text.
    pub text: String,
}

/// Result of flattening a script.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatTimeline {
    /// Sum of all resolved section durations.
    pub total_duration: f64,
    /// Resolved duration of each input section, in input order.
    pub section_durations: Vec<f64>,
    /// Caption entries sorted by start time.
    pub words: Vec<TimedWord>,
}

impl FlatTimeline {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Resolve one section's duration. Undecodable audio counts as zero and is
/// reported.
fn section_duration(resolved: &ResolvedSection, resolver: &impl DurationResolver) -> f64 {
    let section = &resolved.section;
    if !section.is_generated() {
        return 0.0;
    }

    let Some(audio) = resolved.generated_audio() else {
        tracing::warn!(section_id = %section.id, "Generated section has no audio; using zero duration");
        return 0.0;
    };

    match resolver.duration(audio) {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => secs,
        Ok(secs) => {
            tracing::warn!(
                section_id = %section.id,
                duration_secs = secs,
                "Resolver returned an invalid duration; using zero"
            );
            0.0
        }
        Err(e) => {
            tracing::warn!(
                section_id = %section.id,
                bytes = audio.len(),
                error = %e,
                "Failed to decode section audio; using zero duration"
            );
            0.0
        }
    }
}

/// Flatten sections into one time-sorted caption track.
pub fn flatten(sections: &[ResolvedSection], resolver: &impl DurationResolver) -> FlatTimeline {
    let mut cursor = 0.0_f64;
    let mut section_durations = Vec::with_capacity(sections.len());
    let mut starts: Vec<(f64, &str)> = Vec::new();

    for resolved in sections {
        let section = &resolved.section;
        let duration = section_duration(resolved, resolver);

        for (offset, word) in section.timed_words() {
            let start = cursor + section.delay + offset;
            starts.push((start, word.displayed_text.as_str()));
        }

        tracing::trace!(
            section_id = %section.id,
            cursor_secs = cursor,
            duration_secs = duration,
            "Placed section"
        );
        cursor += duration;
        section_durations.push(duration);
    }

    // Stable: equal starts keep encounter order.
    starts.sort_by(|a, b| a.0.total_cmp(&b.0));

    let total_duration = cursor;
    let words = starts
        .iter()
        .enumerate()
        .map(|(i, (start, text))| TimedWord {
            start: *start,
            end: starts.get(i + 1).map_or(total_duration, |next| next.0),
            text: (*text).to_string(),
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        sections = sections.len(),
        words = words.len(),
        total_secs = total_duration,
        "Flattened timeline"
    );

    FlatTimeline {
        total_duration,
        section_durations,
        words,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::DecodeError;
    use scriptcast_project_model::{Section, Word};
    use std::sync::{Arc, Mutex};

    /// Test resolver: the audio's first byte is its duration in tenths of a second.
    fn tenths(audio: &[u8]) -> Result<f64, DecodeError> {
        audio
            .first()
            .map(|b| f64::from(*b) / 10.0)
            .ok_or(DecodeError::Empty)
    }

    fn generated(id: &str, delay: f64, tenths_len: u8, words: &[(&str, f64)]) -> ResolvedSection {
        let words = words.iter().map(|(t, s)| Word::new(*t).at(*s)).collect();
        ResolvedSection::new(Section::generated(id, delay, words), Some(vec![tenths_len]))
    }

    fn triples(timeline: &FlatTimeline) -> Vec<(f64, f64, &str)> {
        timeline
            .words
            .iter()
            .map(|w| (w.start, w.end, w.text.as_str()))
            .collect()
    }

    #[test]
    fn test_two_sections() {
        let sections = vec![
            generated("a", 0.0, 20, &[("Hi", 0.5)]),
            generated("b", 0.0, 15, &[("Bye", 0.2)]),
        ];
        let timeline = flatten(&sections, &tenths);
        assert_eq!(timeline.total_duration, 3.5);
        assert_eq!(triples(&timeline), vec![(0.5, 2.2, "Hi"), (2.2, 3.5, "Bye")]);
    }

    #[test]
    fn test_delay_shifts_captions_not_audio() {
        let sections = vec![
            generated("a", 1.0, 10, &[("late", 0.0)]),
            generated("b", 0.0, 10, &[("next", 0.0)]),
        ];
        let timeline = flatten(&sections, &tenths);

        assert_eq!(timeline.words[0].start, 1.0);
        // Second section starts at cursor 1.0 regardless of the first delay.
        assert_eq!(timeline.words[1].start, 1.0);
        assert_eq!(timeline.total_duration, 2.0);
    }

    #[test]
    fn test_negative_delay_can_precede_section_audio() {
        let sections = vec![
            generated("a", 0.0, 10, &[("one", 0.0)]),
            generated("b", -1.5, 10, &[("two", 0.0)]),
        ];
        let timeline = flatten(&sections, &tenths);

        assert_eq!(triples(&timeline)[0], (-0.5, 0.0, "two"));
        assert_eq!(triples(&timeline)[1], (0.0, 2.0, "one"));
    }

    #[test]
    fn test_out_of_order_starts_are_sorted_stably() {
        let sections = vec![
            generated("a", 0.0, 10, &[("b", 0.6), ("a", 0.2), ("c", 0.6)]),
            generated("b", -0.4, 10, &[("d", 0.0)]),
        ];
        let timeline = flatten(&sections, &tenths);

        let texts: Vec<&str> = timeline.words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
        assert_eq!(timeline.words[1].end, 0.6);
        assert_eq!(timeline.words[2].end, 0.6);
    }

    #[test]
    fn test_pending_and_blank_sections_contribute_nothing() {
        let mut pending = Section::new("p");
        pending.set_text("not spoken yet");
        let sections = vec![
            ResolvedSection::new(pending, Some(vec![50])),
            ResolvedSection::new(Section::blank("b"), None),
            generated("g", 0.0, 10, &[("only", 0.3)]),
        ];
        let timeline = flatten(&sections, &tenths);

        assert_eq!(timeline.section_durations, vec![0.0, 0.0, 1.0]);
        assert_eq!(triples(&timeline), vec![(0.3, 1.0, "only")]);
    }

    #[test]
    fn test_untimed_words_are_skipped() {
        let section = Section::generated(
            "g",
            0.0,
            vec![Word::new("a").at(0.1), Word::new("lost"), Word::new("b").at(0.4)],
        );
        let timeline = flatten(&[ResolvedSection::new(section, Some(vec![10]))], &tenths);
        let texts: Vec<&str> = timeline.words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_displayed_text_is_used() {
        let mut word = Word::new("internationalization").at(0.0);
        word.displayed_text = "i18n".to_string();
        word.is_caption_split = true;
        let section = Section::generated("g", 0.0, vec![word]);
        let timeline = flatten(&[ResolvedSection::new(section, Some(vec![5]))], &tenths);
        assert_eq!(timeline.words[0].text, "i18n");
    }

    #[test]
    fn test_decode_failure_counts_as_zero() {
        let sections = vec![
            ResolvedSection::new(
                Section::generated("broken", 0.0, vec![Word::new("x").at(0.0)]),
                Some(vec![]),
            ),
            generated("ok", 0.0, 10, &[("y", 0.5)]),
        ];
        let timeline = flatten(&sections, &tenths);

        assert_eq!(timeline.section_durations, vec![0.0, 1.0]);
        assert_eq!(triples(&timeline), vec![(0.0, 0.5, "x"), (0.5, 1.0, "y")]);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a JSON subscriber and return the WARN events it emitted.
    fn warnings_during<T>(f: impl FnOnce() -> T) -> (T, Vec<serde_json::Value>) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();

        let value = tracing::subscriber::with_default(subscriber, f);
        let bytes = logs.0.lock().unwrap().clone();
        let events = String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (value, events)
    }

    #[test]
    fn test_decode_failure_is_logged_with_section_and_error() {
        let sections = vec![
            ResolvedSection::new(
                Section::generated("broken", 0.0, vec![Word::new("x").at(0.0)]),
                Some(vec![]),
            ),
            generated("ok", 0.0, 10, &[("y", 0.5)]),
        ];

        let (timeline, events) = warnings_during(|| flatten(&sections, &tenths));
        assert_eq!(timeline.section_durations, vec![0.0, 1.0]);

        assert_eq!(events.len(), 1, "{events:?}");
        let event = &events[0];
        assert_eq!(event["level"], "WARN");
        assert_eq!(event["fields"]["section_id"], "broken");
        assert_eq!(event["fields"]["bytes"], 0);
        assert_eq!(
            event["fields"]["error"],
            DecodeError::Empty.to_string().as_str()
        );
    }

    #[test]
    fn test_missing_audio_is_logged() {
        let sections = vec![ResolvedSection::new(
            Section::generated("silent", 0.0, vec![Word::new("x").at(0.2)]),
            None,
        )];

        let (_, events) = warnings_during(|| flatten(&sections, &tenths));
        assert_eq!(events.len(), 1, "{events:?}");
        assert_eq!(events[0]["fields"]["section_id"], "silent");
    }

    #[test]
    fn test_generated_without_audio_counts_as_zero() {
        let sections = vec![ResolvedSection::new(
            Section::generated("g", 0.0, vec![Word::new("x").at(0.2)]),
            None,
        )];
        let timeline = flatten(&sections, &tenths);
        assert_eq!(timeline.total_duration, 0.0);
        assert_eq!(triples(&timeline), vec![(0.2, 0.0, "x")]);
    }

    #[test]
    fn test_empty_input() {
        let timeline = flatten(&[], &tenths);
        assert!(timeline.is_empty());
        assert_eq!(timeline.total_duration, 0.0);
    }

    #[test]
    fn test_nothing_generated() {
        let sections = vec![
            ResolvedSection::new(Section::new("a"), None),
            ResolvedSection::new(Section::blank("b"), None),
        ];
        let timeline = flatten(&sections, &tenths);
        assert!(timeline.is_empty());
        assert_eq!(timeline.total_duration, 0.0);
    }
}
