use scriptcast_project_model::{audio_key, AudioStore, Placement, ProjectDir, Section};
use scriptcast_timeline::{
    build_audio, build_subtitles, format_srt_time, load_snapshot, synthesize_section,
    DurationResolver, Mp3DurationResolver, PrerecordedSynthesizer, SubtitleFormat, Timepoint,
};

/// A silent constant-bitrate MP3 stream (MPEG-1 Layer III, 128 kbps,
/// 44.1 kHz, mono) of `frames` frames.
fn silent_mp3(frames: usize) -> Vec<u8> {
    const HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0xC4];
    const FRAME_LEN: usize = 417;
    let mut out = Vec::with_capacity(frames * FRAME_LEN);
    for _ in 0..frames {
        out.extend_from_slice(&HEADER);
        out.resize(out.len() + FRAME_LEN - HEADER.len(), 0);
    }
    out
}

fn tp(mark: &str, seconds: f64) -> Timepoint {
    Timepoint {
        mark_name: mark.to_string(),
        seconds,
    }
}

/// Create a project with two narrated sections and one pending section in
/// between.
fn narrated_project(dir: &std::path::Path) -> (ProjectDir, Vec<u8>, Vec<u8>) {
    let mut project = ProjectDir::create(dir, "Two sections").unwrap();
    let store = project.audio_store();

    let first_audio = silent_mp3(80);
    let second_audio = silent_mp3(60);

    let mut first = project.add_section(Placement::End).unwrap();
    first.set_text("Hi");
    let first = synthesize_section(
        &PrerecordedSynthesizer::new(first_audio.clone(), vec![tp("w0", 0.5)]),
        &store,
        &first,
    )
    .unwrap();
    project.save_section(&first).unwrap();

    let mut idle = project.add_section(Placement::End).unwrap();
    idle.set_text("still a draft");
    project.save_section(&idle).unwrap();

    let mut second = project.add_section(Placement::End).unwrap();
    second.set_text("Bye");
    let second = synthesize_section(
        &PrerecordedSynthesizer::new(second_audio.clone(), vec![tp("w0", 0.2)]),
        &store,
        &second,
    )
    .unwrap();
    project.save_section(&second).unwrap();

    (project, first_audio, second_audio)
}

#[test]
fn audio_is_concatenated_in_narration_order() {
    let dir = tempfile::tempdir().unwrap();
    let (project, first_audio, second_audio) = narrated_project(dir.path());

    let snapshot = load_snapshot(&project, &project.audio_store()).unwrap();
    let audio = build_audio(&snapshot);

    let mut expected = first_audio.clone();
    expected.extend_from_slice(&second_audio);
    assert_eq!(audio, expected);

    // The joined stream is itself a valid MP3 whose length is the sum of its parts.
    let resolver = Mp3DurationResolver;
    let whole = resolver.duration(&audio).unwrap();
    let parts = resolver.duration(&first_audio).unwrap() + resolver.duration(&second_audio).unwrap();
    assert!((whole - parts).abs() < 0.1, "whole {whole} vs parts {parts}");
}

#[test]
fn subtitles_use_absolute_times() {
    let dir = tempfile::tempdir().unwrap();
    let (project, first_audio, second_audio) = narrated_project(dir.path());

    let resolver = Mp3DurationResolver;
    let first_len = resolver.duration(&first_audio).unwrap();
    let second_len = resolver.duration(&second_audio).unwrap();

    let snapshot = load_snapshot(&project, &project.audio_store()).unwrap();
    let srt = build_subtitles(&snapshot, &resolver, SubtitleFormat::Srt);

    let expected = format!(
        "1\n{} --> {}\nHi\n\n2\n{} --> {}\nBye\n",
        format_srt_time(0.5),
        format_srt_time(first_len + 0.2),
        format_srt_time(first_len + 0.2),
        format_srt_time(first_len + second_len),
    );
    assert_eq!(srt, expected);

    let vtt = build_subtitles(&snapshot, &resolver, SubtitleFormat::Vtt);
    assert!(vtt.starts_with("WEBVTT\n\n00:00:00.500 --> "));
    assert_eq!(vtt.matches(" --> ").count(), 2);
}

#[test]
fn corrupt_section_audio_contributes_no_time() {
    let dir = tempfile::tempdir().unwrap();
    let (project, _, second_audio) = narrated_project(dir.path());
    let store = project.audio_store();

    let first_id = project.script.section_ids[0].clone();
    store
        .put(&audio_key(&first_id), b"this is not audio at all, just text")
        .unwrap();

    let resolver = Mp3DurationResolver;
    let second_len = resolver.duration(&second_audio).unwrap();
    let snapshot = load_snapshot(&project, &store).unwrap();
    let srt = build_subtitles(&snapshot, &resolver, SubtitleFormat::Srt);

    // "Hi" at 0.5 and "Bye" at 0.0 + 0.2 swap places once the first section collapses.
    let expected = format!(
        "1\n{} --> {}\nBye\n\n2\n{} --> {}\nHi\n",
        format_srt_time(0.2),
        format_srt_time(0.5),
        format_srt_time(0.5),
        format_srt_time(second_len),
    );
    assert_eq!(srt, expected);
}

#[test]
fn unsynthesized_script_builds_empty_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let mut project = ProjectDir::create(dir.path(), "Drafts").unwrap();
    let mut section = project.add_section(Placement::End).unwrap();
    section.set_text("nothing generated");
    project.save_section(&section).unwrap();
    project
        .save_section(&Section::blank("unused"))
        .unwrap();

    let snapshot = load_snapshot(&project, &project.audio_store()).unwrap();
    assert!(build_audio(&snapshot).is_empty());
    assert_eq!(
        build_subtitles(&snapshot, &Mp3DurationResolver, SubtitleFormat::Srt),
        ""
    );
}

#[test]
fn missing_section_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (mut project, _, _) = narrated_project(dir.path());
    project
        .script
        .insert_section("deleted-elsewhere", Placement::End)
        .unwrap();

    let err = load_snapshot(&project, &project.audio_store()).unwrap_err();
    assert!(err.is_not_found());
}
