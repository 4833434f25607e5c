//! Build the script audio track.

use std::path::PathBuf;

use scriptcast_timeline::{audio_filename, build_audio, load_snapshot, AUDIO_MIME};

use super::load_project;

pub fn run(path: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    let project = load_project(&path)?;
    let snapshot = load_snapshot(&project, &project.audio_store())?;

    let output_path =
        output.unwrap_or_else(|| project.exports_dir().join(audio_filename(&project.script.id)));

    let audio = build_audio(&snapshot);
    if audio.is_empty() {
        println!("No generated sections yet; writing an empty file.");
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&output_path, &audio)?;

    println!("Audio written: {}", output_path.display());
    println!("  Type: {AUDIO_MIME}");
    println!("  Size: {} bytes", audio.len());
    Ok(())
}
