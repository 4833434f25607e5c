//! Build the script captions.

use std::path::PathBuf;

use scriptcast_timeline::{
    build_subtitles, load_snapshot, subtitle_filename, Mp3DurationResolver, SubtitleFormat,
};

use super::load_project;

pub fn run(path: PathBuf, format: String, output: Option<PathBuf>) -> anyhow::Result<()> {
    let format: SubtitleFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let project = load_project(&path)?;
    let snapshot = load_snapshot(&project, &project.audio_store())?;

    let output_path = output.unwrap_or_else(|| {
        project
            .exports_dir()
            .join(subtitle_filename(&project.script.id, format))
    });

    let text = build_subtitles(&snapshot, &Mp3DurationResolver, format);
    let cues = text.matches(" --> ").count();

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&output_path, &text)?;

    println!("Subtitles written: {}", output_path.display());
    println!("  Type: {}", format.mime_type());
    println!("  Cues: {cues}");
    Ok(())
}
