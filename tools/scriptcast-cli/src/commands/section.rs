//! Edit narration sections.

use std::path::PathBuf;

use clap::Subcommand;
use scriptcast_project_model::{audio_key, AudioStore};
use scriptcast_timeline::{synthesize_section, PrerecordedSynthesizer, Timepoint};

use super::{load_project, placement};

#[derive(Subcommand)]
pub enum SectionCommand {
    /// Add a new pending section
    Add {
        /// Path to the project directory
        path: PathBuf,

        /// Insert before this section
        #[arg(long)]
        before: Option<String>,

        /// Insert after this section
        #[arg(long)]
        after: Option<String>,
    },

    /// Delete a section and its audio
    Delete {
        path: PathBuf,
        id: String,
    },

    /// Swap the positions of two sections
    Swap {
        path: PathBuf,
        a: String,
        b: String,
    },

    /// Replace a section's narration text (discards generated audio)
    Text {
        path: PathBuf,
        id: String,
        text: String,
    },

    /// Discard generated audio and timing, keeping the text
    Reset {
        path: PathBuf,
        id: String,
    },

    /// Set a section's caption delay in seconds
    Delay {
        path: PathBuf,
        id: String,
        #[arg(allow_hyphen_values = true)]
        seconds: f64,
    },

    /// Attach synthesized audio and mark timepoints to a section
    Attach {
        path: PathBuf,
        id: String,

        /// MP3 audio for the section
        #[arg(long)]
        audio: PathBuf,

        /// JSON array of `{ "mark_name": "w0", "seconds": 0.0 }` entries
        #[arg(long)]
        timepoints: PathBuf,
    },
}

pub fn run(action: SectionCommand) -> anyhow::Result<()> {
    match action {
        SectionCommand::Add {
            path,
            before,
            after,
        } => {
            let mut project = load_project(&path)?;
            let at = placement(before.as_deref(), after.as_deref())?;
            let section = project.add_section(at)?;
            println!("Added section {}", section.id);
        }
        SectionCommand::Delete { path, id } => {
            let mut project = load_project(&path)?;
            project.delete_section(&id)?;
            println!("Deleted section {id}");
        }
        SectionCommand::Swap { path, a, b } => {
            let mut project = load_project(&path)?;
            project.script.swap_sections(&a, &b)?;
            project.save_script()?;
            println!("Swapped sections {a} and {b}");
        }
        SectionCommand::Text { path, id, text } => {
            let project = load_project(&path)?;
            let mut section = project.load_section(&id)?;
            let was_generated = section.is_generated();
            section.set_text(&text);
            project.save_section(&section)?;
            if was_generated {
                project.audio_store().delete(&audio_key(&id))?;
                tracing::info!(section_id = %id, "Discarded generated audio after text change");
            }
            println!("Section {id}: \"{}\"", section.text());
        }
        SectionCommand::Reset { path, id } => {
            let project = load_project(&path)?;
            let section = project.reset_section(&id)?;
            println!("Section {id}: pending \"{}\"", section.text());
        }
        SectionCommand::Delay { path, id, seconds } => {
            if !seconds.is_finite() {
                anyhow::bail!("Delay must be a finite number of seconds");
            }
            let project = load_project(&path)?;
            let mut section = project.load_section(&id)?;
            section.delay = seconds;
            project.save_section(&section)?;
            println!("Section {id}: delay {seconds:.3}s");
        }
        SectionCommand::Attach {
            path,
            id,
            audio,
            timepoints,
        } => {
            let project = load_project(&path)?;
            let section = project.load_section(&id)?;

            let audio = std::fs::read(&audio)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", audio.display()))?;
            let timepoints_json = std::fs::read_to_string(&timepoints)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", timepoints.display()))?;
            let timepoints: Vec<Timepoint> = serde_json::from_str(&timepoints_json)?;

            let synthesizer = PrerecordedSynthesizer::new(audio, timepoints);
            let store = project.audio_store();
            let generated = synthesize_section(&synthesizer, &store, &section)?;
            project.save_section(&generated)?;

            println!(
                "Section {id}: generated, {} of {} words timed",
                generated.timed_words().count(),
                generated.words().len()
            );
        }
    }
    Ok(())
}
