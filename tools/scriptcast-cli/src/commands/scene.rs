//! Edit visual scenes.

use std::path::PathBuf;

use clap::Subcommand;
use scriptcast_project_model::{new_id, Scene};

use super::{load_project, placement};

#[derive(Subcommand)]
pub enum SceneCommand {
    /// Add a new scene
    Add {
        /// Path to the project directory
        path: PathBuf,

        /// Insert before this scene
        #[arg(long)]
        before: Option<String>,

        /// Insert after this scene
        #[arg(long)]
        after: Option<String>,

        /// Media to show in the scene
        #[arg(long)]
        media: Option<String>,

        /// Number of narration intervals the scene spans
        #[arg(long, default_value = "0")]
        intervals: u32,
    },

    /// Delete a scene
    Delete { path: PathBuf, id: String },

    /// Swap the positions of two scenes
    Swap { path: PathBuf, a: String, b: String },

    /// Change a scene's media or interval count
    Edit {
        path: PathBuf,
        id: String,

        /// Media to show in the scene
        #[arg(long, conflicts_with = "clear_media")]
        media: Option<String>,

        /// Detach the scene's media
        #[arg(long)]
        clear_media: bool,

        /// Number of narration intervals the scene spans
        #[arg(long)]
        intervals: Option<u32>,
    },
}

pub fn run(action: SceneCommand) -> anyhow::Result<()> {
    match action {
        SceneCommand::Add {
            path,
            before,
            after,
            media,
            intervals,
        } => {
            let mut project = load_project(&path)?;
            let at = placement(before.as_deref(), after.as_deref())?;
            let scene = Scene {
                id: new_id(),
                media_id: media,
                interval_count: intervals,
            };
            let id = scene.id.clone();
            project.script.insert_scene(scene, at)?;
            project.save_script()?;
            println!("Added scene {id}");
        }
        SceneCommand::Delete { path, id } => {
            let mut project = load_project(&path)?;
            if !project.script.remove_scene(&id) {
                anyhow::bail!("Scene not found: {id}");
            }
            project.save_script()?;
            println!("Deleted scene {id}");
        }
        SceneCommand::Swap { path, a, b } => {
            let mut project = load_project(&path)?;
            project.script.swap_scenes(&a, &b)?;
            project.save_script()?;
            println!("Swapped scenes {a} and {b}");
        }
        SceneCommand::Edit {
            path,
            id,
            media,
            clear_media,
            intervals,
        } => {
            let mut project = load_project(&path)?;
            let Some(scene) = project.script.scene_mut(&id) else {
                anyhow::bail!("Scene not found: {id}");
            };
            if clear_media {
                scene.media_id = None;
            } else if media.is_some() {
                scene.media_id = media;
            }
            if let Some(intervals) = intervals {
                scene.interval_count = intervals;
            }
            let summary = format!(
                "Scene {id}: media={} intervals={}",
                scene.media_id.as_deref().unwrap_or("-"),
                scene.interval_count
            );
            project.script.touch();
            project.save_script()?;
            println!("{summary}");
        }
    }
    Ok(())
}
