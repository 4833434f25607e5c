//! Scriptcast CLI: command-line interface for narration scripts.
//!
//! Usage:
//!   scriptcast init <TITLE>            Create a new project
//!   scriptcast rename <PATH> <TITLE>   Change the script title
//!   scriptcast info <PATH>             Show project information
//!   scriptcast validate <PATH>         Validate a project bundle
//!   scriptcast section <ACTION> ...    Edit narration sections
//!   scriptcast scene <ACTION> ...      Edit visual scenes
//!   scriptcast audio <PATH>            Build the script audio track
//!   scriptcast subtitles <PATH>        Build the script captions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::{scene::SceneCommand, section::SectionCommand};

#[derive(Parser)]
#[command(
    name = "scriptcast",
    about = "Narration scripts to voice-over audio and word-level captions",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new empty project
    Init {
        /// Script title
        title: String,

        /// Parent directory (defaults to the configured projects directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Change the script title
    Rename {
        /// Path to the project directory
        path: PathBuf,

        /// New title
        title: String,
    },

    /// Show project information
    Info {
        /// Path to the project directory
        path: PathBuf,
    },

    /// Validate a project bundle
    Validate {
        /// Path to the project directory
        path: PathBuf,
    },

    /// Edit narration sections
    Section {
        #[command(subcommand)]
        action: SectionCommand,
    },

    /// Edit visual scenes
    Scene {
        #[command(subcommand)]
        action: SceneCommand,
    },

    /// Concatenate all generated section audio into one MP3
    Audio {
        /// Path to the project directory
        path: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build word-level captions for the whole script
    Subtitles {
        /// Path to the project directory
        path: PathBuf,

        /// Caption format: srt|vtt (defaults to the configured format)
        #[arg(long)]
        format: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = scriptcast_common::logging::with_bootstrap_logging(
        scriptcast_common::AppConfig::load,
    );

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    scriptcast_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Init { title, output } => {
            let output = output.unwrap_or_else(|| config.projects_dir.clone());
            commands::init::run(title, output)
        }
        Commands::Rename { path, title } => commands::rename::run(path, title),
        Commands::Info { path } => commands::info::run(path),
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Section { action } => commands::section::run(action),
        Commands::Scene { action } => commands::scene::run(action),
        Commands::Audio { path, output } => commands::audio::run(path, output),
        Commands::Subtitles {
            path,
            format,
            output,
        } => {
            let format = format.unwrap_or_else(|| config.subtitles.format.clone());
            commands::subtitles::run(path, format, output)
        }
    }
}
