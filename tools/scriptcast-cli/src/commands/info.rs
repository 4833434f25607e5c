//! Show project information.

use std::path::PathBuf;

use scriptcast_project_model::{audio_key, AudioStore, SectionKind};

use super::load_project;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let project = load_project(&path)?;
    let s = &project.script;
    let store = project.audio_store();

    println!("Script: {}", s.title);
    println!("  ID: {}", s.id);
    println!("  Created: {}", s.created_at);
    println!("  Modified: {}", s.modified_at);
    println!();

    println!("Sections ({}):", s.section_ids.len());
    for (i, id) in s.section_ids.iter().enumerate() {
        match project.load_section(id) {
            Ok(section) => {
                let state = match &section.kind {
                    SectionKind::Blank => "blank",
                    SectionKind::Pending { .. } => "pending",
                    SectionKind::Generated { .. } => "generated",
                };
                println!(
                    "  {:>3}. {} [{state}] delay={:.3}s \"{}\"",
                    i + 1,
                    section.id,
                    section.delay,
                    section.text()
                );
                if section.is_generated() {
                    println!("       audio: {}", store.locate(&audio_key(id)));
                }
            }
            Err(e) => println!("  {:>3}. {id} [unreadable: {e}]", i + 1),
        }
    }
    println!();

    println!("Scenes ({}):", s.scenes.len());
    for (i, scene) in s.scenes.iter().enumerate() {
        println!(
            "  {:>3}. {} media={} intervals={}",
            i + 1,
            scene.id,
            scene.media_id.as_deref().unwrap_or("-"),
            scene.interval_count
        );
    }

    Ok(())
}
