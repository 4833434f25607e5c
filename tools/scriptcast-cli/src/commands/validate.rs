//! Validate a Scriptcast project bundle.

use std::path::PathBuf;

use super::load_project;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating project at: {}", path.display());

    let project = load_project(&path)?;

    println!("  Title: {}", project.script.title);
    println!("  Version: {}", project.script.version);
    println!("  Sections: {}", project.script.section_ids.len());
    println!("  Scenes: {}", project.script.scenes.len());

    let errors = project.validate();
    if errors.is_empty() {
        println!("  Sources: All present");
        println!("\nProject is valid.");
    } else {
        println!("\nValidation issues:");
        for error in &errors {
            println!("  - {error}");
        }
        println!(
            "\n{} issue(s) found. Builds may fail or skip the affected sections.",
            errors.len()
        );
    }

    Ok(())
}
