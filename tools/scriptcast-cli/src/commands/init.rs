//! Create a new project.

use std::path::PathBuf;

use scriptcast_project_model::ProjectDir;

pub fn run(title: String, output: PathBuf) -> anyhow::Result<()> {
    let dir_name = title
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect::<String>();
    let dir_name = dir_name.trim_matches('-');
    let dir_name = if dir_name.is_empty() { "script" } else { dir_name };
    let project_dir = output.join(dir_name);

    println!("Creating project: {title}");
    println!("  Directory: {}", project_dir.display());

    let project = ProjectDir::create(&project_dir, title)
        .map_err(|e| anyhow::anyhow!("Failed to create project: {e}"))?;

    println!("  ID: {}", project.script.id);
    println!("\nProject created successfully.");
    Ok(())
}
