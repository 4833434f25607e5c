//! Change the script title.

use std::path::PathBuf;

use super::load_project;

pub fn run(path: PathBuf, title: String) -> anyhow::Result<()> {
    let mut project = load_project(&path)?;
    let previous = std::mem::take(&mut project.script.title);
    project.script.set_title(title);
    project.save_script()?;
    println!("Renamed \"{previous}\" to \"{}\"", project.script.title);
    Ok(())
}
