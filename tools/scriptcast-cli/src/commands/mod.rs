pub mod audio;
pub mod info;
pub mod init;
pub mod rename;
pub mod scene;
pub mod section;
pub mod subtitles;
pub mod validate;

use std::path::Path;

use scriptcast_project_model::{Placement, ProjectDir};

/// Load a project bundle or fail with a readable message.
pub(crate) fn load_project(path: &Path) -> anyhow::Result<ProjectDir> {
    ProjectDir::load(path).map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))
}

/// Turn optional `--before` / `--after` anchors into a placement.
pub(crate) fn placement<'a>(
    before: Option<&'a str>,
    after: Option<&'a str>,
) -> anyhow::Result<Placement<'a>> {
    match (before, after) {
        (None, None) => Ok(Placement::End),
        (Some(anchor), None) => Ok(Placement::Before(anchor)),
        (None, Some(anchor)) => Ok(Placement::After(anchor)),
        (Some(_), Some(_)) => Err(anyhow::anyhow!("Use only one of --before and --after")),
    }
}
