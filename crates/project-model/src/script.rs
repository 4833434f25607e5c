//! Video script metadata and ordered editing.
//!
//! A script is the top-level document. It references sections by id and owns
//! the ordered list of visual scenes. Section documents themselves live in the
//! project store and are looked up by id.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level script document (`meta/script.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoScript {
    /// Schema version.
    pub version: String,

    /// Unique script identifier (UUID).
    pub id: String,

    /// Human-readable title.
    pub title: String,

    /// Creation timestamp (ISO 8601).
    pub created_at: String,

    /// Last modified timestamp (ISO 8601).
    pub modified_at: String,

    /// Narration order. Authoritative sequencing of the whole timeline.
    #[serde(default)]
    pub section_ids: Vec<String>,

    /// Visual scenes in display order.
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

/// A visual scene shown alongside the narration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Unique scene identifier.
    pub id: String,

    /// Attached media, if any.
    #[serde(default)]
    pub media_id: Option<String>,

    /// Number of narration intervals this scene spans.
    #[serde(default)]
    pub interval_count: u32,
}

impl Scene {
    /// Create an empty scene with no media.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            media_id: None,
            interval_count: 0,
        }
    }
}

/// Where to place a new entry relative to an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement<'a> {
    End,
    Before(&'a str),
    After(&'a str),
}

impl VideoScript {
    /// Create a new empty script.
    pub fn new(title: impl Into<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            version: "1.0".to_string(),
            id: new_id(),
            title: title.into(),
            created_at: now.clone(),
            modified_at: now,
            section_ids: vec![],
            scenes: vec![],
        }
    }

    /// Rename the script.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    /// Insert a section id.
    pub fn insert_section(
        &mut self,
        section_id: impl Into<String>,
        at: Placement<'_>,
    ) -> Result<(), ProjectError> {
        let id = section_id.into();
        insert_keyed(&mut self.section_ids, id, at, |s| s.as_str(), "Section")?;
        self.touch();
        Ok(())
    }

    /// Remove a section id. Returns whether it was present.
    pub fn remove_section(&mut self, section_id: &str) -> bool {
        let removed = remove_keyed(&mut self.section_ids, section_id, |s| s.as_str());
        if removed {
            self.touch();
        }
        removed
    }

    /// Exchange the positions of two sections.
    pub fn swap_sections(&mut self, a: &str, b: &str) -> Result<(), ProjectError> {
        swap_keyed(&mut self.section_ids, a, b, |s| s.as_str(), "Section")?;
        self.touch();
        Ok(())
    }

    /// Insert a scene.
    pub fn insert_scene(&mut self, scene: Scene, at: Placement<'_>) -> Result<(), ProjectError> {
        insert_keyed(&mut self.scenes, scene, at, |s| s.id.as_str(), "Scene")?;
        self.touch();
        Ok(())
    }

    /// Remove a scene. Returns whether it was present.
    pub fn remove_scene(&mut self, scene_id: &str) -> bool {
        let removed = remove_keyed(&mut self.scenes, scene_id, |s| s.id.as_str());
        if removed {
            self.touch();
        }
        removed
    }

    /// Exchange the positions of two scenes.
    pub fn swap_scenes(&mut self, a: &str, b: &str) -> Result<(), ProjectError> {
        swap_keyed(&mut self.scenes, a, b, |s| s.id.as_str(), "Scene")?;
        self.touch();
        Ok(())
    }

    /// Look up a scene for editing.
    pub fn scene_mut(&mut self, scene_id: &str) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|s| s.id == scene_id)
    }

    /// Refresh the modification timestamp.
    pub fn touch(&mut self) {
        self.modified_at = chrono::Utc::now().to_rfc3339();
    }
}

fn insert_keyed<T>(
    list: &mut Vec<T>,
    item: T,
    at: Placement<'_>,
    key: impl Fn(&T) -> &str,
    kind: &'static str,
) -> Result<(), ProjectError> {
    let id = key(&item);
    if list.iter().any(|existing| key(existing) == id) {
        return Err(ProjectError::Duplicate {
            kind,
            id: id.to_string(),
        });
    }

    let index = match at {
        Placement::End => list.len(),
        Placement::Before(anchor) => find_keyed(list, anchor, &key, kind)?,
        Placement::After(anchor) => find_keyed(list, anchor, &key, kind)? + 1,
    };
    list.insert(index, item);
    Ok(())
}

fn remove_keyed<T>(list: &mut Vec<T>, id: &str, key: impl Fn(&T) -> &str) -> bool {
    match list.iter().position(|item| key(item) == id) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}

fn swap_keyed<T>(
    list: &mut [T],
    a: &str,
    b: &str,
    key: impl Fn(&T) -> &str,
    kind: &'static str,
) -> Result<(), ProjectError> {
    let ia = find_keyed(list, a, &key, kind)?;
    let ib = find_keyed(list, b, &key, kind)?;
    list.swap(ia, ib);
    Ok(())
}

fn find_keyed<T>(
    list: &[T],
    id: &str,
    key: &impl Fn(&T) -> &str,
    kind: &'static str,
) -> Result<usize, ProjectError> {
    list.iter()
        .position(|item| key(item) == id)
        .ok_or_else(|| ProjectError::NotFound {
            kind,
            id: id.to_string(),
        })
}

/// Generate a fresh identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Errors that can occur when working with projects.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} already present: {id}")]
    Duplicate { kind: &'static str, id: String },

    #[error("Invalid project: {message}")]
    ValidationError { message: String },
}

impl From<ProjectError> for scriptcast_common::ScriptcastError {
    fn from(err: ProjectError) -> Self {
        use scriptcast_common::ScriptcastError;
        match err {
            ProjectError::NotFound { kind, id } => ScriptcastError::NotFound { kind, id },
            ProjectError::IoError { source, .. } => ScriptcastError::Io(source),
            ProjectError::ParseError { source, .. } => ScriptcastError::Json(source),
            other => ScriptcastError::Other(anyhow::Error::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script_with(ids: &[&str]) -> VideoScript {
        let mut script = VideoScript::new("Test");
        for id in ids {
            script.insert_section(*id, Placement::End).unwrap();
        }
        script
    }

    #[test]
    fn test_script_creation() {
        let script = VideoScript::new("Launch video");
        assert_eq!(script.title, "Launch video");
        assert_eq!(script.version, "1.0");
        assert!(script.section_ids.is_empty());
        assert_eq!(script.id.len(), 36);
    }

    #[test]
    fn test_set_title_touches_script() {
        let mut script = VideoScript::new("Draft");
        script.modified_at = "2000-01-01T00:00:00+00:00".to_string();
        script.set_title("Final cut");
        assert_eq!(script.title, "Final cut");
        assert_ne!(script.modified_at, "2000-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_insert_before_and_after() {
        let mut script = script_with(&["a", "c"]);
        script.insert_section("b", Placement::Before("c")).unwrap();
        script.insert_section("d", Placement::After("c")).unwrap();
        script.insert_section("z", Placement::Before("a")).unwrap();
        assert_eq!(script.section_ids, vec!["z", "a", "b", "c", "d"]);
    }

    #[test]
    fn test_insert_rejects_duplicates_and_missing_anchor() {
        let mut script = script_with(&["a"]);
        assert!(matches!(
            script.insert_section("a", Placement::End),
            Err(ProjectError::Duplicate { .. })
        ));
        assert!(matches!(
            script.insert_section("b", Placement::After("missing")),
            Err(ProjectError::NotFound { kind: "Section", .. })
        ));
        assert_eq!(script.section_ids, vec!["a"]);
    }

    #[test]
    fn test_remove_and_swap() {
        let mut script = script_with(&["a", "b", "c"]);
        assert!(script.remove_section("b"));
        assert!(!script.remove_section("b"));

        script.swap_sections("a", "c").unwrap();
        assert_eq!(script.section_ids, vec!["c", "a"]);

        script.swap_sections("a", "a").unwrap();
        assert_eq!(script.section_ids, vec!["c", "a"]);

        assert!(script.swap_sections("a", "nope").is_err());
        assert_eq!(script.section_ids, vec!["c", "a"]);
    }

    #[test]
    fn test_scene_editing() {
        let mut script = VideoScript::new("Scenes");
        script.insert_scene(Scene::new("s1"), Placement::End).unwrap();
        script.insert_scene(Scene::new("s0"), Placement::Before("s1")).unwrap();
        script.insert_scene(Scene::new("s2"), Placement::After("s1")).unwrap();
        script.swap_scenes("s0", "s2").unwrap();

        let order: Vec<&str> = script.scenes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec!["s2", "s1", "s0"]);

        script.scene_mut("s1").unwrap().interval_count = 3;
        assert_eq!(script.scenes[1].interval_count, 3);
        assert!(script.scene_mut("missing").is_none());
        assert!(script.remove_scene("s1"));
        assert_eq!(script.scenes.len(), 2);
        assert!(matches!(
            script.insert_scene(Scene::new("s0"), Placement::End),
            Err(ProjectError::Duplicate { kind: "Scene", .. })
        ));
    }

    #[test]
    fn test_not_found_maps_to_common_error() {
        let err: scriptcast_common::ScriptcastError = ProjectError::NotFound {
            kind: "Section",
            id: "x".into(),
        }
        .into();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_script_deserialization_defaults_lists() {
        let json = r#"{
            "version": "1.0",
            "id": "abc",
            "title": "Old",
            "created_at": "2024-01-01T00:00:00Z",
            "modified_at": "2024-01-01T00:00:00Z"
        }"#;
        let script: VideoScript = serde_json::from_str(json).unwrap();
        assert!(script.section_ids.is_empty());
        assert!(script.scenes.is_empty());
    }
}
