//! On-disk project bundle and audio object store.
//!
//! Bundle layout:
//!
//! ```text
//! <root>/meta/script.json
//! <root>/sections/<section-id>.json
//! <root>/audio/tts/<section-id>.mp3
//! <root>/exports/
//! ```

use std::path::{Path, PathBuf};

use crate::script::{new_id, Placement, ProjectError, VideoScript};
use crate::section::Section;

/// Object key for a section's synthesized audio.
pub fn audio_key(section_id: &str) -> String {
    format!("tts/{section_id}.mp3")
}

/// Blob storage for synthesized section audio.
pub trait AudioStore {
    /// Store bytes under a key, replacing any previous object.
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), ProjectError>;

    /// Fetch the bytes stored under a key, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ProjectError>;

    /// Delete an object. Returns whether it existed.
    fn delete(&self, key: &str) -> Result<bool, ProjectError>;

    /// A URL the object can be retrieved from.
    fn locate(&self, key: &str) -> String;
}

/// Audio store backed by a local directory.
#[derive(Debug, Clone)]
pub struct FsAudioStore {
    root: PathBuf,
}

impl FsAudioStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, ProjectError> {
        if key.is_empty() || !only_normal_components(key) {
            return Err(ProjectError::ValidationError {
                message: format!("invalid object key: {key:?}"),
            });
        }
        Ok(self.root.join(key))
    }
}

impl AudioStore for FsAudioStore {
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), ProjectError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        std::fs::write(&path, bytes).map_err(|e| io_error(&path, e))?;
        tracing::debug!(key, bytes = bytes.len(), "Stored audio object");
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ProjectError> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn delete(&self, key: &str) -> Result<bool, ProjectError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn locate(&self, key: &str) -> String {
        format!("file://{}", self.root.join(key).display())
    }
}

/// A project bundle on disk.
#[derive(Debug, Clone)]
pub struct ProjectDir {
    /// Filesystem path to the project directory.
    pub root: PathBuf,

    /// Script metadata.
    pub script: VideoScript,
}

impl ProjectDir {
    /// Create a new project on disk with the standard directory structure.
    pub fn create(root: impl AsRef<Path>, title: impl Into<String>) -> Result<Self, ProjectError> {
        let root = root.as_ref().to_path_buf();

        for subdir in &["meta", "sections", "audio", "exports"] {
            let dir = root.join(subdir);
            std::fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;
        }

        let project = Self {
            root,
            script: VideoScript::new(title),
        };
        project.save_script()?;
        tracing::info!(id = %project.script.id, root = %project.root.display(), "Created project");
        Ok(project)
    }

    /// Load a project from a directory.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let root = root.as_ref().to_path_buf();
        let script_path = root.join("meta").join("script.json");
        if !script_path.exists() {
            return Err(ProjectError::NotFound {
                kind: "Script",
                id: root.display().to_string(),
            });
        }
        let script = read_json(&script_path)?;
        Ok(Self { root, script })
    }

    /// Persist the script document.
    pub fn save_script(&self) -> Result<(), ProjectError> {
        write_json(&self.root.join("meta").join("script.json"), &self.script)
    }

    /// Audio store rooted in this bundle.
    pub fn audio_store(&self) -> FsAudioStore {
        FsAudioStore::new(self.root.join("audio"))
    }

    /// Directory for build outputs.
    pub fn exports_dir(&self) -> PathBuf {
        self.root.join("exports")
    }

    fn section_path(&self, section_id: &str) -> Result<PathBuf, ProjectError> {
        let single = Path::new(section_id).components().count() == 1;
        if section_id.is_empty() || !single || !only_normal_components(section_id) {
            return Err(ProjectError::ValidationError {
                message: format!("invalid section id: {section_id:?}"),
            });
        }
        Ok(self.root.join("sections").join(format!("{section_id}.json")))
    }

    /// Load one section document.
    pub fn load_section(&self, section_id: &str) -> Result<Section, ProjectError> {
        let path = self.section_path(section_id)?;
        if !path.exists() {
            return Err(ProjectError::NotFound {
                kind: "Section",
                id: section_id.to_string(),
            });
        }
        read_json(&path)
    }

    /// Persist one section document.
    pub fn save_section(&self, section: &Section) -> Result<(), ProjectError> {
        let dir = self.root.join("sections");
        std::fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;
        write_json(&self.section_path(&section.id)?, section)
    }

    /// Create a pending section and place it in narration order.
    pub fn add_section(&mut self, at: Placement<'_>) -> Result<Section, ProjectError> {
        let section = Section::new(new_id());
        self.script.insert_section(section.id.clone(), at)?;
        self.save_section(&section)?;
        self.save_script()?;
        tracing::debug!(section_id = %section.id, "Added section");
        Ok(section)
    }

    /// Remove a section from the script along with its document and audio.
    ///
    /// Once the script no longer references the section, failing to remove
    /// its files is logged and leaves orphans behind; it is not an error.
    pub fn delete_section(&mut self, section_id: &str) -> Result<(), ProjectError> {
        if !self.script.remove_section(section_id) {
            return Err(ProjectError::NotFound {
                kind: "Section",
                id: section_id.to_string(),
            });
        }
        self.save_script()?;

        let path = self.section_path(section_id)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    section_id,
                    path = %path.display(),
                    error = %e,
                    "Failed to remove section document"
                );
            }
        }
        if let Err(e) = self.audio_store().delete(&audio_key(section_id)) {
            tracing::warn!(section_id, error = %e, "Failed to remove section audio");
        }
        tracing::debug!(section_id, "Deleted section");
        Ok(())
    }

    /// Return a generated section to the pending state and drop its audio.
    ///
    /// The words are kept so the section can be synthesized again.
    pub fn reset_section(&self, section_id: &str) -> Result<Section, ProjectError> {
        let mut section = self.load_section(section_id)?;
        section.invalidate();
        self.save_section(&section)?;
        if self.audio_store().delete(&audio_key(section_id))? {
            tracing::info!(section_id, "Discarded generated audio");
        }
        Ok(section)
    }

    /// Load every section referenced by the script, in narration order.
    pub fn resolve_sections(&self) -> Result<Vec<Section>, ProjectError> {
        self.script
            .section_ids
            .iter()
            .map(|id| self.load_section(id))
            .collect()
    }

    /// Check that every referenced section and audio object is present.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = vec![];
        let store = self.audio_store();

        for id in &self.script.section_ids {
            match self.load_section(id) {
                Ok(section) => {
                    if section.id != *id {
                        errors.push(format!("Section {id} document carries id {}", section.id));
                    }
                    if section.is_generated() {
                        match store.get(&audio_key(id)) {
                            Ok(Some(_)) => {}
                            Ok(None) => errors.push(format!("Section {id} audio missing")),
                            Err(e) => errors.push(format!("Section {id} audio unreadable: {e}")),
                        }
                    }
                }
                Err(e) => errors.push(e.to_string()),
            }
        }

        errors
    }
}

fn only_normal_components(relative: &str) -> bool {
    Path::new(relative)
        .components()
        .all(|c| matches!(c, std::path::Component::Normal(_)))
}

fn io_error(path: &Path, source: std::io::Error) -> ProjectError {
    ProjectError::IoError {
        path: path.to_path_buf(),
        source,
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ProjectError> {
    let json = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    serde_json::from_str(&json).map_err(|e| ProjectError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), ProjectError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| ProjectError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, json).map_err(|e| io_error(path, e))
}
