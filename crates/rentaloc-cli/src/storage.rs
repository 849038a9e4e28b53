//! JSON-file persistence of the investor profile and saved projects.

use rentaloc_core::profile::UserProfile;
use rentaloc_core::projects::ProjectBook;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::input;

const PROFILE_FILE: &str = "rentaloc_profile.json";
const PROJECTS_FILE: &str = "rentaloc_projects.json";

/// Directory holding the profile and project files.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn profile_path(&self) -> PathBuf {
        self.root.join(PROFILE_FILE)
    }

    pub fn projects_path(&self) -> PathBuf {
        self.root.join(PROJECTS_FILE)
    }

    /// Stored profile, or the default one when none was saved yet.
    pub fn load_profile(&self) -> Result<UserProfile, Box<dyn std::error::Error>> {
        let path = self.profile_path();
        if !path.exists() {
            log::debug!("no profile at {}, using defaults", path.display());
            return Ok(UserProfile::default());
        }
        input::file::read_json(&path)
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<(), Box<dyn std::error::Error>> {
        write_json(&self.profile_path(), profile)
    }

    /// Stored projects, or an empty book.
    pub fn load_projects(&self) -> Result<ProjectBook, Box<dyn std::error::Error>> {
        let path = self.projects_path();
        if !path.exists() {
            return Ok(ProjectBook::new());
        }
        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
        Ok(ProjectBook::from_json(&contents)?)
    }

    pub fn save_projects(&self, book: &ProjectBook) -> Result<(), Box<dyn std::error::Error>> {
        write_atomic(&self.projects_path(), &book.to_json()?)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn std::error::Error>> {
    write_atomic(path, &serde_json::to_string_pretty(value)?)
}

/// Write through a temporary sibling then rename over the target.
fn write_atomic(path: &Path, contents: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create '{}': {}", parent.display(), e))?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).map_err(|e| format!("Failed to write '{}': {}", tmp.display(), e))?;
    fs::rename(&tmp, path).map_err(|e| format!("Failed to replace '{}': {}", path.display(), e))?;
    log::info!("saved {}", path.display());
    Ok(())
}
