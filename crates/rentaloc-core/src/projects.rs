//! Named, saved investment projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RentalocError;
use crate::profitability::InvestmentInput;
use crate::RentalocResult;

pub use crate::types::UNNAMED_PROJECT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProject {
    pub id: Uuid,
    pub project_name: String,
    pub last_modified: DateTime<Utc>,
    pub input: InvestmentInput,
}

/// Collection of saved projects, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectBook {
    projects: Vec<SavedProject>,
}

impl ProjectBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a project. A missing id gets a fresh one; a blank
    /// name becomes [`UNNAMED_PROJECT`].
    pub fn save(
        &mut self,
        id: Option<Uuid>,
        name: Option<&str>,
        input: InvestmentInput,
        now: DateTime<Utc>,
    ) -> &SavedProject {
        let project = SavedProject {
            id: id.unwrap_or_else(Uuid::new_v4),
            project_name: name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(UNNAMED_PROJECT)
                .to_string(),
            last_modified: now,
            input,
        };

        let index = match self.projects.iter().position(|p| p.id == project.id) {
            Some(i) => {
                log::debug!("updating project {}", project.id);
                self.projects[i] = project;
                i
            }
            None => {
                log::debug!("adding project {}", project.id);
                self.projects.push(project);
                self.projects.len() - 1
            }
        };
        &self.projects[index]
    }

    pub fn get(&self, id: Uuid) -> Option<&SavedProject> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn get_or_err(&self, id: Uuid) -> RentalocResult<&SavedProject> {
        self.get(id).ok_or(RentalocError::ProjectNotFound { id })
    }

    /// Remove a project, returning it.
    pub fn delete(&mut self, id: Uuid) -> RentalocResult<SavedProject> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(RentalocError::ProjectNotFound { id })?;
        log::debug!("deleting project {id}");
        Ok(self.projects.remove(index))
    }

    /// Projects, most recently modified first.
    pub fn list(&self) -> Vec<&SavedProject> {
        let mut projects: Vec<&SavedProject> = self.projects.iter().collect();
        projects.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Parse a stored book (a JSON array of projects).
    pub fn from_json(json: &str) -> RentalocResult<Self> {
        let book: ProjectBook = serde_json::from_str(json)?;
        log::debug!("loaded {} saved project(s)", book.len());
        Ok(book)
    }

    pub fn to_json(&self) -> RentalocResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
