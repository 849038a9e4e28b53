use chrono::Utc;
use clap::{Args, Subcommand};
use serde_json::{json, Value};
use uuid::Uuid;

use rentaloc_core::InvestmentInput;

use crate::input;
use crate::storage::DataDir;

/// Saved project commands
#[derive(Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommand,
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// List saved projects, most recent first
    List,
    /// Save an investment input as a project
    Save(ProjectSaveArgs),
    /// Print a saved project
    Show {
        /// Project id
        id: Uuid,
    },
    /// Delete a saved project
    Delete {
        /// Project id
        id: Uuid,
    },
}

#[derive(Args)]
pub struct ProjectSaveArgs {
    /// Path to JSON input file (stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Project name
    #[arg(long)]
    pub name: Option<String>,

    /// Id of an existing project to overwrite
    #[arg(long)]
    pub id: Option<Uuid>,
}

pub fn run_project(args: ProjectArgs, data: &DataDir) -> Result<Value, Box<dyn std::error::Error>> {
    match args.command {
        ProjectCommand::List => {
            let book = data.load_projects()?;
            let rows: Vec<Value> = book
                .list()
                .into_iter()
                .map(|p| {
                    json!({
                        "id": p.id,
                        "project_name": p.project_name,
                        "last_modified": p.last_modified,
                    })
                })
                .collect();
            Ok(json!({ "count": book.len(), "projects": rows }))
        }
        ProjectCommand::Save(save) => {
            let record: InvestmentInput = if let Some(ref path) = save.input {
                input::file::read_json(path)?
            } else if let Some(record) = input::stdin::read_stdin()? {
                record
            } else {
                return Err("--input <file.json> or stdin required for project save".into());
            };
            save_project(data, save.id, save.name.as_deref(), record)
        }
        ProjectCommand::Show { id } => {
            let book = data.load_projects()?;
            Ok(serde_json::to_value(book.get_or_err(id)?)?)
        }
        ProjectCommand::Delete { id } => {
            let mut book = data.load_projects()?;
            let removed = book.delete(id)?;
            data.save_projects(&book)?;
            Ok(json!({ "deleted": removed.id, "project_name": removed.project_name }))
        }
    }
}

fn save_project(
    data: &DataDir,
    id: Option<Uuid>,
    name: Option<&str>,
    record: InvestmentInput,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut book = data.load_projects()?;
    let saved = serde_json::to_value(book.save(id, name, record, Utc::now()))?;
    data.save_projects(&book)?;
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentaloc_core::projects::UNNAMED_PROJECT;

    #[test]
    fn test_save_then_delete() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());

        let saved = save_project(&data, None, Some("  "), InvestmentInput::default()).unwrap();
        assert_eq!(saved["project_name"], UNNAMED_PROJECT);
        let id: Uuid = serde_json::from_value(saved["id"].clone()).unwrap();
        assert_eq!(data.load_projects().unwrap().len(), 1);

        let out = run_project(
            ProjectArgs {
                command: ProjectCommand::Delete { id },
            },
            &data,
        )
        .unwrap();
        assert_eq!(out["project_name"], UNNAMED_PROJECT);
        assert!(data.load_projects().unwrap().is_empty());
    }

    #[test]
    fn test_delete_unknown_id_fails() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        let result = run_project(
            ProjectArgs {
                command: ProjectCommand::Delete { id: Uuid::new_v4() },
            },
            &data,
        );
        assert!(result.is_err());
    }
}
