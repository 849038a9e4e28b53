use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RentalocError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Project not found: {id}")]
    ProjectNotFound { id: Uuid },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RentalocError {
    fn from(e: serde_json::Error) -> Self {
        RentalocError::SerializationError(e.to_string())
    }
}
