// error.rs — Error types for the preparation-stage subsystem.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while tracking project preparation.
#[derive(Debug, Error)]
pub enum PrepError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize project data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The settings file could not be parsed.
    #[error("invalid config at {path}: {source}")]
    ConfigError {
        path: String,
        source: toml::de::Error,
    },

    /// `toggle` was called with an id that is not in the checklist.
    #[error("checklist item not found: {0}")]
    ItemNotFound(String),

    /// Two checklist items share the same id.
    #[error("duplicate checklist item id: {0}")]
    DuplicateItem(String),

    /// A completion ratio was requested over a checklist with no items.
    #[error("checklist is empty")]
    EmptyChecklist,

    /// The requested project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(Uuid),

    /// Invalid status transition.
    #[error("invalid transition from {from} to {to} for project {project_id}")]
    InvalidTransition {
        project_id: Uuid,
        from: String,
        to: String,
    },

    /// A status code that is not one of PV90, UB, WB, WIP, QF, Completed.
    #[error("unknown project status: {0}")]
    UnknownStatus(String),

    /// A notification dispatch failed (non-fatal).
    #[error("notification error: {0}")]
    NotificationError(String),
}
