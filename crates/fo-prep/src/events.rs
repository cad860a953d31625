// events.rs — Event model and notification dispatch.
//
// The checklist store emits events when items are toggled, when the list is
// replaced, and when a project changes status. The stage-completion
// transition (PV90 → WB) is its own event so that the dashboard can surface
// it as a user-visible notification.
//
// Sinks receive every event; the dispatcher is synchronous.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PrepError;
use crate::status::ProjectStatus;

/// Events emitted at key points of project preparation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PrepEvent {
    /// A project entered preparation.
    ProjectCreated {
        project_id: Uuid,
        name: String,
        timestamp: DateTime<Utc>,
    },

    /// A checklist item was flipped.
    ItemToggled {
        project_id: Uuid,
        item_id: String,
        label: String,
        completed: bool,
        user: String,
        timestamp: DateTime<Utc>,
    },

    /// The checklist was replaced wholesale.
    ChecklistReplaced {
        project_id: Uuid,
        item_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// A project changed status through a manual transition.
    StatusChanged {
        project_id: Uuid,
        from_status: ProjectStatus,
        to_status: ProjectStatus,
        timestamp: DateTime<Utc>,
    },

    /// Completing the checklist moved the project to its next stage.
    StageTransitioned {
        project_id: Uuid,
        from_status: ProjectStatus,
        to_status: ProjectStatus,
        message: String,
        timestamp: DateTime<Utc>,
    },
}

impl PrepEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            PrepEvent::ProjectCreated { .. } => "project_created",
            PrepEvent::ItemToggled { .. } => "item_toggled",
            PrepEvent::ChecklistReplaced { .. } => "checklist_replaced",
            PrepEvent::StatusChanged { .. } => "status_changed",
            PrepEvent::StageTransitioned { .. } => "stage_transitioned",
        }
    }

    pub fn project_id(&self) -> Uuid {
        match self {
            PrepEvent::ProjectCreated { project_id, .. }
            | PrepEvent::ItemToggled { project_id, .. }
            | PrepEvent::ChecklistReplaced { project_id, .. }
            | PrepEvent::StatusChanged { project_id, .. }
            | PrepEvent::StageTransitioned { project_id, .. } => *project_id,
        }
    }

    pub fn project_created(project_id: Uuid, name: &str) -> Self {
        PrepEvent::ProjectCreated {
            project_id,
            name: name.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn status_changed(project_id: Uuid, from: ProjectStatus, to: ProjectStatus) -> Self {
        PrepEvent::StatusChanged {
            project_id,
            from_status: from,
            to_status: to,
            timestamp: Utc::now(),
        }
    }

    pub fn stage_transitioned(
        project_id: Uuid,
        from: ProjectStatus,
        to: ProjectStatus,
        message: &str,
    ) -> Self {
        PrepEvent::StageTransitioned {
            project_id,
            from_status: from,
            to_status: to,
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Trait for receiving preparation events.
pub trait NotificationSink: Send {
    /// Handle an event. Errors are logged but don't stop the system.
    fn send(&self, event: &PrepEvent) -> Result<(), PrepError>;
}

/// Appends events as JSONL to a file.
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl NotificationSink for LogSink {
    fn send(&self, event: &PrepEvent) -> Result<(), PrepError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| PrepError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| PrepError::IoError {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| PrepError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}

type StageCallback = Box<dyn Fn(ProjectStatus, &str) + Send>;

/// Invokes a callback with `(new_status, message)` for every stage
/// transition. Other events are ignored.
///
/// A panicking callback is reported as `NotificationError` rather than
/// unwinding through the store.
pub struct CallbackSink {
    on_stage_transition: StageCallback,
}

impl CallbackSink {
    pub fn new(on_stage_transition: impl Fn(ProjectStatus, &str) + Send + 'static) -> Self {
        Self {
            on_stage_transition: Box::new(on_stage_transition),
        }
    }
}

impl NotificationSink for CallbackSink {
    fn send(&self, event: &PrepEvent) -> Result<(), PrepError> {
        if let PrepEvent::StageTransitioned {
            to_status, message, ..
        } = event
        {
            let callback = &self.on_stage_transition;
            panic::catch_unwind(AssertUnwindSafe(|| callback(*to_status, message))).map_err(
                |payload| {
                    let reason = payload
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "callback panicked".to_string());
                    PrepError::NotificationError(format!("stage callback failed: {}", reason))
                },
            )?;
        }
        Ok(())
    }
}

/// Dispatches events to multiple sinks.
///
/// Errors from individual sinks are logged (via tracing) but don't
/// prevent other sinks from receiving the event.
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    /// Create a new dispatcher with no sinks.
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Add a notification sink.
    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    /// Builder-style `add_sink`.
    pub fn with_sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Dispatch an event to all sinks.
    pub fn dispatch(&self, event: &PrepEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.send(event) {
                tracing::warn!(event_type = event.event_type(), "notification sink error: {}", e);
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
