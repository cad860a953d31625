// project.rs — Project: one security-film installation job.
//
// A Project carries its lifecycle status and its preparation checklist.
// Status changes go through `transition`, which enforces the guarded
// lifecycle defined on `ProjectStatus`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::checklist::Checklist;
use crate::error::PrepError;
use crate::status::ProjectStatus;

/// A project record as persisted by `ProjectStore`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier for this project.
    pub project_id: Uuid,

    /// Human-readable name (e.g., "Harbour Tower lobby glazing").
    pub name: String,

    /// Client organisation, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,

    /// Site address or city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Current lifecycle status.
    pub status: ProjectStatus,

    /// Preparation sub-tasks.
    #[serde(default)]
    pub checklist: Checklist,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a project entering preparation: PV90 with the given checklist.
    pub fn new(name: impl Into<String>, checklist: Checklist) -> Self {
        let now = Utc::now();
        Self {
            project_id: Uuid::new_v4(),
            name: name.into(),
            client: None,
            location: None,
            status: ProjectStatus::Pv90,
            checklist,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Move to a new status. Returns an error if the transition is invalid.
    pub fn transition(&mut self, new_status: ProjectStatus) -> Result<(), PrepError> {
        if !self.status.can_transition_to(new_status) {
            return Err(PrepError::InvalidTransition {
                project_id: self.project_id,
                from: self.status.to_string(),
                to: new_status.to_string(),
            });
        }
        self.status = new_status;
        self.touch();
        Ok(())
    }

    /// Bump `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_project() -> Project {
        Project::new("Harbour Tower", Checklist::preparation())
    }

    #[test]
    fn new_project_starts_in_pv90() {
        let project = test_project();
        assert_eq!(project.status, ProjectStatus::Pv90);
        assert_eq!(project.checklist.len(), 4);
        assert!(project.client.is_none());
    }

    #[test]
    fn valid_forward_transitions() {
        let mut project = test_project();
        project.transition(ProjectStatus::Wb).unwrap();
        project.transition(ProjectStatus::Wip).unwrap();
        project.transition(ProjectStatus::Qf).unwrap();
        project.transition(ProjectStatus::Completed).unwrap();
        assert_eq!(project.status, ProjectStatus::Completed);
    }

    #[test]
    fn invalid_transition_returns_error() {
        let mut project = test_project();
        let result = project.transition(ProjectStatus::Qf);
        assert!(matches!(result, Err(PrepError::InvalidTransition { .. })));
        assert_eq!(project.status, ProjectStatus::Pv90);
    }

    #[test]
    fn transition_bumps_updated_at() {
        let mut project = test_project();
        let before = project.updated_at;
        project.transition(ProjectStatus::Ub).unwrap();
        assert!(project.updated_at >= before);
    }

    #[test]
    fn builder_sets_optional_fields() {
        let project = test_project()
            .with_client("Acme Glass")
            .with_location("Wellington");
        assert_eq!(project.client.as_deref(), Some("Acme Glass"));
        assert_eq!(project.location.as_deref(), Some("Wellington"));
    }

    #[test]
    fn optional_fields_omitted_from_json() {
        let project = test_project();
        let json = serde_json::to_string_pretty(&project).unwrap();
        assert!(!json.contains("client"));
        assert!(!json.contains("location"));
        assert!(json.contains("\"PV90\""));
        let restored: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.project_id, project.project_id);
        assert_eq!(restored.checklist, project.checklist);
    }
}
