// checklist_store.rs — ChecklistStore: the preparation-stage tracker.
//
// Holds one project's checklist and status. Callers mutate through named
// methods only:
//
//   toggle → flips one item, stamps/clears audit fields
//   progress → pure (completed, total, percentage)
//   evaluate_stage_transition → PV90 → WB once the checklist is complete
//   replace_all → swaps the whole item list
//
// `progress` never changes state. Callers run `evaluate_stage_transition`
// after each toggle to pick up the stage change.

use chrono::Utc;
use uuid::Uuid;

use crate::checklist::{ChecklistItem, CompletionPolicy, Progress};
use crate::error::PrepError;
use crate::events::{EventDispatcher, PrepEvent};
use crate::project::Project;
use crate::status::ProjectStatus;

/// Status a project must be in for checklist completion to advance it.
pub const STAGE_FROM: ProjectStatus = ProjectStatus::Pv90;

/// Status a completed preparation checklist advances the project to.
pub const STAGE_TO: ProjectStatus = ProjectStatus::Wb;

/// A status change fired by completing the checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTransition {
    pub from: ProjectStatus,
    pub to: ProjectStatus,
    /// User-facing notification text.
    pub message: String,
}

/// Owns the checklist and status of a single project.
pub struct ChecklistStore {
    project: Project,
    current_user: String,
    policy: CompletionPolicy,
    dispatcher: EventDispatcher,
}

impl ChecklistStore {
    pub fn new(project: Project, current_user: impl Into<String>) -> Self {
        Self {
            project,
            current_user: current_user.into(),
            policy: CompletionPolicy::default(),
            dispatcher: EventDispatcher::new(),
        }
    }

    pub fn with_policy(mut self, policy: CompletionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: EventDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn project_id(&self) -> Uuid {
        self.project.project_id
    }

    pub fn status(&self) -> ProjectStatus {
        self.project.status
    }

    pub fn items(&self) -> &[ChecklistItem] {
        self.project.checklist.items()
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    pub fn set_current_user(&mut self, user: impl Into<String>) {
        self.current_user = user.into();
    }

    /// Release the project, e.g. to persist it.
    pub fn into_project(self) -> Project {
        self.project
    }

    /// Flip the item with `item_id` on behalf of the current user.
    ///
    /// Unknown ids return `ItemNotFound` and leave the checklist untouched.
    pub fn toggle(&mut self, item_id: &str) -> Result<&ChecklistItem, PrepError> {
        let project_id = self.project.project_id;
        let now = Utc::now();
        let item = self
            .project
            .checklist
            .toggle(item_id, &self.current_user, now)?;

        tracing::debug!(
            %project_id,
            item_id,
            completed = item.completed,
            "checklist item toggled"
        );
        self.dispatcher.dispatch(&PrepEvent::ItemToggled {
            project_id,
            item_id: item.id.clone(),
            label: item.label.clone(),
            completed: item.completed,
            user: self.current_user.clone(),
            timestamp: now,
        });
        self.project.updated_at = now;

        Ok(item)
    }

    /// Current completion. Pure: never changes status.
    pub fn progress(&self) -> Progress {
        self.project.checklist.progress()
    }

    /// Whether the checklist is complete under the configured policy.
    pub fn is_complete(&self) -> bool {
        self.project.checklist.is_complete(self.policy)
    }

    /// Advance PV90 → WB if the checklist is complete.
    ///
    /// Returns the transition when it fires, `None` otherwise. Once the
    /// project has left PV90 this is a no-op, so repeated calls fire at
    /// most once.
    pub fn evaluate_stage_transition(&mut self) -> Result<Option<StageTransition>, PrepError> {
        if self.project.status != STAGE_FROM || !self.is_complete() {
            return Ok(None);
        }

        let from = self.project.status;
        self.project.transition(STAGE_TO)?;

        let transition = StageTransition {
            from,
            to: STAGE_TO,
            message: format!(
                "Preparation complete for '{}'. Status moved from {} to {}.",
                self.project.name, from, STAGE_TO
            ),
        };
        tracing::info!(
            project_id = %self.project.project_id,
            from = %from,
            to = %STAGE_TO,
            "preparation stage complete"
        );
        self.dispatcher.dispatch(&PrepEvent::stage_transitioned(
            self.project.project_id,
            from,
            STAGE_TO,
            &transition.message,
        ));
        Ok(Some(transition))
    }

    /// Replace the checklist wholesale. No merge with the previous items.
    ///
    /// Duplicate ids fail with `DuplicateItem` and leave the checklist as is.
    pub fn replace_all(&mut self, items: Vec<ChecklistItem>) -> Result<(), PrepError> {
        let item_count = items.len();
        self.project.checklist.replace_all(items)?;
        self.project.touch();
        tracing::debug!(project_id = %self.project.project_id, item_count, "checklist replaced");
        self.dispatcher.dispatch(&PrepEvent::ChecklistReplaced {
            project_id: self.project.project_id,
            item_count,
            timestamp: self.project.updated_at,
        });
        Ok(())
    }

    /// Manually move the project to `new_status` through the guarded lifecycle.
    pub fn advance(&mut self, new_status: ProjectStatus) -> Result<(), PrepError> {
        let from = self.project.status;
        self.project.transition(new_status)?;
        self.dispatcher.dispatch(&PrepEvent::status_changed(
            self.project.project_id,
            from,
            new_status,
        ));
        Ok(())
    }
}
