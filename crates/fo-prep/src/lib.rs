//! # fo-prep
//!
//! Preparation-stage tracking for Film Ops installation projects.
//!
//! A [`Project`] enters preparation in PV90 with a checklist of sub-tasks
//! (team assigned, travel arranged, trailer assigned, documents uploaded).
//! The [`ChecklistStore`] owns one project's checklist, toggles items,
//! reports progress, and advances the project to WB once preparation is
//! complete.
//!
//! ## Key components
//!
//! - [`ChecklistStore`] — toggle / progress / evaluate_stage_transition /
//!   replace_all over one project
//! - [`Checklist`], [`ChecklistItem`], [`Progress`] — the checklist model
//! - [`ProjectStatus`] — guarded lifecycle (PV90/UB/WB → WIP → QF → Completed)
//! - [`ProjectStore`] — JSON file-based persistence for project records
//! - [`PrepEvent`], [`EventDispatcher`], [`NotificationSink`] — notifications
//! - [`PrepConfig`], [`Settings`] — state layout and `config.toml` settings
//!
//! ## Quick Example
//!
//! ```rust
//! use fo_prep::{Checklist, ChecklistStore, Project, ProjectStatus};
//!
//! let project = Project::new("Harbour Tower", Checklist::preparation());
//! let mut store = ChecklistStore::new(project, "dana");
//! for id in ["team-assigned", "travel-arranged", "trailer-assigned", "documents-uploaded"] {
//!     store.toggle(id).unwrap();
//!     store.evaluate_stage_transition().unwrap();
//! }
//! assert_eq!(store.progress().as_tuple(), (4, 4, 100));
//! assert_eq!(store.status(), ProjectStatus::Wb);
//! ```

pub mod checklist;
pub mod checklist_store;
pub mod config;
pub mod error;
pub mod events;
pub mod project;
pub mod status;
pub mod store;

pub use checklist::{Checklist, ChecklistItem, CompletionPolicy, Progress};
pub use checklist_store::{ChecklistStore, StageTransition};
pub use config::{PrepConfig, Settings};
pub use error::PrepError;
pub use events::{CallbackSink, EventDispatcher, LogSink, NotificationSink, PrepEvent};
pub use project::Project;
pub use status::ProjectStatus;
pub use store::ProjectStore;
