// config.rs — Where project state lives and how the tracker behaves.
//
// `PrepConfig::for_project()` lays state out under `.filmops/` in the
// project root. `Settings` is read from `.filmops/config.toml`; a missing
// file means defaults.
//
// Example config.toml:
//
//   current_user = "dana"
//
//   [completion]
//   policy = "required_only"
//
//   [[checklist.items]]
//   id = "team-assigned"
//   label = "Team Assigned"
//
//   [[checklist.items]]
//   id = "site-photos"
//   label = "Site Photos"
//   required = false

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::checklist::{Checklist, ChecklistItem, CompletionPolicy};
use crate::error::PrepError;

/// Filesystem layout for one dashboard root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepConfig {
    /// Root directory the `.filmops/` directory lives in.
    pub root: PathBuf,

    /// Directory for ProjectStore (one JSON file per project).
    pub projects_dir: PathBuf,

    /// Path to the event notification log.
    pub events_log: PathBuf,

    /// Path to the settings file.
    pub settings_file: PathBuf,
}

impl PrepConfig {
    /// Create a config with the standard `.filmops/` layout.
    pub fn for_project(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let state_dir = root.join(".filmops");
        Self {
            root,
            projects_dir: state_dir.join("projects"),
            events_log: state_dir.join("events.jsonl"),
            settings_file: state_dir.join("config.toml"),
        }
    }

    /// Load settings, falling back to defaults when the file is absent.
    pub fn load_settings(&self) -> Result<Settings, PrepError> {
        Settings::load(&self.settings_file)
    }
}

/// Tracker settings from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Name recorded in `completed_by` when toggling items.
    #[serde(default = "default_current_user")]
    pub current_user: String,

    #[serde(default)]
    pub completion: CompletionConfig,

    #[serde(default)]
    pub checklist: ChecklistConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            current_user: default_current_user(),
            completion: CompletionConfig::default(),
            checklist: ChecklistConfig::default(),
        }
    }
}

/// Completion-predicate configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default)]
    pub policy: CompletionPolicy,
}

/// Checklist template configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecklistConfig {
    /// Overrides the standard preparation items when non-empty.
    #[serde(default)]
    pub items: Vec<ItemTemplate>,
}

/// One item of a configured checklist template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub id: String,
    pub label: String,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

fn default_required() -> bool {
    true
}

impl Settings {
    /// Load settings from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, PrepError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| PrepError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse settings and check that the checklist template is usable.
    fn parse(content: &str, path: &Path) -> Result<Self, PrepError> {
        let settings: Settings =
            toml::from_str(content).map_err(|source| PrepError::ConfigError {
                path: path.display().to_string(),
                source,
            })?;
        settings.preparation_checklist()?;
        Ok(settings)
    }

    /// Fresh checklist for a project entering preparation.
    ///
    /// Fails with `DuplicateItem` if the template repeats an id.
    pub fn preparation_checklist(&self) -> Result<Checklist, PrepError> {
        if self.checklist.items.is_empty() {
            return Ok(Checklist::preparation());
        }
        Checklist::new(
            self.checklist
                .items
                .iter()
                .map(|t| ChecklistItem::new(&t.id, &t.label, t.required))
                .collect(),
        )
    }
}
