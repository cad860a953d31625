// store.rs — ProjectStore: persistence for project records.
//
// Each project is stored as a JSON file: `<store_dir>/<project_id>.json`.
// Saving overwrites the previous record for that project.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::PrepError;
use crate::project::Project;
use crate::status::ProjectStatus;

/// Persistent store for project records.
pub struct ProjectStore {
    store_dir: PathBuf,
}

impl ProjectStore {
    /// Create a new store backed by the given directory.
    /// Creates the directory if it doesn't exist.
    pub fn new(store_dir: impl AsRef<Path>) -> Result<Self, PrepError> {
        let store_dir = store_dir.as_ref().to_path_buf();
        fs::create_dir_all(&store_dir).map_err(|source| PrepError::IoError {
            path: store_dir.display().to_string(),
            source,
        })?;
        Ok(Self { store_dir })
    }

    /// Save a project to disk (creates or overwrites).
    pub fn save(&self, project: &Project) -> Result<(), PrepError> {
        let path = self.project_file(project.project_id);
        let json = serde_json::to_string_pretty(project)?;
        fs::write(&path, json).map_err(|source| PrepError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(project_id = %project.project_id, "project saved");
        Ok(())
    }

    /// Get a specific project by ID.
    pub fn get(&self, project_id: Uuid) -> Result<Option<Project>, PrepError> {
        let path = self.project_file(project_id);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path).map_err(|source| PrepError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let project: Project = serde_json::from_str(&json)?;
        Ok(Some(project))
    }

    /// Get a project or fail with `ProjectNotFound`.
    pub fn require(&self, project_id: Uuid) -> Result<Project, PrepError> {
        self.get(project_id)?
            .ok_or(PrepError::ProjectNotFound(project_id))
    }

    /// List all projects, newest first. Unreadable files are skipped.
    pub fn list(&self) -> Result<Vec<Project>, PrepError> {
        let mut projects = Vec::new();

        let entries = fs::read_dir(&self.store_dir).map_err(|source| PrepError::IoError {
            path: self.store_dir.display().to_string(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| PrepError::IoError {
                path: self.store_dir.display().to_string(),
                source,
            })?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "json") {
                let json = fs::read_to_string(&path).map_err(|source| PrepError::IoError {
                    path: path.display().to_string(),
                    source,
                })?;
                match serde_json::from_str::<Project>(&json) {
                    Ok(project) => projects.push(project),
                    Err(e) => {
                        tracing::warn!("skipping unreadable project {}: {}", path.display(), e)
                    }
                }
            }
        }

        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    /// List projects in the given status.
    pub fn list_by_status(&self, status: ProjectStatus) -> Result<Vec<Project>, PrepError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| p.status == status)
            .collect())
    }

    /// Transition a project to a new status and save it.
    pub fn transition(
        &self,
        project_id: Uuid,
        new_status: ProjectStatus,
    ) -> Result<Project, PrepError> {
        let mut project = self.require(project_id)?;
        project.transition(new_status)?;
        self.save(&project)?;
        Ok(project)
    }

    /// Delete a project from the store.
    pub fn delete(&self, project_id: Uuid) -> Result<bool, PrepError> {
        let path = self.project_file(project_id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|source| PrepError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(true)
    }

    fn project_file(&self, project_id: Uuid) -> PathBuf {
        self.store_dir.join(format!("{}.json", project_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::Checklist;
    use chrono::Utc;
    use tempfile::tempdir;

    fn make_project(name: &str) -> Project {
        Project::new(name, Checklist::preparation())
    }

    #[test]
    fn save_and_get_round_trip() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::new(dir.path().join("projects")).unwrap();

        let mut project = make_project("Harbour Tower");
        project
            .checklist
            .toggle("team-assigned", "dana", Utc::now())
            .unwrap();
        let id = project.project_id;
        store.save(&project).unwrap();

        let found = store.get(id).unwrap().unwrap();
        assert_eq!(found.name, "Harbour Tower");
        assert_eq!(found.checklist.progress().as_tuple(), (1, 4, 25));
        assert_eq!(
            found.checklist.get("team-assigned").unwrap().completed_by.as_deref(),
            Some("dana")
        );
    }

    #[test]
    fn get_nonexistent_returns_none() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::new(dir.path().join("projects")).unwrap();
        assert!(store.get(Uuid::new_v4()).unwrap().is_none());
        assert!(matches!(
            store.require(Uuid::new_v4()),
            Err(PrepError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn list_skips_non_json_and_corrupt_files() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::new(dir.path()).unwrap();
        store.save(&make_project("First")).unwrap();
        store.save(&make_project("Second")).unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        fs::write(dir.path().join("broken.json"), "{").unwrap();

        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn list_by_status_filters_correctly() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::new(dir.path()).unwrap();

        let prep = make_project("Prep");
        let mut booked = make_project("Booked");
        booked.transition(ProjectStatus::Wb).unwrap();
        store.save(&prep).unwrap();
        store.save(&booked).unwrap();

        let pv90 = store.list_by_status(ProjectStatus::Pv90).unwrap();
        assert_eq!(pv90.len(), 1);
        assert_eq!(pv90[0].name, "Prep");

        let wb = store.list_by_status(ProjectStatus::Wb).unwrap();
        assert_eq!(wb.len(), 1);
        assert_eq!(wb[0].name, "Booked");
    }

    #[test]
    fn transition_updates_status_and_persists() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::new(dir.path()).unwrap();
        let project = make_project("Job");
        let id = project.project_id;
        store.save(&project).unwrap();

        let updated = store.transition(id, ProjectStatus::Wip).unwrap();
        assert_eq!(updated.status, ProjectStatus::Wip);
        assert_eq!(store.get(id).unwrap().unwrap().status, ProjectStatus::Wip);
    }

    #[test]
    fn transition_invalid_returns_error() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::new(dir.path()).unwrap();
        let project = make_project("Job");
        let id = project.project_id;
        store.save(&project).unwrap();

        let result = store.transition(id, ProjectStatus::Completed);
        assert!(matches!(result, Err(PrepError::InvalidTransition { .. })));
    }

    #[test]
    fn transition_nonexistent_returns_not_found() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::new(dir.path()).unwrap();
        let result = store.transition(Uuid::new_v4(), ProjectStatus::Wb);
        assert!(matches!(result, Err(PrepError::ProjectNotFound(_))));
    }

    #[test]
    fn delete_project() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::new(dir.path()).unwrap();
        let project = make_project("To Delete");
        let id = project.project_id;
        store.save(&project).unwrap();

        assert!(store.delete(id).unwrap());
        assert!(store.get(id).unwrap().is_none());
        assert!(!store.delete(id).unwrap());
    }
}
