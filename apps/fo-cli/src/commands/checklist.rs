// checklist.rs — Checklist subcommands: show, toggle, reset.
//
// `fo checklist toggle` flips one item, then evaluates the stage transition;
// completing the last item of a PV90 project moves it to WB.

use clap::Subcommand;
use fo_prep::{ChecklistStore, PrepConfig, PrepError, ProjectStore, Settings};

use super::{checklist_store, parse_id};

#[derive(Subcommand)]
pub enum ChecklistCommands {
    /// Show a project's checklist and progress.
    Show {
        /// Project ID.
        id: String,
    },
    /// Toggle one checklist item.
    Toggle {
        /// Project ID.
        id: String,
        /// Item ID (e.g., "team-assigned").
        item: String,
        /// Record the change as this user instead of the configured one.
        #[arg(long)]
        user: Option<String>,
    },
    /// Replace the checklist with the configured preparation items.
    Reset {
        /// Project ID.
        id: String,
    },
}

pub fn execute(
    cmd: &ChecklistCommands,
    config: &PrepConfig,
    settings: &Settings,
) -> anyhow::Result<()> {
    let store = ProjectStore::new(&config.projects_dir)?;

    match cmd {
        ChecklistCommands::Show { id } => show_checklist(config, settings, &store, id),
        ChecklistCommands::Toggle { id, item, user } => {
            toggle_item(config, settings, &store, id, item, user.as_deref()).map(|_| ())
        }
        ChecklistCommands::Reset { id } => reset_checklist(config, settings, &store, id),
    }
}

fn show_checklist(
    config: &PrepConfig,
    settings: &Settings,
    store: &ProjectStore,
    id: &str,
) -> anyhow::Result<()> {
    let project = store.require(parse_id(id)?)?;
    let tracker = checklist_store(project, config, settings, None);
    print_checklist(&tracker);
    Ok(())
}

/// Toggle `item` and apply any resulting stage transition.
///
/// Returns the notification message when the project changed stage.
pub(crate) fn toggle_item(
    config: &PrepConfig,
    settings: &Settings,
    store: &ProjectStore,
    id: &str,
    item: &str,
    user: Option<&str>,
) -> anyhow::Result<Option<String>> {
    let project = store.require(parse_id(id)?)?;
    let mut tracker = checklist_store(project, config, settings, user);

    let toggled = tracker
        .toggle(item)
        .map(|i| (i.label.clone(), i.completed));
    match toggled {
        Ok((label, completed)) => {
            let mark = if completed { "done" } else { "open" };
            println!("{} -> {}", label, mark);
        }
        Err(PrepError::ItemNotFound(_)) => {
            let known: Vec<&str> = tracker.items().iter().map(|i| i.id.as_str()).collect();
            anyhow::bail!(
                "no checklist item '{}' (known items: {})",
                item,
                known.join(", ")
            );
        }
        Err(e) => return Err(e.into()),
    }

    let transition = tracker.evaluate_stage_transition()?;
    let message = transition.map(|t| t.message);
    if let Some(ref message) = message {
        println!();
        println!("{}", message);
    }

    println!("Progress: {}", tracker.progress());
    store.save(&tracker.into_project())?;
    Ok(message)
}

fn reset_checklist(
    config: &PrepConfig,
    settings: &Settings,
    store: &ProjectStore,
    id: &str,
) -> anyhow::Result<()> {
    let project = store.require(parse_id(id)?)?;
    let mut tracker = checklist_store(project, config, settings, None);
    let items = settings.preparation_checklist()?.items().to_vec();
    tracker.replace_all(items)?;
    print_checklist(&tracker);
    store.save(&tracker.into_project())?;
    Ok(())
}

fn print_checklist(tracker: &ChecklistStore) {
    let project = tracker.project();
    println!("{} [{}]", project.name, project.status);
    println!();

    if tracker.items().is_empty() {
        println!("  (no checklist items)");
    }
    for item in tracker.items() {
        let mark = if item.completed { "x" } else { " " };
        let optional = if item.required { "" } else { " (optional)" };
        print!("  [{}] {:<22} {}{}", mark, item.id, item.label, optional);
        match (&item.completed_by, &item.completed_at) {
            (Some(by), Some(at)) => println!("  by {} at {}", by, at.format("%Y-%m-%d %H:%M")),
            _ => println!(),
        }
    }

    println!();
    let progress = tracker.progress();
    match progress.fraction() {
        Ok(_) => println!("Progress: {}", progress),
        Err(PrepError::EmptyChecklist) => println!("Progress: n/a (empty checklist)"),
        Err(e) => println!("Progress: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::project::create_project;
    use fo_prep::ProjectStatus;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PrepConfig, Settings, ProjectStore) {
        let root = TempDir::new().unwrap();
        let config = PrepConfig::for_project(root.path());
        let settings = Settings {
            current_user: "dana".to_string(),
            ..Settings::default()
        };
        let store = ProjectStore::new(&config.projects_dir).unwrap();
        (root, config, settings, store)
    }

    #[test]
    fn toggling_every_item_moves_project_to_wb() {
        let (_root, config, settings, store) = setup();
        let project = create_project(&config, &settings, &store, "Harbour", None, None).unwrap();
        let id = project.project_id.to_string();

        let ids: Vec<String> = project.checklist.items().iter().map(|i| i.id.clone()).collect();
        let (last, rest) = ids.split_last().unwrap();
        for item in rest {
            let fired = toggle_item(&config, &settings, &store, &id, item, None).unwrap();
            assert!(fired.is_none());
        }
        let fired = toggle_item(&config, &settings, &store, &id, last, None).unwrap();
        assert!(fired.unwrap().contains("WB"));

        let saved = store.require(project.project_id).unwrap();
        assert_eq!(saved.status, ProjectStatus::Wb);
        assert_eq!(saved.checklist.progress().as_tuple(), (4, 4, 100));

        let log = std::fs::read_to_string(&config.events_log).unwrap();
        assert_eq!(log.matches("stage_transitioned").count(), 1);
    }

    #[test]
    fn toggle_uses_override_user() {
        let (_root, config, settings, store) = setup();
        let project = create_project(&config, &settings, &store, "Depot", None, None).unwrap();
        let id = project.project_id.to_string();

        toggle_item(&config, &settings, &store, &id, "team-assigned", Some("sam")).unwrap();

        let saved = store.require(project.project_id).unwrap();
        let item = saved.checklist.get("team-assigned").unwrap();
        assert_eq!(item.completed_by.as_deref(), Some("sam"));
    }

    #[test]
    fn toggle_unknown_item_fails_without_saving() {
        let (_root, config, settings, store) = setup();
        let project = create_project(&config, &settings, &store, "Depot", None, None).unwrap();
        let id = project.project_id.to_string();

        let err = toggle_item(&config, &settings, &store, &id, "catering", None).unwrap_err();
        assert!(err.to_string().contains("team-assigned"));

        let saved = store.require(project.project_id).unwrap();
        assert_eq!(saved.checklist, project.checklist);
    }

    #[test]
    fn reset_restores_fresh_checklist() {
        let (_root, config, settings, store) = setup();
        let project = create_project(&config, &settings, &store, "Depot", None, None).unwrap();
        let id = project.project_id.to_string();
        toggle_item(&config, &settings, &store, &id, "team-assigned", None).unwrap();

        reset_checklist(&config, &settings, &store, &id).unwrap();

        let saved = store.require(project.project_id).unwrap();
        assert_eq!(saved.checklist.progress().as_tuple(), (0, 4, 0));
    }
}
