// project.rs — Project subcommands: create, list, status, advance, delete.

use clap::Subcommand;
use fo_prep::{
    EventDispatcher, LogSink, PrepConfig, PrepEvent, Project, ProjectStatus, ProjectStore,
    Settings,
};

use super::{checklist_store, parse_id, truncate};

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a project in PV90 with a fresh preparation checklist.
    Create {
        /// Project name (e.g., "Harbour Tower lobby").
        name: String,
        /// Client organisation.
        #[arg(long)]
        client: Option<String>,
        /// Site address or city.
        #[arg(long)]
        location: Option<String>,
    },
    /// List all projects.
    List {
        /// Filter by status code (PV90, UB, WB, WIP, QF, Completed).
        #[arg(long)]
        status: Option<String>,
    },
    /// Show details for a project.
    Status {
        /// Project ID.
        id: String,
    },
    /// Move a project to another status.
    Advance {
        /// Project ID.
        id: String,
        /// Target status code.
        status: String,
    },
    /// Delete a project record.
    Delete {
        /// Project ID.
        id: String,
    },
}

pub fn execute(
    cmd: &ProjectCommands,
    config: &PrepConfig,
    settings: &Settings,
) -> anyhow::Result<()> {
    let store = ProjectStore::new(&config.projects_dir)?;

    match cmd {
        ProjectCommands::Create {
            name,
            client,
            location,
        } => create_project(
            config,
            settings,
            &store,
            name,
            client.as_deref(),
            location.as_deref(),
        )
        .map(|_| ()),
        ProjectCommands::List { status } => list_projects(&store, status.as_deref()),
        ProjectCommands::Status { id } => show_status(&store, id),
        ProjectCommands::Advance { id, status } => {
            advance_project(config, settings, &store, id, status)
        }
        ProjectCommands::Delete { id } => delete_project(&store, id),
    }
}

pub(crate) fn create_project(
    config: &PrepConfig,
    settings: &Settings,
    store: &ProjectStore,
    name: &str,
    client: Option<&str>,
    location: Option<&str>,
) -> anyhow::Result<Project> {
    let mut project = Project::new(name, settings.preparation_checklist()?);
    project.client = client.map(str::to_string);
    project.location = location.map(str::to_string);
    store.save(&project)?;

    EventDispatcher::new()
        .with_sink(LogSink::new(&config.events_log))
        .dispatch(&PrepEvent::project_created(project.project_id, &project.name));

    println!("Project created: {}", project.project_id);
    println!("  Name:      {}", project.name);
    println!("  Status:    {}", project.status);
    println!("  Checklist: {} item(s)", project.checklist.len());

    Ok(project)
}

fn list_projects(store: &ProjectStore, status: Option<&str>) -> anyhow::Result<()> {
    let projects = match status {
        Some(code) => store.list_by_status(code.parse::<ProjectStatus>()?)?,
        None => store.list()?,
    };

    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    println!("{:<38} {:<30} {:<10} {:<12}", "ID", "NAME", "STATUS", "PREP");
    println!("{}", "-".repeat(92));

    for p in &projects {
        println!(
            "{:<38} {:<30} {:<10} {:<12}",
            p.project_id,
            truncate(&p.name, 28),
            p.status.to_string(),
            p.checklist.progress().to_string(),
        );
    }
    println!("\n{} project(s) total.", projects.len());

    Ok(())
}

fn show_status(store: &ProjectStore, id: &str) -> anyhow::Result<()> {
    let p = store.require(parse_id(id)?)?;

    println!("Project:   {}", p.project_id);
    println!("Name:      {}", p.name);
    if let Some(ref client) = p.client {
        println!("Client:    {}", client);
    }
    if let Some(ref location) = p.location {
        println!("Location:  {}", location);
    }
    println!("Status:    {}", p.status);
    println!("Prep:      {}", p.checklist.progress());
    println!("Created:   {}", p.created_at.to_rfc3339());
    println!("Updated:   {}", p.updated_at.to_rfc3339());

    Ok(())
}

pub(crate) fn advance_project(
    config: &PrepConfig,
    settings: &Settings,
    store: &ProjectStore,
    id: &str,
    status: &str,
) -> anyhow::Result<()> {
    let target: ProjectStatus = status.parse()?;
    let project = store.require(parse_id(id)?)?;
    let from = project.status;

    let mut tracker = checklist_store(project, config, settings, None);
    tracker.advance(target)?;
    let project = tracker.into_project();
    store.save(&project)?;

    println!("{}: {} -> {}", project.name, from, project.status);
    Ok(())
}

fn delete_project(store: &ProjectStore, id: &str) -> anyhow::Result<()> {
    let project_id = parse_id(id)?;
    let project = store.require(project_id)?;
    store.delete(project_id)?;
    println!("Deleted project: {} ({})", project.name, project_id);
    Ok(())
}
