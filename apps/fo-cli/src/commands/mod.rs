pub mod checklist;
pub mod project;

use fo_prep::{ChecklistStore, EventDispatcher, LogSink, PrepConfig, Project, Settings};
use uuid::Uuid;

/// Wrap a loaded project in a ChecklistStore that logs events to
/// `.filmops/events.jsonl`.
pub(crate) fn checklist_store(
    project: Project,
    config: &PrepConfig,
    settings: &Settings,
    user: Option<&str>,
) -> ChecklistStore {
    let dispatcher = EventDispatcher::new().with_sink(LogSink::new(&config.events_log));
    ChecklistStore::new(project, user.unwrap_or(&settings.current_user))
        .with_policy(settings.completion.policy)
        .with_dispatcher(dispatcher)
}

pub(crate) fn parse_id(id: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(id).map_err(|e| anyhow::anyhow!("invalid project id '{}': {}", id, e))
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}
