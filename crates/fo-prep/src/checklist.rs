// checklist.rs — Preparation checklist items and derived progress.
//
// A checklist is an ordered list of named boolean sub-tasks. Items are only
// ever mutated through `toggle`; the whole list is swapped out with
// `replace_all` when a different task set is loaded.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PrepError;

/// Item ids and labels for the standard preparation checklist.
pub const DEFAULT_ITEMS: [(&str, &str); 4] = [
    ("team-assigned", "Team Assigned"),
    ("travel-arranged", "Travel Arranged"),
    ("trailer-assigned", "Trailer Assigned"),
    ("documents-uploaded", "Documents Uploaded"),
];

/// One named sub-task gating stage completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistItem {
    /// Opaque identifier, unique within its checklist.
    pub id: String,

    /// Human-readable task name (e.g., "Team Assigned").
    pub label: String,

    pub completed: bool,

    /// Whether the item gates completion under the `required_only` policy.
    #[serde(default = "default_required")]
    pub required: bool,

    /// When the item was last marked complete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Who marked the item complete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<String>,
}

fn default_required() -> bool {
    true
}

impl ChecklistItem {
    /// Create an incomplete item.
    pub fn new(id: impl Into<String>, label: impl Into<String>, required: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            completed: false,
            required,
            completed_at: None,
            completed_by: None,
        }
    }

    /// Flip `completed`, stamping or clearing the audit fields.
    fn toggle(&mut self, user: &str, now: DateTime<Utc>) {
        self.completed = !self.completed;
        if self.completed {
            self.completed_at = Some(now);
            self.completed_by = Some(user.to_string());
        } else {
            self.completed_at = None;
            self.completed_by = None;
        }
    }
}

/// Which items must be complete for the checklist to count as complete.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompletionPolicy {
    /// Every item gates completion, regardless of `required`.
    #[default]
    AllItems,
    /// Only items marked `required` gate completion. A checklist with no
    /// required items falls back to `AllItems`.
    RequiredOnly,
}

/// Snapshot of checklist completion: `(completed, total, percentage)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent; always within 0..=100.
    pub percentage: u8,
}

impl Progress {
    /// Compute progress for `completed` out of `total` items.
    ///
    /// An empty checklist yields `(0, 0, 0)`.
    pub fn new(completed: usize, total: usize) -> Self {
        let completed = completed.min(total);
        let percentage = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u8
        };
        Self {
            completed,
            total,
            percentage,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Unrounded completion ratio in `0.0..=1.0`.
    pub fn fraction(&self) -> Result<f64, PrepError> {
        if self.total == 0 {
            return Err(PrepError::EmptyChecklist);
        }
        Ok(self.completed as f64 / self.total as f64)
    }

    pub fn as_tuple(&self) -> (usize, usize, u8) {
        (self.completed, self.total, self.percentage)
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({}%)", self.completed, self.total, self.percentage)
    }
}

/// The preparation checklist for one project.
///
/// Item ids are unique; every constructor (and deserialization) rejects
/// duplicates with `DuplicateItem`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<ChecklistItem>", into = "Vec<ChecklistItem>")]
pub struct Checklist {
    items: Vec<ChecklistItem>,
}

impl Checklist {
    pub fn new(items: Vec<ChecklistItem>) -> Result<Self, PrepError> {
        ensure_unique_ids(&items)?;
        Ok(Self { items })
    }

    /// The standard four-item preparation checklist, all required.
    pub fn preparation() -> Self {
        Self {
            items: DEFAULT_ITEMS
                .iter()
                .map(|(id, label)| ChecklistItem::new(*id, *label, true))
                .collect(),
        }
    }

    /// Build a checklist of required items from `(id, label)` pairs.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, PrepError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self::new(
            labels
                .into_iter()
                .map(|(id, label)| ChecklistItem::new(id, label, true))
                .collect(),
        )
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn get(&self, item_id: &str) -> Option<&ChecklistItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flip the item with `item_id`. Unknown ids leave the list untouched.
    pub fn toggle(
        &mut self,
        item_id: &str,
        user: &str,
        now: DateTime<Utc>,
    ) -> Result<&ChecklistItem, PrepError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| PrepError::ItemNotFound(item_id.to_string()))?;
        item.toggle(user, now);
        Ok(&*item)
    }

    /// Swap in a new item list. No merge with the previous items.
    ///
    /// A list with duplicate ids is rejected and the current items are kept.
    pub fn replace_all(&mut self, items: Vec<ChecklistItem>) -> Result<(), PrepError> {
        ensure_unique_ids(&items)?;
        self.items = items;
        Ok(())
    }

    pub fn progress(&self) -> Progress {
        let completed = self.items.iter().filter(|item| item.completed).count();
        Progress::new(completed, self.items.len())
    }

    /// Whether the checklist counts as complete under `policy`.
    ///
    /// An empty checklist is never complete.
    pub fn is_complete(&self, policy: CompletionPolicy) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let has_required = self.items.iter().any(|item| item.required);
        match policy {
            CompletionPolicy::RequiredOnly if has_required => self
                .items
                .iter()
                .filter(|item| item.required)
                .all(|item| item.completed),
            _ => self.items.iter().all(|item| item.completed),
        }
    }
}

fn ensure_unique_ids(items: &[ChecklistItem]) -> Result<(), PrepError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(PrepError::DuplicateItem(item.id.clone()));
        }
    }
    Ok(())
}

impl TryFrom<Vec<ChecklistItem>> for Checklist {
    type Error = PrepError;

    fn try_from(items: Vec<ChecklistItem>) -> Result<Self, Self::Error> {
        Checklist::new(items)
    }
}

impl From<Checklist> for Vec<ChecklistItem> {
    fn from(checklist: Checklist) -> Self {
        checklist.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn preparation_checklist_has_four_required_items() {
        let checklist = Checklist::preparation();
        assert_eq!(checklist.len(), 4);
        assert!(checklist.items().iter().all(|i| i.required && !i.completed));
        assert_eq!(checklist.get("team-assigned").unwrap().label, "Team Assigned");
    }

    #[test]
    fn toggle_stamps_audit_fields() {
        let mut checklist = Checklist::preparation();
        let item = checklist.toggle("trailer-assigned", "dana", now()).unwrap();
        assert!(item.completed);
        assert!(item.completed_at.is_some());
        assert_eq!(item.completed_by.as_deref(), Some("dana"));
    }

    #[test]
    fn toggle_twice_restores_item() {
        let mut checklist = Checklist::preparation();
        let original = checklist.get("travel-arranged").unwrap().clone();

        checklist.toggle("travel-arranged", "dana", now()).unwrap();
        checklist.toggle("travel-arranged", "dana", now()).unwrap();

        let item = checklist.get("travel-arranged").unwrap();
        assert_eq!(item, &original);
        assert!(item.completed_at.is_none());
        assert!(item.completed_by.is_none());
    }

    #[test]
    fn toggle_unknown_id_leaves_list_unchanged() {
        let mut checklist = Checklist::preparation();
        checklist.toggle("team-assigned", "dana", now()).unwrap();
        let before = serde_json::to_string(&checklist).unwrap();

        let result = checklist.toggle("no-such-item", "dana", now()).map(|_| ());
        assert!(matches!(result, Err(PrepError::ItemNotFound(ref id)) if id == "no-such-item"));
        assert_eq!(serde_json::to_string(&checklist).unwrap(), before);
    }

    #[test]
    fn two_of_four_is_fifty_percent() {
        let mut checklist = Checklist::preparation();
        checklist.toggle("team-assigned", "dana", now()).unwrap();
        checklist.toggle("documents-uploaded", "dana", now()).unwrap();
        assert_eq!(checklist.progress().as_tuple(), (2, 4, 50));
    }

    #[test]
    fn progress_is_monotonic_while_completing() {
        let mut checklist = Checklist::preparation();
        let ids: Vec<String> = checklist.items().iter().map(|i| i.id.clone()).collect();
        let mut last = checklist.progress().percentage;
        for id in ids {
            checklist.toggle(&id, "dana", now()).unwrap();
            let pct = checklist.progress().percentage;
            assert!(pct >= last);
            last = pct;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn progress_rounds_to_nearest_percent() {
        assert_eq!(Progress::new(1, 3).percentage, 33);
        assert_eq!(Progress::new(2, 3).percentage, 67);
    }

    #[test]
    fn empty_checklist_progress_is_zero_sentinel() {
        let mut checklist = Checklist::preparation();
        checklist.replace_all(Vec::new()).unwrap();
        let progress = checklist.progress();
        assert_eq!(progress.as_tuple(), (0, 0, 0));
        assert!(progress.is_empty());
        assert!(matches!(progress.fraction(), Err(PrepError::EmptyChecklist)));
        assert!(!checklist.is_complete(CompletionPolicy::AllItems));
    }

    #[test]
    fn required_only_policy_ignores_optional_items() {
        let mut checklist = Checklist::new(vec![
            ChecklistItem::new("team", "Team Assigned", true),
            ChecklistItem::new("photos", "Site Photos", false),
        ])
        .unwrap();
        checklist.toggle("team", "dana", now()).unwrap();

        assert!(checklist.is_complete(CompletionPolicy::RequiredOnly));
        assert!(!checklist.is_complete(CompletionPolicy::AllItems));
    }

    #[test]
    fn required_only_falls_back_when_nothing_required() {
        let checklist =
            Checklist::new(vec![ChecklistItem::new("photos", "Site Photos", false)]).unwrap();
        assert!(!checklist.is_complete(CompletionPolicy::RequiredOnly));
    }

    #[test]
    fn missing_required_field_defaults_to_true() {
        let json = r#"[{"id":"a","label":"A","completed":false}]"#;
        let checklist: Checklist = serde_json::from_str(json).unwrap();
        assert!(checklist.items()[0].required);
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let result = Checklist::new(vec![
            ChecklistItem::new("team-assigned", "Team Assigned", true),
            ChecklistItem::new("team-assigned", "Team Assigned (crew 2)", true),
        ]);
        assert!(matches!(result, Err(PrepError::DuplicateItem(ref id)) if id == "team-assigned"));

        let result = Checklist::from_labels([("a", "A"), ("a", "Again")]);
        assert!(matches!(result, Err(PrepError::DuplicateItem(_))));
    }

    #[test]
    fn replace_all_rejects_duplicate_ids_and_keeps_items() {
        let mut checklist = Checklist::preparation();
        checklist.toggle("team-assigned", "dana", now()).unwrap();
        let before = checklist.clone();

        let result = checklist.replace_all(vec![
            ChecklistItem::new("permit", "Permit Filed", true),
            ChecklistItem::new("permit", "Permit Approved", true),
        ]);
        assert!(matches!(result, Err(PrepError::DuplicateItem(ref id)) if id == "permit"));
        assert_eq!(checklist, before);
    }

    #[test]
    fn deserializing_duplicate_ids_fails() {
        let json = r#"[
            {"id":"a","label":"A","completed":false},
            {"id":"a","label":"A again","completed":true}
        ]"#;
        let result = serde_json::from_str::<Checklist>(json);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("duplicate checklist item id: a"));
    }
}
