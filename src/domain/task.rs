use super::enums::TaskStatus;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A card on the board.
///
/// Every field except `id` has a serde default so documents written by older
/// versions (or with fields missing) still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique, immutable ID
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub assignee: String,
    /// Display order only; no duplicates
    #[serde(default)]
    pub tags: Vec<String>,
    /// Set once at creation
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(title: String, status: TaskStatus) -> Self {
        Self {
            id: new_task_id(),
            title,
            description: String::new(),
            status,
            assignee: String::new(),
            tags: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Builder-style description setter
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style assignee setter
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = assignee.into();
        self
    }

    /// Builder-style tags setter (duplicates dropped, order kept)
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.clear();
        for tag in tags {
            let tag = tag.into();
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }

    /// Case-insensitive exact tag check
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.to_lowercase() == tag.to_lowercase())
    }

    /// Creation time in the local timezone, for display
    pub fn created_local(&self) -> DateTime<Local> {
        self.created_at.with_timezone(&Local)
    }
}

/// Random v4 UUID; two tasks created in the same instant still get distinct IDs
pub fn new_task_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_task_new() {
        let task = Task::new("Write docs".to_string(), TaskStatus::Scheduled);
        assert_eq!(task.title, "Write docs");
        assert_eq!(task.status, TaskStatus::Scheduled);
        assert!(task.tags.is_empty());
        assert!(Uuid::parse_str(&task.id).is_ok());
    }

    #[test]
    fn test_ids_are_unique_in_tight_loop() {
        let ids: HashSet<String> = (0..1000).map(|_| new_task_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_with_tags_drops_duplicates() {
        let task = Task::new("t".to_string(), TaskStatus::Backlog)
            .with_tags(["ui", "design", "ui"]);
        assert_eq!(task.tags, vec!["ui".to_string(), "design".to_string()]);
    }

    #[test]
    fn test_has_tag_ignores_case() {
        let task = Task::new("t".to_string(), TaskStatus::Backlog).with_tags(["Frontend"]);
        assert!(task.has_tag("frontend"));
        assert!(!task.has_tag("front"));
    }

    #[test]
    fn test_json_uses_camel_case_created_at() {
        let task = Task::new("t".to_string(), TaskStatus::InProgress);
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["status"], "in-progress");
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let task: Task = serde_json::from_str(r#"{"id":"42","title":"Old"}"#).unwrap();
        assert_eq!(task.id, "42");
        assert_eq!(task.title, "Old");
        assert_eq!(task.status, TaskStatus::Backlog);
        assert!(task.assignee.is_empty());
        assert!(task.tags.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let task: Task =
            serde_json::from_str(r#"{"id":"1","status":"to-do","priority":"high"}"#).unwrap();
        assert_eq!(task.status, TaskStatus::Scheduled);
    }
}
