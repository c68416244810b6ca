use serde::{Deserialize, Serialize};

/// Column a task lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Backlog,
    /// Older boards stored this column as "to-do"
    #[serde(alias = "to-do")]
    Scheduled,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Parse status from its stored tag like "in-progress"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().replace('_', "-").as_str() {
            "backlog" => Some(Self::Backlog),
            "scheduled" | "to-do" | "todo" => Some(Self::Scheduled),
            "in-progress" | "inprogress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Convert status to its stored tag
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Scheduled => "scheduled",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    /// Human-readable column title
    pub fn label(&self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::Scheduled => "Scheduled",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Next status in form-cycling order (wraps)
    pub fn next(&self) -> Self {
        match self {
            Self::Backlog => Self::Scheduled,
            Self::Scheduled => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::Backlog,
        }
    }

    /// Previous status in form-cycling order (wraps)
    pub fn prev(&self) -> Self {
        match self {
            Self::Backlog => Self::Done,
            Self::Scheduled => Self::Backlog,
            Self::InProgress => Self::Scheduled,
            Self::Done => Self::InProgress,
        }
    }

    /// Get all statuses as a list
    #[cfg(test)]
    pub fn all() -> &'static [TaskStatus] {
        &[
            TaskStatus::Backlog,
            TaskStatus::Scheduled,
            TaskStatus::InProgress,
            TaskStatus::Done,
        ]
    }

    /// Columns shown on the board view (backlog has its own view)
    pub fn board_columns() -> &'static [TaskStatus] {
        &[TaskStatus::Scheduled, TaskStatus::InProgress, TaskStatus::Done]
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_tag())
    }
}

/// Which screen the user is looking at. Each view keeps its own filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Board,
    Backlog,
}

impl View {
    /// Store key holding this view's persisted filters
    pub fn filters_key(&self) -> &'static str {
        match self {
            View::Board => "filters.board",
            View::Backlog => "filters.backlog",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            View::Board => "Board",
            View::Backlog => "Backlog",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            View::Board => View::Backlog,
            View::Backlog => View::Board,
        }
    }
}

/// Input routing mode for the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    /// Typing into the free-text filter
    EditingFilter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_tag() {
        assert_eq!(TaskStatus::from_tag("backlog"), Some(TaskStatus::Backlog));
        assert_eq!(TaskStatus::from_tag("in-progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::from_tag("IN_PROGRESS"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::from_tag("to-do"), Some(TaskStatus::Scheduled));
        assert_eq!(TaskStatus::from_tag("blocked"), None);
    }

    #[test]
    fn test_status_tag_round_trip() {
        for status in TaskStatus::all() {
            assert_eq!(TaskStatus::from_tag(status.to_tag()), Some(*status));
        }
    }

    #[test]
    fn test_status_serde_uses_kebab_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");

        let legacy: TaskStatus = serde_json::from_str("\"to-do\"").unwrap();
        assert_eq!(legacy, TaskStatus::Scheduled);
    }

    #[test]
    fn test_status_cycle_wraps() {
        assert_eq!(TaskStatus::Done.next(), TaskStatus::Backlog);
        assert_eq!(TaskStatus::Backlog.prev(), TaskStatus::Done);
        for status in TaskStatus::all() {
            assert_eq!(status.next().prev(), *status);
        }
    }

    #[test]
    fn test_view_filters_keys_differ() {
        assert_ne!(View::Board.filters_key(), View::Backlog.filters_key());
        assert_eq!(View::Board.toggle(), View::Backlog);
    }
}
