use super::enums::TaskStatus;
use super::task::Task;

/// One board column: a status and its tasks in display order
#[derive(Debug, Clone)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub tasks: Vec<Task>,
}

/// Split an (already filtered) task list into the board's columns
pub fn board_columns(tasks: &[Task]) -> Vec<BoardColumn> {
    TaskStatus::board_columns()
        .iter()
        .map(|status| BoardColumn {
            status: *status,
            tasks: tasks.iter().filter(|t| t.status == *status).cloned().collect(),
        })
        .collect()
}

/// Short badge shown next to a task in list views
pub fn status_badge(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Backlog => "(BACKLOG)",
        TaskStatus::Scheduled => "(SCHEDULED)",
        TaskStatus::InProgress => "(IN PROGRESS)",
        TaskStatus::Done => "(DONE)",
    }
}

/// Render tags as "[a] [b]"
pub fn tag_line(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("[{}]", t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to `max` chars, adding an ellipsis when shortened
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_columns_skip_backlog() {
        let tasks = vec![
            Task::new("a".to_string(), TaskStatus::Backlog),
            Task::new("b".to_string(), TaskStatus::Done),
            Task::new("c".to_string(), TaskStatus::Scheduled),
            Task::new("d".to_string(), TaskStatus::Done),
        ];
        let columns = board_columns(&tasks);
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].status, TaskStatus::Scheduled);
        assert_eq!(columns[0].tasks.len(), 1);
        assert_eq!(columns[1].tasks.len(), 0);
        let done: Vec<&str> = columns[2].tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(done, vec!["b", "d"]);
    }

    #[test]
    fn test_tag_line() {
        let tags = vec!["ui".to_string(), "design".to_string()];
        assert_eq!(tag_line(&tags), "[ui] [design]");
        assert_eq!(tag_line(&[]), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long title", 6), "a lon…");
    }
}
