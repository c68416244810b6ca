use super::task::Task;
use serde::{Deserialize, Serialize};

/// Per-view query. An empty field places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskFilters {
    pub text: String,
    pub assignee: String,
    pub tag: String,
}

impl TaskFilters {
    #[cfg(test)]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.assignee.is_empty() && self.tag.is_empty()
    }

    /// True when the task satisfies every non-empty predicate
    pub fn matches(&self, task: &Task) -> bool {
        matches_text(task, &self.text)
            && matches_assignee(task, &self.assignee)
            && matches_tag(task, &self.tag)
    }
}

/// Case-insensitive substring of title, description, assignee or any tag
fn matches_text(task: &Task, text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    let needle = text.to_lowercase();
    task.title.to_lowercase().contains(&needle)
        || task.description.to_lowercase().contains(&needle)
        || task.assignee.to_lowercase().contains(&needle)
        || task.tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

fn matches_assignee(task: &Task, assignee: &str) -> bool {
    assignee.is_empty() || task.assignee.to_lowercase() == assignee.to_lowercase()
}

fn matches_tag(task: &Task, tag: &str) -> bool {
    tag.is_empty() || task.has_tag(tag)
}

/// Derive the filtered view of `tasks`, keeping source order
pub fn filter_tasks(tasks: &[Task], filters: &TaskFilters) -> Vec<Task> {
    tasks.iter().filter(|t| filters.matches(t)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;
    use pretty_assertions::assert_eq;

    fn navbar() -> Task {
        Task::new("Fix Responsive Navbar".to_string(), TaskStatus::InProgress)
            .with_description("Collapse menu on small screens")
            .with_assignee("Emma Johnson")
            .with_tags(["frontend", "bugfix"])
    }

    fn corpus() -> Vec<Task> {
        vec![
            navbar(),
            Task::new("Set Up CI/CD Pipeline".to_string(), TaskStatus::Scheduled)
                .with_description("GitHub Actions")
                .with_assignee("Felix Zhang")
                .with_tags(["devops"]),
            Task::new("Create API Documentation".to_string(), TaskStatus::Done)
                .with_assignee("Emma Johnson")
                .with_tags(["documentation", "backend"]),
            Task::new("Bug bash".to_string(), TaskStatus::Backlog).with_assignee("felix zhang"),
        ]
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_empty_filters_pass_everything() {
        let tasks = corpus();
        assert_eq!(filter_tasks(&tasks, &TaskFilters::default()), tasks);
    }

    #[test]
    fn test_text_matches_tag_substring() {
        let filters = TaskFilters::text("bug");
        assert!(filters.matches(&navbar()));
    }

    #[test]
    fn test_text_searches_every_field_case_insensitively() {
        let tasks = corpus();
        assert_eq!(
            titles(&filter_tasks(&tasks, &TaskFilters::text("GITHUB"))),
            vec!["Set Up CI/CD Pipeline"]
        );
        assert_eq!(
            titles(&filter_tasks(&tasks, &TaskFilters::text("emma"))),
            vec!["Fix Responsive Navbar", "Create API Documentation"]
        );
    }

    #[test]
    fn test_assignee_is_exact_ignoring_case() {
        let tasks = corpus();
        let filters = TaskFilters {
            assignee: "Felix Zhang".to_string(),
            ..TaskFilters::default()
        };
        assert_eq!(
            titles(&filter_tasks(&tasks, &filters)),
            vec!["Set Up CI/CD Pipeline", "Bug bash"]
        );

        let partial = TaskFilters {
            assignee: "Felix".to_string(),
            ..TaskFilters::default()
        };
        assert!(filter_tasks(&tasks, &partial).is_empty());
    }

    #[test]
    fn test_tag_is_exact_ignoring_case() {
        let tasks = corpus();
        let filters = TaskFilters {
            tag: "BACKEND".to_string(),
            ..TaskFilters::default()
        };
        assert_eq!(titles(&filter_tasks(&tasks, &filters)), vec!["Create API Documentation"]);

        let partial = TaskFilters {
            tag: "back".to_string(),
            ..TaskFilters::default()
        };
        assert!(filter_tasks(&tasks, &partial).is_empty());
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let tasks = corpus();
        let filters = TaskFilters {
            text: "o".to_string(),
            assignee: "emma johnson".to_string(),
            tag: "frontend".to_string(),
        };
        let result = filter_tasks(&tasks, &filters);
        assert_eq!(titles(&result), vec!["Fix Responsive Navbar"]);

        for task in &tasks {
            let each = TaskFilters::text(filters.text.clone()).matches(task)
                && TaskFilters {
                    assignee: filters.assignee.clone(),
                    ..TaskFilters::default()
                }
                .matches(task)
                && TaskFilters {
                    tag: filters.tag.clone(),
                    ..TaskFilters::default()
                }
                .matches(task);
            assert_eq!(filters.matches(task), each);
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let tasks = corpus();
        let filters = TaskFilters::text("e");
        let once = filter_tasks(&tasks, &filters);
        let twice = filter_tasks(&once, &filters);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filters_deserialize_with_missing_fields() {
        let filters: TaskFilters = serde_json::from_str(r#"{"text":"x"}"#).unwrap();
        assert_eq!(filters, TaskFilters::text("x"));
        assert!(!filters.is_empty());
    }
}
