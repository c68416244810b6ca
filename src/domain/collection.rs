use super::enums::TaskStatus;
use super::task::Task;
use serde::{Deserialize, Serialize};

/// Result of a collection operation.
///
/// Operations that reference a task that no longer exists are silent no-ops
/// so that stale UI references (a double-pressed delete, say) stay harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Applied,
    NotFound,
}

/// Ordered set of tasks.
///
/// The relative order of tasks sharing a status is that column's display
/// order. Each operation builds the complete next vector before swapping it
/// in, so a half-applied state is never observable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskCollection {
    tasks: Vec<Task>,
}

impl TaskCollection {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Append a task. IDs are not checked for duplicates.
    pub fn add(&mut self, task: Task) -> Change {
        let mut next = self.tasks.clone();
        next.push(task);
        self.tasks = next;
        Change::Applied
    }

    /// Replace the task with the same ID, keeping its index
    pub fn update(&mut self, task: Task) -> Change {
        let Some(idx) = self.position(&task.id) else {
            return Change::NotFound;
        };
        let mut next = self.tasks.clone();
        next[idx] = task;
        self.tasks = next;
        Change::Applied
    }

    pub fn delete(&mut self, id: &str) -> Change {
        let Some(idx) = self.position(id) else {
            return Change::NotFound;
        };
        let mut next = self.tasks.clone();
        next.remove(idx);
        self.tasks = next;
        Change::Applied
    }

    /// Move a task into `status` so that `index` tasks of that status precede
    /// it. An index past the end of the group lands at the group's end.
    pub fn move_task(&mut self, id: &str, status: TaskStatus, index: usize) -> Change {
        let Some(from) = self.position(id) else {
            return Change::NotFound;
        };
        let mut next = self.tasks.clone();
        let mut task = next.remove(from);
        task.status = status;
        let at = insertion_point(&next, status, index);
        next.insert(at, task);
        self.tasks = next;
        Change::Applied
    }

    /// Within one status group, take the task at `from` and put it at `to`.
    /// Tasks of other statuses keep their exact positions.
    pub fn reorder(&mut self, status: TaskStatus, from: usize, to: usize) -> Change {
        let slots: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.status == status)
            .map(|(i, _)| i)
            .collect();
        if from >= slots.len() {
            return Change::NotFound;
        }

        let mut group: Vec<Task> = slots.iter().map(|&i| self.tasks[i].clone()).collect();
        let task = group.remove(from);
        group.insert(to.min(group.len()), task);

        let mut next = self.tasks.clone();
        for (slot, task) in slots.into_iter().zip(group) {
            next[slot] = task;
        }
        self.tasks = next;
        Change::Applied
    }

    /// Tasks of one status, in display order
    pub fn status_group(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// Distinct non-empty assignees in first-seen order
    pub fn all_assignees(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for task in &self.tasks {
            if !task.assignee.is_empty() && !seen.contains(&task.assignee) {
                seen.push(task.assignee.clone());
            }
        }
        seen
    }

    /// Distinct tags in first-seen order
    pub fn all_tags(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for tag in self.tasks.iter().flat_map(|t| &t.tags) {
            if !seen.contains(tag) {
                seen.push(tag.clone());
            }
        }
        seen
    }
}

/// Index in `tasks` at which a task should be inserted so that
/// `min(index, group_len)` members of `status` precede it
fn insertion_point(tasks: &[Task], status: TaskStatus, index: usize) -> usize {
    let mut last_member = None;
    let mut seen = 0;
    for (i, task) in tasks.iter().enumerate() {
        if task.status != status {
            continue;
        }
        if seen == index {
            return i;
        }
        seen += 1;
        last_member = Some(i);
    }
    match last_member {
        Some(i) => i + 1,
        None => tasks.len(),
    }
}
