//! Create/edit/delete intents routed through a single modal state.
//!
//! The modal is a sum type, so an edit or delete can never be open without
//! the task it refers to. Submitting forwards to the [`Board`] and reports
//! what happened; deciding what to show the user is left to the caller.

use crate::board::Board;
use crate::domain::{Change, Task, TaskStatus};
use crate::persistence::KeyValueStore;

/// Which modal is open, if any
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalMode {
    #[default]
    Closed,
    Add,
    /// Snapshot of the task as it was when the modal opened
    Edit { task: Task },
    Delete { task: Task },
}

/// What a submit did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    TaskAdded(Task),
    TaskUpdated(Task),
    TaskDeleted(Task),
    /// The task was removed elsewhere before the submit landed
    Stale,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("no {0} form is open")]
    NotOpen(&'static str),
    #[error("title cannot be empty")]
    EmptyTitle,
}

/// Editable fields of the add/edit form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub assignee: String,
    pub status: TaskStatus,
    pub tags: Vec<String>,
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            assignee: task.assignee.clone(),
            status: task.status,
            tags: task.tags.clone(),
        }
    }

    /// Add a trimmed, non-empty tag unless already present
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Every editable field equals the task's
    pub fn matches_task(&self, task: &Task) -> bool {
        self.title == task.title
            && self.description == task.description
            && self.assignee == task.assignee
            && self.status == task.status
            && self.tags == task.tags
    }

    /// Fresh task with a new id and creation time
    pub fn into_new_task(self) -> Task {
        Task::new(self.title, self.status)
            .with_description(self.description)
            .with_assignee(self.assignee)
            .with_tags(self.tags)
    }

    /// `task` with the draft's fields; id and createdAt are kept
    pub fn apply_to(&self, task: &Task) -> Task {
        Task {
            title: self.title.clone(),
            description: self.description.clone(),
            assignee: self.assignee.clone(),
            status: self.status,
            tags: self.tags.clone(),
            ..task.clone()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskActions {
    mode: ModalMode,
}

impl TaskActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &ModalMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != ModalMode::Closed
    }

    /// Open the add form; any previously selected task is dropped
    pub fn open_add(&mut self) {
        self.mode = ModalMode::Add;
    }

    pub fn open_edit(&mut self, task: &Task) {
        self.mode = ModalMode::Edit { task: task.clone() };
    }

    pub fn open_delete(&mut self, task: &Task) {
        self.mode = ModalMode::Delete { task: task.clone() };
    }

    pub fn close(&mut self) {
        self.mode = ModalMode::Closed;
    }

    /// Draft to pre-fill the open form with
    pub fn initial_draft(&self) -> TaskDraft {
        match &self.mode {
            ModalMode::Edit { task } | ModalMode::Delete { task } => TaskDraft::from_task(task),
            ModalMode::Add | ModalMode::Closed => TaskDraft::default(),
        }
    }

    /// Advisory "nothing changed" check for the edit form. Never blocks
    /// [`submit_edit`](Self::submit_edit).
    pub fn is_unchanged(&self, draft: &TaskDraft) -> bool {
        match &self.mode {
            ModalMode::Edit { task } => draft.matches_task(task),
            _ => false,
        }
    }

    pub fn submit_add<S: KeyValueStore>(
        &mut self,
        board: &mut Board<S>,
        draft: TaskDraft,
    ) -> Result<ActionOutcome, ActionError> {
        if self.mode != ModalMode::Add {
            return Err(ActionError::NotOpen("add"));
        }
        if draft.title.trim().is_empty() {
            return Err(ActionError::EmptyTitle);
        }
        let task = draft.into_new_task();
        board.add_task(task.clone());
        self.close();
        Ok(ActionOutcome::TaskAdded(task))
    }

    pub fn submit_edit<S: KeyValueStore>(
        &mut self,
        board: &mut Board<S>,
        draft: TaskDraft,
    ) -> Result<ActionOutcome, ActionError> {
        let ModalMode::Edit { task } = &self.mode else {
            return Err(ActionError::NotOpen("edit"));
        };
        if draft.title.trim().is_empty() {
            return Err(ActionError::EmptyTitle);
        }
        let updated = draft.apply_to(task);
        let change = board.update_task(updated.clone());
        self.close();
        Ok(match change {
            Change::Applied => ActionOutcome::TaskUpdated(updated),
            Change::NotFound => ActionOutcome::Stale,
        })
    }

    pub fn confirm_delete<S: KeyValueStore>(
        &mut self,
        board: &mut Board<S>,
    ) -> Result<ActionOutcome, ActionError> {
        let ModalMode::Delete { task } = std::mem::take(&mut self.mode) else {
            return Err(ActionError::NotOpen("delete"));
        };
        Ok(match board.delete_task(&task.id) {
            Change::Applied => ActionOutcome::TaskDeleted(task),
            Change::NotFound => ActionOutcome::Stale,
        })
    }
}
