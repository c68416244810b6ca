//! The board handle: the task collection bound to a store.
//!
//! A `Board` is created explicitly with [`Board::init`] and handed to whoever
//! needs it. Every applied change writes the whole collection back to the
//! store before the call returns. Write failures are logged and dropped, so
//! the in-memory collection stays authoritative for the session.

use crate::domain::{filter_tasks, Change, Task, TaskCollection, TaskFilters, TaskStatus, View};
use crate::persistence::{load_or_default, save, KeyValueStore};
use log::{debug, info};

pub struct Board<S: KeyValueStore> {
    store: S,
    tasks_key: String,
    tasks: TaskCollection,
    board_filters: TaskFilters,
    backlog_filters: TaskFilters,
}

impl<S: KeyValueStore> Board<S> {
    /// Load the collection under `tasks_key`, falling back to `seed` when the
    /// key is absent or unreadable. The result is written straight back so
    /// the seed is persisted on first run.
    pub fn init(store: S, tasks_key: &str, seed: Vec<Task>) -> Self {
        let tasks: TaskCollection = load_or_default(&store, tasks_key, TaskCollection::new(seed));
        let board_filters = load_or_default(&store, View::Board.filters_key(), TaskFilters::default());
        let backlog_filters =
            load_or_default(&store, View::Backlog.filters_key(), TaskFilters::default());

        let mut board = Self {
            store,
            tasks_key: tasks_key.to_string(),
            tasks,
            board_filters,
            backlog_filters,
        };
        board.persist_tasks();
        info!(
            "event=board_init module=board status=ok key={} tasks={}",
            board.tasks_key,
            board.tasks.len()
        );
        board
    }

    /// Flush everything one last time and hand the store back
    pub fn teardown(mut self) -> S {
        self.persist_tasks();
        self.persist_filters(View::Board);
        self.persist_filters(View::Backlog);
        debug!("event=board_teardown module=board status=ok key={}", self.tasks_key);
        self.store
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn collection(&self) -> &TaskCollection {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn filters(&self, view: View) -> &TaskFilters {
        match view {
            View::Board => &self.board_filters,
            View::Backlog => &self.backlog_filters,
        }
    }

    pub fn set_filters(&mut self, view: View, filters: TaskFilters) {
        match view {
            View::Board => self.board_filters = filters,
            View::Backlog => self.backlog_filters = filters,
        }
        self.persist_filters(view);
    }

    /// The tasks `view` shows under its current filters
    pub fn visible_tasks(&self, view: View) -> Vec<Task> {
        filter_tasks(self.tasks(), self.filters(view))
    }

    pub fn add_task(&mut self, task: Task) -> Change {
        let change = self.tasks.add(task);
        self.commit("add", change)
    }

    pub fn update_task(&mut self, task: Task) -> Change {
        let change = self.tasks.update(task);
        self.commit("update", change)
    }

    pub fn delete_task(&mut self, id: &str) -> Change {
        let change = self.tasks.delete(id);
        self.commit("delete", change)
    }

    pub fn move_task(&mut self, id: &str, status: TaskStatus, index: usize) -> Change {
        let change = self.tasks.move_task(id, status, index);
        self.commit("move", change)
    }

    pub fn reorder_tasks(&mut self, status: TaskStatus, from: usize, to: usize) -> Change {
        let change = self.tasks.reorder(status, from, to);
        self.commit("reorder", change)
    }

    /// Replace the whole collection (used by `reset`)
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> Change {
        self.tasks = TaskCollection::new(tasks);
        self.commit("replace", Change::Applied)
    }

    fn commit(&mut self, op: &str, change: Change) -> Change {
        match change {
            Change::Applied => self.persist_tasks(),
            Change::NotFound => {
                debug!("event=task_{} module=board status=not_found", op);
            }
        }
        change
    }

    fn persist_tasks(&mut self) {
        save(&mut self.store, &self.tasks_key, &self.tasks);
    }

    fn persist_filters(&mut self, view: View) {
        let filters = self.filters(view).clone();
        save(&mut self.store, view.filters_key(), &filters);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{try_load, FileStore, MemoryStore};
    use pretty_assertions::assert_eq;

    fn seed() -> Vec<Task> {
        vec![
            Task::new("Seed A".to_string(), TaskStatus::Backlog),
            Task::new("Seed B".to_string(), TaskStatus::Done).with_tags(["bugfix"]),
        ]
    }

    fn stored_tasks(store: &MemoryStore) -> Vec<Task> {
        try_load(store, "tasks").unwrap().unwrap()
    }

    #[test]
    fn test_first_run_persists_seed() {
        let board = Board::init(MemoryStore::new(), "tasks", seed());
        assert_eq!(board.tasks().len(), 2);

        let store = board.teardown();
        assert_eq!(stored_tasks(&store).len(), 2);
    }

    #[test]
    fn test_existing_data_wins_over_seed() {
        let first = Board::init(MemoryStore::new(), "tasks", seed());
        let mut store = first.teardown();
        let kept = vec![Task::new("Only".to_string(), TaskStatus::Scheduled)];
        crate::persistence::try_save(&mut store, "tasks", &kept).unwrap();

        let board = Board::init(store, "tasks", seed());
        assert_eq!(board.tasks(), kept.as_slice());
    }

    #[test]
    fn test_corrupt_data_falls_back_to_seed() {
        let mut store = MemoryStore::new();
        store.insert_raw("tasks", "[{\"id\": 5}");
        let board = Board::init(store, "tasks", seed());
        assert_eq!(board.tasks().len(), 2);
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let mut board = Board::init(MemoryStore::new(), "tasks", seed());
        let task = Task::new("New".to_string(), TaskStatus::Scheduled);
        let id = task.id.clone();

        assert_eq!(board.add_task(task), Change::Applied);
        assert_eq!(board.move_task(&id, TaskStatus::Done, 0), Change::Applied);
        let store = board.teardown();
        let stored = stored_tasks(&store);
        assert_eq!(stored.len(), 3);
        assert_eq!(stored.iter().find(|t| t.id == id).unwrap().status, TaskStatus::Done);
    }

    #[test]
    fn test_stale_id_is_noop() {
        let mut board = Board::init(MemoryStore::new(), "tasks", seed());
        let before = board.tasks().to_vec();
        assert_eq!(board.delete_task("999"), Change::NotFound);
        assert_eq!(board.tasks(), before.as_slice());
    }

    #[test]
    fn test_failed_writes_keep_memory_state() {
        let mut board = Board::init(MemoryStore::rejecting_writes(), "tasks", seed());
        board.add_task(Task::new("Kept".to_string(), TaskStatus::Backlog));
        assert_eq!(board.tasks().len(), 3);

        let store = board.teardown();
        assert!(store.get("tasks").unwrap().is_none());
    }

    #[test]
    fn test_filters_are_per_view_and_persisted() {
        let mut board = Board::init(MemoryStore::new(), "tasks", seed());
        board.set_filters(View::Backlog, TaskFilters::text("bug"));

        assert!(board.filters(View::Board).is_empty());
        assert_eq!(board.visible_tasks(View::Backlog).len(), 1);
        assert_eq!(board.visible_tasks(View::Board).len(), 2);

        let store = board.teardown();
        let reloaded = Board::init(store, "tasks", Vec::new());
        assert_eq!(reloaded.filters(View::Backlog), &TaskFilters::text("bug"));
    }

    #[test]
    fn test_file_store_survives_reload() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut board = Board::init(FileStore::open(temp_dir.path()).unwrap(), "tasks", seed());
        let task = Task::new("Persisted".to_string(), TaskStatus::InProgress);
        board.add_task(task.clone());
        drop(board);

        let reopened = Board::init(FileStore::open(temp_dir.path()).unwrap(), "tasks", Vec::new());
        assert_eq!(reopened.get(&task.id), Some(&task));
    }
}
