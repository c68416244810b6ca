use crate::actions::{ActionOutcome, ModalMode, TaskActions, TaskDraft};
use crate::board::Board;
use crate::domain::{board_columns, BoardColumn, Change, Task, TaskFilters, TaskStatus, UiMode, View};
use crate::notifications::Toasts;
use crate::persistence::{AppConfig, DynStore};
use crate::scheduler::Debouncer;
use anyhow::Result;
use log::{debug, error, info};
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// Field focused in the add/edit form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Assignee,
    Status,
    Tags,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Assignee,
            FormField::Assignee => FormField::Status,
            FormField::Status => FormField::Tags,
            FormField::Tags => FormField::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Title => FormField::Tags,
            FormField::Description => FormField::Title,
            FormField::Assignee => FormField::Description,
            FormField::Status => FormField::Assignee,
            FormField::Tags => FormField::Status,
        }
    }
}

/// Input form state for adding/editing tasks
#[derive(Debug, Clone)]
pub struct FormState {
    pub draft: TaskDraft,
    pub field: FormField,
    /// Tag being typed, added on Enter
    pub tag_input: String,
}

/// Direction for keyboard moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Main application state
pub struct AppState {
    pub board: Board<DynStore>,
    pub actions: TaskActions,
    pub form: Option<FormState>,
    pub toasts: Toasts,
    pub view: View,
    pub ui_mode: UiMode,
    /// Board view: selected column (index into board columns)
    pub selected_column: usize,
    /// Board view: row in the column; backlog view: row in the list
    pub selected_row: usize,
    /// Text filter as typed, not yet committed
    pub filter_input: String,
    pub filter_debounce: Debouncer<String>,
}

impl AppState {
    pub fn new(board: Board<DynStore>, config: &AppConfig) -> Self {
        Self {
            board,
            actions: TaskActions::new(),
            form: None,
            toasts: Toasts::new(config.toast_duration(), config.max_toasts),
            view: View::Board,
            ui_mode: UiMode::Normal,
            selected_column: 0,
            selected_row: 0,
            filter_input: String::new(),
            filter_debounce: Debouncer::new(config.filter_debounce()),
        }
    }

    /// Board columns for the current filters
    pub fn columns(&self) -> Vec<BoardColumn> {
        board_columns(&self.board.visible_tasks(View::Board))
    }

    /// Tasks listed on the backlog view
    pub fn backlog_rows(&self) -> Vec<Task> {
        self.board.visible_tasks(View::Backlog)
    }

    pub fn filters(&self) -> &TaskFilters {
        self.board.filters(self.view)
    }

    /// Currently highlighted task in the active view
    pub fn selected_task(&self) -> Option<Task> {
        match self.view {
            View::Board => self
                .columns()
                .get(self.selected_column)
                .and_then(|c| c.tasks.get(self.selected_row).cloned()),
            View::Backlog => self.backlog_rows().get(self.selected_row).cloned(),
        }
    }

    fn current_row_count(&self) -> usize {
        match self.view {
            View::Board => self
                .columns()
                .get(self.selected_column)
                .map(|c| c.tasks.len())
                .unwrap_or(0),
            View::Backlog => self.backlog_rows().len(),
        }
    }

    /// Keep the selection inside the visible rows
    pub fn clamp_selection(&mut self) {
        let columns = TaskStatus::board_columns().len();
        if self.selected_column >= columns {
            self.selected_column = columns - 1;
        }
        let rows = self.current_row_count();
        if self.selected_row >= rows {
            self.selected_row = rows.saturating_sub(1);
        }
    }

    pub fn move_selection(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.selected_row = self.selected_row.saturating_sub(1),
            Direction::Down => self.selected_row += 1,
            Direction::Left if self.view == View::Board => {
                self.selected_column = self.selected_column.saturating_sub(1)
            }
            Direction::Right if self.view == View::Board => self.selected_column += 1,
            _ => {}
        }
        self.clamp_selection();
    }

    /// Select a task by id in the current view, if it is visible
    fn select_task(&mut self, id: &str) {
        match self.view {
            View::Board => {
                for (col_idx, column) in self.columns().iter().enumerate() {
                    if let Some(row) = column.tasks.iter().position(|t| t.id == id) {
                        self.selected_column = col_idx;
                        self.selected_row = row;
                        return;
                    }
                }
            }
            View::Backlog => {
                if let Some(row) = self.backlog_rows().iter().position(|t| t.id == id) {
                    self.selected_row = row;
                }
            }
        }
        self.clamp_selection();
    }

    pub fn toggle_view(&mut self) {
        self.finish_filter_input();
        self.view = self.view.toggle();
        self.selected_row = 0;
        self.filter_input = self.filters().text.clone();
        self.clamp_selection();
    }

    // ---------------------------------------------------------------------
    // Modal / form
    // ---------------------------------------------------------------------

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.actions.open_add();
        self.open_form();
    }

    /// Start editing the selected task
    pub fn start_edit_task(&mut self) {
        if let Some(task) = self.selected_task() {
            self.actions.open_edit(&task);
            self.open_form();
        }
    }

    /// Ask for confirmation before deleting the selected task
    pub fn start_delete_task(&mut self) {
        if let Some(task) = self.selected_task() {
            self.actions.open_delete(&task);
            self.form = None;
        }
    }

    fn open_form(&mut self) {
        self.form = Some(FormState {
            draft: self.actions.initial_draft(),
            field: FormField::Title,
            tag_input: String::new(),
        });
    }

    /// Cancel any open modal
    pub fn cancel_modal(&mut self) {
        self.actions.close();
        self.form = None;
    }

    pub fn form_next_field(&mut self) {
        if let Some(form) = &mut self.form {
            form.field = form.field.next();
        }
    }

    pub fn form_prev_field(&mut self) {
        if let Some(form) = &mut self.form {
            form.field = form.field.prev();
        }
    }

    /// Add character to the focused text field
    pub fn form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.form {
            match form.field {
                FormField::Title => form.draft.title.push(c),
                FormField::Description => form.draft.description.push(c),
                FormField::Assignee => form.draft.assignee.push(c),
                FormField::Tags => form.tag_input.push(c),
                FormField::Status => {}
            }
        }
    }

    /// Backspace in the focused field. On an empty tag input it removes the
    /// last tag.
    pub fn form_backspace(&mut self) {
        if let Some(form) = &mut self.form {
            match form.field {
                FormField::Title => {
                    form.draft.title.pop();
                }
                FormField::Description => {
                    form.draft.description.pop();
                }
                FormField::Assignee => {
                    form.draft.assignee.pop();
                }
                FormField::Tags => {
                    if form.tag_input.pop().is_none() {
                        if let Some(last) = form.draft.tags.last().cloned() {
                            form.draft.remove_tag(&last);
                        }
                    }
                }
                FormField::Status => {}
            }
        }
    }

    pub fn form_cycle_status(&mut self, forward: bool) {
        if let Some(form) = &mut self.form {
            if form.field == FormField::Status {
                form.draft.status = if forward {
                    form.draft.status.next()
                } else {
                    form.draft.status.prev()
                };
            }
        }
    }

    /// Turn the typed tag into a chip
    pub fn form_commit_tag(&mut self) {
        if let Some(form) = &mut self.form {
            let typed = std::mem::take(&mut form.tag_input);
            form.draft.add_tag(&typed);
        }
    }

    /// Advisory: the edit form has no changes
    pub fn form_unchanged(&self) -> bool {
        self.form
            .as_ref()
            .map(|form| self.actions.is_unchanged(&form.draft))
            .unwrap_or(false)
    }

    /// Submit the add/edit form
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.clone() else {
            return;
        };
        let mut draft = form.draft;
        draft.add_tag(&form.tag_input);
        let adding = matches!(self.actions.mode(), ModalMode::Add);
        let label = if adding { "add task" } else { "update task" };

        let outcome = self.run_guarded(label, |app| {
            let outcome = if adding {
                app.actions.submit_add(&mut app.board, draft)?
            } else {
                app.actions.submit_edit(&mut app.board, draft)?
            };
            Ok(outcome)
        });

        if let Some(outcome) = outcome {
            self.form = None;
            self.report(outcome);
        }
    }

    /// Confirm the open delete modal
    pub fn confirm_delete(&mut self) {
        let outcome = self.run_guarded("delete task", |app| {
            Ok(app.actions.confirm_delete(&mut app.board)?)
        });
        if let Some(outcome) = outcome {
            self.report(outcome);
        }
        self.clamp_selection();
    }

    fn report(&mut self, outcome: ActionOutcome) {
        match outcome {
            ActionOutcome::TaskAdded(task) => {
                info!("event=task_added module=app status=ok id={}", task.id);
                self.toasts.success("Task added");
                self.select_task(&task.id);
            }
            ActionOutcome::TaskUpdated(task) => {
                info!("event=task_updated module=app status=ok id={}", task.id);
                self.toasts.success("Task updated");
                self.select_task(&task.id);
            }
            ActionOutcome::TaskDeleted(task) => {
                info!("event=task_deleted module=app status=ok id={}", task.id);
                self.toasts.success("Task deleted");
            }
            ActionOutcome::Stale => {
                debug!("event=task_stale module=app status=skipped");
            }
        }
    }

    // ---------------------------------------------------------------------
    // Move / reorder
    // ---------------------------------------------------------------------

    /// Board view: swap the selected task with its visible neighbour in the
    /// same column
    pub fn reorder_selected(&mut self, direction: Direction) {
        if self.view != View::Board {
            return;
        }
        let columns = self.columns();
        let Some(column) = columns.get(self.selected_column) else {
            return;
        };
        let neighbour_row = match direction {
            Direction::Up if self.selected_row > 0 => self.selected_row - 1,
            Direction::Down => self.selected_row + 1,
            _ => return,
        };
        let (Some(task), Some(neighbour)) =
            (column.tasks.get(self.selected_row), column.tasks.get(neighbour_row))
        else {
            return;
        };

        // Filtered rows map back to positions in the full status group
        let group = self.board.collection().status_group(column.status);
        let Some(from) = group.iter().position(|t| t.id == task.id) else {
            return;
        };
        let Some(to) = group.iter().position(|t| t.id == neighbour.id) else {
            return;
        };
        let status = column.status;
        let id = task.id.clone();

        let change = self.run_guarded("reorder tasks", |app| {
            Ok(app.board.reorder_tasks(status, from, to))
        });
        if change == Some(Change::Applied) {
            self.toasts.success("Tasks reordered");
            self.select_task(&id);
        }
    }

    /// Move the selected task to the neighbouring status. On the board it
    /// lands at the same row in the next column; on the backlog view it goes
    /// to the end of the new status group.
    pub fn move_selected(&mut self, direction: Direction) {
        let Some(task) = self.selected_task() else {
            return;
        };

        let (status, index) = match self.view {
            View::Board => {
                let target_column = match direction {
                    Direction::Left if self.selected_column > 0 => self.selected_column - 1,
                    Direction::Right
                        if self.selected_column + 1 < TaskStatus::board_columns().len() =>
                    {
                        self.selected_column + 1
                    }
                    _ => return,
                };
                let status = TaskStatus::board_columns()[target_column];
                let columns = self.columns();
                let group = self.board.collection().status_group(status);
                let index = columns[target_column]
                    .tasks
                    .get(self.selected_row)
                    .and_then(|at| group.iter().position(|t| t.id == at.id))
                    .unwrap_or(group.len());
                (status, index)
            }
            View::Backlog => {
                // Stops at Backlog and Done like the board's edge columns
                let status = match (direction, task.status) {
                    (Direction::Left, TaskStatus::Backlog) | (Direction::Right, TaskStatus::Done) => {
                        return
                    }
                    (Direction::Left, status) => status.prev(),
                    (Direction::Right, status) => status.next(),
                    _ => return,
                };
                (status, usize::MAX)
            }
        };

        let change = self.run_guarded("move task", |app| {
            Ok(app.board.move_task(&task.id, status, index))
        });
        if change == Some(Change::Applied) {
            self.toasts.success(format!("Task moved to {}", status.label()));
            self.select_task(&task.id);
        }
    }

    // ---------------------------------------------------------------------
    // Filters
    // ---------------------------------------------------------------------

    pub fn start_filter_input(&mut self) {
        self.filter_input = self.filters().text.clone();
        self.ui_mode = UiMode::EditingFilter;
    }

    pub fn filter_add_char(&mut self, c: char) {
        self.filter_input.push(c);
        self.filter_debounce.schedule(self.filter_input.clone(), Instant::now());
    }

    pub fn filter_backspace(&mut self) {
        self.filter_input.pop();
        self.filter_debounce.schedule(self.filter_input.clone(), Instant::now());
    }

    /// Leave filter typing, applying whatever is pending right away
    pub fn finish_filter_input(&mut self) {
        if let Some(text) = self.filter_debounce.flush() {
            self.commit_filter_text(text);
        }
        self.ui_mode = UiMode::Normal;
    }

    fn commit_filter_text(&mut self, text: String) {
        let mut filters = self.filters().clone();
        if filters.text == text {
            return;
        }
        filters.text = text;
        self.board.set_filters(self.view, filters);
        self.clamp_selection();
    }

    /// Step the assignee filter through "all" and each known assignee
    pub fn cycle_assignee_filter(&mut self) {
        let options = self.board.collection().all_assignees();
        let mut filters = self.filters().clone();
        filters.assignee = next_option(&options, &filters.assignee);
        self.board.set_filters(self.view, filters);
        self.clamp_selection();
    }

    /// Step the tag filter through "all" and each known tag
    pub fn cycle_tag_filter(&mut self) {
        let options = self.board.collection().all_tags();
        let mut filters = self.filters().clone();
        filters.tag = next_option(&options, &filters.tag);
        self.board.set_filters(self.view, filters);
        self.clamp_selection();
    }

    pub fn clear_filters(&mut self) {
        self.filter_debounce.cancel();
        self.filter_input.clear();
        self.board.set_filters(self.view, TaskFilters::default());
        self.clamp_selection();
    }

    // ---------------------------------------------------------------------
    // Timers
    // ---------------------------------------------------------------------

    /// Expire toasts and commit a settled filter
    pub fn tick(&mut self, now: Instant) {
        self.toasts.expire(now);
        if let Some(text) = self.filter_debounce.poll(now) {
            self.commit_filter_text(text);
        }
    }

    /// Run one state-changing operation. Errors and panics are logged and
    /// shown as a failure toast; nothing is retried.
    fn run_guarded<T>(
        &mut self,
        label: &str,
        op: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Option<T> {
        match panic::catch_unwind(AssertUnwindSafe(|| op(self))) {
            Ok(Ok(value)) => Some(value),
            Ok(Err(err)) => {
                error!("event=operation_failed module=app op={} error={:#}", label, err);
                self.toasts.failure(format!("Could not {}: {}", label, err));
                None
            }
            Err(_) => {
                error!("event=operation_panicked module=app op={}", label);
                self.toasts.failure(format!("Could not {}", label));
                None
            }
        }
    }

    /// Flush state and give the store back
    pub fn shutdown(self) -> DynStore {
        self.board.teardown()
    }
}

/// Value after `current` in ["", options...], wrapping; matching ignores case
fn next_option(options: &[String], current: &str) -> String {
    if current.is_empty() {
        return options.first().cloned().unwrap_or_default();
    }
    let pos = options
        .iter()
        .position(|o| o.to_lowercase() == current.to_lowercase());
    match pos {
        Some(i) if i + 1 < options.len() => options[i + 1].clone(),
        _ => String::new(),
    }
}
