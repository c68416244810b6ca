use crate::actions::ModalMode;
use crate::app::{AppState, Direction, FormField};
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('d') {
        app.toasts.dismiss_oldest();
        return Ok(false);
    }

    if matches!(app.actions.mode(), ModalMode::Add | ModalMode::Edit { .. }) {
        return handle_form_mode(app, key);
    }
    if matches!(app.actions.mode(), ModalMode::Delete { .. }) {
        return handle_delete_confirm(app, key);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::EditingFilter => handle_filter_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),

        // Navigation (with Shift modifier for reordering / moving)
        KeyCode::Up if shift => app.reorder_selected(Direction::Up),
        KeyCode::Down if shift => app.reorder_selected(Direction::Down),
        KeyCode::Left if shift => app.move_selected(Direction::Left),
        KeyCode::Right if shift => app.move_selected(Direction::Right),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => app.move_selection(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => app.move_selection(Direction::Right),

        KeyCode::Tab => app.toggle_view(),

        KeyCode::Char('a') => app.start_add_task(),
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => app.start_edit_task(),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => app.start_delete_task(),

        // Filters
        KeyCode::Char('/') => app.start_filter_input(),
        KeyCode::Char('A') => app.cycle_assignee_filter(),
        KeyCode::Char('T') => app.cycle_tag_filter(),
        KeyCode::Esc => app.clear_filters(),

        _ => {}
    }
    Ok(false)
}

/// Typing the text filter; committed after a quiet period or on Enter/Esc
fn handle_filter_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => app.finish_filter_input(),
        KeyCode::Backspace => app.filter_backspace(),
        KeyCode::Char(c) => app.filter_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Add/edit form
fn handle_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.cancel_modal(),
        KeyCode::Char('s') if ctrl => app.submit_form(),
        KeyCode::Tab | KeyCode::Down => app.form_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form_prev_field(),
        KeyCode::Left => app.form_cycle_status(false),
        KeyCode::Right => app.form_cycle_status(true),
        KeyCode::Enter => match app.form.as_ref().map(|f| f.field) {
            Some(FormField::Tags) => app.form_commit_tag(),
            _ => app.submit_form(),
        },
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) if !ctrl => app.form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Delete confirmation
fn handle_delete_confirm(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_modal(),
        _ => {}
    }
    Ok(false)
}
