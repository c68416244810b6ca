pub mod backlog_pane;
pub mod board_pane;
pub mod details_pane;
pub mod filter_bar;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod styles;
pub mod task_form;
pub mod toast_pane;

use crate::app::AppState;
use crate::domain::View;
use backlog_pane::render_backlog_pane;
use board_pane::render_board_pane;
use details_pane::render_details_pane;
use filter_bar::render_filter_bar;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::render_delete_modal;
use ratatui::Frame;
use task_form::render_task_form;
use toast_pane::render_toast_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app.view, layout.keybindings_area);
    render_filter_bar(f, app, layout.filter_area);

    match app.view {
        View::Board => render_board_pane(f, app, layout.content_area),
        View::Backlog => render_backlog_pane(f, app, layout.content_area),
    }
    render_details_pane(f, app, layout.details_area);
    render_toast_pane(f, &app.toasts, layout.toast_area);

    // Modals draw last so they sit on top
    if app.actions.is_open() {
        render_task_form(f, app, size);
        render_delete_modal(f, app, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::persistence::{sample_tasks, AppConfig, DynStore, MemoryStore};
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn create_test_app() -> AppState {
        let store: DynStore = Box::new(MemoryStore::new());
        AppState::new(Board::init(store, "tasks", sample_tasks()), &AppConfig::default())
    }

    #[test]
    fn test_render_board_view() {
        let app = create_test_app();
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Scheduled"));
        assert!(text.contains("In Progress"));
        assert!(text.contains("Details"));
    }

    #[test]
    fn test_render_backlog_with_modal() {
        let mut app = create_test_app();
        app.toggle_view();
        app.start_delete_task();
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Backlog"));
        assert!(text.contains("Delete Task"));
    }

    #[test]
    fn test_render_empty_backlog_hint() {
        let store: DynStore = Box::new(MemoryStore::new());
        let mut app = AppState::new(Board::init(store, "tasks", Vec::new()), &AppConfig::default());
        app.toggle_view();
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        assert!(buffer_text(&terminal).contains("No tasks yet"));
    }

    #[test]
    fn test_render_marks_pending_filter_text() {
        let mut app = create_test_app();
        app.start_filter_input();
        app.filter_add_char('z');
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        assert!(buffer_text(&terminal).contains("(typing)"));
        assert!(!buffer_text(&terminal).contains("Delete Task"));
    }
}
