use crate::app::AppState;
use crate::domain::{tag_line, truncate, Task};
use crate::ui::layout::column_areas;
use crate::ui::styles::{
    border_style, default_style, focused_border_style, selected_style, status_style, tag_style,
    title_style,
};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the kanban columns
pub fn render_board_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let columns = app.columns();
    let areas = column_areas(area, columns.len());

    for (idx, (column, column_area)) in columns.iter().zip(areas).enumerate() {
        let focused = idx == app.selected_column;
        let width = column_area.width.saturating_sub(4) as usize;

        let items: Vec<ListItem> = column
            .tasks
            .iter()
            .enumerate()
            .map(|(row, task)| {
                let style = if focused && row == app.selected_row {
                    selected_style()
                } else {
                    default_style()
                };
                ListItem::new(card_lines(task, width)).style(style)
            })
            .collect();

        let title = format!(" {} ({}) ", column.status.label(), column.tasks.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if focused {
                focused_border_style()
            } else {
                border_style()
            })
            .title(Span::styled(title, status_style(column.status)));

        f.render_widget(List::new(items).block(block), column_area);
    }

    if columns.iter().all(|c| c.tasks.is_empty()) && !app.filters().is_empty() {
        let hint = Line::from(Span::styled(" No tasks match the filters ", title_style()));
        let y = area.y + area.height / 2;
        f.render_widget(
            Paragraph::new(hint).alignment(Alignment::Center),
            Rect::new(area.x, y, area.width, 1),
        );
    }
}

/// A card: title, then assignee and tags when present
fn card_lines(task: &Task, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::raw(truncate(&task.title, width.max(1)))];
    let mut meta = Vec::new();
    if !task.assignee.is_empty() {
        meta.push(Span::raw(format!("@{} ", task.assignee)));
    }
    if !task.tags.is_empty() {
        meta.push(Span::styled(tag_line(&task.tags), tag_style()));
    }
    if !meta.is_empty() {
        lines.push(Line::from(meta));
    }
    lines
}
