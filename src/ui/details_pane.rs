use crate::app::AppState;
use crate::ui::styles::{border_style, default_style, status_style, tag_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the details pane for the selected task
pub fn render_details_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Details ", title_style()));

    let Some(task) = app.selected_task() else {
        f.render_widget(Paragraph::new("No task selected").block(block), area);
        return;
    };

    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Title: ", title_style()),
        Span::raw(task.title.clone()),
    ]));
    lines.push(Line::raw(""));

    lines.push(Line::from(vec![
        Span::styled("Status:   ", title_style()),
        Span::styled(task.status.label(), status_style(task.status)),
    ]));

    let assignee = if task.assignee.is_empty() {
        "(unassigned)".to_string()
    } else {
        task.assignee.clone()
    };
    lines.push(Line::from(vec![
        Span::styled("Assignee: ", title_style()),
        Span::raw(assignee),
    ]));

    lines.push(Line::from(vec![
        Span::styled("Created:  ", title_style()),
        Span::raw(task.created_local().format("%Y-%m-%d %H:%M").to_string()),
    ]));

    let mut tag_spans = vec![Span::styled("Tags:     ", title_style())];
    if task.tags.is_empty() {
        tag_spans.push(Span::styled("(none)", default_style()));
    } else {
        for tag in &task.tags {
            tag_spans.push(Span::styled(format!("[{}] ", tag), tag_style()));
        }
    }
    lines.push(Line::from(tag_spans));
    lines.push(Line::raw(""));

    if task.description.trim().is_empty() {
        lines.push(Line::from(Span::styled("Description: (empty)", default_style())));
    } else {
        lines.push(Line::from(Span::styled("Description:", title_style())));
        for text in task.description.lines() {
            lines.push(Line::raw(format!("  {}", text)));
        }
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
