use crate::app::AppState;
use crate::domain::{status_badge, Task};
use crate::ui::styles::{
    border_style, default_style, hint_style, selected_style, status_style, tag_style,
    title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render every task (filtered) as one list
pub fn render_backlog_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let rows = app.backlog_rows();
    let total = app.board.tasks().len();

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let style = if idx == app.selected_row {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(create_task_line(task)).style(style)
        })
        .collect();

    let items = if items.is_empty() {
        let hint = if app.board.collection().is_empty() {
            "No tasks yet. Press a to add one."
        } else {
            "No tasks match the filters"
        };
        vec![ListItem::new(Line::from(Span::styled(hint, hint_style())))]
    } else {
        items
    };

    let title = format!(" Backlog ({}/{}) ", rows.len(), total);
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}

/// Format: (IN PROGRESS) Write proposal  @ana [api] [docs]
fn create_task_line(task: &Task) -> Line<'static> {
    let mut spans = vec![
        Span::styled(format!("{:<14}", status_badge(task.status)), status_style(task.status)),
        Span::raw(task.title.clone()),
    ];

    if !task.assignee.is_empty() {
        spans.push(Span::raw(format!("  @{}", task.assignee)));
    }

    if !task.tags.is_empty() {
        spans.push(Span::raw(" ".to_string()));
        for (i, tag) in task.tags.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" ".to_string()));
            }
            spans.push(Span::styled(format!("[{}]", tag), tag_style()));
        }
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;

    #[test]
    fn test_create_task_line() {
        let task = Task::new("Test task".to_string(), TaskStatus::InProgress)
            .with_assignee("Ben")
            .with_tags(["api", "docs"]);
        let line_str = format!("{:?}", create_task_line(&task));

        assert!(line_str.contains("Test task"));
        assert!(line_str.contains("IN PROGRESS"));
        assert!(line_str.contains("@Ben"));
        assert!(line_str.contains("[docs]"));
    }
}
