use crate::notifications::{ToastKind, Toasts};
use crate::ui::styles::{border_style, hint_style, title_style, toast_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render live toasts, newest last
pub fn render_toast_pane(f: &mut Frame, toasts: &Toasts, area: Rect) {
    let lines: Vec<Line> = if toasts.is_empty() {
        vec![Line::from(Span::styled("Nothing new", hint_style()))]
    } else {
        toasts
            .items()
            .iter()
            .map(|toast| {
                let icon = match toast.kind {
                    ToastKind::Success => "✓",
                    ToastKind::Failure => "✗",
                };
                Line::from(Span::styled(
                    format!("{} {}", icon, toast.message),
                    toast_style(toast.kind),
                ))
            })
            .collect()
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Notifications (Ctrl-D) ", title_style())),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
