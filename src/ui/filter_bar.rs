use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::styles::{hint_style, modal_title_style, tag_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the active view's filters on one line
pub fn render_filter_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let filters = app.filters();
    let mut spans = vec![Span::styled(format!(" {} ", app.view.name()), title_style())];

    spans.push(Span::raw(" search: "));
    if app.ui_mode == UiMode::EditingFilter {
        spans.push(Span::styled(app.filter_input.clone(), modal_title_style()));
        spans.push(Span::styled("█", modal_title_style()));
        if app.filter_debounce.is_pending() {
            spans.push(Span::styled(" (typing)", hint_style()));
        }
    } else if filters.text.is_empty() {
        spans.push(Span::styled("-", hint_style()));
    } else {
        spans.push(Span::raw(format!("\"{}\"", filters.text)));
    }

    spans.push(Span::raw("   assignee: "));
    spans.push(filter_value(&filters.assignee));
    spans.push(Span::raw("   tag: "));
    if filters.tag.is_empty() {
        spans.push(filter_value(""));
    } else {
        spans.push(Span::styled(format!("[{}]", filters.tag), tag_style()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn filter_value(value: &str) -> Span<'static> {
    if value.is_empty() {
        Span::styled("all", hint_style())
    } else {
        Span::raw(value.to_string())
    }
}
