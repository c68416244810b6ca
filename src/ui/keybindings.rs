use crate::domain::View;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, view: View, area: Rect) {
    let mut spans = vec![Span::raw(" ↑/↓ select   ")];
    if view == View::Board {
        spans.push(Span::raw("←/→ column   "));
        spans.push(Span::raw("Shift+↑/↓ reorder   "));
    }
    spans.extend([
        Span::raw("Shift+←/→ move   "),
        Span::raw("a add   "),
        Span::raw("e edit   "),
        Span::raw("x delete   "),
        Span::raw("/ search   "),
        Span::raw("A/T filter   "),
        Span::raw("Esc clear   "),
        Span::raw("Tab view   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style());
    f.render_widget(paragraph, area);
}
