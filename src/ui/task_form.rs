use crate::actions::ModalMode;
use crate::app::{AppState, FormField, FormState};
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style, status_style, tag_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const FORM_HEIGHT: u16 = 20;

/// Render the add/edit form
pub fn render_task_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };
    let title_text = match app.actions.mode() {
        ModalMode::Edit { .. } => " Edit Task ",
        _ => " Add Task ",
    };

    let modal_area = create_modal_area(area, FORM_HEIGHT);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    push_text_field(&mut lines, form, FormField::Title, "Title", &form.draft.title);
    push_text_field(
        &mut lines,
        form,
        FormField::Description,
        "Description",
        &form.draft.description,
    );
    push_text_field(&mut lines, form, FormField::Assignee, "Assignee", &form.draft.assignee);

    lines.push(Line::raw(field_label(form, FormField::Status, "Status (←/→)")));
    lines.push(Line::from(vec![
        Span::raw("< "),
        Span::styled(form.draft.status.label(), status_style(form.draft.status)),
        Span::raw(" >"),
    ]));
    lines.push(Line::raw(""));

    lines.push(Line::raw(field_label(form, FormField::Tags, "Tags (Enter adds)")));
    let mut tag_spans: Vec<Span> = form
        .draft
        .tags
        .iter()
        .map(|t| Span::styled(format!("[{}] ", t), tag_style()))
        .collect();
    tag_spans.push(Span::raw("> "));
    tag_spans.push(Span::styled(form.tag_input.clone(), modal_title_style()));
    if form.field == FormField::Tags {
        tag_spans.push(Span::styled("█", modal_title_style()));
    }
    lines.push(Line::from(tag_spans));
    lines.push(Line::raw(""));

    lines.push(Line::raw("Tab switch field  ·  Ctrl-S save  ·  Esc cancel"));
    if app.form_unchanged() {
        lines.push(Line::from(Span::styled("(no changes)", hint_style())));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title_text, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

fn field_label(form: &FormState, field: FormField, label: &str) -> String {
    if form.field == field {
        format!("{}: (editing)", label)
    } else {
        format!("{}:", label)
    }
}

fn push_text_field(
    lines: &mut Vec<Line<'static>>,
    form: &FormState,
    field: FormField,
    label: &str,
    value: &str,
) {
    lines.push(Line::raw(field_label(form, field, label)));
    let mut spans = vec![
        Span::raw("> "),
        Span::styled(value.to_string(), modal_title_style()),
    ];
    if form.field == field {
        spans.push(Span::styled("█", modal_title_style()));
    }
    lines.push(Line::from(spans));
    lines.push(Line::raw(""));
}
