//! Credential form: three stacked fields in a centered panel.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use cv_base::state::{FormField, State};

use super::theme;

const FORM_WIDTH: u16 = 56;
const FIELD_HEIGHT: u16 = 3;

pub fn render_form(frame: &mut Frame, state: &State, area: Rect) {
    let panel = centered(area, FORM_WIDTH, 3 * FIELD_HEIGHT + 4);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .style(Style::default().bg(theme::BG_SURFACE))
        .title(Span::styled(" Case Lookup ", Style::default().fg(theme::ACCENT).bold()));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Min(1),
        ])
        .split(inner);

    render_field(frame, state, FormField::Environment, rows[0]);
    render_field(frame, state, FormField::ClientId, rows[1]);
    render_field(frame, state, FormField::ClientSecret, rows[2]);

    let ready = state.form.is_complete();
    let hint = if ready { "Press Enter to start the lookup" } else { "Fill in all three fields" };
    let hint_style = if ready {
        Style::default().fg(theme::SUCCESS)
    } else {
        Style::default().fg(theme::TEXT_MUTED).italic()
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {hint}"), hint_style)))
            .style(Style::default().bg(theme::BG_SURFACE)),
        rows[3],
    );
}

fn render_field(frame: &mut Frame, state: &State, field: FormField, area: Rect) {
    let focused = state.form.focus == field;
    let border_color = if focused { theme::BORDER_FOCUS } else { theme::BORDER };
    let title_color = if focused { theme::ACCENT } else { theme::TEXT_MUTED };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme::BG_SURFACE))
        .title(Span::styled(format!(" {} ", field.label()), Style::default().fg(title_color)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let shown = display_value(state, field);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(shown.clone(), Style::default().fg(theme::TEXT))))
            .style(Style::default().bg(theme::BG_SURFACE)),
        inner,
    );

    if focused {
        frame.set_cursor_position(Position::new(inner.x + shown.width() as u16, inner.y));
    }
}

/// The secret renders as bullets; its length stays visible, its value
/// does not.
fn display_value(state: &State, field: FormField) -> String {
    match field {
        FormField::Environment => state.form.environment.clone(),
        FormField::ClientId => state.form.client_id.clone(),
        FormField::ClientSecret => "•".repeat(state.form.client_secret.chars().count()),
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
