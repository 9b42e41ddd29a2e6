mod form;
mod progress;
mod result;
mod theme;

use ratatui::{
    prelude::*,
    widgets::Block,
};

use cv_base::state::{NoticeLevel, Phase, State};

use crate::app::{Inspector, Session};

pub fn render(frame: &mut Frame, state: &State, session: Option<&Session>, inspector: Option<&Inspector>) {
    let area = frame.area();

    // Fill base background
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::BG_BASE)),
        area,
    );

    // Main layout: body + status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    match state.phase {
        Phase::Credentials => form::render_form(frame, state, main_layout[0]),
        Phase::Processing => progress::render_processing(frame, session, main_layout[0]),
        Phase::Result => result::render_result(frame, state, inspector, main_layout[0]),
    }

    render_status_bar(frame, state, main_layout[1]);
}

fn render_status_bar(frame: &mut Frame, state: &State, area: Rect) {
    let base_style = Style::default().bg(theme::BG_BASE).fg(theme::TEXT_MUTED);

    let line = if let Some(notice) = &state.notice {
        let color = match notice.level {
            NoticeLevel::Info => theme::SUCCESS,
            NoticeLevel::Error => theme::ERROR,
        };
        Line::from(vec![
            Span::styled(" ", base_style),
            Span::styled(notice.text.clone(), Style::default().fg(color).bold()),
        ])
    } else {
        let hints = match state.phase {
            Phase::Credentials => "tab next field · enter submit · ctrl+q quit",
            Phase::Processing => "esc cancel · ctrl+q quit",
            Phase::Result => {
                "←/→ tabs · home/end · c copy token · y copy json · e export · n new lookup · ctrl+q quit"
            }
        };
        Line::from(vec![Span::styled(format!(" {hints}"), base_style)])
    };

    frame.render_widget(
        ratatui::widgets::Paragraph::new(line).style(base_style),
        area,
    );
}
