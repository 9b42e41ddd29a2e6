//! Processing view: progress gauge, step checklist, and recent activity.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use cv_base::config::RECENT_UPDATES_CAP;
use cv_mod_updates::{RealtimeUpdate, UpdateLevel, format_timestamp};

use crate::app::Session;

use super::theme;

pub fn render_processing(frame: &mut Frame, session: Option<&Session>, area: Rect) {
    let Some(session) = session else {
        return;
    };

    let step_rows = session.tracker.catalog().len() as u16 + 2;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),         // Gauge
            Constraint::Length(step_rows), // Step checklist
            Constraint::Min(3),            // Recent updates
        ])
        .split(area);

    render_gauge(frame, session, layout[0]);
    render_steps(frame, session, layout[1]);
    render_updates(frame, session, layout[2]);
}

fn render_gauge(frame: &mut Frame, session: &Session, area: Rect) {
    let progress = session.tracker.state();
    let elapsed_s = progress.elapsed_ms / 1_000;
    let remaining_s = progress.remaining_ms().div_ceil(1_000);

    let title = format!(" Processing — {elapsed_s}s elapsed · ~{remaining_s}s remaining ");
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::BORDER))
                .title(Span::styled(title, Style::default().fg(theme::TEXT_SECONDARY))),
        )
        .gauge_style(Style::default().fg(theme::ACCENT).bg(theme::BG_SURFACE))
        .percent(progress.percent as u16)
        .label(Span::styled(
            format!("{}%", progress.percent),
            Style::default().fg(theme::TEXT).bold(),
        ));
    frame.render_widget(gauge, area);
}

fn render_steps(frame: &mut Frame, session: &Session, area: Rect) {
    let catalog = session.tracker.catalog();
    let current = catalog.ordinal(&session.tracker.state().step_id);

    let lines: Vec<Line> = catalog
        .steps()
        .iter()
        .enumerate()
        .map(|(ordinal, step)| {
            let (marker, style) = match current {
                Some(cur) if ordinal < cur => ("✓", Style::default().fg(theme::SUCCESS)),
                Some(cur) if ordinal == cur => ("▸", Style::default().fg(theme::ACCENT).bold()),
                _ => ("○", Style::default().fg(theme::TEXT_MUTED)),
            };
            Line::from(vec![
                Span::styled(format!(" {marker} "), style),
                Span::styled(step.label, style),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .title(Span::styled(" Steps ", Style::default().fg(theme::TEXT_SECONDARY)));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_updates(frame: &mut Frame, session: &Session, area: Rect) {
    let lines: Vec<Line> = session
        .log
        .recent(RECENT_UPDATES_CAP)
        .into_iter()
        .map(update_line)
        .collect();

    let title = format!(" Activity ({} updates) ", session.log.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .title(Span::styled(title, Style::default().fg(theme::TEXT_SECONDARY)));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn update_line(update: &RealtimeUpdate) -> Line<'static> {
    let color = match update.level {
        UpdateLevel::Info => theme::TEXT_SECONDARY,
        UpdateLevel::Warning => theme::WARNING,
        UpdateLevel::Error => theme::ERROR,
        UpdateLevel::Success => theme::SUCCESS,
    };
    Line::from(vec![
        Span::styled(
            format!(" {} ", format_timestamp(&update.timestamp)),
            Style::default().fg(theme::TEXT_MUTED),
        ),
        Span::styled(update.message.clone(), Style::default().fg(color)),
    ])
}
