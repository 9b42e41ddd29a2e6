//! Result inspector: a tab bar over the available views plus the active
//! view's content. Which tabs exist is decided by the resolver, never
//! here; this module only renders what it is handed.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};
use secrecy::ExposeSecret;

use chrono::Utc;
use cv_base::state::State;
use cv_base::types::CaseResult;
use cv_mod_tabs::{ResultTab, available_tabs};
use cv_mod_token::{TimeRemaining, ValidityTier, mask_token};

use crate::app::Inspector;
use crate::infra::export;

use super::theme;

pub fn render_result(frame: &mut Frame, state: &State, inspector: Option<&Inspector>, area: Rect) {
    let (Some(result), Some(inspector)) = (state.result.as_ref(), inspector) else {
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Active view
        ])
        .split(area);

    render_tab_bar(frame, result, inspector, layout[0]);

    match inspector.tabs.active() {
        ResultTab::CaseDetails => render_case_details(frame, result, layout[1]),
        ResultTab::TokenStatus => render_token_status(frame, result, inspector, layout[1]),
        ResultTab::Configuration => render_configuration(frame, result, layout[1]),
        ResultTab::RawData => render_raw_data(frame, result, layout[1]),
    }
}

fn render_tab_bar(frame: &mut Frame, result: &CaseResult, inspector: &Inspector, area: Rect) {
    let tabs = available_tabs(result);
    let selected = tabs.iter().position(|t| *t == inspector.tabs.active()).unwrap_or(0);
    let titles: Vec<Line> = tabs.iter().map(|t| Line::from(t.label())).collect();

    let widget = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme::TEXT_SECONDARY))
        .highlight_style(Style::default().fg(theme::ACCENT).bold())
        .divider(Span::styled("│", Style::default().fg(theme::BORDER)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::BORDER))
                .title(Span::styled(" Result ", Style::default().fg(theme::ACCENT).bold())),
        );
    frame.render_widget(widget, area);
}

fn content_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .title(Span::styled(format!(" {title} "), Style::default().fg(theme::TEXT_SECONDARY)))
}

fn kv(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label:<14}"), Style::default().fg(theme::TEXT_MUTED)),
        Span::styled(value, Style::default().fg(theme::TEXT)),
    ])
}

fn render_case_details(frame: &mut Frame, result: &CaseResult, area: Rect) {
    let Some(details) = result.case_details.as_ref() else {
        return;
    };
    let mut lines = vec![
        kv("Case", details.case_id.clone()),
        kv("Status", details.status.clone()),
        kv("Opened", details.opened_at.clone()),
        kv("Summary", details.summary.clone()),
    ];
    if let Some(assignee) = &details.assignee {
        lines.push(kv("Assignee", assignee.clone()));
    }
    frame.render_widget(Paragraph::new(lines).block(content_block("Case Details")), area);
}

fn render_token_status(frame: &mut Frame, result: &CaseResult, inspector: &Inspector, area: Rect) {
    let Some(token) = result.oauth_token.as_ref() else {
        return;
    };

    let remaining = match &inspector.token_clock {
        Some(clock) => *clock.remaining(),
        None => TimeRemaining::until(&token.expires_at, Utc::now()),
    };
    let tier = ValidityTier::classify(&remaining);
    let tier_color = match tier {
        ValidityTier::Valid => theme::SUCCESS,
        ValidityTier::ValidLow => theme::WARNING,
        ValidityTier::ExpiringSoon => theme::ACCENT,
        ValidityTier::Expired => theme::ERROR,
    };

    let lines = vec![
        kv("Token", mask_token(token.access_token.expose_secret())),
        kv("Type", token.token_type.clone()),
        kv("Expires at", token.expires_at.clone()),
        kv("Lifetime", format!("{}s", token.expires_in)),
        Line::from(vec![
            Span::styled(format!(" {:<14}", "Remaining"), Style::default().fg(theme::TEXT_MUTED)),
            Span::styled(format_countdown(&remaining), Style::default().fg(tier_color).bold()),
            Span::styled(format!("  ({})", tier.label()), Style::default().fg(tier_color)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            " Press c to copy the full token",
            Style::default().fg(theme::TEXT_MUTED).italic(),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(content_block("Token Status")), area);
}

fn format_countdown(remaining: &TimeRemaining) -> String {
    if remaining.is_expired {
        return "expired".to_string();
    }
    if remaining.days > 0 {
        format!("{}d {:02}:{:02}:{:02}", remaining.days, remaining.hours, remaining.minutes, remaining.seconds)
    } else {
        format!("{:02}:{:02}:{:02}", remaining.hours, remaining.minutes, remaining.seconds)
    }
}

fn render_configuration(frame: &mut Frame, result: &CaseResult, area: Rect) {
    let lines = vec![
        kv("Base URL", result.base_url.clone()),
        kv("Auth mode", result.auth_mode.clone()),
        kv("Token hint", result.token_hint.clone()),
        kv("Environment", result.config.environment.clone()),
        kv("API version", result.config.api_version.clone()),
        kv("Timeout", format!("{}ms", result.config.timeout_ms)),
        kv("Retry limit", result.config.retry_limit.to_string()),
    ];
    frame.render_widget(Paragraph::new(lines).block(content_block("Configuration")), area);
}

fn render_raw_data(frame: &mut Frame, result: &CaseResult, area: Rect) {
    let json = export::to_pretty_json(result);
    let lines: Vec<Line> = json
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(theme::TEXT_SECONDARY))))
        .collect();
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(content_block("Raw Data")),
        area,
    );
}
