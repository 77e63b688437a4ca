use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::utils::helpers::format_clock;
use crate::widgets::{log_color, server_status_color};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Server controls
            Constraint::Min(3),    // Log
            Constraint::Length(3), // Input
        ])
        .split(area);

    render_controls(frame, chunks[0], app);
    render_log(frame, chunks[1], app);
    render_input(frame, chunks[2], app);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let detail = &app.detail;
    let lifecycle = &detail.lifecycle;
    let status = lifecycle.status();

    let mut status_spans = vec![
        Span::styled("Status: ", Style::default().fg(Color::Gray)),
        Span::styled(
            status.label(),
            Style::default().fg(server_status_color(status)).add_modifier(Modifier::BOLD),
        ),
    ];
    if lifecycle.is_restarting() {
        status_spans.push(Span::styled(" (restarting)", Style::default().fg(Color::Yellow)));
    }
    status_spans.extend([
        Span::raw("  |  "),
        Span::styled("Players: ", Style::default().fg(Color::Gray)),
        Span::raw(lifecycle.players().to_string()),
        Span::raw("  |  "),
        Span::styled("Uptime: ", Style::default().fg(Color::Gray)),
        Span::raw(lifecycle.uptime_label()),
    ]);

    let address_line = Line::from(vec![
        Span::styled("Address: ", Style::default().fg(Color::Gray)),
        Span::styled(detail.server.address(), Style::default().fg(Color::Cyan)),
        Span::raw("  |  "),
        Span::styled("Version: ", Style::default().fg(Color::Gray)),
        Span::raw(detail.server.version.clone()),
    ]);

    let controls = Paragraph::new(vec![Line::from(status_spans), address_line])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", detail.server.name)),
        );

    frame.render_widget(controls, area);
}

fn render_log(frame: &mut Frame, area: Rect, app: &App) {
    let logs = app.detail.console.logs();

    // Follow the tail of the log
    let visible = area.height.saturating_sub(2) as usize;
    let skip = logs.len().saturating_sub(visible);

    let lines: Vec<Line> = logs
        .iter()
        .skip(skip)
        .map(|log| {
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", format_clock(&log.timestamp)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(log.message.clone(), Style::default().fg(log_color(log.kind))),
            ])
        })
        .collect();

    let log = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Console ({} lines) ", logs.len())),
    );

    frame.render_widget(log, area);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let detail = &app.detail;
    let focused = detail.console_focused;

    let line = if !detail.lifecycle.is_running() {
        Line::from(Span::styled(
            "Server is not running. Start it to send commands.",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))
    } else {
        let mut spans = vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(detail.console.input().to_string()),
        ];
        if focused {
            spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
        } else if detail.console.input().is_empty() {
            spans.push(Span::styled(
                "press [i] to type a command",
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    };

    let border = if focused { Color::Cyan } else { Color::Gray };
    let input = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Command "),
    );

    frame.render_widget(input, area);
}
