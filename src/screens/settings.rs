use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, SettingsTab};
use crate::core::settings::Settings;
use crate::widgets::tab_bar;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let tab = app.settings.tab;
    let tabs = [
        ("API Key", tab == SettingsTab::ApiKey),
        ("SFTP", tab == SettingsTab::Sftp),
    ];
    frame.render_widget(tab_bar(&tabs), chunks[0]);

    match tab {
        SettingsTab::ApiKey => render_api_key(frame, chunks[1], &app.settings.settings),
        SettingsTab::Sftp => render_sftp(frame, chunks[1], &app.settings.settings),
    }
}

fn field(label: &'static str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn render_api_key(frame: &mut Frame, area: Rect, settings: &Settings) {
    let key = &settings.api_key;

    let lines = vec![
        Line::from(""),
        field("API key", key.display(), Color::Cyan),
        Line::from(Span::styled(
            if key.is_revealed() { "[v] hide key" } else { "[v] reveal key" },
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Use this key to manage the server from scripts. Keep it secret.",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            "Rotating the key invalidates the current one immediately.",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" API Access "));
    frame.render_widget(widget, area);
}

fn render_sftp(frame: &mut Frame, area: Rect, settings: &Settings) {
    let sftp = &settings.sftp;

    let (state, state_color) = if sftp.enabled {
        ("Enabled", Color::Green)
    } else {
        ("Disabled", Color::Red)
    };

    let mut lines = vec![
        Line::from(""),
        field("Access", state.to_string(), state_color),
        field("Host", sftp.host.clone(), Color::White),
        field("Port", sftp.port().to_string(), Color::White),
        field("Username", sftp.username().to_string(), Color::White),
        field("Password", sftp.password_display(), Color::Cyan),
        Line::from(""),
        field("Connect", sftp.connection_string(), Color::Cyan),
    ];

    if settings.is_dirty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Unsaved changes - press [s] to save",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" SFTP Access "));
    frame.render_widget(widget, area);
}
