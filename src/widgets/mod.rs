// Shared pieces used by the section screens:
// - tab bar for sub-views (settings)
// - centered popups for help, prompts and confirmations
// - status colors for servers, domains, console entries and load gauges
// - single-line text input

pub mod input;

pub use input::TextInput;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::core::console::LogKind;
use crate::core::domains::DomainStatus;
use crate::core::server::ServerStatus;

/// Render a tab bar showing available sub-views with the active one highlighted
pub fn tab_bar(tabs: &[(&str, bool)]) -> Paragraph<'static> {
    let mut tab_spans = Vec::new();

    for (i, (tab_name, is_active)) in tabs.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" "));
        }

        if *is_active {
            tab_spans.push(Span::styled(
                format!(" {} ", tab_name),
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            tab_spans.push(Span::styled(
                format!("[{}]", tab_name),
                Style::default().fg(Color::Gray),
            ));
        }
    }

    tab_spans.push(Span::styled(
        "  Tab to switch",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    ));

    Paragraph::new(Line::from(tab_spans)).alignment(Alignment::Left)
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Bordered popup with `lines`, drawn over whatever is below
pub fn popup(frame: &mut Frame, title: &str, lines: Vec<Line>, width: u16, color: Color) {
    let height = lines.len() as u16 + 2;
    let area = centered_rect(width, height, frame.size());

    frame.render_widget(Clear, area);

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(
                    format!(" {} ", title),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
                .style(Style::default().bg(Color::Black)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(widget, area);
}

/// Yes/no confirmation dialog
pub fn confirm_dialog(frame: &mut Frame, title: &str, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y/Enter]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Confirm   "),
            Span::styled("[n/Esc]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" Cancel"),
        ]),
    ];
    popup(frame, title, lines, 60, Color::Yellow);
}

/// Single-field input dialog
pub fn prompt_dialog(frame: &mut Frame, title: &str, label: &str, input: &TextInput) {
    let lines = vec![
        Line::from(Span::styled(label.to_string(), Style::default().fg(Color::Gray))),
        input.line(true),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Submit | [Esc] Cancel",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];
    popup(frame, title, lines, 60, Color::Cyan);
}

pub fn server_status_color(status: ServerStatus) -> Color {
    match status {
        ServerStatus::Online => Color::Green,
        ServerStatus::Offline => Color::Red,
        ServerStatus::Starting | ServerStatus::Stopping => Color::Yellow,
        ServerStatus::Maintenance => Color::Blue,
    }
}

pub fn domain_status_color(status: DomainStatus) -> Color {
    match status {
        DomainStatus::Active => Color::Green,
        DomainStatus::Pending => Color::Yellow,
        DomainStatus::Error => Color::Red,
    }
}

pub fn log_color(kind: LogKind) -> Color {
    match kind {
        LogKind::Info => Color::Gray,
        LogKind::Success => Color::Green,
        LogKind::Error => Color::Red,
        LogKind::Command => Color::Cyan,
    }
}

/// >80% red, >60% yellow
pub fn load_color(percent: f64) -> Color {
    if percent > 80.0 {
        Color::Red
    } else if percent > 60.0 {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// Style for a table row, inverted when selected
pub fn row_style(selected: bool) -> Style {
    if selected {
        Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 10, area);
        assert_eq!(rect, Rect::new(20, 15, 60, 10));

        let small = Rect::new(0, 0, 30, 5);
        let clamped = centered_rect(60, 10, small);
        assert_eq!(clamped.width, 30);
        assert_eq!(clamped.height, 5);
    }

    #[test]
    fn test_load_color_thresholds() {
        assert_eq!(load_color(85.0), Color::Red);
        assert_eq!(load_color(61.0), Color::Yellow);
        assert_eq!(load_color(60.0), Color::Green);
    }
}
