use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::utils::constants::PUBLIC_IP;
use crate::utils::helpers::truncate_string;
use crate::widgets::{domain_status_color, row_style};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(5)])
        .split(area);

    let bindings = app.domains.registry.bindings();

    let header = Row::new(vec!["Domain", "Record", "Target", "Status"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = bindings
        .iter()
        .enumerate()
        .map(|(idx, binding)| {
            Row::new(vec![
                Cell::from(truncate_string(&binding.domain, 40)),
                Cell::from(binding.record_type.to_string()),
                Cell::from(format!("{}:{}", binding.ip, binding.port)),
                Cell::from(binding.status.label())
                    .style(Style::default().fg(domain_status_color(binding.status))),
            ])
            .style(row_style(idx == app.domains.selected))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(28),
            Constraint::Length(8),
            Constraint::Length(22),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Domains ({}) ", bindings.len())),
    );

    frame.render_widget(table, chunks[0]);

    let help = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("A record: ", Style::default().fg(Color::Gray)),
            Span::raw("point your domain at "),
            Span::styled(PUBLIC_IP, Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("SRV record: ", Style::default().fg(Color::Gray)),
            Span::raw("_minecraft._tcp.<domain> with the server port"),
        ]),
        Line::from(Span::styled(
            "DNS changes can take up to 24 hours to propagate.",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title(" DNS Setup "));

    frame.render_widget(help, chunks[1]);
}
