use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::app::App;
use crate::widgets::{row_style, server_status_color};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(vec!["", "Name", "Status", "Players", "Address", "Version"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = app.servers.servers
        .iter()
        .enumerate()
        .map(|(idx, server)| {
            // The selected server shows its live state
            let (status, players) = if server.id == app.detail.server.id {
                (app.detail.lifecycle.status(), app.detail.lifecycle.players())
            } else {
                (server.status, server.players)
            };
            let marker = if server.id == app.detail.server.id { "▶" } else { " " };

            Row::new(vec![
                Cell::from(marker),
                Cell::from(server.name.clone()),
                Cell::from(status.label()).style(Style::default().fg(server_status_color(status))),
                Cell::from(players.to_string()),
                Cell::from(server.address()),
                Cell::from(server.version.clone()),
            ])
            .style(row_style(idx == app.servers.selected))
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Min(22),
        Constraint::Length(13),
        Constraint::Length(9),
        Constraint::Length(22),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" My Servers ({}) ", app.servers.servers.len())),
        );

    frame.render_widget(table, area);
}
