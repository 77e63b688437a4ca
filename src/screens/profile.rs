use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::core::profile::Role;
use crate::widgets::row_style;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let profile = &app.profile.profile;

    let account = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", profile.initials()),
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(profile.name.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Email: ", Style::default().fg(Color::Gray)),
            Span::raw(profile.email.clone()),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Account "));

    frame.render_widget(account, chunks[0]);

    let header = Row::new(vec!["Name", "Email", "Role", "Added"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = profile
        .co_owners()
        .iter()
        .enumerate()
        .map(|(idx, co_owner)| {
            let role_color = match co_owner.role {
                Role::Admin => Color::Magenta,
                Role::Moderator => Color::Blue,
            };
            Row::new(vec![
                Cell::from(co_owner.name.clone()),
                Cell::from(co_owner.email.clone()),
                Cell::from(co_owner.role.to_string()).style(Style::default().fg(role_color)),
                Cell::from(co_owner.added_at.clone()),
            ])
            .style(row_style(idx == app.profile.selected))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(18),
            Constraint::Min(24),
            Constraint::Length(11),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Co-owners ({}) ", profile.co_owners().len())),
    );

    frame.render_widget(table, chunks[1]);
}
