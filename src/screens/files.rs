use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, Editor};
use crate::utils::helpers::truncate_string;
use crate::widgets::{centered_rect, row_style};

const NAME_WIDTH: usize = 40;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let store = &app.files.store;

    let mut path_spans = vec![
        Span::styled("Path: ", Style::default().fg(Color::Gray)),
        Span::styled(store.cwd().to_string(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    ];
    if !store.search().is_empty() {
        path_spans.push(Span::raw("  |  "));
        path_spans.push(Span::styled("Search: ", Style::default().fg(Color::Gray)));
        path_spans.push(Span::styled(store.search().to_string(), Style::default().fg(Color::Yellow)));
    }

    let path = Paragraph::new(Line::from(path_spans))
        .block(Block::default().borders(Borders::ALL).title(" File Manager "));
    frame.render_widget(path, chunks[0]);

    let listing = store.listing();

    let header = Row::new(vec!["Name", "Size", "Modified"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = listing
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let name = if entry.is_folder() {
                Cell::from(format!("📁 {}", truncate_string(&entry.name, NAME_WIDTH)))
                    .style(Style::default().fg(Color::Blue))
            } else {
                Cell::from(format!("📄 {}", truncate_string(&entry.name, NAME_WIDTH)))
            };

            Row::new(vec![
                name,
                Cell::from(entry.size_label().unwrap_or_else(|| "-".to_string())),
                Cell::from(entry.modified.clone()),
            ])
            .style(row_style(idx == app.files.selected))
        })
        .collect();

    let title = if listing.is_empty() && !store.search().is_empty() {
        " No files match the search ".to_string()
    } else {
        format!(" {} items ", listing.len())
    };

    let table = Table::new(
        rows,
        [Constraint::Min(30), Constraint::Length(12), Constraint::Length(14)],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, chunks[1]);
}

/// Full-content editor drawn over the listing
pub fn render_editor(frame: &mut Frame, editor: &Editor) {
    let screen = frame.size();
    let area = centered_rect(screen.width.saturating_sub(10), screen.height.saturating_sub(6), screen);

    let mut lines: Vec<Line> = editor.buffer.split('\n').map(|l| Line::from(l.to_string())).collect();
    if let Some(last) = lines.last_mut() {
        last.spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
    }

    // Keep the cursor line in view
    let visible = area.height.saturating_sub(2) as usize;
    let skip = lines.len().saturating_sub(visible);
    let lines: Vec<Line> = lines.into_iter().skip(skip).collect();

    frame.render_widget(Clear, area);
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(
                format!(" Editing {} ", editor.name),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(widget, area);
}
