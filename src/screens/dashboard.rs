use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Gauge as GaugeWidget, Row, Sparkline, Table},
    Frame,
};

use crate::app::App;
use crate::core::metrics::Gauge;
use crate::widgets::load_color;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Average gauges
            Constraint::Length(6), // CPU history
            Constraint::Min(0),    // Per-server table
        ])
        .split(area);

    render_averages(frame, chunks[0], app);
    render_history(frame, chunks[1], app);
    render_servers(frame, chunks[2], app);
}

fn render_averages(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let averages = app.dashboard.averages();

    for (gauge, column) in Gauge::ALL.iter().zip(columns.iter()) {
        let value = averages.get(*gauge);
        let ratio = gauge.ratio(value);

        let widget = GaugeWidget::default()
            .block(Block::default().borders(Borders::ALL).title(format!(" Avg {} ", gauge.label())))
            .gauge_style(Style::default().fg(load_color(ratio * 100.0)))
            .ratio(ratio)
            .label(format!("{:.1} {}", value, gauge.unit()));

        frame.render_widget(widget, *column);
    }
}

fn render_history(frame: &mut Frame, area: Rect, app: &App) {
    let history = app.dashboard.cpu_history();
    let title = if app.dashboard.is_paused() {
        " Average CPU (paused) ".to_string()
    } else {
        format!(" Average CPU ({} ticks) ", app.dashboard.ticks())
    };

    let sparkline = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(&history)
        .max(100)
        .style(Style::default().fg(Color::Cyan));

    frame.render_widget(sparkline, area);
}

fn render_servers(frame: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(vec!["Server", "CPU", "RAM", "Network", "Disk"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = app.dashboard
        .servers()
        .iter()
        .map(|server| {
            let mut cells = vec![Cell::from(server.name.clone())];
            for gauge in Gauge::ALL {
                let value = server.get(gauge);
                cells.push(
                    Cell::from(format!("{:.1} {}", value, gauge.unit()))
                        .style(Style::default().fg(load_color(gauge.ratio(value) * 100.0))),
                );
            }
            Row::new(cells)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(22),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(" Server Load "));

    frame.render_widget(table, area);
}
