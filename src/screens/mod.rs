pub mod servers;
pub mod console;
pub mod files;
pub mod domains;
pub mod settings;
pub mod profile;
pub mod dashboard;

// One module per section. The shell around them (header, menu bar, footer,
// help overlay and dialogs) is drawn here.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Confirm, Section, SettingsTab};
use crate::widgets::{self, server_status_color};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Menu
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    render_header(frame, chunks[0], app);
    render_menu(frame, chunks[1], app.section);

    match app.section {
        Section::Servers => servers::render(frame, chunks[2], app),
        Section::Console => console::render(frame, chunks[2], app),
        Section::Files => files::render(frame, chunks[2], app),
        Section::Domains => domains::render(frame, chunks[2], app),
        Section::Settings => settings::render(frame, chunks[2], app),
        Section::Profile => profile::render(frame, chunks[2], app),
        Section::Dashboard => dashboard::render(frame, chunks[2], app),
    }

    render_footer(frame, chunks[3], app);

    if app.section == Section::Files {
        if let Some(editor) = &app.files.editor {
            files::render_editor(frame, editor);
        }
    }

    if let Some((prompt, input)) = &app.prompt {
        widgets::prompt_dialog(frame, prompt.title(), prompt.label(), input);
    }

    if let Some(confirm) = app.confirm {
        render_confirm(frame, app, confirm);
    }

    if app.show_help {
        render_help(frame, app.section);
    }
}

fn render_header(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let detail = &app.detail;
    let status = detail.lifecycle.status();
    let running = detail.lifecycle.is_running();

    let line = Line::from(vec![
        Span::styled(
            "VPS Control",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled("Server: ", Style::default().fg(Color::Gray)),
        Span::styled(
            detail.server.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("● {}", status),
            Style::default().fg(server_status_color(status)).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            if running { "Running" } else { "Not running" },
            Style::default().fg(if running { Color::Green } else { Color::DarkGray }),
        ),
    ]);

    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn render_menu(frame: &mut Frame, area: ratatui::layout::Rect, current: Section) {
    let menu_items: Vec<Span> = Section::all()
        .iter()
        .enumerate()
        .flat_map(|(i, section)| {
            let style = if *section == current {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            vec![
                Span::styled(format!(" [{}] {} ", i + 1, section.title()), style),
                Span::raw(" "),
            ]
        })
        .collect();

    let menu = Paragraph::new(Line::from(menu_items))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(menu, area);
}

fn render_footer(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let status_message = app.status_message.as_deref();

    let footer_text = if let Some(status) = status_message {
        status.to_string()
    } else {
        key_hints(app).to_string()
    };

    let style = match status_message {
        Some(s) if s.starts_with('✗') => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Some(_) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        None => Style::default(),
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

fn key_hints(app: &App) -> &'static str {
    match app.section {
        Section::Servers => "[← →] Section | [↑↓] Select | [Enter] Open console | [?] Help | [q]uit",
        Section::Console => {
            if app.detail.console_focused {
                "Type a command | [Enter] Send | [↑↓] History | [Esc] Leave input"
            } else {
                "[s]tart | [x] Stop | [r]estart | [i] Input | [c]lear | [e]xport | [?] Help | [q]uit"
            }
        }
        Section::Files => {
            if app.files.editor.is_some() {
                "Editing | [Ctrl+S] Save | [Esc] Discard"
            } else {
                "[↑↓] Select | [Enter] Open | [Backspace] Up | [u]pload | [n]ew folder | [d]elete | [/] Search"
            }
        }
        Section::Domains => "[↑↓] Select | [a]dd domain | [d]elete | [?] Help | [q]uit",
        Section::Settings => match app.settings.tab {
            SettingsTab::ApiKey => "[Tab] Switch tab | [v] Show/hide key | [r]otate key | [?] Help",
            SettingsTab::Sftp => "[Tab] Switch tab | [t]oggle | [p]ort | [g]enerate password | [v] Show password | [s]ave",
        },
        Section::Profile => "[n]ame | [m] Email | [i]nvite | [↑↓] Select | [d] Remove co-owner | [?] Help",
        Section::Dashboard => "[p]ause / resume | [← →] Section | [?] Help | [q]uit",
    }
}

fn render_confirm(frame: &mut Frame, app: &App, confirm: Confirm) {
    match confirm {
        Confirm::DeleteFile(id) => {
            let name = app.files.store.get(id).map(|e| e.name.as_str()).unwrap_or("?");
            widgets::confirm_dialog(frame, "Delete", &format!("Delete {}?", name));
        }
        Confirm::DeleteDomain(id) => {
            let domain = app.domains.registry
                .get(id)
                .map(|b| b.domain.as_str())
                .unwrap_or("?");
            widgets::confirm_dialog(frame, "Delete Domain", &format!("Remove {} and its DNS records?", domain));
        }
        Confirm::RemoveCoOwner(id) => {
            let name = app.profile.profile
                .co_owners()
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.as_str())
                .unwrap_or("?");
            widgets::confirm_dialog(frame, "Remove Co-owner", &format!("Revoke access for {}?", name));
        }
        Confirm::RotateApiKey => {
            widgets::confirm_dialog(
                frame,
                "Rotate API Key",
                "Generate a new API key? The current key stops working immediately.",
            );
        }
    }
}

fn render_help(frame: &mut Frame, current: Section) {
    let heading = |text: &'static str| {
        Line::from(Span::styled(text, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)))
    };

    let mut help_text = vec![
        Line::from(Span::styled(
            "VPS Control - Keyboard Shortcuts",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Global Navigation:"),
        Line::from("  [1-7]          Jump to section"),
        Line::from("  [← →]          Previous/next section"),
        Line::from("  [↑ ↓]          Select items"),
        Line::from("  [?] / [F1]     Toggle this help"),
        Line::from("  [q] / [Esc]    Quit"),
        Line::from(""),
    ];

    match current {
        Section::Servers => {
            help_text.push(heading("Servers:"));
            help_text.push(Line::from("  [Enter]        Select server and open its console"));
        }
        Section::Console => {
            help_text.push(heading("Console:"));
            help_text.push(Line::from("  [s] [x] [r]    Start, stop, restart the server"));
            help_text.push(Line::from("  [i] / [Enter]  Focus the command input"));
            help_text.push(Line::from("  [c]            Clear the log"));
            help_text.push(Line::from("  [e]            Export the log to a file"));
            help_text.push(Line::from("  Commands: help, clear, status, list, say <message>"));
        }
        Section::Files => {
            help_text.push(heading("Files:"));
            help_text.push(Line::from("  [Enter]        Open file or folder"));
            help_text.push(Line::from("  [Backspace/Esc] Parent folder"));
            help_text.push(Line::from("  [u] [n] [d]    Upload, new folder, delete"));
            help_text.push(Line::from("  [/]            Search in the current folder"));
            help_text.push(Line::from("  [Ctrl+S]       Save in the editor"));
        }
        Section::Domains => {
            help_text.push(heading("Domains:"));
            help_text.push(Line::from("  [a]            Add a domain (DNS takes a moment)"));
            help_text.push(Line::from("  [d]            Delete the selected domain"));
        }
        Section::Settings => {
            help_text.push(heading("Settings:"));
            help_text.push(Line::from("  [Tab]          API key / SFTP"));
            help_text.push(Line::from("  [r]            Rotate the API key"));
            help_text.push(Line::from("  [t] [p] [g]    SFTP toggle, port, new password"));
            help_text.push(Line::from("  [s]            Save SFTP settings"));
        }
        Section::Profile => {
            help_text.push(heading("Profile:"));
            help_text.push(Line::from("  [n] [m]        Edit name, email"));
            help_text.push(Line::from("  [i]            Invite a co-owner"));
            help_text.push(Line::from("  [d]            Remove the selected co-owner"));
        }
        Section::Dashboard => {
            help_text.push(heading("Dashboard:"));
            help_text.push(Line::from("  [p]            Pause or resume the load gauges"));
        }
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        "Press [?] or [Esc] to close this help",
        Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
    )));

    widgets::popup(frame, "Help", help_text, 72, Color::Cyan);
}
