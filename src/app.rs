/// Main TUI application

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::seq::SliceRandom;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fmt::Display;
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::core::console::{Console, LogKind, ReplyContext, Submitted};
use crate::core::domains::DomainRegistry;
use crate::core::error::PanelResult;
use crate::core::files::{FileEntry, FileStore};
use crate::core::lifecycle::{Lifecycle, LifecycleStep, PendingStep};
use crate::core::metrics::MetricJitter;
use crate::core::profile::Profile;
use crate::core::server::{catalog, Server};
use crate::core::settings::Settings;
use crate::core::tasks::TaskScope;
use crate::screens;
use crate::utils::app_config::SimulationConfig;
use crate::utils::constants::TELEMETRY_MESSAGES;
use crate::utils::AppConfig;
use crate::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Servers,
    Console,
    Files,
    Domains,
    Settings,
    Profile,
    Dashboard,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Servers => "Servers",
            Section::Console => "Console",
            Section::Files => "Files",
            Section::Domains => "Domains",
            Section::Settings => "Settings",
            Section::Profile => "Profile",
            Section::Dashboard => "Dashboard",
        }
    }

    pub fn all() -> &'static [Section] {
        &[
            Section::Servers,
            Section::Console,
            Section::Files,
            Section::Domains,
            Section::Settings,
            Section::Profile,
            Section::Dashboard,
        ]
    }

    fn index(&self) -> usize {
        Self::all().iter().position(|s| s == self).unwrap_or(0)
    }

    fn next(&self) -> Section {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    fn prev(&self) -> Section {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// Delayed mutations sent back to the run loop by scoped tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Lifecycle { server_id: String, step: LifecycleStep },
    ConsoleReply { server_id: String, command: String },
    Telemetry { server_id: String, message: String },
    DomainConfirmed(u64),
}

/// Which field an open input dialog edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    FileSearch,
    NewFolder,
    AddDomain,
    SftpPort,
    ProfileName,
    ProfileEmail,
    InviteEmail,
}

impl Prompt {
    pub fn title(&self) -> &'static str {
        match self {
            Prompt::FileSearch => "Search Files",
            Prompt::NewFolder => "New Folder",
            Prompt::AddDomain => "Add Domain",
            Prompt::SftpPort => "SFTP Port",
            Prompt::ProfileName => "Edit Name",
            Prompt::ProfileEmail => "Edit Email",
            Prompt::InviteEmail => "Invite Co-owner",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Prompt::FileSearch => "Filter by file name",
            Prompt::NewFolder => "Folder name",
            Prompt::AddDomain => "Domain (e.g. play.example.com)",
            Prompt::SftpPort => "Port number",
            Prompt::ProfileName => "Full name",
            Prompt::ProfileEmail => "Email address",
            Prompt::InviteEmail => "Email of the person to invite",
        }
    }
}

/// Destructive actions waiting for a yes/no
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    DeleteFile(u64),
    DeleteDomain(u64),
    RemoveCoOwner(u64),
    RotateApiKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTab {
    ApiKey,
    Sftp,
}

/// Console and lifecycle controls of the selected server.
/// Dropping it aborts every task it scheduled.
pub struct ServerDetail {
    pub server: Server,
    pub lifecycle: Lifecycle,
    pub console: Console,
    pub console_focused: bool,
    sim: SimulationConfig,
    tasks: TaskScope<AppEvent>,
    telemetry: TaskScope<AppEvent>,
}

impl ServerDetail {
    pub fn new(server: Server, sim: &SimulationConfig, tx: UnboundedSender<AppEvent>) -> Self {
        let mut detail = Self {
            lifecycle: Lifecycle::from_server(&server, sim),
            console: Console::new(&server.name),
            console_focused: false,
            sim: sim.clone(),
            tasks: TaskScope::new(tx.clone()),
            telemetry: TaskScope::new(tx),
            server,
        };
        if detail.lifecycle.is_running() {
            detail.start_telemetry();
        }
        detail
    }

    pub fn start(&mut self) -> PanelResult<()> {
        let pending = self.lifecycle.start()?;
        self.console.push(LogKind::Info, "Starting server...");
        self.schedule(pending);
        Ok(())
    }

    pub fn stop(&mut self) -> PanelResult<()> {
        let pending = self.lifecycle.stop()?;
        self.console.push(LogKind::Info, "Stopping server...");
        self.schedule(pending);
        Ok(())
    }

    pub fn restart(&mut self) -> PanelResult<()> {
        let pending = self.lifecycle.restart()?;
        self.console.push(LogKind::Info, "Restarting server...");
        self.schedule(pending);
        Ok(())
    }

    fn schedule(&mut self, pending: PendingStep) {
        self.tasks.after(
            pending.delay,
            AppEvent::Lifecycle {
                server_id: self.server.id.clone(),
                step: pending.step,
            },
        );
    }

    /// Apply a finished lifecycle step; returns the new running flag when it flipped
    pub fn complete(&mut self, step: LifecycleStep) -> Option<bool> {
        let completion = self.lifecycle.complete(step);
        if let Some(next) = completion.next {
            self.schedule(next);
        }

        match completion.running {
            Some(true) => {
                self.console.push(LogKind::Success, "Server started successfully");
                self.start_telemetry();
            }
            Some(false) => {
                self.telemetry.cancel();
                self.console.push(LogKind::Info, "Server stopped");
            }
            None => {}
        }

        completion.running
    }

    fn start_telemetry(&mut self) {
        self.telemetry.cancel();

        let server_id = self.server.id.clone();
        self.telemetry.every(self.sim.telemetry_interval(), move || {
            let message = TELEMETRY_MESSAGES
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or_default();
            AppEvent::Telemetry {
                server_id: server_id.clone(),
                message: message.to_string(),
            }
        });
    }

    /// Submit the console input line, scheduling the reply if one is due
    pub fn submit(&mut self) -> PanelResult<Option<Submitted>> {
        let submitted = self.console.submit(self.lifecycle.is_running())?;
        if let Some(Submitted::Pending(command)) = &submitted {
            self.tasks.after(
                self.sim.console_reply(),
                AppEvent::ConsoleReply {
                    server_id: self.server.id.clone(),
                    command: command.clone(),
                },
            );
        }
        Ok(submitted)
    }

    pub fn reply(&mut self, command: &str) {
        let ctx = ReplyContext {
            server_name: self.server.name.clone(),
            uptime: self.lifecycle.uptime_label(),
            players: self.lifecycle.players(),
        };
        self.console.reply(command, &ctx);
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.pending() + self.telemetry.pending()
    }
}

pub struct ServersView {
    pub servers: Vec<Server>,
    pub selected: usize,
}

/// File open in the editor
pub struct Editor {
    pub file_id: u64,
    pub name: String,
    pub buffer: String,
}

pub struct FilesView {
    pub store: FileStore,
    pub selected: usize,
    pub editor: Option<Editor>,
}

impl FilesView {
    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.store.listing().get(self.selected).copied()
    }
}

pub struct DomainsView {
    pub registry: DomainRegistry,
    pub selected: usize,
    tasks: TaskScope<AppEvent>,
}

pub struct SettingsView {
    pub settings: Settings,
    pub tab: SettingsTab,
}

impl SettingsView {
    fn new(server_id: &str) -> Self {
        Self {
            settings: Settings::new(server_id),
            tab: SettingsTab::ApiKey,
        }
    }
}

pub struct ProfileView {
    pub profile: Profile,
    pub selected: usize,
}

pub struct App {
    pub(crate) config: AppConfig,
    pub(crate) section: Section,
    pub(crate) servers: ServersView,
    pub(crate) detail: ServerDetail,
    pub(crate) files: FilesView,
    pub(crate) domains: DomainsView,
    pub(crate) settings: SettingsView,
    pub(crate) profile: ProfileView,
    pub(crate) dashboard: MetricJitter,
    pub(crate) prompt: Option<(Prompt, TextInput)>,
    pub(crate) confirm: Option<Confirm>,
    pub(crate) show_help: bool,
    pub(crate) status_message: Option<String>,
    should_quit: bool,
    last_tick: Instant,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        let servers = catalog();
        let first = servers[0].clone();

        Self {
            detail: ServerDetail::new(first.clone(), &config.simulation, events_tx.clone()),
            settings: SettingsView::new(&first.id),
            dashboard: MetricJitter::new(&servers),
            servers: ServersView { servers, selected: 0 },
            files: FilesView {
                store: FileStore::new(),
                selected: 0,
                editor: None,
            },
            domains: DomainsView {
                registry: DomainRegistry::new(),
                selected: 0,
                tasks: TaskScope::new(events_tx.clone()),
            },
            profile: ProfileView {
                profile: Profile::new(),
                selected: 0,
            },
            section: Section::Servers,
            prompt: None,
            confirm: None,
            show_help: false,
            status_message: None,
            should_quit: false,
            last_tick: Instant::now(),
            events_tx,
            events_rx,
            config,
        }
    }

    fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    fn clear_status(&mut self) {
        self.status_message = None;
    }

    fn ok(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.set_status(format!("✓ {}", message));
    }

    fn fail(&mut self, err: impl Display) {
        warn!("{}", err);
        self.set_status(format!("✗ {}", err));
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        info!(server = %self.detail.server.name, "Dashboard started");
        let result = self.run_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        loop {
            self.drain_events();

            if self.last_tick.elapsed() >= self.config.dashboard.tick() {
                self.dashboard.tick();
                self.last_tick = Instant::now();
            }

            terminal.draw(|f| screens::render(f, &*self))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key_event) = event::read()? {
                    // Ignore key release events reported on some platforms
                    if key_event.kind == KeyEventKind::Press {
                        self.handle_key(key_event);
                    }
                }
            }

            if self.should_quit {
                info!("Dashboard closed");
                break;
            }
        }

        Ok(())
    }

    /// Apply every event that has arrived; returns how many there were
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
            applied += 1;
        }
        applied
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Lifecycle { server_id, step } => {
                if server_id != self.detail.server.id {
                    debug!(%server_id, ?step, "Dropping lifecycle step for another server");
                    return;
                }
                if let Some(running) = self.detail.complete(step) {
                    info!(server = %self.detail.server.name, running, "Running state changed");
                    let status = self.detail.lifecycle.status();
                    self.ok(format!("{} is {}", self.detail.server.name, status));
                }
            }
            AppEvent::ConsoleReply { server_id, command } => {
                if server_id == self.detail.server.id {
                    self.detail.reply(&command);
                }
            }
            AppEvent::Telemetry { server_id, message } => {
                if server_id == self.detail.server.id && self.detail.lifecycle.is_running() {
                    self.detail.console.push(LogKind::Info, message);
                }
            }
            AppEvent::DomainConfirmed(id) => {
                if let Some(binding) = self.domains.registry.confirm(id) {
                    let domain = binding.domain.clone();
                    self.ok(format!("Domain {} is active", domain));
                }
            }
        }
    }

    pub fn handle_key(&mut self, key_event: KeyEvent) {
        let key = key_event.code;
        let modifiers = key_event.modifiers;

        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Dialogs and focused inputs take every key
        if self.confirm.is_some() {
            return self.handle_confirm_key(key);
        }
        if self.prompt.is_some() {
            return self.handle_prompt_key(key);
        }
        if self.section == Section::Files && self.files.editor.is_some() {
            return self.handle_editor_key(key, modifiers);
        }
        if self.section == Section::Console && self.detail.console_focused {
            return self.handle_console_input_key(key);
        }

        if self.show_help {
            if matches!(key, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1)) {
                self.show_help = false;
            }
            return;
        }

        self.clear_status();

        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                // In Files, Esc backs out of the search, then out of folders
                if self.section == Section::Files && !self.files.store.search().is_empty() {
                    self.files.store.set_search("");
                    self.files.selected = 0;
                } else if self.section == Section::Files && self.files.store.up() {
                    self.files.selected = 0;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.show_help = true;
            }
            KeyCode::Right => {
                self.section = self.section.next();
            }
            KeyCode::Left => {
                self.section = self.section.prev();
            }
            KeyCode::Char(c @ '1'..='7') => {
                let index = c as usize - '1' as usize;
                self.section = Section::all()[index];
            }
            _ => match self.section {
                Section::Servers => self.handle_servers_key(key),
                Section::Console => self.handle_console_key(key),
                Section::Files => self.handle_files_key(key),
                Section::Domains => self.handle_domains_key(key),
                Section::Settings => self.handle_settings_key(key),
                Section::Profile => self.handle_profile_key(key),
                Section::Dashboard => self.handle_dashboard_key(key),
            },
        }
    }

    fn handle_servers_key(&mut self, key: KeyCode) {
        let len = self.servers.servers.len();
        match key {
            KeyCode::Up => move_up(&mut self.servers.selected),
            KeyCode::Down => move_down(&mut self.servers.selected, len),
            KeyCode::Enter => self.select_server(self.servers.selected),
            _ => {}
        }
    }

    /// Make the server at `index` the selected one and open its console.
    /// The previous detail view is dropped, aborting its pending tasks.
    pub fn select_server(&mut self, index: usize) {
        let Some(server) = self.servers.servers.get(index).cloned() else {
            return;
        };
        self.section = Section::Console;
        if server.id == self.detail.server.id {
            return;
        }

        let aborted = self.detail.pending_tasks();
        self.detail = ServerDetail::new(server.clone(), &self.config.simulation, self.events_tx.clone());
        self.settings = SettingsView::new(&server.id);
        debug!(aborted, "Previous server view torn down");
        self.ok(format!("Selected {}", server.name));
    }

    fn handle_console_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('s') => {
                let result = self.detail.start();
                self.report(result, "Starting server");
            }
            KeyCode::Char('x') => {
                let result = self.detail.stop();
                self.report(result, "Stopping server");
            }
            KeyCode::Char('r') => {
                let result = self.detail.restart();
                self.report(result, "Restarting server");
            }
            KeyCode::Char('i') | KeyCode::Enter => {
                self.detail.console_focused = true;
            }
            KeyCode::Char('c') => {
                self.detail.console.clear();
                self.ok("Console cleared");
            }
            KeyCode::Char('e') => self.export_console(),
            _ => {}
        }
    }

    fn report(&mut self, result: PanelResult<()>, action: &str) {
        match result {
            Ok(()) => {
                let message = format!("{} {}...", action, self.detail.server.name);
                self.ok(message);
            }
            Err(e) => self.fail(e),
        }
    }

    fn export_console(&mut self) {
        let dir = self.config.export_dir_path();
        match self.detail.console.export_to(&dir) {
            Ok(path) => {
                self.detail.console.push(LogKind::Info, format!("Log exported to {}", path.display()));
                self.ok(format!("Exported console log to {}", path.display()));
            }
            Err(e) => {
                error!("Console export failed: {:#}", e);
                self.set_status(format!("✗ Export failed: {:#}", e));
            }
        }
    }

    fn handle_console_input_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.detail.console_focused = false;
            }
            KeyCode::Enter => match self.detail.submit() {
                Ok(Some(Submitted::Cleared)) => self.ok("Console cleared"),
                Ok(_) => self.clear_status(),
                Err(e) => self.fail(e),
            },
            KeyCode::Up => self.detail.console.history_up(),
            KeyCode::Down => self.detail.console.history_down(),
            KeyCode::Backspace => self.detail.console.backspace(),
            KeyCode::Char(c) => self.detail.console.push_char(c),
            _ => {}
        }
    }

    fn handle_files_key(&mut self, key: KeyCode) {
        let len = self.files.store.listing().len();
        match key {
            KeyCode::Up => move_up(&mut self.files.selected),
            KeyCode::Down => move_down(&mut self.files.selected, len),
            KeyCode::Enter => self.open_selected_file(),
            KeyCode::Backspace => {
                if self.files.store.up() {
                    self.files.selected = 0;
                }
            }
            KeyCode::Char('u') => {
                let id = self.files.store.upload();
                if let Some(entry) = self.files.store.get(id) {
                    let name = entry.name.clone();
                    self.ok(format!("Uploaded {}", name));
                }
            }
            KeyCode::Char('n') => self.open_prompt(Prompt::NewFolder, ""),
            KeyCode::Char('/') => {
                let current = self.files.store.search().to_string();
                self.open_prompt(Prompt::FileSearch, &current);
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(entry) = self.files.selected_entry() {
                    self.confirm = Some(Confirm::DeleteFile(entry.id));
                }
            }
            _ => {}
        }
    }

    fn open_selected_file(&mut self) {
        let Some(entry) = self.files.selected_entry() else {
            return;
        };
        let (id, name, is_folder) = (entry.id, entry.name.clone(), entry.is_folder());

        if is_folder {
            match self.files.store.enter(id) {
                Ok(_) => self.files.selected = 0,
                Err(e) => self.fail(e),
            }
            return;
        }

        match self.files.store.open(id) {
            Ok(buffer) => {
                debug!(file = %name, "Opened file in editor");
                self.files.editor = Some(Editor { file_id: id, name, buffer });
            }
            Err(e) => self.fail(e),
        }
    }

    fn handle_editor_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        let Some(editor) = self.files.editor.as_mut() else {
            return;
        };

        match key {
            KeyCode::Esc => {
                self.files.editor = None;
                self.set_status("Edit cancelled".to_string());
            }
            KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => {
                let (id, name) = (editor.file_id, editor.name.clone());
                let buffer = std::mem::take(&mut editor.buffer);
                self.files.editor = None;
                match self.files.store.save(id, &buffer) {
                    Ok(()) => self.ok(format!("Saved {}", name)),
                    Err(e) => self.fail(e),
                }
            }
            KeyCode::Enter => editor.buffer.push('\n'),
            KeyCode::Backspace => {
                editor.buffer.pop();
            }
            KeyCode::Char(c) => editor.buffer.push(c),
            _ => {}
        }
    }

    fn handle_domains_key(&mut self, key: KeyCode) {
        let len = self.domains.registry.bindings().len();
        match key {
            KeyCode::Up => move_up(&mut self.domains.selected),
            KeyCode::Down => move_down(&mut self.domains.selected, len),
            KeyCode::Char('a') => self.open_prompt(Prompt::AddDomain, ""),
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(binding) = self.domains.registry.bindings().get(self.domains.selected) {
                    self.confirm = Some(Confirm::DeleteDomain(binding.id));
                }
            }
            _ => {}
        }
    }

    /// Insert the binding as pending and schedule its confirmation
    pub fn add_domain(&mut self, domain: &str) {
        match self.domains.registry.add(domain) {
            Ok(id) => {
                self.domains.tasks.after(
                    self.config.simulation.domain_propagation(),
                    AppEvent::DomainConfirmed(id),
                );
                self.domains.selected = self.domains.registry.bindings().len() - 1;
                self.ok(format!("Domain {} added, configuring DNS...", domain.trim()));
            }
            Err(e) => self.fail(e),
        }
    }

    fn handle_settings_key(&mut self, key: KeyCode) {
        let view = &mut self.settings;
        match (view.tab, key) {
            (_, KeyCode::Tab) | (_, KeyCode::BackTab) => {
                view.tab = match view.tab {
                    SettingsTab::ApiKey => SettingsTab::Sftp,
                    SettingsTab::Sftp => SettingsTab::ApiKey,
                };
            }
            (SettingsTab::ApiKey, KeyCode::Char('v')) => {
                view.settings.api_key.toggle_reveal();
            }
            (SettingsTab::ApiKey, KeyCode::Char('r')) => {
                self.confirm = Some(Confirm::RotateApiKey);
            }
            (SettingsTab::Sftp, KeyCode::Char('t')) => {
                let enabled = view.settings.sftp.toggle();
                view.settings.mark_dirty();
                self.ok(format!("SFTP access {}", if enabled { "enabled" } else { "disabled" }));
            }
            (SettingsTab::Sftp, KeyCode::Char('v')) => {
                view.settings.sftp.toggle_password();
            }
            (SettingsTab::Sftp, KeyCode::Char('g')) => {
                view.settings.sftp.regenerate_password();
                view.settings.mark_dirty();
                self.ok("New SFTP password generated");
            }
            (SettingsTab::Sftp, KeyCode::Char('p')) => {
                let port = view.settings.sftp.port().to_string();
                self.open_prompt(Prompt::SftpPort, &port);
            }
            (SettingsTab::Sftp, KeyCode::Char('s')) => {
                if view.settings.save() {
                    self.ok("SFTP settings saved");
                } else {
                    self.set_status("Nothing to save".to_string());
                }
            }
            _ => {}
        }
    }

    fn handle_profile_key(&mut self, key: KeyCode) {
        let len = self.profile.profile.co_owners().len();
        match key {
            KeyCode::Up => move_up(&mut self.profile.selected),
            KeyCode::Down => move_down(&mut self.profile.selected, len),
            KeyCode::Char('n') => {
                let name = self.profile.profile.name.clone();
                self.open_prompt(Prompt::ProfileName, &name);
            }
            KeyCode::Char('m') => {
                let email = self.profile.profile.email.clone();
                self.open_prompt(Prompt::ProfileEmail, &email);
            }
            KeyCode::Char('i') => self.open_prompt(Prompt::InviteEmail, ""),
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(co_owner) = self.profile.profile.co_owners().get(self.profile.selected) {
                    self.confirm = Some(Confirm::RemoveCoOwner(co_owner.id));
                }
            }
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        if key == KeyCode::Char('p') {
            let message = if self.dashboard.toggle_pause() {
                "Metrics paused"
            } else {
                "Metrics resumed"
            };
            self.set_status(message.to_string());
        }
    }

    fn open_prompt(&mut self, prompt: Prompt, value: &str) {
        self.prompt = Some((prompt, TextInput::with_value(value)));
    }

    fn handle_prompt_key(&mut self, key: KeyCode) {
        let Some((prompt, input)) = self.prompt.as_mut() else {
            return;
        };
        let prompt = *prompt;

        match key {
            KeyCode::Esc => {
                if prompt == Prompt::FileSearch {
                    self.files.store.set_search("");
                }
                self.prompt = None;
            }
            KeyCode::Enter => {
                let value = input.take();
                self.prompt = None;
                self.submit_prompt(prompt, &value);
            }
            KeyCode::Backspace => input.backspace(),
            KeyCode::Char(c) => input.push(c),
            _ => {}
        }

        // Search filters as you type
        if let Some((Prompt::FileSearch, input)) = &self.prompt {
            let query = input.value().to_string();
            self.files.store.set_search(&query);
            self.files.selected = 0;
        }
    }

    fn submit_prompt(&mut self, prompt: Prompt, value: &str) {
        match prompt {
            Prompt::FileSearch => {
                self.files.store.set_search(value.trim());
                self.files.selected = 0;
            }
            Prompt::NewFolder => match self.files.store.create_folder(value) {
                Ok(_) => self.ok(format!("Created folder {}", value.trim())),
                Err(e) => self.fail(e),
            },
            Prompt::AddDomain => self.add_domain(value),
            Prompt::SftpPort => match self.settings.settings.sftp.set_port(value) {
                Ok(port) => {
                    self.settings.settings.mark_dirty();
                    self.ok(format!("SFTP port set to {}", port));
                }
                Err(e) => self.fail(e),
            },
            Prompt::ProfileName => {
                let email = self.profile.profile.email.clone();
                match self.profile.profile.update(value, &email) {
                    Ok(()) => self.ok("Profile updated"),
                    Err(e) => self.fail(e),
                }
            }
            Prompt::ProfileEmail => {
                let name = self.profile.profile.name.clone();
                match self.profile.profile.update(&name, value) {
                    Ok(()) => self.ok("Profile updated"),
                    Err(e) => self.fail(e),
                }
            }
            Prompt::InviteEmail => match self.profile.profile.invite(value) {
                Ok(_) => self.ok(format!("Invited {} as moderator", value.trim())),
                Err(e) => self.fail(e),
            },
        }
    }

    fn handle_confirm_key(&mut self, key: KeyCode) {
        let Some(confirm) = self.confirm else {
            return;
        };

        match key {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.confirm = None;
                self.execute_confirmed(confirm);
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.confirm = None;
                self.set_status("Cancelled".to_string());
            }
            _ => {}
        }
    }

    fn execute_confirmed(&mut self, confirm: Confirm) {
        match confirm {
            Confirm::DeleteFile(id) => match self.files.store.remove(id) {
                Ok(entry) => {
                    let len = self.files.store.listing().len();
                    clamp(&mut self.files.selected, len);
                    if entry.is_folder() {
                        self.ok(format!("Deleted folder {} and its contents", entry.name));
                    } else {
                        self.ok(format!("Deleted {}", entry.name));
                    }
                }
                Err(e) => self.fail(e),
            },
            Confirm::DeleteDomain(id) => match self.domains.registry.remove(id) {
                Ok(binding) => {
                    let len = self.domains.registry.bindings().len();
                    clamp(&mut self.domains.selected, len);
                    self.ok(format!(
                        "Domain {} removed. DNS records will be removed within 24 hours",
                        binding.domain
                    ));
                }
                Err(e) => self.fail(e),
            },
            Confirm::RemoveCoOwner(id) => match self.profile.profile.remove(id) {
                Ok(co_owner) => {
                    let len = self.profile.profile.co_owners().len();
                    clamp(&mut self.profile.selected, len);
                    self.ok(format!("Removed {} from co-owners", co_owner.name));
                }
                Err(e) => self.fail(e),
            },
            Confirm::RotateApiKey => {
                self.settings.settings.api_key.rotate();
                self.ok("API key rotated; the previous key no longer works");
            }
        }
    }
}

fn move_up(selected: &mut usize) {
    *selected = selected.saturating_sub(1);
}

fn move_down(selected: &mut usize, len: usize) {
    if *selected + 1 < len {
        *selected += 1;
    }
}

fn clamp(selected: &mut usize, len: usize) {
    *selected = (*selected).min(len.saturating_sub(1));
}
