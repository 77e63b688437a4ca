/// Server console: log buffer, command interpreter and input history
///
/// Commands are matched literally and case-insensitively against a fixed set.
/// Anything else is acknowledged as executed; the interpreter has no failure
/// path.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{PanelError, PanelResult};
use crate::core::lifecycle::Lifecycle;
use crate::core::server::{Players, Server, ServerStatus};
use crate::utils::app_config::SimulationConfig;
use crate::utils::constants::CONSOLE_HELP;
use crate::utils::helpers::format_clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Info,
    Success,
    Error,
    Command,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleLog {
    pub id: u64,
    pub timestamp: DateTime<Local>,
    pub kind: LogKind,
    pub message: String,
}

/// Server facts a reply may quote
#[derive(Debug, Clone)]
pub struct ReplyContext {
    pub server_name: String,
    pub uptime: String,
    pub players: Players,
}

/// Outcome of submitting a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    /// `clear` empties the log right away
    Cleared,
    /// Reply to this command once the reply delay has elapsed
    Pending(String),
}

/// `say <message>` with the message in its original casing; a bare `say`
/// broadcasts an empty message
fn strip_say(command: &str) -> Option<&str> {
    if command.eq_ignore_ascii_case("say") {
        return Some("");
    }
    let prefix = command.get(..4)?;
    if prefix.eq_ignore_ascii_case("say ") {
        command.get(4..)
    } else {
        None
    }
}

/// Pick the single response for a command
pub fn interpret(command: &str, ctx: &ReplyContext) -> (LogKind, String) {
    let lower = command.to_lowercase();

    if lower == "help" {
        (LogKind::Info, CONSOLE_HELP.to_string())
    } else if lower == "status" {
        (
            LogKind::Success,
            format!("Server {} is running normally | Uptime: {}", ctx.server_name, ctx.uptime),
        )
    } else if lower == "list" {
        let names = if ctx.players.online == 0 {
            "none".to_string()
        } else {
            (1..=ctx.players.online)
                .map(|n| format!("Player{}", n))
                .collect::<Vec<_>>()
                .join(", ")
        };
        (LogKind::Info, format!("Players online: {} ({})", names, ctx.players))
    } else if let Some(message) = strip_say(command) {
        (LogKind::Success, format!("[Server] {}", message))
    } else {
        (LogKind::Success, format!("Command \"{}\" executed successfully", command))
    }
}

#[derive(Debug, Clone)]
pub struct Console {
    server_name: String,
    logs: Vec<ConsoleLog>,
    next_id: u64,
    history: Vec<String>,
    history_index: Option<usize>,  // None = not browsing history
    input: String,
}

impl Console {
    pub fn new(server_name: &str) -> Self {
        let mut console = Self {
            server_name: server_name.to_string(),
            logs: Vec::new(),
            next_id: 1,
            history: Vec::new(),
            history_index: None,
            input: String::new(),
        };
        console.push(LogKind::Info, "System initialized");
        console.push(LogKind::Success, format!("Connected to server {}", server_name));
        console
    }

    pub fn logs(&self) -> &[ConsoleLog] {
        &self.logs
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_index(&self) -> Option<usize> {
        self.history_index
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn push(&mut self, kind: LogKind, message: impl Into<String>) {
        self.logs.push(ConsoleLog {
            id: self.next_id,
            timestamp: Local::now(),
            kind,
            message: message.into(),
        });
        self.next_id += 1;
    }

    pub fn clear(&mut self) {
        self.logs.clear();
    }

    /// Submit whatever is in the input line
    pub fn submit(&mut self, running: bool) -> PanelResult<Option<Submitted>> {
        let line = self.input.clone();
        let result = self.submit_line(&line, running)?;
        self.input.clear();
        Ok(result)
    }

    /// Echo `line`, record it in history and decide how it is answered.
    /// Blank input is ignored; input is refused while the server is not running.
    pub fn submit_line(&mut self, line: &str, running: bool) -> PanelResult<Option<Submitted>> {
        let command = line.trim();
        if command.is_empty() {
            return Ok(None);
        }
        if !running {
            return Err(PanelError::ServerOffline);
        }

        self.history.push(command.to_string());
        self.history_index = None;

        if command.eq_ignore_ascii_case("clear") {
            self.clear();
            return Ok(Some(Submitted::Cleared));
        }

        self.push(LogKind::Command, format!("> {}", command));
        Ok(Some(Submitted::Pending(command.to_string())))
    }

    /// Append the delayed response to a pending command
    pub fn reply(&mut self, command: &str, ctx: &ReplyContext) {
        let (kind, message) = interpret(command, ctx);
        self.push(kind, message);
    }

    /// Arrow up: newest entry first, then toward the oldest
    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }

        let index = match self.history_index {
            None => self.history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.history_index = Some(index);
        self.input = self.history[index].clone();
    }

    /// Arrow down: toward the newest entry, then back to an empty line
    pub fn history_down(&mut self) {
        let Some(current) = self.history_index else {
            return;
        };

        let last = self.history.len().saturating_sub(1);
        let index = (current + 1).min(last);
        if index == last && current == index {
            self.history_index = None;
            self.input.clear();
        } else {
            self.history_index = Some(index);
            self.input = self.history[index].clone();
        }
    }

    /// Plain-text rendering of the log, one `[HH:MM:SS] message` per line
    pub fn export_text(&self) -> String {
        self.logs
            .iter()
            .map(|log| format!("[{}] {}\n", format_clock(&log.timestamp), log.message))
            .collect()
    }

    /// Write the log into `dir` and return the file written
    pub fn export_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

        let slug: String = self.server_name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
            .collect();
        let file_name = format!("console-{}-{}.log", slug, Local::now().format("%Y%m%d-%H%M%S"));
        let path = dir.join(file_name);

        fs::write(&path, self.export_text())
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }
}

/// Run `commands` against `server` without a terminal, waiting out every
/// simulated delay. An offline server is started first; one under
/// maintenance is refused.
pub async fn run_headless(sim: &SimulationConfig, server: &Server, commands: &[String]) -> Result<Console> {
    let mut lifecycle = Lifecycle::from_server(server, sim);
    if lifecycle.status() == ServerStatus::Maintenance {
        bail!("{} is under maintenance and does not accept commands", server.name);
    }

    let mut console = Console::new(&server.name);
    if !lifecycle.is_running() {
        let pending = lifecycle.start()?;
        console.push(LogKind::Info, "Starting server...");
        tokio::time::sleep(pending.delay).await;
        lifecycle.complete(pending.step);
        console.push(LogKind::Success, "Server started successfully");
    }

    for line in commands {
        if let Some(Submitted::Pending(command)) = console.submit_line(line, lifecycle.is_running())? {
            tokio::time::sleep(sim.console_reply()).await;
            let ctx = ReplyContext {
                server_name: server.name.clone(),
                uptime: lifecycle.uptime_label(),
                players: lifecycle.players(),
            };
            console.reply(&command, &ctx);
        }
    }

    Ok(console)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::server::catalog;
    use std::time::Duration;
    use tempfile::tempdir;

    fn ctx() -> ReplyContext {
        ReplyContext {
            server_name: "Minecraft Server #1".to_string(),
            uptime: "5h 23m".to_string(),
            players: Players { online: 3, max: 20 },
        }
    }

    #[test]
    fn test_seed_log() {
        let console = Console::new("Minecraft Server #1");
        assert_eq!(console.logs().len(), 2);
        assert_eq!(console.logs()[1].message, "Connected to server Minecraft Server #1");
        assert_eq!(console.logs()[1].kind, LogKind::Success);
    }

    #[test]
    fn test_help_is_case_insensitive() {
        assert_eq!(interpret("HELP", &ctx()), interpret("help", &ctx()));
        assert_eq!(interpret("Help", &ctx()), (LogKind::Info, CONSOLE_HELP.to_string()));
    }

    #[test]
    fn test_fixed_replies() {
        assert_eq!(
            interpret("status", &ctx()).1,
            "Server Minecraft Server #1 is running normally | Uptime: 5h 23m"
        );
        assert_eq!(
            interpret("LIST", &ctx()).1,
            "Players online: Player1, Player2, Player3 (3/20)"
        );
        assert_eq!(interpret("Say Hello World", &ctx()), (LogKind::Success, "[Server] Hello World".to_string()));
        assert_eq!(
            interpret("op Steve", &ctx()),
            (LogKind::Success, "Command \"op Steve\" executed successfully".to_string())
        );
    }

    #[test]
    fn test_bare_say_broadcasts_empty_message() {
        assert_eq!(interpret("say", &ctx()), (LogKind::Success, "[Server] ".to_string()));
        assert_eq!(interpret("SAY ", &ctx()).1, "[Server] ");
    }

    fn commands(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    fn messages(console: &Console) -> Vec<String> {
        console.logs().iter().map(|l| l.message.clone()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_headless_refuses_maintenance() {
        let servers = catalog();
        let err = run_headless(&SimulationConfig::default(), &servers[2], &commands(&["status"]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("maintenance"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_headless_starts_offline_server_first() {
        let servers = catalog();
        let started = tokio::time::Instant::now();

        let console = run_headless(&SimulationConfig::default(), &servers[1], &commands(&["list"]))
            .await
            .unwrap();

        // Start delay plus one reply delay
        assert!(started.elapsed() >= Duration::from_millis(3_300));
        assert_eq!(
            messages(&console)[2..],
            [
                "Starting server...",
                "Server started successfully",
                "> list",
                "Players online: Player1, Player2, Player3 (3/30)",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_headless_replies_in_order() {
        let servers = catalog();
        let started = tokio::time::Instant::now();

        let console = run_headless(
            &SimulationConfig::default(),
            &servers[0],
            &commands(&["say one", "  ", "say two"]),
        )
        .await
        .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(600));
        assert!(started.elapsed() < Duration::from_millis(3_000));
        assert_eq!(
            messages(&console)[2..],
            ["> say one", "[Server] one", "> say two", "[Server] two"]
        );
    }

    #[test]
    fn test_submit_echoes_then_replies() {
        let mut console = Console::new("srv");
        let submitted = console.submit_line("status", true).unwrap();
        assert_eq!(submitted, Some(Submitted::Pending("status".to_string())));

        let last = console.logs().last().unwrap();
        assert_eq!(last.kind, LogKind::Command);
        assert_eq!(last.message, "> status");

        console.reply("status", &ctx());
        assert_eq!(console.logs().len(), 4);
        assert_eq!(console.logs().last().unwrap().kind, LogKind::Success);
    }

    #[test]
    fn test_clear_empties_immediately() {
        let mut console = Console::new("srv");
        console.submit_line("help", true).unwrap();
        assert!(!console.logs().is_empty());

        let submitted = console.submit_line("CLEAR", true).unwrap();
        assert_eq!(submitted, Some(Submitted::Cleared));
        assert!(console.logs().is_empty());
    }

    #[test]
    fn test_input_refused_while_offline() {
        let mut console = Console::new("srv");
        console.push_char('h');
        assert_eq!(console.submit(false), Err(PanelError::ServerOffline));
        // Input line survives the refusal
        assert_eq!(console.input(), "h");
        assert!(console.history().is_empty());
    }

    #[test]
    fn test_blank_input_ignored() {
        let mut console = Console::new("srv");
        assert_eq!(console.submit_line("   ", true), Ok(None));
        assert_eq!(console.logs().len(), 2);
    }

    #[test]
    fn test_history_recall() {
        let mut console = Console::new("srv");
        for cmd in ["one", "two", "three"] {
            console.submit_line(cmd, true).unwrap();
        }

        console.history_up();
        assert_eq!(console.input(), "three");
        console.history_up();
        assert_eq!(console.input(), "two");
        console.history_up();
        console.history_up();
        assert_eq!(console.input(), "one");
        assert_eq!(console.history_index(), Some(0));

        console.history_down();
        assert_eq!(console.input(), "two");
        console.history_down();
        assert_eq!(console.input(), "three");
        console.history_down();
        assert_eq!(console.input(), "");
        assert_eq!(console.history_index(), None);

        // Down without browsing does nothing
        console.history_down();
        assert_eq!(console.history_index(), None);
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempdir().unwrap();
        let console = Console::new("Test Server");
        let path = console.export_to(dir.path()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("System initialized"));
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("console-test-server-"));
    }
}
