/// Server lifecycle state machine
///
/// `start`, `stop` and `restart` only move the server into a transitional
/// state and hand back the step the caller has to schedule. The step is fed
/// back through `complete` once its delay has elapsed. Invalid transitions are
/// rejected here, not by whoever renders the buttons.

use chrono::{DateTime, Local};
use std::time::Duration;

use crate::core::error::{PanelError, PanelResult};
use crate::core::server::{Players, Server, ServerStatus};
use crate::utils::app_config::SimulationConfig;
use crate::utils::constants::PLAYERS_AFTER_START;
use crate::utils::helpers::format_duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStep {
    Started,
    Stopped,
}

/// A step that has to be delivered back after `delay`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingStep {
    pub step: LifecycleStep,
    pub delay: Duration,
}

/// What `complete` changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Completion {
    /// Follow-up step to schedule (restart chains stop into start)
    pub next: Option<PendingStep>,
    /// New running flag, when it flipped
    pub running: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Lifecycle {
    status: ServerStatus,
    players: Players,
    online_since: Option<DateTime<Local>>,
    restart_pending: bool,
    start_delay: Duration,
    stop_delay: Duration,
}

impl Lifecycle {
    pub fn new(max_players: u32, sim: &SimulationConfig) -> Self {
        Self {
            status: ServerStatus::Offline,
            players: Players { online: 0, max: max_players },
            online_since: None,
            restart_pending: false,
            start_delay: sim.start_delay(),
            stop_delay: sim.stop_delay(),
        }
    }

    /// Seed from a catalog entry; an online server counts its uptime from now
    pub fn from_server(server: &Server, sim: &SimulationConfig) -> Self {
        let mut lifecycle = Self::new(server.players.max, sim);
        lifecycle.status = match server.status {
            ServerStatus::Starting => ServerStatus::Offline,
            ServerStatus::Stopping => ServerStatus::Online,
            other => other,
        };
        if lifecycle.status == ServerStatus::Online {
            lifecycle.players = server.players;
            lifecycle.online_since = Some(Local::now());
        }
        lifecycle
    }

    pub fn status(&self) -> ServerStatus {
        self.status
    }

    pub fn players(&self) -> Players {
        self.players
    }

    pub fn is_running(&self) -> bool {
        self.status == ServerStatus::Online
    }

    pub fn is_restarting(&self) -> bool {
        self.restart_pending
    }

    /// Time since the server last came online
    pub fn uptime(&self) -> Duration {
        self.online_since
            .and_then(|since| (Local::now() - since).to_std().ok())
            .unwrap_or_default()
    }

    pub fn uptime_label(&self) -> String {
        format_duration(self.uptime().as_secs())
    }

    /// offline -> starting
    pub fn start(&mut self) -> PanelResult<PendingStep> {
        if self.status != ServerStatus::Offline {
            return Err(PanelError::InvalidTransition { op: "start", from: self.status });
        }

        self.status = ServerStatus::Starting;
        Ok(PendingStep {
            step: LifecycleStep::Started,
            delay: self.start_delay,
        })
    }

    /// online -> stopping
    pub fn stop(&mut self) -> PanelResult<PendingStep> {
        if self.status != ServerStatus::Online {
            return Err(PanelError::InvalidTransition { op: "stop", from: self.status });
        }

        self.status = ServerStatus::Stopping;
        self.restart_pending = false;
        Ok(PendingStep {
            step: LifecycleStep::Stopped,
            delay: self.stop_delay,
        })
    }

    /// online -> stopping -> starting -> online
    pub fn restart(&mut self) -> PanelResult<PendingStep> {
        if self.status != ServerStatus::Online {
            return Err(PanelError::InvalidTransition { op: "restart", from: self.status });
        }

        let pending = self.stop()?;
        self.restart_pending = true;
        Ok(pending)
    }

    /// Apply a step whose delay has elapsed; steps that no longer match the
    /// current state are ignored
    pub fn complete(&mut self, step: LifecycleStep) -> Completion {
        match (step, self.status) {
            (LifecycleStep::Started, ServerStatus::Starting) => {
                self.status = ServerStatus::Online;
                self.players.online = PLAYERS_AFTER_START.min(self.players.max);
                self.online_since = Some(Local::now());
                Completion {
                    next: None,
                    running: Some(true),
                }
            }
            (LifecycleStep::Stopped, ServerStatus::Stopping) => {
                self.players.online = 0;
                self.online_since = None;

                if self.restart_pending {
                    self.restart_pending = false;
                    self.status = ServerStatus::Starting;
                    Completion {
                        next: Some(PendingStep {
                            step: LifecycleStep::Started,
                            delay: self.start_delay,
                        }),
                        running: Some(false),
                    }
                } else {
                    self.status = ServerStatus::Offline;
                    Completion {
                        next: None,
                        running: Some(false),
                    }
                }
            }
            _ => Completion::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::server::catalog;

    fn lifecycle() -> Lifecycle {
        Lifecycle::new(20, &SimulationConfig::default())
    }

    #[test]
    fn test_start_passes_through_starting() {
        let mut lc = lifecycle();
        assert_eq!(lc.status(), ServerStatus::Offline);

        let pending = lc.start().unwrap();
        assert_eq!(lc.status(), ServerStatus::Starting);
        assert_eq!(pending.step, LifecycleStep::Started);
        assert_eq!(pending.delay, Duration::from_secs(3));
        assert!(!lc.is_running());

        let done = lc.complete(pending.step);
        assert_eq!(lc.status(), ServerStatus::Online);
        assert_eq!(done.running, Some(true));
        assert_eq!(lc.players().to_string(), "3/20");
    }

    #[test]
    fn test_stop_passes_through_stopping() {
        let mut lc = lifecycle();
        let step = lc.start().unwrap().step;
        lc.complete(step);

        let pending = lc.stop().unwrap();
        assert_eq!(lc.status(), ServerStatus::Stopping);
        assert_eq!(pending.delay, Duration::from_secs(2));

        let done = lc.complete(pending.step);
        assert_eq!(lc.status(), ServerStatus::Offline);
        assert_eq!(done.running, Some(false));
        assert_eq!(lc.players().online, 0);
        assert_eq!(lc.uptime_label(), "0h 0m");
    }

    #[test]
    fn test_restart_chains_stop_then_start() {
        let mut lc = lifecycle();
        let step = lc.start().unwrap().step;
        lc.complete(step);

        let pending = lc.restart().unwrap();
        assert_eq!(lc.status(), ServerStatus::Stopping);
        assert!(lc.is_restarting());

        let done = lc.complete(pending.step);
        assert_eq!(lc.status(), ServerStatus::Starting);
        let next = done.next.expect("restart schedules a start");
        assert_eq!(next.step, LifecycleStep::Started);

        lc.complete(next.step);
        assert_eq!(lc.status(), ServerStatus::Online);
        assert!(!lc.is_restarting());
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let mut lc = lifecycle();
        assert!(matches!(lc.stop(), Err(PanelError::InvalidTransition { op: "stop", .. })));
        assert!(lc.restart().is_err());

        lc.start().unwrap();
        // Starting twice is rejected by the machine itself
        assert_eq!(
            lc.start(),
            Err(PanelError::InvalidTransition { op: "start", from: ServerStatus::Starting })
        );
        assert!(lc.stop().is_err());
        assert_eq!(lc.status(), ServerStatus::Starting);
    }

    #[test]
    fn test_stale_step_ignored() {
        let mut lc = lifecycle();
        assert_eq!(lc.complete(LifecycleStep::Started), Completion::default());
        assert_eq!(lc.status(), ServerStatus::Offline);

        lc.start().unwrap();
        assert_eq!(lc.complete(LifecycleStep::Stopped), Completion::default());
        assert_eq!(lc.status(), ServerStatus::Starting);
    }

    #[test]
    fn test_maintenance_accepts_nothing() {
        let servers = catalog();
        let mut lc = Lifecycle::from_server(&servers[2], &SimulationConfig::default());
        assert_eq!(lc.status(), ServerStatus::Maintenance);
        assert!(lc.start().is_err());
        assert!(lc.stop().is_err());
        assert!(lc.restart().is_err());
    }

    #[test]
    fn test_seeded_online_server() {
        let servers = catalog();
        let lc = Lifecycle::from_server(&servers[0], &SimulationConfig::default());
        assert!(lc.is_running());
        assert_eq!(lc.players().to_string(), "12/20");
    }
}
