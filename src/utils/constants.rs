/// Sample data and fixed strings the panels are seeded with
///
/// Everything here is mock data: the catalog, the files, the domains and the
/// co-owners exist only for the lifetime of the process.

use std::time::Duration;

/// Default delays for the simulated operations
pub const START_DELAY: Duration = Duration::from_millis(3000);
pub const STOP_DELAY: Duration = Duration::from_millis(2000);
pub const CONSOLE_REPLY_DELAY: Duration = Duration::from_millis(300);
pub const DOMAIN_PROPAGATION_DELAY: Duration = Duration::from_millis(3000);
pub const TELEMETRY_INTERVAL: Duration = Duration::from_millis(8000);
pub const DASHBOARD_TICK: Duration = Duration::from_millis(2000);

/// Address every mock server and domain points at
pub const PUBLIC_IP: &str = "185.142.23.45";
pub const DEFAULT_GAME_PORT: u16 = 25565;
pub const SERVER_VERSION: &str = "1.20.4";

/// Players reported once a server comes online
pub const PLAYERS_AFTER_START: u32 = 3;

/// Console help text, returned for `help` regardless of casing
pub const CONSOLE_HELP: &str = "Available commands: help, clear, status, list, say <message>";

/// Messages the console emits on its own while the server is online
pub const TELEMETRY_MESSAGES: &[&str] = &[
    "Checking connection...",
    "CPU: 45% | RAM: 2.1GB/4GB",
    "Active players: 12",
    "TPS: 19.8",
    "Autosave complete",
];

/// Label used for anything modified during this session
pub const JUST_NOW: &str = "just now";

/// Server catalog entry
#[derive(Debug, Clone, Copy)]
pub struct ServerSeed {
    pub id: &'static str,
    pub name: &'static str,
    pub status: &'static str,
    pub players_online: u32,
    pub players_max: u32,
    pub port: u16,
}

pub const SERVER_CATALOG: &[ServerSeed] = &[
    ServerSeed { id: "1", name: "Minecraft Server #1", status: "online", players_online: 12, players_max: 20, port: 25565 },
    ServerSeed { id: "2", name: "Minecraft Server #2", status: "offline", players_online: 0, players_max: 30, port: 25566 },
    ServerSeed { id: "3", name: "Test Server", status: "maintenance", players_online: 0, players_max: 10, port: 25567 },
];

/// (name, is_folder, modified label, content)
pub const SEED_FILES: &[(&str, bool, &str, Option<&str>)] = &[
    ("server.properties", false, "2 hours ago", Some("server-port=25565\nmax-players=20\ndifficulty=normal")),
    ("plugins", true, "1 day ago", None),
    ("world", true, "3 hours ago", None),
    ("whitelist.json", false, "5 hours ago", Some("[]")),
    ("logs", true, "1 hour ago", None),
    ("config.yml", false, "2 days ago", Some("version: 1.0\nport: 25565")),
];

/// (folder, name, content) placed inside the seeded folders
pub const SEED_NESTED_FILES: &[(&str, &str, &str)] = &[
    ("plugins", "EssentialsX.jar", ""),
    ("world", "level.dat", ""),
    ("logs", "latest.log", "[12:00:01] [Server thread/INFO]: Done (4.2s)!"),
];

/// (domain, record type, port)
pub const SEED_DOMAINS: &[(&str, &str, u16)] = &[
    ("play.myserver.com", "A", 25565),
    ("mc.myserver.com", "SRV", 25566),
];

/// (name, email, role, added)
pub const SEED_CO_OWNERS: &[(&str, &str, &str, &str)] = &[
    ("Maria Petrova", "maria@example.com", "admin", "2 weeks ago"),
    ("Ivan Sidorov", "ivan@example.com", "moderator", "1 month ago"),
];

/// (server id, cpu %, ram %, network Mbps, disk %) the dashboard starts from
pub const SEED_GAUGES: &[(&str, f64, f64, f64, f64)] = &[
    ("1", 45.0, 62.0, 340.0, 38.0),
    ("2", 12.0, 30.0, 45.0, 55.0),
    ("3", 5.0, 18.0, 10.0, 22.0),
];

pub const PROFILE_NAME: &str = "Alexander Ivanov";
pub const PROFILE_EMAIL: &str = "alex@example.com";

pub const API_KEY_PREFIX: &str = "sk_live_";
pub const SFTP_HOST: &str = "sftp.server.example.com";
pub const SFTP_DEFAULT_PORT: u16 = 22;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_unique() {
        let mut ids: Vec<&str> = SERVER_CATALOG.iter().map(|s| s.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), SERVER_CATALOG.len());
    }

    #[test]
    fn test_every_server_has_gauges() {
        for seed in SERVER_CATALOG {
            assert!(SEED_GAUGES.iter().any(|(id, ..)| *id == seed.id));
        }
    }

    #[test]
    fn test_nested_files_have_seeded_parent() {
        for (folder, _, _) in SEED_NESTED_FILES {
            assert!(SEED_FILES.iter().any(|(name, is_folder, _, _)| name == folder && *is_folder));
        }
    }
}
