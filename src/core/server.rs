/// Server catalog and status model

use serde::Serialize;
use std::fmt;

use crate::utils::constants::{ServerSeed, PUBLIC_IP, SERVER_CATALOG, SERVER_VERSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Online,
    Offline,
    Starting,
    Stopping,
    Maintenance,
}

impl ServerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ServerStatus::Online => "online",
            ServerStatus::Offline => "offline",
            ServerStatus::Starting => "starting",
            ServerStatus::Stopping => "stopping",
            ServerStatus::Maintenance => "maintenance",
        }
    }
}

impl From<&str> for ServerStatus {
    fn from(status: &str) -> Self {
        match status.to_lowercase().as_str() {
            "online" => ServerStatus::Online,
            "starting" => ServerStatus::Starting,
            "stopping" => ServerStatus::Stopping,
            "maintenance" => ServerStatus::Maintenance,
            _ => ServerStatus::Offline,
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Players {
    pub online: u32,
    pub max: u32,
}

impl fmt::Display for Players {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.online, self.max)
    }
}

/// One entry of the server list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Server {
    pub id: String,
    pub name: String,
    pub status: ServerStatus,
    pub players: Players,
    pub ip: String,
    pub port: u16,
    pub version: String,
}

impl From<&ServerSeed> for Server {
    fn from(seed: &ServerSeed) -> Self {
        Self {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            status: ServerStatus::from(seed.status),
            players: Players {
                online: seed.players_online,
                max: seed.players_max,
            },
            ip: PUBLIC_IP.to_string(),
            port: seed.port,
            version: SERVER_VERSION.to_string(),
        }
    }
}

impl Server {
    pub fn address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

/// The static catalog shown on the server list
pub fn catalog() -> Vec<Server> {
    SERVER_CATALOG.iter().map(Server::from).collect()
}

/// Look a server up by id
pub fn find(servers: &[Server], id: &str) -> Option<Server> {
    servers.iter().find(|s| s.id == id).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_seed() {
        let servers = catalog();
        assert_eq!(servers.len(), 3);
        assert_eq!(servers[0].status, ServerStatus::Online);
        assert_eq!(servers[0].players.to_string(), "12/20");
        assert_eq!(servers[2].status, ServerStatus::Maintenance);
        assert_eq!(servers[1].address(), "185.142.23.45:25566");
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(ServerStatus::from("ONLINE"), ServerStatus::Online);
        assert_eq!(ServerStatus::from("unknown"), ServerStatus::Offline);
    }

    #[test]
    fn test_find() {
        let servers = catalog();
        assert_eq!(find(&servers, "3").map(|s| s.name), Some("Test Server".to_string()));
        assert!(find(&servers, "42").is_none());
    }
}
