/// API key and SFTP credentials of a server
///
/// All secrets are random strings generated locally; nothing is sent anywhere.

use crate::core::error::{PanelError, PanelResult};
use crate::utils::constants::{API_KEY_PREFIX, SFTP_DEFAULT_PORT, SFTP_HOST};
use crate::utils::helpers::{generate_token, mask_sensitive};

const API_KEY_TOKEN_LEN: usize = 13;
const SFTP_PASSWORD_LEN: usize = 16;
const MASK_VISIBLE: usize = 4;

#[derive(Debug, Clone)]
pub struct ApiKey {
    value: String,
    revealed: bool,
}

impl ApiKey {
    pub fn generate() -> Self {
        Self {
            value: format!("{}{}", API_KEY_PREFIX, generate_token(API_KEY_TOKEN_LEN)),
            revealed: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn toggle_reveal(&mut self) -> bool {
        self.revealed = !self.revealed;
        self.revealed
    }

    /// Text shown in the panel: masked unless revealed
    pub fn display(&self) -> String {
        if self.revealed {
            self.value.clone()
        } else {
            mask_sensitive(&self.value, MASK_VISIBLE)
        }
    }

    /// Replace the key; the old one is gone immediately
    pub fn rotate(&mut self) -> &str {
        self.value = format!("{}{}", API_KEY_PREFIX, generate_token(API_KEY_TOKEN_LEN));
        &self.value
    }
}

#[derive(Debug, Clone)]
pub struct SftpCredentials {
    pub enabled: bool,
    pub host: String,
    port: u16,
    username: String,
    password: String,
    password_visible: bool,
}

impl SftpCredentials {
    pub fn for_server(server_id: &str) -> Self {
        Self {
            enabled: true,
            host: SFTP_HOST.to_string(),
            port: SFTP_DEFAULT_PORT,
            username: format!("server_{}", server_id),
            password: generate_token(SFTP_PASSWORD_LEN),
            password_visible: false,
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn toggle_password(&mut self) -> bool {
        self.password_visible = !self.password_visible;
        self.password_visible
    }

    pub fn password_display(&self) -> String {
        if self.password_visible {
            self.password.clone()
        } else {
            "•".repeat(self.password.chars().count())
        }
    }

    pub fn set_port(&mut self, input: &str) -> PanelResult<u16> {
        let input = input.trim();
        let port: u16 = input
            .parse()
            .map_err(|_| PanelError::InvalidPort(input.to_string()))?;
        if port == 0 {
            return Err(PanelError::InvalidPort(input.to_string()));
        }
        self.port = port;
        Ok(port)
    }

    pub fn regenerate_password(&mut self) {
        self.password = generate_token(SFTP_PASSWORD_LEN);
    }

    /// `sftp://user@host:port`
    pub fn connection_string(&self) -> String {
        format!("sftp://{}@{}:{}", self.username, self.host, self.port)
    }
}

/// Settings panel state for the selected server
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: ApiKey,
    pub sftp: SftpCredentials,
    dirty: bool,
}

impl Settings {
    pub fn new(server_id: &str) -> Self {
        Self {
            api_key: ApiKey::generate(),
            sftp: SftpCredentials::for_server(server_id),
            dirty: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// "Save" is local only; returns whether there was anything to save
    pub fn save(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_format_and_mask() {
        let key = ApiKey::generate();
        assert!(key.value().starts_with("sk_live_"));
        assert_eq!(key.value().len(), API_KEY_PREFIX.len() + API_KEY_TOKEN_LEN);

        let masked = key.display();
        assert!(masked.starts_with("sk_l..."));
        assert!(!masked.contains(&key.value()[8..]));
    }

    #[test]
    fn test_reveal_toggle() {
        let mut key = ApiKey::generate();
        assert!(!key.is_revealed());
        assert!(key.toggle_reveal());
        assert!(key.is_revealed());
        assert_eq!(key.display(), key.value());
        assert!(!key.toggle_reveal());
    }

    #[test]
    fn test_rotate_replaces_key() {
        let mut key = ApiKey::generate();
        let old = key.value().to_string();
        let new = key.rotate().to_string();
        assert_ne!(old, new);
        assert!(new.starts_with(API_KEY_PREFIX));
    }

    #[test]
    fn test_sftp_defaults() {
        let sftp = SftpCredentials::for_server("2");
        assert!(sftp.enabled);
        assert_eq!(sftp.username(), "server_2");
        assert_eq!(sftp.port(), 22);
        assert_eq!(sftp.connection_string(), "sftp://server_2@sftp.server.example.com:22");
        assert_eq!(sftp.password_display().chars().count(), SFTP_PASSWORD_LEN);
        assert!(!sftp.password_display().contains(sftp.password()));
    }

    #[test]
    fn test_sftp_port_validation() {
        let mut sftp = SftpCredentials::for_server("1");
        assert_eq!(sftp.set_port(" 2222 "), Ok(2222));
        assert_eq!(sftp.set_port("0"), Err(PanelError::InvalidPort("0".to_string())));
        assert_eq!(sftp.set_port("70000"), Err(PanelError::InvalidPort("70000".to_string())));
        assert_eq!(sftp.port(), 2222);
    }

    #[test]
    fn test_save_clears_dirty_flag() {
        let mut settings = Settings::new("1");
        assert!(!settings.save());

        settings.sftp.regenerate_password();
        settings.mark_dirty();
        assert!(settings.save());
        assert!(!settings.is_dirty());
    }
}
