/// Account profile and co-owners
///
/// Invitations take effect immediately; there is no acceptance step.

use std::fmt;

use crate::core::error::{PanelError, PanelResult};
use crate::utils::constants::{JUST_NOW, PROFILE_EMAIL, PROFILE_NAME, SEED_CO_OWNERS};
use crate::utils::helpers::is_valid_email;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Moderator,
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::Moderator
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("Admin"),
            Role::Moderator => f.write_str("Moderator"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoOwner {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub added_at: String,
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    pub email: String,
    co_owners: Vec<CoOwner>,
    next_id: u64,
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

impl Profile {
    pub fn new() -> Self {
        let mut profile = Self {
            name: PROFILE_NAME.to_string(),
            email: PROFILE_EMAIL.to_string(),
            co_owners: Vec::new(),
            next_id: 1,
        };
        for (name, email, role, added) in SEED_CO_OWNERS {
            profile.push(name, email, Role::from(*role), added);
        }
        profile
    }

    fn push(&mut self, name: &str, email: &str, role: Role, added_at: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.co_owners.push(CoOwner {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role,
            added_at: added_at.to_string(),
        });
        id
    }

    pub fn co_owners(&self) -> &[CoOwner] {
        &self.co_owners
    }

    /// Two-letter avatar initials
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Replace name and email after presence and format checks
    pub fn update(&mut self, name: &str, email: &str) -> PanelResult<()> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(PanelError::Empty("name"));
        }
        if !is_valid_email(email) {
            return Err(PanelError::InvalidEmail(email.to_string()));
        }

        self.name = name.to_string();
        self.email = email.to_string();
        Ok(())
    }

    /// Grant access right away as a moderator named after the email's local part
    pub fn invite(&mut self, email: &str) -> PanelResult<u64> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(PanelError::Empty("email"));
        }
        if !is_valid_email(&email) {
            return Err(PanelError::InvalidEmail(email));
        }
        if self.co_owners.iter().any(|c| c.email == email) {
            return Err(PanelError::Duplicate(email));
        }

        let name = email.split('@').next().unwrap_or_default().to_string();
        Ok(self.push(&name, &email, Role::Moderator, JUST_NOW))
    }

    pub fn remove(&mut self, id: u64) -> PanelResult<CoOwner> {
        let index = self.co_owners
            .iter()
            .position(|c| c.id == id)
            .ok_or(PanelError::NotFound(id))?;
        Ok(self.co_owners.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_profile() {
        let profile = Profile::new();
        assert_eq!(profile.initials(), "AI");
        assert_eq!(profile.co_owners().len(), 2);
        assert_eq!(profile.co_owners()[0].role, Role::Admin);
        assert_eq!(profile.co_owners()[1].role, Role::Moderator);
    }

    #[test]
    fn test_invite_is_immediate_moderator() {
        let mut profile = Profile::new();
        let id = profile.invite(" Dmitry@Example.com ").unwrap();

        let invited = profile.co_owners().iter().find(|c| c.id == id).unwrap();
        assert_eq!(invited.name, "dmitry");
        assert_eq!(invited.email, "dmitry@example.com");
        assert_eq!(invited.role, Role::Moderator);
        assert_eq!(invited.added_at, "just now");
    }

    #[test]
    fn test_invite_rejections() {
        let mut profile = Profile::new();
        assert_eq!(profile.invite(""), Err(PanelError::Empty("email")));
        assert_eq!(profile.invite("not-an-email"), Err(PanelError::InvalidEmail("not-an-email".to_string())));
        assert_eq!(
            profile.invite("maria@example.com"),
            Err(PanelError::Duplicate("maria@example.com".to_string()))
        );
        assert_eq!(profile.co_owners().len(), 2);
    }

    #[test]
    fn test_remove_co_owner() {
        let mut profile = Profile::new();
        let removed = profile.remove(1).unwrap();
        assert_eq!(removed.name, "Maria Petrova");
        assert_eq!(profile.remove(1), Err(PanelError::NotFound(1)));
    }

    #[test]
    fn test_update_profile() {
        let mut profile = Profile::new();
        profile.update("Alex Ivanov", "alex.ivanov@example.com").unwrap();
        assert_eq!(profile.name, "Alex Ivanov");

        assert_eq!(profile.update("  ", "a@b.com"), Err(PanelError::Empty("name")));
        assert!(profile.update("Alex", "nope").is_err());
        assert_eq!(profile.email, "alex.ivanov@example.com");
    }
}
