/// Domain bindings with simulated DNS propagation
///
/// A new binding is inserted as `Pending` right away; the caller schedules
/// `confirm` after the propagation delay, which flips it to `Active`. There is
/// no failure branch.

use std::fmt;

use crate::core::error::{PanelError, PanelResult};
use crate::utils::constants::{DEFAULT_GAME_PORT, PUBLIC_IP, SEED_DOMAINS};
use crate::utils::helpers::is_valid_domain;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainStatus {
    Active,
    Pending,
    Error,
}

impl DomainStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DomainStatus::Active => "Active",
            DomainStatus::Pending => "Configuring...",
            DomainStatus::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    A,
    Srv,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::A => f.write_str("A"),
            RecordType::Srv => f.write_str("SRV"),
        }
    }
}

impl From<&str> for RecordType {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("srv") {
            RecordType::Srv
        } else {
            RecordType::A
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainBinding {
    pub id: u64,
    pub domain: String,
    pub status: DomainStatus,
    pub record_type: RecordType,
    pub ip: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DomainRegistry {
    bindings: Vec<DomainBinding>,
    next_id: u64,
}

impl Default for DomainRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainRegistry {
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
            next_id: 1,
        }
    }

    /// Registry seeded with the two sample bindings, already active
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for (domain, record_type, port) in SEED_DOMAINS {
            let id = registry.next_id();
            registry.bindings.push(DomainBinding {
                id,
                domain: domain.to_string(),
                status: DomainStatus::Active,
                record_type: RecordType::from(*record_type),
                ip: PUBLIC_IP.to_string(),
                port: *port,
            });
        }
        registry
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn bindings(&self) -> &[DomainBinding] {
        &self.bindings
    }

    pub fn get(&self, id: u64) -> Option<&DomainBinding> {
        self.bindings.iter().find(|b| b.id == id)
    }

    /// Insert a binding in `Pending` and return its id
    pub fn add(&mut self, domain: &str) -> PanelResult<u64> {
        let domain = domain.trim().to_lowercase();
        if domain.is_empty() {
            return Err(PanelError::Empty("domain"));
        }
        if !is_valid_domain(&domain) {
            return Err(PanelError::InvalidDomain(domain));
        }
        if self.bindings.iter().any(|b| b.domain == domain) {
            return Err(PanelError::Duplicate(domain));
        }

        let id = self.next_id();
        self.bindings.push(DomainBinding {
            id,
            domain,
            status: DomainStatus::Pending,
            record_type: RecordType::A,
            ip: PUBLIC_IP.to_string(),
            port: DEFAULT_GAME_PORT,
        });

        Ok(id)
    }

    /// Propagation finished: `Pending` becomes `Active`. Returns the binding
    /// when it changed; a binding deleted in the meantime is skipped.
    pub fn confirm(&mut self, id: u64) -> Option<&DomainBinding> {
        let binding = self.bindings
            .iter_mut()
            .find(|b| b.id == id && b.status == DomainStatus::Pending)?;
        binding.status = DomainStatus::Active;
        Some(&*binding)
    }

    pub fn remove(&mut self, id: u64) -> PanelResult<DomainBinding> {
        let index = self.bindings
            .iter()
            .position(|b| b.id == id)
            .ok_or(PanelError::NotFound(id))?;
        Ok(self.bindings.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_bindings() {
        let registry = DomainRegistry::new();
        assert_eq!(registry.bindings().len(), 2);
        assert_eq!(registry.bindings()[1].record_type, RecordType::Srv);
        assert!(registry.bindings().iter().all(|b| b.status == DomainStatus::Active));
    }

    #[test]
    fn test_add_is_pending_then_active() {
        let mut registry = DomainRegistry::empty();
        let id = registry.add("play.example.com").unwrap();

        let binding = registry.get(id).unwrap();
        assert_eq!(binding.status, DomainStatus::Pending);
        assert_eq!(binding.record_type, RecordType::A);
        assert_eq!(binding.port, 25565);

        let confirmed = registry.confirm(id).unwrap();
        assert_eq!(confirmed.status, DomainStatus::Active);
        assert_eq!(registry.bindings().len(), 1);

        // A second confirmation changes nothing
        assert!(registry.confirm(id).is_none());
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let mut registry = DomainRegistry::new();
        assert_eq!(registry.add("   "), Err(PanelError::Empty("domain")));
        assert_eq!(registry.add("localhost"), Err(PanelError::InvalidDomain("localhost".to_string())));
        assert_eq!(
            registry.add(" PLAY.myserver.com "),
            Err(PanelError::Duplicate("play.myserver.com".to_string()))
        );
        assert_eq!(registry.bindings().len(), 2);
    }

    #[test]
    fn test_confirm_after_remove_is_noop() {
        let mut registry = DomainRegistry::empty();
        let id = registry.add("mc.example.org").unwrap();
        registry.remove(id).unwrap();

        assert!(registry.confirm(id).is_none());
        assert!(registry.bindings().is_empty());
        assert_eq!(registry.remove(id), Err(PanelError::NotFound(id)));
    }
}
