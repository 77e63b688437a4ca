/// Errors raised when a panel refuses an action
///
/// Simulated operations never fail once accepted; these cover the cases where
/// the action is not accepted in the first place.

use thiserror::Error;

use crate::core::server::ServerStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("cannot {op} a server that is {from}")]
    InvalidTransition { op: &'static str, from: ServerStatus },

    #[error("server is offline; start it to use the console")]
    ServerOffline,

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("'{0}' is not a valid domain name")]
    InvalidDomain(String),

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("'{0}' is not a valid port")]
    InvalidPort(String),

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("no entry with id {0}")]
    NotFound(u64),

    #[error("'{0}' is not a valid name")]
    InvalidName(String),

    #[error("'{0}' is a folder")]
    IsFolder(String),

    #[error("'{0}' is not a folder")]
    NotAFolder(String),
}

pub type PanelResult<T> = std::result::Result<T, PanelError>;
