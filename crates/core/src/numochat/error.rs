//! NumoChat error types.

use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors raised while handling a NumoChat command.
#[derive(Debug, Error)]
pub enum NumoChatError {
    /// The command text is blank.
    #[error("command cannot be empty")]
    EmptyCommand,

    /// No interpreter credentials are configured.
    #[error("command interpreter is not configured")]
    NotConfigured,

    /// The interpreter service failed.
    #[error("command interpreter failed: {0}")]
    Upstream(String),

    /// The interpreter reply could not be understood.
    #[error("could not understand the command: {0}")]
    Unparseable(String),

    /// The extracted entry failed validation.
    #[error("extracted entry is invalid: {0}")]
    InvalidEntry(#[from] LedgerError),
}

impl NumoChatError {
    /// True when the failure lies with the command rather than the service.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyCommand | Self::Unparseable(_) | Self::InvalidEntry(_)
        )
    }
}
