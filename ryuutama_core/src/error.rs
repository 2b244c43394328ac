//! Error taxonomy for check resolution, resources and advancement

use crate::types::ResourceKind;
use thiserror::Error;

/// Errors raised by the rules engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Unknown check type, journey subtype, advancement tag or update path
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Not enough points to pay a check's cost
    #[error("Not enough {resource}: requires {required}, has {available}")]
    ResourceUnavailable {
        resource: ResourceKind,
        required: i64,
        available: i64,
    },
    /// Fumble/critical state queried before the dice were rolled
    #[error("Roll has not been evaluated")]
    NotEvaluated,
    #[error("Advancement chain is already initialized")]
    AlreadyInitialized,
    #[error("Duplicate document id: {0}")]
    DuplicateId(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Remote roll request to {target} timed out after {seconds}s")]
    RemoteTimeout { target: String, seconds: u64 },
    #[error("Remote roll request failed: {0}")]
    Remote(String),
}

impl RulesError {
    /// Shorthand for an [`RulesError::InvalidConfiguration`]
    pub fn invalid(message: impl Into<String>) -> Self {
        RulesError::InvalidConfiguration(message.into())
    }

    /// Whether the UI should surface this as a notification and carry on
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RulesError::ResourceUnavailable { .. }
                | RulesError::PermissionDenied(_)
                | RulesError::RemoteTimeout { .. }
                | RulesError::Remote(_)
        )
    }
}

pub type RulesResult<T> = Result<T, RulesError>;
