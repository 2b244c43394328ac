//! Remote rolls - ask another session's user to roll for us
//!
//! A request waits at most the configured timeout. Timeouts and failures are
//! logged and reported as no answer; nothing is retried.

use crate::check::CheckRollConfig;
use crate::config::RulesConfig;
use crate::error::{RulesError, RulesResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What the other session is asked to roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollRequest {
    /// Actor the roll is for
    pub actor: String,
    pub roll: CheckRollConfig,
}

/// Channel to other connected sessions
#[async_trait]
pub trait RemoteSession: Send + Sync {
    /// Send `request` to `target` and wait for the rolled total
    async fn query(&self, target: &str, request: &RollRequest) -> RulesResult<i64>;
}

/// Ask `target` to roll, waiting as long as the rules allow
pub async fn request_remote_roll(
    session: &dyn RemoteSession,
    target: &str,
    request: &RollRequest,
    rules: &RulesConfig,
) -> Option<i64> {
    request_remote_roll_within(session, target, request, rules.remote.timeout()).await
}

/// Ask `target` to roll, giving up after `timeout`
pub async fn request_remote_roll_within(
    session: &dyn RemoteSession,
    target: &str,
    request: &RollRequest,
    timeout: Duration,
) -> Option<i64> {
    match query_with_timeout(session, target, request, timeout).await {
        Ok(total) => {
            tracing::debug!(session = target, actor = %request.actor, total, "remote roll answered");
            Some(total)
        }
        Err(err) => {
            tracing::warn!(session = target, actor = %request.actor, error = %err, "remote roll failed");
            None
        }
    }
}

async fn query_with_timeout(
    session: &dyn RemoteSession,
    target: &str,
    request: &RollRequest,
    timeout: Duration,
) -> RulesResult<i64> {
    tokio::time::timeout(timeout, session.query(target, request))
        .await
        .map_err(|_| RulesError::RemoteTimeout {
            target: target.to_string(),
            seconds: timeout.as_secs(),
        })?
}
