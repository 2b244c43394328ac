//! SettingStore - serialized mutation of a shared setting record

use crate::error::{RulesError, RulesResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Table role of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Player,
    Trusted,
    Assistant,
    GameMaster,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub role: UserRole,
}

impl User {
    pub fn new(id: impl Into<String>, role: UserRole) -> Self {
        User {
            id: id.into(),
            role,
        }
    }

    /// Assistants count as game masters
    pub fn is_gm(&self) -> bool {
        self.role >= UserRole::Assistant
    }
}

/// Host storage for a setting record
#[async_trait]
pub trait SettingPersister<T>: Send + Sync {
    async fn save(&self, key: &str, value: &T) -> RulesResult<()>;
}

/// A setting record whose updates run one at a time
///
/// Each update holds the slot until the new value has been persisted, so a
/// second request waits for the first instead of racing it.
pub struct SettingStore<T> {
    key: String,
    value: Mutex<T>,
    persister: Option<Arc<dyn SettingPersister<T>>>,
}

impl<T: Clone + Send + Sync + 'static> SettingStore<T> {
    pub fn new(key: impl Into<String>, value: T) -> Self {
        SettingStore {
            key: key.into(),
            value: Mutex::new(value),
            persister: None,
        }
    }

    pub fn with_persister(mut self, persister: Arc<dyn SettingPersister<T>>) -> Self {
        self.persister = Some(persister);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn get(&self) -> T {
        self.value.lock().await.clone()
    }

    /// Mutate the record as `user`; only game masters may
    ///
    /// The stored value only changes once persistence succeeded.
    pub async fn update<F>(&self, user: &User, mutate: F) -> RulesResult<T>
    where
        F: FnOnce(&mut T),
    {
        if !user.is_gm() {
            return Err(RulesError::PermissionDenied(format!(
                "user {} may not change setting '{}'",
                user.id, self.key
            )));
        }

        let mut slot = self.value.lock().await;
        let mut next = slot.clone();
        mutate(&mut next);

        if let Some(persister) = &self.persister {
            persister.save(&self.key, &next).await?;
        }

        *slot = next.clone();
        tracing::debug!(setting = %self.key, user = %user.id, "setting updated");
        Ok(next)
    }
}
