//! Personnel directory collaborator contract.
//!
//! Soldier identity is an opaque foreign key here; biographical data and
//! roster management belong to the personnel subsystem. The coordinator
//! only asks whether a soldier exists before debiting stock.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::RwLock;
use thiserror::Error;
use uuid::Uuid;

/// Failures the personnel collaborator can report.
#[derive(Debug, Clone, Error)]
pub enum PersonnelFault {
    #[error("personnel service unavailable: {0}")]
    Unavailable(String),
}

/// Existence checks against the personnel subsystem.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonnelDirectory: Send + Sync {
    async fn soldier_exists(&self, id: Uuid) -> Result<bool, PersonnelFault>;
}

/// Directory that accepts every non-nil soldier ID.
///
/// This is the gateway's default binding: soldier validity is the
/// personnel subsystem's responsibility, so only presence of an ID is
/// enforced here.
pub struct OpenRoster;

#[async_trait]
impl PersonnelDirectory for OpenRoster {
    async fn soldier_exists(&self, id: Uuid) -> Result<bool, PersonnelFault> {
        Ok(!id.is_nil())
    }
}

/// Finite in-memory roster, used in tests to exercise the rejection path.
pub struct InMemoryRoster {
    soldiers: RwLock<HashSet<Uuid>>,
}

impl InMemoryRoster {
    pub fn new() -> Self {
        Self {
            soldiers: RwLock::new(HashSet::new()),
        }
    }

    pub fn with_soldiers<I: IntoIterator<Item = Uuid>>(soldiers: I) -> Self {
        Self {
            soldiers: RwLock::new(soldiers.into_iter().collect()),
        }
    }

    pub fn register(&self, id: Uuid) -> Result<(), PersonnelFault> {
        self.soldiers
            .write()
            .map_err(|_| PersonnelFault::Unavailable("roster lock poisoned".to_string()))?
            .insert(id);
        Ok(())
    }
}

impl Default for InMemoryRoster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonnelDirectory for InMemoryRoster {
    async fn soldier_exists(&self, id: Uuid) -> Result<bool, PersonnelFault> {
        let soldiers = self
            .soldiers
            .read()
            .map_err(|_| PersonnelFault::Unavailable("roster lock poisoned".to_string()))?;
        Ok(soldiers.contains(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_roster_accepts_any_non_nil_id() {
        assert!(OpenRoster.soldier_exists(Uuid::new_v4()).await.unwrap());
        assert!(!OpenRoster.soldier_exists(Uuid::nil()).await.unwrap());
    }

    #[tokio::test]
    async fn test_in_memory_roster_only_knows_registered_soldiers() {
        let known = Uuid::new_v4();
        let roster = InMemoryRoster::with_soldiers([known]);

        assert!(roster.soldier_exists(known).await.unwrap());
        assert!(!roster.soldier_exists(Uuid::new_v4()).await.unwrap());
    }
}
