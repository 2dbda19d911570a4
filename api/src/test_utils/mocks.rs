//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::domain::entities::{Curse, CurseChanges, CurseFilter, CurseId, NewCurse};
use crate::domain::ports::CurseRepository;
use crate::error::DomainError;

// ============================================================================
// In-Memory Curse Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryCurseRepository {
    curses: Arc<RwLock<HashMap<CurseId, Curse>>>,
    /// When set, every call fails with a database error
    fail: bool,
    /// When set, every call sleeps this long before touching the store
    delay: Option<Duration>,
}

impl InMemoryCurseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a curse for testing
    pub fn with_curse(self, curse: Curse) -> Self {
        self.curses.write().unwrap().insert(curse.id, curse);
        self
    }

    /// Make every operation fail as if the database were down
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Make every operation stall, for exercising request timeouts
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn len(&self) -> usize {
        self.curses.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn check(&self) -> Result<(), DomainError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(DomainError::Database("connection refused".to_string()));
        }
        Ok(())
    }

    fn matching(&self, filter: &CurseFilter) -> Vec<Curse> {
        let curses = self.curses.read().unwrap();
        let mut matching: Vec<_> = curses
            .values()
            .filter(|c| matches_filter(filter, c))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching
    }
}

/// Same semantics as the SQL `lower(name) LIKE %needle%` predicate
fn matches_filter(filter: &CurseFilter, curse: &Curse) -> bool {
    match filter.name_needle() {
        Some(needle) => curse.name.to_lowercase().contains(&needle),
        None => true,
    }
}

#[async_trait]
impl CurseRepository for InMemoryCurseRepository {
    async fn create(&self, new_curse: &NewCurse) -> Result<Curse, DomainError> {
        self.check().await?;

        let now = Utc::now();
        let curse = Curse {
            id: CurseId::new(),
            name: new_curse.name.clone(),
            start_date: new_curse.start_date,
            end_date: new_curse.end_date,
            created_at: now,
            updated_at: now,
        };

        let mut curses = self.curses.write().unwrap();
        curses.insert(curse.id, curse.clone());

        Ok(curse)
    }

    async fn find_all(
        &self,
        filter: &CurseFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Curse>, DomainError> {
        self.check().await?;
        Ok(self
            .matching(filter)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn find_by_id(&self, id: &CurseId) -> Result<Curse, DomainError> {
        self.check().await?;
        let curses = self.curses.read().unwrap();
        curses
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(id.to_string()))
    }

    async fn update(&self, id: &CurseId, changes: &CurseChanges) -> Result<(), DomainError> {
        self.check().await?;
        let mut curses = self.curses.write().unwrap();
        if let Some(curse) = curses.get_mut(id) {
            if let Some(name) = &changes.name {
                curse.name = name.clone();
            }
            if let Some(start_date) = changes.start_date {
                curse.start_date = start_date;
            }
            if let Some(end_date) = changes.end_date {
                curse.end_date = end_date;
            }
            curse.updated_at = Utc::now();
            Ok(())
        } else {
            Err(DomainError::NotFound(id.to_string()))
        }
    }

    async fn delete(&self, id: &CurseId) -> Result<(), DomainError> {
        self.check().await?;
        let mut curses = self.curses.write().unwrap();
        curses
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(id.to_string()))
    }

    async fn count(&self, filter: &CurseFilter) -> Result<u64, DomainError> {
        self.check().await?;
        Ok(self.matching(filter).len() as u64)
    }
}
