//! Process-local registry of inventory lines.
//!
//! Every end-of-day step runs under the registry lock, so two callers stepping
//! the same line are applied one after the other. Nothing is persisted; the
//! number of open lines is capped and closed lines are removed.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::InventoryState;
use crate::engine::PricingError;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("inventory line not found: {0}")]
    NotFound(Uuid),
    #[error("inventory registry is full ({max} lines)")]
    Full { max: usize },
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

#[derive(Debug)]
pub struct InventoryRegistry {
    lines: Mutex<HashMap<Uuid, InventoryState>>,
    max_lines: usize,
}

impl InventoryRegistry {
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: Mutex::new(HashMap::new()),
            max_lines,
        }
    }

    // Lines are only ever replaced with a complete new state, so a poisoned
    // map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, InventoryState>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new line holding `on_hand` units on day zero.
    pub fn create(&self, on_hand: f64) -> Result<(Uuid, InventoryState), StoreError> {
        if !on_hand.is_finite() || on_hand < 0.0 {
            return Err(PricingError::validation(
                "onHand",
                format!("must be a finite value >= 0, got {}", on_hand),
            )
            .into());
        }
        let mut lines = self.lock();
        if lines.len() >= self.max_lines {
            return Err(StoreError::Full {
                max: self.max_lines,
            });
        }
        let id = Uuid::new_v4();
        let state = InventoryState::new(on_hand);
        lines.insert(id, state);
        Ok((id, state))
    }

    /// Close a line, returning its final state.
    pub fn remove(&self, id: &Uuid) -> Result<InventoryState, StoreError> {
        self.lock().remove(id).ok_or(StoreError::NotFound(*id))
    }

    pub fn get(&self, id: &Uuid) -> Option<InventoryState> {
        self.lock().get(id).copied()
    }

    /// Replace a line with the result of `transition`, or leave it untouched
    /// when `transition` fails.
    pub fn apply<F>(&self, id: &Uuid, transition: F) -> Result<InventoryState, StoreError>
    where
        F: FnOnce(&InventoryState) -> Result<InventoryState, PricingError>,
    {
        let mut lines = self.lock();
        let current = lines.get_mut(id).ok_or(StoreError::NotFound(*id))?;
        let next = transition(&*current)?;
        *current = next;
        Ok(next)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
