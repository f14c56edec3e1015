//! Running totals of collected exchange fees.

use super::events::{EventPublisher, StateEvent};
use crate::domain::{AmountError, FeeTotals, RawFeeTotals};
use chrono::Utc;
use std::sync::{PoisonError, RwLock};
use tokio::sync::broadcast;
use tracing::debug;

/// Fee totals, normalized on write.
///
/// [`set`](Self::set) is the only mutator, so every stored value has gone
/// through exactly one normalization.
#[derive(Debug, Default)]
pub struct FeeAccountingState {
    totals: RwLock<FeeTotals>,
    events: EventPublisher,
}

impl FeeAccountingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite both totals with the normalized form of `raw`.
    ///
    /// `raw` carries absolute totals, not deltas. If either field fails to
    /// coerce, nothing is written and the error is returned.
    pub fn set(&self, raw: RawFeeTotals) -> Result<FeeTotals, AmountError> {
        let totals = FeeTotals::try_from(&raw)?;

        *self.totals.write().unwrap_or_else(PoisonError::into_inner) = totals;
        debug!(
            "Fee totals set: total={}, from_last_reward_distribution={}",
            totals.total, totals.from_last_reward_distribution
        );

        self.events.publish(StateEvent::FeesUpdated {
            totals,
            at: Utc::now(),
        });
        Ok(totals)
    }

    pub fn totals(&self) -> FeeTotals {
        *self.totals.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.events.subscribe()
    }
}
