//! End-of-day inventory transition.

use crate::domain::{DayEvents, InventoryState};

use super::numeric::require_non_negative;
use super::PricingError;

/// Advance one inventory line by a single day.
///
/// `next.on_hand = max(0, on_hand - daily_sales - wasted + incoming_stock)`
/// and `days_passed` grows by exactly one. The input state is never modified;
/// a rejected step leaves the caller holding the previous state.
///
/// # Errors
/// Returns a validation error for negative or non-finite quantities.
pub fn step(state: &InventoryState, events: DayEvents) -> Result<InventoryState, PricingError> {
    require_non_negative("onHand", state.on_hand)?;
    require_non_negative("dailySales", events.daily_sales)?;
    require_non_negative("incomingStock", events.incoming_stock)?;
    require_non_negative("wasted", events.wasted)?;

    let days_passed = state
        .days_passed
        .checked_add(1)
        .ok_or_else(|| PricingError::validation("daysPassed", "simulation clock overflow"))?;

    let next = state.on_hand - events.daily_sales - events.wasted + events.incoming_stock;

    Ok(InventoryState {
        on_hand: next.max(0.0),
        days_passed,
    })
}

/// Apply a sequence of days in order, stopping at the first rejected day.
pub fn replay<I>(state: &InventoryState, days: I) -> Result<InventoryState, PricingError>
where
    I: IntoIterator<Item = DayEvents>,
{
    days.into_iter()
        .try_fold(*state, |current, events| step(&current, events))
}
