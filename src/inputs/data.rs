//! Input data structures for a simulation run
//!
//! A run is fully described by one [`SimulationParameters`] record plus an
//! ordered list of [`YearEvent`]s, one per simulated year (index 0..=N).
//! Both are owned by the caller and never mutated by the engine.

use serde::{Deserialize, Serialize};

/// Immutable parameters for a simulation run.
///
/// All currency amounts share one unit (the original model worked in MSEK);
/// the engine only requires that every amount uses the same unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Net asset value (substance value) at year 0, excluding cash
    pub initial_nav: f64,

    /// Observed market value of the whole holding at year 0
    pub initial_market_value: f64,

    /// Cash on hand at year 0
    pub initial_cash: f64,

    /// Haircut applied to NAV from year 1 onward, in percent (0-100).
    /// Year 0 instead derives its discount from the observed market value.
    pub substance_discount_percent: f64,

    /// The simulated owner's stake at entry, in percent (0-100)
    pub ownership_share_percent: f64,

    /// Total shares outstanding at year 0
    pub initial_share_count: u64,

    /// Raise amount used for years whose event leaves it unset
    pub default_raise_amount: f64,

    /// Management cost drawn from cash each year unless overridden
    pub default_management_cost: f64,

    /// Growth rate applied to substance each year unless overridden, in percent
    pub default_growth_percent: f64,
}

impl SimulationParameters {
    /// The simulated owner's share block at entry, rounded to whole shares.
    /// This count stays constant through the run unless the owner subscribes.
    pub fn sim_owner_share_count(&self) -> u64 {
        (self.initial_share_count as f64 * self.ownership_share_percent / 100.0).round() as u64
    }

    /// The simulated owner's attributable value at entry
    pub fn entry_value(&self) -> f64 {
        self.ownership_share_percent / 100.0 * self.initial_market_value
    }

    /// Discount implied by the observed year-0 market value. Year 0 is
    /// anchored to the market value the caller actually entered; the
    /// configured discount applies from year 1 onward.
    pub fn implied_discount_percent(&self) -> f64 {
        (1.0 - self.initial_market_value / self.initial_nav) * 100.0
    }
}

/// Financial events for one simulated year.
///
/// Year 0 only consumes `raise_amount` (the entry raise); growth, costs,
/// exits and investments start applying in year 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearEvent {
    /// Capital raise for the year. `None` falls back to the template value
    /// from [`SimulationParameters::default_raise_amount`].
    pub raise_amount: Option<f64>,

    /// Proceeds from selling holdings: moves value from substance to cash
    pub exit_amount: f64,

    /// New investment from cash into holdings: moves value from cash to substance
    pub investment_amount: f64,

    /// Substance growth for the year, in percent. May be negative.
    pub growth_percent: f64,

    /// Management cost drawn from cash
    pub management_cost: f64,

    /// Substance discount applied this year, in percent (0-100)
    pub substance_discount_percent: f64,
}

impl YearEvent {
    /// An event pre-filled from the run's template values
    pub fn from_defaults(params: &SimulationParameters) -> Self {
        Self {
            raise_amount: None,
            exit_amount: 0.0,
            investment_amount: 0.0,
            growth_percent: params.default_growth_percent,
            management_cost: params.default_management_cost,
            substance_discount_percent: params.substance_discount_percent,
        }
    }

    /// A quiet year: no raise, no exit, no cost, no growth
    pub fn quiet(substance_discount_percent: f64) -> Self {
        Self {
            raise_amount: Some(0.0),
            exit_amount: 0.0,
            investment_amount: 0.0,
            growth_percent: 0.0,
            management_cost: 0.0,
            substance_discount_percent,
        }
    }

    /// Effective raise amount after applying the template fallback
    pub fn effective_raise(&self, params: &SimulationParameters) -> f64 {
        self.raise_amount.unwrap_or(params.default_raise_amount)
    }
}

/// Build a default schedule of `years + 1` events (year 0 through year N)
/// from the run's template values, matching the form the input UI seeds.
pub fn default_schedule(params: &SimulationParameters, years: u32) -> Vec<YearEvent> {
    (0..=years).map(|_| YearEvent::from_defaults(params)).collect()
}
