//! Projection state for a single run
//!
//! The state is the accumulator of the year-step fold: each year's step
//! consumes a state and produces the next one plus the year's snapshots.
//! Nothing outside the fold mutates it.

use crate::inputs::SimulationParameters;
use super::snapshot::{Phase, YearSnapshot};

/// State of the holding between year steps
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingState {
    /// Net asset value excluding cash
    pub substance_value: f64,

    /// Cash on hand
    pub cash: f64,

    /// Shares outstanding
    pub total_share_count: u64,

    /// The simulated owner's share block
    pub sim_owner_share_count: u64,
}

impl HoldingState {
    /// Initialize state at year 0, before any event processing.
    /// The owner's block is a whole number of shares.
    pub fn from_params(params: &SimulationParameters) -> Self {
        Self {
            substance_value: params.initial_nav,
            cash: params.initial_cash,
            total_share_count: params.initial_share_count,
            sim_owner_share_count: params.sim_owner_share_count(),
        }
    }

    /// Market value under the given discount: discounted substance plus cash
    pub fn market_value(&self, discount_percent: f64) -> f64 {
        self.substance_value * (1.0 - discount_percent / 100.0) + self.cash
    }

    /// The simulated owner's stake, in percent
    pub fn ownership_share_percent(&self) -> f64 {
        self.sim_owner_share_count as f64 / self.total_share_count as f64 * 100.0
    }

    /// Snapshot of this state at the given sub-step
    pub fn snapshot(
        &self,
        year: u32,
        phase: Phase,
        discount_percent: f64,
        raise_amount: Option<f64>,
        dilution_percent: Option<f64>,
    ) -> YearSnapshot {
        let market_value = self.market_value(discount_percent);
        let ownership = self.ownership_share_percent();
        YearSnapshot {
            year,
            phase,
            substance_value: self.substance_value,
            cash: self.cash,
            market_value,
            total_share_count: self.total_share_count,
            sim_owner_share_count: self.sim_owner_share_count,
            ownership_share_percent: ownership,
            attributable_share_value: ownership / 100.0 * market_value,
            raise_amount,
            dilution_percent,
            price_per_share: market_value / self.total_share_count as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> SimulationParameters {
        SimulationParameters {
            initial_nav: 50.0,
            initial_market_value: 20.0,
            initial_cash: 2.0,
            substance_discount_percent: 60.0,
            ownership_share_percent: 10.0,
            initial_share_count: 1_000_000,
            default_raise_amount: 5.0,
            default_management_cost: 5.0,
            default_growth_percent: 20.0,
        }
    }

    #[test]
    fn market_value_discounts_substance_not_cash() {
        let state = HoldingState::from_params(&params());
        // 50 * 0.4 + 2
        assert_relative_eq!(state.market_value(60.0), 22.0);
    }

    #[test]
    fn ownership_comes_from_share_counts() {
        let state = HoldingState::from_params(&params());
        assert_eq!(state.sim_owner_share_count, 100_000);
        assert_relative_eq!(state.ownership_share_percent(), 10.0);
    }
}
