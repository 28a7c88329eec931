//! Core projection engine: the year-step fold
//!
//! Each simulated year transforms a [`HoldingState`] into the next one and
//! emits two snapshots, before and after that year's financing. The
//! per-year event ordering is a contract: exit/investment adjustments,
//! then growth, then the management cost draw, then the capital raise.

use log::debug;

use crate::error::{UndefinedValuation, ValidationError};
use crate::inputs::{validate, SimulationParameters, YearEvent};
use super::irr::{solve_irr, IrrOutcome};
use super::snapshot::{Phase, ProjectionResult, YearSnapshot};
use super::state::HoldingState;

/// Main projection engine, bound to one set of run parameters
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    params: SimulationParameters,
}

impl ProjectionEngine {
    pub fn new(params: SimulationParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Run the projection over the full event schedule (year 0 through N).
    ///
    /// Validation is eager: no simulation work happens if any input is out
    /// of range. A raise against a non-positive pre-money value halts the
    /// run mid-way; the result then carries the snapshot prefix computed
    /// before the halt together with the halting year.
    pub fn project(&self, events: &[YearEvent]) -> Result<ProjectionResult, ValidationError> {
        validate(&self.params, events)?;

        let mut snapshots = Vec::with_capacity(events.len() * 2);
        let mut state = HoldingState::from_params(&self.params);
        let mut halt = None;

        for (year, event) in events.iter().enumerate() {
            let (rows, stepped) = self.step(state, year as u32, event);
            snapshots.extend(rows);
            match stepped {
                Ok(next) => state = next,
                Err(error) => {
                    halt = Some(error);
                    break;
                }
            }
        }

        let mut result = ProjectionResult {
            snapshots,
            halt,
            irr: IrrOutcome::Undefined,
        };
        if let Some(flows) = result.owner_cash_flows() {
            result.irr = solve_irr(&flows);
        }
        Ok(result)
    }

    /// Advance the holding by one year.
    ///
    /// Returns the snapshots emitted during the step (always at least the
    /// before-financing one) and either the next state or the valuation
    /// error that halted the step. Pure: no state outside the arguments.
    fn step(
        &self,
        mut state: HoldingState,
        year: u32,
        event: &YearEvent,
    ) -> (Vec<YearSnapshot>, Result<HoldingState, UndefinedValuation>) {
        // Year 0 is anchored to the observed market value and only applies
        // its raise; growth, costs, exits and investments start in year 1.
        let discount = if year == 0 {
            self.params.implied_discount_percent()
        } else {
            event.substance_discount_percent
        };

        if year > 0 {
            // 1. Exits and investments move value between substance and
            //    cash before growth applies.
            if event.exit_amount > 0.0 {
                state.cash += event.exit_amount;
                state.substance_value -= event.exit_amount;
            }
            if event.investment_amount > 0.0 {
                state.cash -= event.investment_amount;
                state.substance_value += event.investment_amount;
            }

            // 2. Growth. May be negative; substance is deliberately not
            //    floored at zero.
            state.substance_value *= 1.0 + event.growth_percent / 100.0;

            // 3. Management cost comes out of cash. Cash may go negative,
            //    which signals that the schedule needs a future raise; the
            //    engine never injects one on its own.
            state.cash -= event.management_cost;
        }

        let mut rows = vec![state.snapshot(year, Phase::BeforeFinancing, discount, None, None)];

        let raise = event.effective_raise(&self.params);
        let mut dilution_percent = None;
        if raise > 0.0 {
            // Pre-money value excludes the cash being raised. New shares
            // are priced off it and the pre-raise share count.
            let pre_money = state.market_value(discount);
            if pre_money <= 0.0 {
                return (rows, Err(UndefinedValuation { year }));
            }
            let old_shares = state.total_share_count;
            let price_per_share = pre_money / old_shares as f64;
            let new_shares = (raise / price_per_share).round() as u64;

            state.cash += raise;
            state.total_share_count = old_shares + new_shares;
            let dilution = (1.0 - pre_money / (pre_money + raise)) * 100.0;
            dilution_percent = Some(dilution);

            // The simulated owner does not participate in raises, so its
            // absolute share count is unchanged and its percentage falls.
            debug!(
                "year {year}: raise {raise} at pre-money {pre_money:.4}: \
                 {new_shares} new shares priced {price_per_share:.6}, dilution {dilution:.2}%"
            );
        }

        rows.push(state.snapshot(
            year,
            Phase::AfterFinancing,
            discount,
            (raise > 0.0).then_some(raise),
            dilution_percent,
        ));
        (rows, Ok(state))
    }
}
