//! One-year what-if projection and break-even threshold
//!
//! A simpler, single-step variant of the valuation arithmetic: one raise,
//! one cost draw, one growth application. Used for quick form feedback, so
//! everything here is closed-form; no iteration and no event schedule.
//!
//! Convention note: unlike the multi-year engine, this variant folds cash
//! into the substance figure (raise in, cost out) before discounting.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::inputs::{validate_params, SimulationParameters};

/// The break-even hurdle: the one-year projected value must reach three
/// times the owner's initial attributable value. A fixed domain
/// requirement, not user-configurable.
pub const BREAK_EVEN_MULTIPLE: f64 = 3.0;

/// Result of the one-year projection and break-even solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneYearResult {
    /// Year-end substance value at which the hurdle is exactly met
    pub required_substance_value: f64,

    /// Required substance growth in currency, measured from the
    /// post-raise, post-cost substance value
    pub required_increase_amount: f64,

    /// Required substance growth in percent of the same base
    pub required_increase_percent: f64,

    /// Attributable value one year out under the default growth rate
    pub projected_one_year_value: f64,

    /// Ownership after the raise's dilution, in percent
    pub projected_ownership_percent: f64,

    /// Change of the projected value against the entry value, in percent
    pub percentage_change: f64,
}

/// Project one year ahead and solve the break-even growth threshold.
///
/// Same validation contract as the multi-year projection; pure function of
/// the parameters.
pub fn one_year_projection(params: &SimulationParameters) -> Result<OneYearResult, ValidationError> {
    validate_params(params)?;

    let f0 = params.ownership_share_percent / 100.0;
    let entry_value = params.entry_value();
    let raise = params.default_raise_amount;

    // Dilution from the single raise, priced off the initial market value
    let dilution_factor = if raise > 0.0 {
        params.initial_market_value / (params.initial_market_value + raise)
    } else {
        1.0
    };
    let f1 = f0 * dilution_factor;

    let substance_after_costs = params.initial_nav + raise - params.default_management_cost;
    let projected_substance = substance_after_costs * (1.0 + params.default_growth_percent / 100.0);
    let discount_factor = 1.0 - params.substance_discount_percent / 100.0;
    let projected_one_year_value = f1 * discount_factor * projected_substance;

    let percentage_change = if entry_value != 0.0 {
        (projected_one_year_value - entry_value) / entry_value * 100.0
    } else {
        0.0
    };

    // Break-even: f1 * discount_factor * S = BREAK_EVEN_MULTIPLE * entry.
    // With zero ownership or a 100% discount no finite substance value
    // reaches the hurdle.
    let attributable_per_substance = f1 * discount_factor;
    let required_substance_value = if attributable_per_substance > 0.0 {
        BREAK_EVEN_MULTIPLE * entry_value / attributable_per_substance
    } else {
        f64::INFINITY
    };
    let required_increase_amount = required_substance_value - substance_after_costs;
    let required_increase_percent = if substance_after_costs != 0.0 {
        required_increase_amount / substance_after_costs * 100.0
    } else {
        0.0
    };

    Ok(OneYearResult {
        required_substance_value,
        required_increase_amount,
        required_increase_percent,
        projected_one_year_value,
        projected_ownership_percent: f1 * 100.0,
        percentage_change,
    })
}
