//! Eager validation of run inputs
//!
//! Every range check runs before any simulation work starts, and all
//! violations are collected into a single [`ValidationError`] so the caller
//! can surface the complete list at once.

use crate::error::ValidationError;
use super::data::{SimulationParameters, YearEvent};

/// Allowed range for yearly growth, in percent
pub const GROWTH_PERCENT_RANGE: (f64, f64) = (-100.0, 1000.0);

/// Validate run parameters and the full event schedule.
pub fn validate(
    params: &SimulationParameters,
    events: &[YearEvent],
) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    check_params(params, &mut violations);
    if events.is_empty() {
        violations.push("event schedule must contain at least year 0".into());
    }
    for (year, event) in events.iter().enumerate() {
        check_event(year, event, &mut violations);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(violations))
    }
}

/// Validate parameters alone (used by the one-year calculator, which takes
/// no event schedule).
pub fn validate_params(params: &SimulationParameters) -> Result<(), ValidationError> {
    let mut violations = Vec::new();
    check_params(params, &mut violations);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(violations))
    }
}

fn check_params(params: &SimulationParameters, violations: &mut Vec<String>) {
    // Comparisons alone let NaN and infinity through; every amount must be
    // an actual number before its range is checked.
    if !params.initial_market_value.is_finite() || params.initial_market_value <= 0.0 {
        violations.push("initial market value must be finite and greater than 0".into());
    }
    if !params.initial_nav.is_finite() || params.initial_nav <= 0.0 {
        violations.push("initial substance value must be finite and greater than 0".into());
    }
    if !params.initial_cash.is_finite() || params.initial_cash < 0.0 {
        violations.push("initial cash must be finite and not negative".into());
    }
    if !(0.0..=100.0).contains(&params.substance_discount_percent) {
        violations.push(format!(
            "substance discount must be between 0 and 100 percent, got {}",
            params.substance_discount_percent
        ));
    }
    if !(0.0..=100.0).contains(&params.ownership_share_percent) {
        violations.push(format!(
            "ownership share must be between 0 and 100 percent, got {}",
            params.ownership_share_percent
        ));
    }
    if params.initial_share_count == 0 {
        violations.push("initial share count must be greater than 0".into());
    }
    if !params.default_raise_amount.is_finite() || params.default_raise_amount < 0.0 {
        violations.push("default raise amount must be finite and not negative".into());
    }
    if !params.default_management_cost.is_finite() || params.default_management_cost < 0.0 {
        violations.push("default management cost must be finite and not negative".into());
    }
    check_growth("default growth", params.default_growth_percent, violations);
}

fn check_event(year: usize, event: &YearEvent, violations: &mut Vec<String>) {
    if let Some(raise) = event.raise_amount {
        if !raise.is_finite() || raise < 0.0 {
            violations.push(format!("year {year}: raise amount must be finite and not negative"));
        }
    }
    if !event.exit_amount.is_finite() || event.exit_amount < 0.0 {
        violations.push(format!("year {year}: exit amount must be finite and not negative"));
    }
    if !event.investment_amount.is_finite() || event.investment_amount < 0.0 {
        violations.push(format!(
            "year {year}: investment amount must be finite and not negative"
        ));
    }
    if !event.management_cost.is_finite() || event.management_cost < 0.0 {
        violations.push(format!(
            "year {year}: management cost must be finite and not negative"
        ));
    }
    if !(0.0..=100.0).contains(&event.substance_discount_percent) {
        violations.push(format!(
            "year {year}: substance discount must be between 0 and 100 percent, got {}",
            event.substance_discount_percent
        ));
    }
    check_growth(&format!("year {year}: growth"), event.growth_percent, violations);
}

fn check_growth(label: &str, growth: f64, violations: &mut Vec<String>) {
    let (lo, hi) = GROWTH_PERCENT_RANGE;
    if !(lo..=hi).contains(&growth) || growth.is_nan() {
        violations.push(format!(
            "{label} must be between {lo} and {hi} percent, got {growth}"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::default_schedule;

    fn valid_params() -> SimulationParameters {
        SimulationParameters {
            initial_nav: 50.0,
            initial_market_value: 10.0,
            initial_cash: 0.0,
            substance_discount_percent: 60.0,
            ownership_share_percent: 10.0,
            initial_share_count: 1_000_000,
            default_raise_amount: 5.0,
            default_management_cost: 5.0,
            default_growth_percent: 20.0,
        }
    }

    #[test]
    fn accepts_valid_inputs() {
        let params = valid_params();
        let events = default_schedule(&params, 10);
        assert!(validate(&params, &events).is_ok());
    }

    #[test]
    fn rejects_out_of_range_discount() {
        let mut params = valid_params();
        params.substance_discount_percent = 150.0;
        let err = validate_params(&params).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.violations[0].contains("substance discount"));
        assert!(err.violations[0].contains("150"));
    }

    #[test]
    fn collects_all_violations() {
        let mut params = valid_params();
        params.initial_nav = -1.0;
        params.ownership_share_percent = 120.0;
        params.default_management_cost = -3.0;
        let err = validate_params(&params).unwrap_err();
        assert_eq!(err.violations.len(), 3);
    }

    #[test]
    fn rejects_non_finite_amounts() {
        let mut params = valid_params();
        params.initial_nav = f64::NAN;
        params.default_raise_amount = f64::INFINITY;
        let err = validate_params(&params).unwrap_err();
        assert_eq!(err.violations.len(), 2);
        assert!(err.violations[0].contains("substance value"));
        assert!(err.violations[1].contains("raise amount"));

        let params = valid_params();
        let mut events = default_schedule(&params, 2);
        events[1].exit_amount = f64::NAN;
        events[2].management_cost = f64::NEG_INFINITY;
        let err = validate(&params, &events).unwrap_err();
        assert_eq!(err.violations.len(), 2);
        assert!(err.violations[0].contains("year 1"));
        assert!(err.violations[1].contains("year 2"));
    }

    #[test]
    fn rejects_negative_event_amounts() {
        let params = valid_params();
        let mut events = default_schedule(&params, 2);
        events[1].exit_amount = -2.0;
        events[2].growth_percent = -150.0;
        let err = validate(&params, &events).unwrap_err();
        assert_eq!(err.violations.len(), 2);
        assert!(err.violations[0].contains("year 1"));
        assert!(err.violations[1].contains("year 2"));
    }
}
