//! Internal Rate of Return (IRR) calculation
//!
//! Finds the periodic rate that zeroes the net present value of a signed
//! cash-flow sequence: one outflow at entry, zeros in between, one inflow
//! at exit. Degenerate and total-loss inputs short-circuit before any
//! root finding, and non-convergence is reported explicitly instead of
//! silently returning the last guess.

use serde::{Deserialize, Serialize};

/// Fixed sentinel rate for the total-loss case: -100% per period
pub const TOTAL_LOSS_RATE: f64 = -1.0;

/// Final inflows at or below this fraction of the initial outflow are
/// treated as a total loss. Newton-Raphson is numerically unstable near a
/// root at -100%, so these inputs never reach the iteration.
const TOTAL_LOSS_THRESHOLD: f64 = 0.01;

const INITIAL_GUESS: f64 = 0.10;
const TOLERANCE: f64 = 1e-7;
const MAX_ITERATIONS: u32 = 100;

/// Outcome of an IRR solve. Rates are fractions per period
/// (0.0718 means 7.18%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IrrOutcome {
    /// Converged periodic rate
    Rate(f64),

    /// Final inflow was at most 1% of the initial outflow; reported as the
    /// fixed -100% sentinel rather than a Newton-Raphson artifact
    TotalLoss,

    /// Newton-Raphson hit the iteration cap or a flat derivative; carries
    /// the last guess, which callers must treat as unreliable
    NotConverged(f64),

    /// No meaningful IRR exists for the input (empty vector, non-negative
    /// first flow, or fewer than two periods)
    Undefined,
}

impl IrrOutcome {
    /// The rate when one is reliably available. Total loss maps to the
    /// -100% sentinel; non-convergence and undefined map to `None`.
    pub fn rate(&self) -> Option<f64> {
        match self {
            IrrOutcome::Rate(r) => Some(*r),
            IrrOutcome::TotalLoss => Some(TOTAL_LOSS_RATE),
            IrrOutcome::NotConverged(_) | IrrOutcome::Undefined => None,
        }
    }
}

/// Solve for the periodic IRR of a signed cash-flow vector.
///
/// Never panics and never errors: every input maps to an [`IrrOutcome`].
pub fn solve_irr(cash_flows: &[f64]) -> IrrOutcome {
    if cash_flows.len() < 2 {
        return IrrOutcome::Undefined;
    }

    let initial_outflow = -cash_flows[0];
    if initial_outflow <= 0.0 {
        return IrrOutcome::Undefined;
    }

    let final_inflow = cash_flows[cash_flows.len() - 1];
    if final_inflow <= TOTAL_LOSS_THRESHOLD * initial_outflow {
        return IrrOutcome::TotalLoss;
    }

    let mut guess = INITIAL_GUESS;
    for _ in 0..MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(cash_flows, guess);
        if dnpv.abs() < 1e-20 {
            return IrrOutcome::NotConverged(guess);
        }
        let next = guess - npv / dnpv;
        if (next - guess).abs() < TOLERANCE {
            return IrrOutcome::Rate(next);
        }
        guess = next;
    }

    IrrOutcome::NotConverged(guess)
}

/// NPV and its derivative with respect to the rate
fn npv_and_derivative(cash_flows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cash_flows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            dnpv -= t as f64 * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn solved_rate(flows: &[f64]) -> f64 {
        match solve_irr(flows) {
            IrrOutcome::Rate(r) => r,
            other => panic!("expected converged rate, got {other:?}"),
        }
    }

    #[test]
    fn ten_year_doubling_is_about_seven_percent() {
        // (20/10)^(1/10) - 1
        let mut flows = vec![-10.0];
        flows.extend(vec![0.0; 9]);
        flows.push(20.0);

        assert_relative_eq!(solved_rate(&flows), 2.0_f64.powf(0.1) - 1.0, epsilon = 1e-6);
    }

    #[test]
    fn one_year_doubling_is_hundred_percent() {
        assert_relative_eq!(solved_rate(&[-10.0, 20.0]), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn loss_converges_to_negative_rate() {
        let mut flows = vec![-10.0];
        flows.extend(vec![0.0; 9]);
        flows.push(5.0);

        assert_relative_eq!(solved_rate(&flows), 0.5_f64.powf(0.1) - 1.0, epsilon = 1e-6);
    }

    #[test]
    fn zero_final_value_is_total_loss_sentinel() {
        let mut flows = vec![-10.0];
        flows.extend(vec![0.0; 9]);
        flows.push(0.0);

        let outcome = solve_irr(&flows);
        assert_eq!(outcome, IrrOutcome::TotalLoss);
        assert_eq!(outcome.rate(), Some(TOTAL_LOSS_RATE));
    }

    #[test]
    fn near_zero_final_value_is_total_loss_sentinel() {
        // 1% of the initial outflow is inside the shortcut
        assert_eq!(solve_irr(&[-10.0, 0.0, 0.1]), IrrOutcome::TotalLoss);
    }

    #[test]
    fn degenerate_inputs_are_undefined() {
        assert_eq!(solve_irr(&[]), IrrOutcome::Undefined);
        assert_eq!(solve_irr(&[-10.0]), IrrOutcome::Undefined);
        assert_eq!(solve_irr(&[10.0, 20.0]), IrrOutcome::Undefined);
        assert_eq!(solve_irr(&[0.0, 20.0]), IrrOutcome::Undefined);
    }
}
