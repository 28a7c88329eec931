//! Error types shared across the simulation core

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input parameters failed their range checks.
///
/// Carries every violated constraint, not just the first one found, so a
/// caller can report the full list back to the user in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid simulation inputs: {}", violations.join("; "))]
pub struct ValidationError {
    pub violations: Vec<String>,
}

impl ValidationError {
    pub fn new(violations: Vec<String>) -> Self {
        Self { violations }
    }
}

/// A capital raise was attempted against a non-positive pre-money value.
///
/// The share price is undefined in that situation, so the simulation halts
/// at the offending year instead of producing NaN or infinite prices. The
/// snapshots computed before the halt remain valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("undefined valuation in year {year}: raise attempted against non-positive pre-money value")]
pub struct UndefinedValuation {
    /// Year in which the raise could not be priced
    pub year: u32,
}
