//! Snapshot output structures for projections

use serde::{Deserialize, Serialize};

use crate::error::UndefinedValuation;
use super::irr::{solve_irr, IrrOutcome};

/// Sub-step within a simulated year.
///
/// Each year produces one snapshot before the capital raise is applied and
/// one after, so dilution is visible even when reading a single year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    BeforeFinancing,
    AfterFinancing,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::BeforeFinancing => "before financing",
            Phase::AfterFinancing => "after financing",
        }
    }
}

/// State of the holding at one sub-step of one simulated year.
///
/// `substance_value` excludes cash; `market_value` is substance after the
/// discount plus cash on hand. Ownership is derived from whole share
/// counts, not a separately tracked fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSnapshot {
    /// Year index (0 = entry year)
    pub year: u32,

    /// Before or after the year's capital raise
    pub phase: Phase,

    /// Net asset value excluding cash
    pub substance_value: f64,

    /// Cash on hand (may be negative when costs outrun raises)
    pub cash: f64,

    /// Substance after discount, plus cash
    pub market_value: f64,

    /// Shares outstanding at this sub-step
    pub total_share_count: u64,

    /// The simulated owner's share block (constant unless the owner subscribes)
    pub sim_owner_share_count: u64,

    /// sim_owner_share_count / total_share_count, in percent
    pub ownership_share_percent: f64,

    /// Ownership fraction times market value
    pub attributable_share_value: f64,

    /// Raise applied this step, if any (only on after-financing snapshots)
    pub raise_amount: Option<f64>,

    /// Value fraction transferred to new shares, in percent, if a raise happened
    pub dilution_percent: Option<f64>,

    /// Market value per share at this sub-step
    pub price_per_share: f64,
}

/// Complete result of a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Ordered snapshots, two per completed year
    pub snapshots: Vec<YearSnapshot>,

    /// Set when an undefined valuation aborted the run; the snapshots above
    /// are the valid prefix computed before the halt
    pub halt: Option<UndefinedValuation>,

    /// IRR of the simulated owner's position over the full run
    pub irr: IrrOutcome,
}

impl ProjectionResult {
    /// Cash-flow vector for the simulated owner: entry value out at year 0,
    /// nothing in between, final attributable value in at year N. One entry
    /// per period boundary, so an N-year run yields N+1 flows.
    pub fn owner_cash_flows(&self) -> Option<Vec<f64>> {
        let first = self.snapshots.first()?;
        let last = self.snapshots.last()?;
        if last.year == 0 {
            return None;
        }
        let mut flows = vec![-first.attributable_share_value];
        flows.extend(std::iter::repeat(0.0).take(last.year as usize - 1));
        flows.push(last.attributable_share_value);
        Some(flows)
    }

    /// Summary for both reported viewpoints
    pub fn summary(&self) -> ProjectionSummary {
        let first = self.snapshots.first();
        let last = self.snapshots.last();

        let owner = OwnerSummary {
            entry_value: first.map(|s| s.attributable_share_value).unwrap_or(0.0),
            final_ownership_percent: last.map(|s| s.ownership_share_percent).unwrap_or(0.0),
            final_value: last.map(|s| s.attributable_share_value).unwrap_or(0.0),
            irr: self.irr,
        };

        ProjectionSummary {
            years: last.map(|s| s.year).unwrap_or(0),
            final_substance_value: last.map(|s| s.substance_value).unwrap_or(0.0),
            final_market_value: last.map(|s| s.market_value).unwrap_or(0.0),
            owner,
            entrant: self.entrant_summary(),
        }
    }

    /// Entrant viewpoint: an investor who funds the entire year-0 raise and
    /// holds the shares issued by it through the whole run.
    fn entrant_summary(&self) -> Option<EntrantSummary> {
        let before = self.snapshots.first()?;
        let after = self.snapshots.get(1)?;
        debug_assert_eq!(after.phase, Phase::AfterFinancing);

        let invested = after.raise_amount?;
        let share_count = after.total_share_count - before.total_share_count;
        if invested <= 0.0 || share_count == 0 {
            return None;
        }

        let last = self.snapshots.last()?;
        let ownership_after_entry_percent =
            share_count as f64 / after.total_share_count as f64 * 100.0;
        let final_ownership_percent = share_count as f64 / last.total_share_count as f64 * 100.0;
        let final_value = final_ownership_percent / 100.0 * last.market_value;

        let irr = if last.year == 0 {
            IrrOutcome::Undefined
        } else {
            let mut flows = vec![-invested];
            flows.extend(std::iter::repeat(0.0).take(last.year as usize - 1));
            flows.push(final_value);
            solve_irr(&flows)
        };

        Some(EntrantSummary {
            invested,
            share_count,
            ownership_after_entry_percent,
            final_ownership_percent,
            final_value,
            irr,
        })
    }
}

/// Summary of a full run for reporting and export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub years: u32,
    pub final_substance_value: f64,
    pub final_market_value: f64,
    pub owner: OwnerSummary,
    pub entrant: Option<EntrantSummary>,
}

/// The simulated owner: a fixed block of shares held from year 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerSummary {
    pub entry_value: f64,
    pub final_ownership_percent: f64,
    pub final_value: f64,
    pub irr: IrrOutcome,
}

/// An investor who bought into the year-0 raise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrantSummary {
    pub invested: f64,
    pub share_count: u64,
    pub ownership_after_entry_percent: f64,
    pub final_ownership_percent: f64,
    pub final_value: f64,
    pub irr: IrrOutcome,
}
