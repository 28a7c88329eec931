//! Scenario runner for batch projections
//!
//! Wraps one parameter set and runs many event schedules against it, plus
//! the growth sweep behind the sensitivity chart: one projection per growth
//! level from 0% to 200% of the break-even increase.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::inputs::{default_schedule, SimulationParameters, YearEvent, GROWTH_PERCENT_RANGE};
use crate::projection::{one_year_projection, ProjectionEngine, ProjectionResult};

/// Number of growth levels in the original sensitivity chart
pub const DEFAULT_SWEEP_STEPS: u32 = 20;

/// One point of a growth sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Uniform yearly growth applied from year 1 onward, in percent
    pub growth_percent: f64,

    /// Position of this growth level relative to break-even (1.0 = exactly
    /// the break-even increase)
    pub break_even_factor: f64,

    pub result: ProjectionResult,
}

/// Batch runner bound to one parameter set
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    pub fn new(params: SimulationParameters) -> Self {
        Self {
            engine: ProjectionEngine::new(params),
        }
    }

    pub fn params(&self) -> &SimulationParameters {
        self.engine.params()
    }

    /// Run a single schedule
    pub fn run(&self, events: &[YearEvent]) -> Result<ProjectionResult, ValidationError> {
        self.engine.project(events)
    }

    /// Run many schedules in parallel, one result per schedule
    pub fn run_batch(
        &self,
        schedules: &[Vec<YearEvent>],
    ) -> Vec<Result<ProjectionResult, ValidationError>> {
        schedules
            .par_iter()
            .map(|events| self.engine.project(events))
            .collect()
    }

    /// Sweep yearly growth from 0% to 200% of the break-even increase in
    /// `steps + 1` evenly spaced levels, projecting `years` years each.
    pub fn growth_sweep(
        &self,
        years: u32,
        steps: u32,
    ) -> Result<Vec<SweepPoint>, ValidationError> {
        let break_even = one_year_projection(self.params())?;
        let base_growth = break_even.required_increase_percent.max(0.0);
        let steps = steps.max(1);

        (0..=steps)
            .into_par_iter()
            .map(|i| {
                let factor = 2.0 * i as f64 / steps as f64;
                let growth = (base_growth * factor)
                    .clamp(GROWTH_PERCENT_RANGE.0, GROWTH_PERCENT_RANGE.1);

                let mut events = default_schedule(self.params(), years);
                for event in &mut events[1..] {
                    event.growth_percent = growth;
                }

                self.engine.project(&events).map(|result| SweepPoint {
                    growth_percent: growth,
                    break_even_factor: factor,
                    result,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SimulationParameters {
        SimulationParameters {
            initial_nav: 50.0,
            initial_market_value: 10.0,
            initial_cash: 0.0,
            substance_discount_percent: 60.0,
            ownership_share_percent: 10.0,
            initial_share_count: 441_862,
            default_raise_amount: 5.0,
            default_management_cost: 5.0,
            default_growth_percent: 20.0,
        }
    }

    #[test]
    fn batch_results_match_single_runs() {
        let runner = ScenarioRunner::new(params());
        let schedules: Vec<_> = [0.0, 10.0, 20.0]
            .iter()
            .map(|&growth| {
                let mut events = default_schedule(runner.params(), 10);
                for event in &mut events[1..] {
                    event.growth_percent = growth;
                }
                events
            })
            .collect();

        let batch = runner.run_batch(&schedules);
        assert_eq!(batch.len(), 3);
        for (events, result) in schedules.iter().zip(&batch) {
            assert_eq!(result.as_ref().unwrap(), &runner.run(events).unwrap());
        }
    }

    #[test]
    fn sweep_covers_zero_to_double_break_even() {
        let runner = ScenarioRunner::new(params());
        let points = runner.growth_sweep(10, 4).unwrap();

        assert_eq!(points.len(), 5);
        assert_eq!(points[0].growth_percent, 0.0);
        assert_eq!(points[2].break_even_factor, 1.0);
        assert_eq!(points[4].break_even_factor, 2.0);

        // More growth never hurts the final position
        let finals: Vec<f64> = points
            .iter()
            .map(|p| p.result.snapshots.last().unwrap().attributable_share_value)
            .collect();
        assert!(finals.windows(2).all(|w| w[1] >= w[0]));
    }
}
