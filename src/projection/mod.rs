//! Projection engine: year-step simulation, IRR and the one-year variant

mod engine;
mod irr;
mod one_year;
mod snapshot;
mod state;

pub use engine::ProjectionEngine;
pub use irr::{solve_irr, IrrOutcome, TOTAL_LOSS_RATE};
pub use one_year::{one_year_projection, OneYearResult, BREAK_EVEN_MULTIPLE};
pub use snapshot::{
    EntrantSummary, OwnerSummary, Phase, ProjectionResult, ProjectionSummary, YearSnapshot,
};
pub use state::HoldingState;

use crate::error::ValidationError;
use crate::inputs::{SimulationParameters, YearEvent};

/// Run a projection without constructing an engine explicitly
pub fn project(
    params: &SimulationParameters,
    events: &[YearEvent],
) -> Result<ProjectionResult, ValidationError> {
    ProjectionEngine::new(params.clone()).project(events)
}
