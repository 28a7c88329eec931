//! Holding Simulator - multi-year projection engine for a privately held
//! investment holding
//!
//! This library provides:
//! - Year-by-year projections under capital-raise dilution (share counts,
//!   valuations, ownership decay) for a simulated owner and an entrant
//!   investor
//! - Newton-Raphson IRR with explicit total-loss and non-convergence
//!   outcomes
//! - A one-year what-if projection with a break-even growth threshold
//! - Batch scenario runs and growth sweeps
//! - Named scenario persistence and CSV export around the core

pub mod error;
pub mod export;
pub mod inputs;
pub mod projection;
pub mod scenario;
pub mod store;

// Re-export commonly used types
pub use error::{UndefinedValuation, ValidationError};
pub use inputs::{default_schedule, SimulationParameters, YearEvent};
pub use projection::{
    one_year_projection, project, solve_irr, IrrOutcome, OneYearResult, Phase, ProjectionEngine,
    ProjectionResult, YearSnapshot,
};
pub use scenario::ScenarioRunner;
pub use store::{JsonFileStore, Scenario, ScenarioStore};
