//! Run inputs: parameters, per-year events and their validation

mod data;
mod validate;

pub use data::{default_schedule, SimulationParameters, YearEvent};
pub use validate::{validate, validate_params, GROWTH_PERCENT_RANGE};
