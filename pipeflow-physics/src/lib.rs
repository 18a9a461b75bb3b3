//! Flow regime models for pipeflow.
//!
//! - [`parameters`]: strictly positive pipe-flow inputs.
//! - [`controls`]: bounded dashboard controls that produce those inputs.
//! - [`regime`]: the Reynolds number and the laminar/transitional/turbulent partition.
//! - [`streamlines`]: illustrative streamline curves for a regime.
//! - [`particles`]: the particle animation stepper.

mod error;
mod sampling;

pub mod controls;
pub mod parameters;
pub mod particles;
pub mod regime;
pub mod streamlines;

pub use error::FlowError;
pub use parameters::FlowParameters;
pub use regime::{Classification, FlowRegime, RegimeClassifier, ReynoldsNumber, classify};
