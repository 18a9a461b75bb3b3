//! Core traits and numeric constraints for pipeflow.
//!
//! - [`constraint`] enforces numeric invariants (such as "strictly positive")
//!   when a value is constructed.
//! - [`Model`] is a deterministic, typed input-to-output mapping.
//! - [`Simulation`] threads explicit state through a step function.

pub mod constraint;
mod model;
mod simulation;

pub use model::{Model, Snapshot, snapshot};
pub use simulation::{Simulation, StepIter};
