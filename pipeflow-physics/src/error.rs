use pipeflow_core::constraint::ConstraintError;
use thiserror::Error;

/// Errors that may occur when building flow inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlowError {
    /// A physical parameter violated its constraint.
    ///
    /// Every flow parameter must be strictly positive, which also rules out a
    /// zero viscosity in the Reynolds number denominator.
    #[error("invalid {name}: {source}")]
    InvalidParameter {
        name: &'static str,
        source: ConstraintError,
    },
}
