use pipeflow_core::constraint::{Constrained, Constraint, StrictlyPositive};
use uom::si::{
    dynamic_viscosity::pascal_second,
    f64::{DynamicViscosity, Length, MassDensity, Velocity},
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    velocity::meter_per_second,
};

use crate::FlowError;

/// The physical inputs of a pipe flow.
///
/// All four quantities are strictly positive. The invariant is checked once,
/// here, so the Reynolds number can be computed without guarding against a
/// zero viscosity.
///
/// # Example
///
/// ```
/// use pipeflow_physics::FlowParameters;
/// use uom::si::velocity::meter_per_second;
///
/// let params = FlowParameters::from_si(1.0, 0.01, 1000.0, 0.1).unwrap();
/// assert_eq!(params.velocity().get::<meter_per_second>(), 1.0);
///
/// assert!(FlowParameters::from_si(1.0, 0.0, 1000.0, 0.1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowParameters {
    velocity: Constrained<Velocity, StrictlyPositive>,
    viscosity: Constrained<DynamicViscosity, StrictlyPositive>,
    density: Constrained<MassDensity, StrictlyPositive>,
    diameter: Constrained<Length, StrictlyPositive>,
}

impl FlowParameters {
    /// Creates flow parameters from `uom` quantities.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidParameter`] naming the first quantity that
    /// is not strictly positive.
    pub fn new(
        velocity: Velocity,
        viscosity: DynamicViscosity,
        density: MassDensity,
        diameter: Length,
    ) -> Result<Self, FlowError> {
        Ok(Self {
            velocity: positive("velocity", velocity)?,
            viscosity: positive("viscosity", viscosity)?,
            density: positive("density", density)?,
            diameter: positive("diameter", diameter)?,
        })
    }

    /// Creates flow parameters from raw SI values.
    ///
    /// Velocity is in m/s, viscosity in Pa·s, density in kg/m³ and diameter in m.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidParameter`] if any value is not strictly positive.
    pub fn from_si(
        velocity: f64,
        viscosity: f64,
        density: f64,
        diameter: f64,
    ) -> Result<Self, FlowError> {
        Self::new(
            Velocity::new::<meter_per_second>(velocity),
            DynamicViscosity::new::<pascal_second>(viscosity),
            MassDensity::new::<kilogram_per_cubic_meter>(density),
            Length::new::<meter>(diameter),
        )
    }

    #[must_use]
    pub fn velocity(&self) -> Velocity {
        *self.velocity.as_ref()
    }

    #[must_use]
    pub fn viscosity(&self) -> DynamicViscosity {
        *self.viscosity.as_ref()
    }

    #[must_use]
    pub fn density(&self) -> MassDensity {
        *self.density.as_ref()
    }

    #[must_use]
    pub fn diameter(&self) -> Length {
        *self.diameter.as_ref()
    }

    /// Returns new parameters with the given velocity, keeping other fields unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidParameter`] if the velocity is not strictly positive.
    pub fn with_velocity(self, velocity: Velocity) -> Result<Self, FlowError> {
        Ok(Self {
            velocity: positive("velocity", velocity)?,
            ..self
        })
    }
}

fn positive<T>(name: &'static str, value: T) -> Result<Constrained<T, StrictlyPositive>, FlowError>
where
    StrictlyPositive: Constraint<T>,
{
    Constrained::new(value).map_err(|source| FlowError::InvalidParameter { name, source })
}
