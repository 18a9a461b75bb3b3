//! The bounded controls the dashboard exposes.
//!
//! Each [`Control`] carries its label, bounds, default and step. The bounds
//! are what keep [`FlowParameters`] valid in practice: the smallest viscosity
//! a user can select is 0.001 Pa·s, never zero.

use std::ops::RangeInclusive;

use serde::Deserialize;

use crate::{FlowError, FlowParameters};

/// A bounded numeric control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Control<T> {
    pub label: &'static str,
    pub min: T,
    pub max: T,
    pub default: T,
    pub step: T,
}

impl<T: Copy> Control<T> {
    /// The inclusive range of values the control accepts.
    #[must_use]
    pub fn range(&self) -> RangeInclusive<T> {
        self.min..=self.max
    }
}

impl Control<f64> {
    /// Clamps `value` into range and rounds it to the nearest multiple of the step.
    ///
    /// Non-finite values fall back to the default.
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        ((value / self.step).round() * self.step).clamp(self.min, self.max)
    }
}

impl Control<usize> {
    /// Clamps `value` into range and rounds it to the nearest step above the minimum.
    #[must_use]
    pub fn snap(&self, value: usize) -> usize {
        let value = value.clamp(self.min, self.max);
        let steps = (value - self.min + self.step / 2) / self.step;
        (self.min + steps * self.step).min(self.max)
    }
}

impl Control<u32> {
    /// Clamps `value` into range and rounds it to the nearest step above the minimum.
    #[must_use]
    pub fn snap(&self, value: u32) -> u32 {
        let value = value.clamp(self.min, self.max);
        let steps = (value - self.min + self.step / 2) / self.step;
        (self.min + steps * self.step).min(self.max)
    }
}

pub const VELOCITY: Control<f64> = Control {
    label: "Flow Velocity (m/s)",
    min: 0.1,
    max: 10.0,
    default: 1.0,
    step: 0.1,
};

pub const VISCOSITY: Control<f64> = Control {
    label: "Fluid Viscosity (Pa·s)",
    min: 0.001,
    max: 0.1,
    default: 0.01,
    step: 0.001,
};

pub const DENSITY: Control<f64> = Control {
    label: "Fluid Density (kg/m³)",
    min: 500.0,
    max: 1500.0,
    default: 1000.0,
    step: 10.0,
};

pub const DIAMETER: Control<f64> = Control {
    label: "Pipe Diameter (m)",
    min: 0.01,
    max: 0.5,
    default: 0.1,
    step: 0.01,
};

pub const PARTICLE_COUNT: Control<usize> = Control {
    label: "Number of Particles",
    min: 5,
    max: 100,
    default: 20,
    step: 1,
};

pub const ANIMATION_SPEED: Control<u32> = Control {
    label: "Animation Speed",
    min: 1,
    max: 10,
    default: 5,
    step: 1,
};

/// The current value of every control.
///
/// Deserializable so a configuration file can choose the starting position
/// of each slider; missing fields take the control's default.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlValues {
    pub velocity: f64,
    pub viscosity: f64,
    pub density: f64,
    pub diameter: f64,
    pub particle_count: usize,
    pub animation_speed: u32,
}

impl ControlValues {
    /// Snaps every value onto its control.
    #[must_use]
    pub fn snapped(self) -> Self {
        Self {
            velocity: VELOCITY.snap(self.velocity),
            viscosity: VISCOSITY.snap(self.viscosity),
            density: DENSITY.snap(self.density),
            diameter: DIAMETER.snap(self.diameter),
            particle_count: PARTICLE_COUNT.snap(self.particle_count),
            animation_speed: ANIMATION_SPEED.snap(self.animation_speed),
        }
    }

    /// Builds the flow parameters from the four physical controls.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidParameter`] if a value is not strictly
    /// positive, which cannot happen for snapped values.
    pub fn flow_parameters(&self) -> Result<FlowParameters, FlowError> {
        FlowParameters::from_si(self.velocity, self.viscosity, self.density, self.diameter)
    }
}

impl Default for ControlValues {
    fn default() -> Self {
        Self {
            velocity: VELOCITY.default,
            viscosity: VISCOSITY.default,
            density: DENSITY.default,
            diameter: DIAMETER.default,
            particle_count: PARTICLE_COUNT.default,
            animation_speed: ANIMATION_SPEED.default,
        }
    }
}
