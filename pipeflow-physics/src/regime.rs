use std::{convert::Infallible, fmt};

use pipeflow_core::Model;
use uom::si::{f64::Ratio, ratio::ratio};

use crate::FlowParameters;

/// Below this Reynolds number the flow is laminar.
pub const LAMINAR_LIMIT: f64 = 2000.0;

/// Above this Reynolds number the flow is turbulent.
pub const TURBULENT_LIMIT: f64 = 4000.0;

/// The dimensionless Reynolds number, `Re = ρ·v·D / μ`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ReynoldsNumber(f64);

impl ReynoldsNumber {
    /// Wraps a raw Reynolds number.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Computes the Reynolds number of a pipe flow.
    #[must_use]
    pub fn from_parameters(params: &FlowParameters) -> Self {
        let re: Ratio =
            params.density() * params.velocity() * params.diameter() / params.viscosity();
        Self(re.get::<ratio>())
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the flow regime this Reynolds number falls in.
    #[must_use]
    pub fn regime(self) -> FlowRegime {
        FlowRegime::from_reynolds(self.0)
    }
}

/// Formats with two decimal places, as shown on the dashboard.
impl fmt::Display for ReynoldsNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// The three pipe-flow regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowRegime {
    Laminar,
    Transitional,
    Turbulent,
}

impl FlowRegime {
    /// Classifies a Reynolds number.
    ///
    /// Both thresholds are open: exactly 2000 and exactly 4000 are transitional.
    #[must_use]
    pub fn from_reynolds(reynolds: f64) -> Self {
        if reynolds < LAMINAR_LIMIT {
            Self::Laminar
        } else if reynolds > TURBULENT_LIMIT {
            Self::Turbulent
        } else {
            Self::Transitional
        }
    }

    /// Short regime name, e.g. `"Laminar"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Laminar => "Laminar",
            Self::Transitional => "Transitional",
            Self::Turbulent => "Turbulent",
        }
    }
}

impl fmt::Display for FlowRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Flow", self.name())
    }
}

/// The result of classifying a flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub reynolds: ReynoldsNumber,
    pub regime: FlowRegime,
}

/// Computes the Reynolds number and regime of a flow.
///
/// # Example
///
/// ```
/// use pipeflow_physics::{FlowParameters, FlowRegime, classify};
///
/// let params = FlowParameters::from_si(0.02, 0.01, 1000.0, 0.1).unwrap();
/// let result = classify(&params);
///
/// assert!((result.reynolds.value() - 200.0).abs() < 1e-9);
/// assert_eq!(result.regime, FlowRegime::Laminar);
/// ```
#[must_use]
pub fn classify(params: &FlowParameters) -> Classification {
    let reynolds = ReynoldsNumber::from_parameters(params);
    Classification {
        reynolds,
        regime: reynolds.regime(),
    }
}

/// [`classify`] as a [`Model`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RegimeClassifier;

impl Model for RegimeClassifier {
    type Input = FlowParameters;
    type Output = Classification;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(classify(input))
    }
}
