//! Illustrative streamline curves for each flow regime.
//!
//! The curves are not solved from the flow equations. They are a picture of
//! the regime: straight and evenly stacked for laminar flow, wavy and noisy
//! for turbulent flow, and mildly noisy in between.

use rand::Rng;

use crate::{
    FlowRegime,
    sampling::{linspace, sample_gaussian},
};

/// Number of streamlines drawn.
pub const CURVE_COUNT: usize = 10;

/// Number of samples along each streamline.
pub const SAMPLE_COUNT: usize = 500;

/// The streamlines span `x` in `[0, DOMAIN_END]`.
pub const DOMAIN_END: f64 = 10.0;

/// An RGB line color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// How every curve of a plot is stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Rgb,
    pub width: f32,
}

/// A single streamline.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Vertical offset of this streamline from the base curve.
    pub offset: f64,
    pub points: Vec<[f64; 2]>,
}

/// A description of the streamline plot, independent of any drawing backend.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamlinePlot {
    pub regime: FlowRegime,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub style: LineStyle,
    pub curves: Vec<Curve>,
}

/// Per-regime appearance of the streamlines.
struct Appearance {
    title: &'static str,
    noise: Option<f64>,
    style: LineStyle,
}

fn appearance(regime: FlowRegime) -> Appearance {
    match regime {
        FlowRegime::Laminar => Appearance {
            title: "Laminar Flow: Smooth Streamlines",
            noise: None,
            style: LineStyle {
                color: Rgb(31, 119, 180),
                width: 1.0,
            },
        },
        FlowRegime::Transitional => Appearance {
            title: "Transitional Flow: Mix of Laminar and Turbulent",
            noise: Some(0.05),
            style: LineStyle {
                color: Rgb(255, 165, 0),
                width: 1.2,
            },
        },
        FlowRegime::Turbulent => Appearance {
            title: "Turbulent Flow: Chaotic Streamlines",
            noise: Some(0.1),
            style: LineStyle {
                color: Rgb(214, 39, 40),
                width: 1.5,
            },
        },
    }
}

/// The noiseless curve every streamline is offset from.
fn base_curve(regime: FlowRegime, x: f64) -> f64 {
    match regime {
        FlowRegime::Turbulent => x.sin(),
        FlowRegime::Laminar | FlowRegime::Transitional => 0.1 * x,
    }
}

/// Builds the streamline plot for a regime.
///
/// Noise, when the regime has any, is drawn independently for every sample
/// of every curve from `rng`.
pub fn render_streamlines<R: Rng>(regime: FlowRegime, rng: &mut R) -> StreamlinePlot {
    let Appearance {
        title,
        noise,
        style,
    } = appearance(regime);

    let xs: Vec<f64> = linspace(0.0, DOMAIN_END, SAMPLE_COUNT).collect();

    let curves = linspace(0.0, 1.0, CURVE_COUNT)
        .map(|offset| Curve {
            offset,
            points: xs
                .iter()
                .map(|&x| {
                    let jitter = noise.map_or(0.0, |std_dev| sample_gaussian(rng, 0.0, std_dev));
                    [x, base_curve(regime, x) + offset + jitter]
                })
                .collect(),
        })
        .collect();

    log::debug!("rendered {CURVE_COUNT} streamlines for {regime}");

    StreamlinePlot {
        regime,
        title,
        x_label: "Flow Direction",
        y_label: "Streamlines",
        style,
        curves,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn plot_has_ten_curves_of_five_hundred_points() {
        for regime in [
            FlowRegime::Laminar,
            FlowRegime::Transitional,
            FlowRegime::Turbulent,
        ] {
            let plot = render_streamlines(regime, &mut rng());
            assert_eq!(plot.curves.len(), CURVE_COUNT);
            assert!(plot.curves.iter().all(|c| c.points.len() == SAMPLE_COUNT));
            assert_eq!(plot.regime, regime);
        }
    }

    #[test]
    fn offsets_are_evenly_spaced_from_zero_to_one() {
        let plot = render_streamlines(FlowRegime::Laminar, &mut rng());
        for (i, curve) in plot.curves.iter().enumerate() {
            assert_relative_eq!(curve.offset, i as f64 / 9.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn laminar_curves_are_noiseless_lines() {
        let plot = render_streamlines(FlowRegime::Laminar, &mut rng());
        for curve in &plot.curves {
            let [x0, _] = curve.points[0];
            let [x_end, _] = curve.points[SAMPLE_COUNT - 1];
            assert_relative_eq!(x0, 0.0);
            assert_relative_eq!(x_end, DOMAIN_END);

            for &[x, y] in &curve.points {
                assert_relative_eq!(y, 0.1 * x + curve.offset, epsilon = 1e-12);
            }
        }
        assert_eq!(plot.title, "Laminar Flow: Smooth Streamlines");
    }

    #[test]
    fn turbulent_noise_is_centered_on_sine() {
        let plot = render_streamlines(FlowRegime::Turbulent, &mut rng());

        let residuals: Vec<f64> = plot
            .curves
            .iter()
            .flat_map(|c| c.points.iter().map(move |&[x, y]| y - x.sin() - c.offset))
            .collect();
        let n = residuals.len() as f64;
        let mean = residuals.iter().sum::<f64>() / n;
        let std_dev = (residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n).sqrt();

        assert_relative_eq!(mean, 0.0, epsilon = 0.01);
        assert_relative_eq!(std_dev, 0.1, epsilon = 0.01);
    }

    #[test]
    fn transitional_noise_is_centered_on_line() {
        let plot = render_streamlines(FlowRegime::Transitional, &mut rng());

        let residuals: Vec<f64> = plot
            .curves
            .iter()
            .flat_map(|c| c.points.iter().map(move |&[x, y]| y - 0.1 * x - c.offset))
            .collect();
        let n = residuals.len() as f64;
        let mean = residuals.iter().sum::<f64>() / n;
        let std_dev = (residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n).sqrt();

        assert_relative_eq!(mean, 0.0, epsilon = 0.005);
        assert_relative_eq!(std_dev, 0.05, epsilon = 0.005);
    }

    #[test]
    fn seeded_rendering_is_reproducible() {
        let a = render_streamlines(FlowRegime::Turbulent, &mut rng());
        let b = render_streamlines(FlowRegime::Turbulent, &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn styling_differs_per_regime() {
        let mut rng = rng();
        let laminar = render_streamlines(FlowRegime::Laminar, &mut rng).style;
        let transitional = render_streamlines(FlowRegime::Transitional, &mut rng).style;
        let turbulent = render_streamlines(FlowRegime::Turbulent, &mut rng).style;

        assert!(laminar.width < transitional.width);
        assert!(transitional.width < turbulent.width);
        assert_ne!(laminar.color, turbulent.color);
        assert_ne!(transitional.color, turbulent.color);
    }
}
