use std::f64::consts::TAU;

use rand::Rng;

/// Returns `count` evenly spaced values over `[start, end]`, endpoints included.
///
/// A single sample sits at `start`; zero samples yields an empty iterator.
pub(crate) fn linspace(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> {
    let step = if count > 1 {
        (end - start) / (count - 1) as f64
    } else {
        0.0
    };
    (0..count).map(move |i| {
        if i + 1 == count && count > 1 {
            end
        } else {
            start + step * i as f64
        }
    })
}

/// Samples from a normal distribution using the Box-Muller transform.
pub(crate) fn sample_gaussian<R: Rng>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    // Shift to (0, 1] so the logarithm stays finite.
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
    mean + std_dev * z
}
