//! Tracer particles carried along a pipe.
//!
//! Particles enter at `x = 0`, drift downstream at a regime-dependent speed
//! and re-enter at the inlet once they pass `x = PIPE_LENGTH`. Laminar
//! particles keep their height; transitional and turbulent particles wander
//! vertically, more so the higher the Reynolds number, but never past the
//! pipe walls.

use std::{convert::Infallible, time::Duration};

use pipeflow_core::Simulation;
use rand::Rng;

use crate::{
    Classification, FlowRegime, ReynoldsNumber, regime::TURBULENT_LIMIT, sampling::linspace,
};

/// Length of the visible pipe section; `x` wraps modulo this value.
pub const PIPE_LENGTH: f64 = 10.0;

/// Lowest height a particle may reach.
pub const WALL_BOTTOM: f64 = 0.5;

/// Highest height a particle may reach.
pub const WALL_TOP: f64 = 4.5;

/// Full height of the plotted pipe section; the walls sit half a unit inside it.
pub const PIPE_HEIGHT: f64 = 5.0;

/// Number of frames in one animation run.
pub const FRAME_COUNT: usize = 200;

/// Nominal time between frames (20 frames per second).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// The position of one tracer particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
}

/// An ordered set of particle positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleSet {
    particles: Vec<Particle>,
}

impl ParticleSet {
    /// Places `count` particles at the inlet, evenly spaced between the walls.
    #[must_use]
    pub fn new(count: usize) -> Self {
        linspace(WALL_BOTTOM, WALL_TOP, count)
            .map(|y| Particle { x: 0.0, y })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Positions as `[x, y]` pairs, ready for plotting.
    #[must_use]
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.particles.iter().map(|p| [p.x, p.y]).collect()
    }
}

impl FromIterator<Particle> for ParticleSet {
    fn from_iter<I: IntoIterator<Item = Particle>>(iter: I) -> Self {
        Self {
            particles: iter.into_iter().collect(),
        }
    }
}

/// Per-regime motion applied on every step.
struct Motion {
    /// Downstream displacement per unit of animation speed.
    drift: f64,
    /// Half-width of the uniform vertical jitter, before Reynolds scaling.
    jitter: Option<f64>,
}

fn motion(regime: FlowRegime) -> Motion {
    match regime {
        FlowRegime::Laminar => Motion {
            drift: 0.05,
            jitter: None,
        },
        FlowRegime::Transitional => Motion {
            drift: 0.075,
            jitter: Some(0.1),
        },
        FlowRegime::Turbulent => Motion {
            drift: 0.1,
            jitter: Some(0.2),
        },
    }
}

/// Advances every particle by one frame.
///
/// - Laminar: `x += 0.05·speed`, height unchanged.
/// - Transitional: `x += 0.075·speed`, `y += U(-0.1, 0.1)·Re/4000`.
/// - Turbulent: `x += 0.1·speed`, `y += U(-0.2, 0.2)·Re/4000`.
///
/// Afterwards `y` is clamped to the walls and `x` wraps into `[0, PIPE_LENGTH)`.
/// Jitter is drawn independently for each particle.
#[must_use]
pub fn advance<R: Rng>(
    mut particles: ParticleSet,
    regime: FlowRegime,
    reynolds: ReynoldsNumber,
    speed: u32,
    rng: &mut R,
) -> ParticleSet {
    let Motion { drift, jitter } = motion(regime);
    let dx = drift * f64::from(speed);
    let scale = reynolds.value() / TURBULENT_LIMIT;

    for particle in &mut particles.particles {
        particle.x += dx;
        if let Some(half_width) = jitter {
            particle.y += rng.random_range(-half_width..half_width) * scale;
        }

        particle.y = particle.y.clamp(WALL_BOTTOM, WALL_TOP);
        particle.x = wrap(particle.x);
    }

    particles
}

/// Wraps `x` into `[0, PIPE_LENGTH)`.
fn wrap(x: f64) -> f64 {
    let wrapped = x.rem_euclid(PIPE_LENGTH);
    // `rem_euclid` can round up to the modulus itself for tiny negative inputs.
    if wrapped < PIPE_LENGTH { wrapped } else { 0.0 }
}

/// A [`Simulation`] stepping a [`ParticleSet`] for a fixed flow.
#[derive(Debug)]
pub struct ParticleSimulation<R> {
    classification: Classification,
    speed: u32,
    rng: R,
}

impl<R: Rng> ParticleSimulation<R> {
    /// Creates a simulation for the given flow and animation speed.
    pub fn new(classification: Classification, speed: u32, rng: R) -> Self {
        Self {
            classification,
            speed,
            rng,
        }
    }
}

impl<R: Rng> Simulation for ParticleSimulation<R> {
    type State = ParticleSet;
    type StepError = Infallible;

    fn advance(&mut self, state: ParticleSet) -> Result<ParticleSet, Infallible> {
        let Classification { reynolds, regime } = self.classification;
        Ok(advance(state, regime, reynolds, self.speed, &mut self.rng))
    }
}

/// One recorded frame of an animation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationFrame {
    pub index: usize,
    pub particles: ParticleSet,
}

/// A complete particle animation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    regime: FlowRegime,
    frames: Vec<AnimationFrame>,
}

impl Animation {
    /// Runs a fresh particle set through `frame_count` steps.
    ///
    /// The initial placement is not itself a frame: frame 0 is the set after
    /// the first step.
    pub fn record<R: Rng>(
        classification: Classification,
        particle_count: usize,
        speed: u32,
        frame_count: usize,
        rng: &mut R,
    ) -> Self {
        let mut sim = ParticleSimulation::new(classification, speed, rng);

        let frames = sim
            .step_iter(ParticleSet::new(particle_count))
            .take(frame_count)
            .enumerate()
            .map(|(index, step)| {
                let Ok(particles) = step;
                AnimationFrame { index, particles }
            })
            .collect();

        log::debug!(
            "recorded {frame_count} frames of {particle_count} particles ({}, Re = {})",
            classification.regime,
            classification.reynolds,
        );

        Self {
            regime: classification.regime,
            frames,
        }
    }

    #[must_use]
    pub fn regime(&self) -> FlowRegime {
        self.regime
    }

    #[must_use]
    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns the frame showing at `elapsed` time into a looping playback.
    #[must_use]
    pub fn frame_at(&self, elapsed: Duration) -> Option<&AnimationFrame> {
        if self.frames.is_empty() {
            return None;
        }
        let tick = elapsed.as_millis() / FRAME_INTERVAL.as_millis();
        let index = usize::try_from(tick % self.frames.len() as u128).unwrap_or_default();
        self.frames.get(index)
    }

    /// Caption describing the animation.
    #[must_use]
    pub fn caption(&self) -> String {
        format!("Particle Movement ({}) Based on Reynolds Number", self.regime)
    }
}
