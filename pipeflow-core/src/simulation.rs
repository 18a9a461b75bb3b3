use std::iter::FusedIterator;

/// Trait for stepping explicit state forward in discrete frames.
///
/// A `Simulation` owns whatever it needs to compute the next state (its
/// parameters and random source), but never the state itself. The caller
/// passes the current state in by value and receives the next one back, so
/// each run's state lives only as long as the loop that drives it.
///
/// # Stepping Methods
///
/// After implementing [`advance`], the following methods are available:
///
/// - [`Simulation::step_iter`]: Returns an iterator over successive states.
/// - [`Simulation::step_many`]: Takes multiple steps and collects every state.
///
/// [`advance`]: Simulation::advance
pub trait Simulation: Sized {
    /// The state threaded through each step.
    type State;

    /// The error type returned if a step fails.
    type StepError: std::error::Error + Send + Sync + 'static;

    /// Computes the next state from the current one.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`](Simulation::StepError) if the step fails.
    fn advance(&mut self, state: Self::State) -> Result<Self::State, Self::StepError>;

    /// Creates an iterator that advances the simulation repeatedly.
    ///
    /// The iterator yields the state produced by each step, starting with the
    /// first step after `initial`. If a step fails, the error is yielded and
    /// iteration stops.
    fn step_iter(&mut self, initial: Self::State) -> StepIter<'_, Self>
    where
        Self::State: Clone,
    {
        StepIter {
            state: Some(initial),
            sim: self,
        }
    }

    /// Runs the simulation for a fixed number of steps and collects the results.
    ///
    /// Returns a `Vec` of length `steps`, one entry per step. The initial state
    /// is not included.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`](Simulation::StepError) if any step fails.
    /// No further steps are taken after an error.
    fn step_many(
        &mut self,
        initial: Self::State,
        steps: usize,
    ) -> Result<Vec<Self::State>, Self::StepError>
    where
        Self::State: Clone,
    {
        self.step_iter(initial).take(steps).collect()
    }
}

/// An iterator that repeatedly steps a [`Simulation`].
///
/// Created by [`Simulation::step_iter`].
pub struct StepIter<'a, S: Simulation> {
    state: Option<S::State>,
    sim: &'a mut S,
}

impl<S> Iterator for StepIter<'_, S>
where
    S: Simulation,
    S::State: Clone,
{
    type Item = Result<S::State, S::StepError>;

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.state.take()?;

        match self.sim.advance(state) {
            Ok(next) => {
                self.state = Some(next.clone());
                Some(Ok(next))
            }
            Err(error) => Some(Err(error)),
        }
    }
}

/// Iteration always ends after the first `None`.
impl<S> FusedIterator for StepIter<'_, S>
where
    S: Simulation,
    S::State: Clone,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use thiserror::Error;

    /// Moves a point along a line at constant speed, wrapping at `length`.
    struct Conveyor {
        speed: f64,
        length: f64,
    }

    impl Simulation for Conveyor {
        type State = f64;
        type StepError = Infallible;

        fn advance(&mut self, position: f64) -> Result<f64, Infallible> {
            Ok((position + self.speed).rem_euclid(self.length))
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn step_many_excludes_initial_state() {
        let mut sim = Conveyor {
            speed: 1.5,
            length: 4.0,
        };

        let states = sim.step_many(0.0, 4).unwrap();

        assert_eq!(states, vec![1.5, 3.0, 0.5, 2.0]);
    }

    #[test]
    fn step_many_with_zero_steps_is_empty() {
        let mut sim = Conveyor {
            speed: 1.0,
            length: 10.0,
        };

        assert!(sim.step_many(3.0, 0).unwrap().is_empty());
    }

    #[derive(Debug, Error)]
    #[error("{0} is bigger than max value of {1}")]
    struct TooBig(usize, usize);

    /// Increments a counter and fails once it passes `max`.
    struct Counter {
        max: usize,
    }

    impl Simulation for Counter {
        type State = usize;
        type StepError = TooBig;

        fn advance(&mut self, count: usize) -> Result<usize, TooBig> {
            let next = count + 1;
            if next <= self.max {
                Ok(next)
            } else {
                Err(TooBig(next, self.max))
            }
        }
    }

    #[test]
    fn step_iter_yields_error_then_stops() {
        let mut sim = Counter { max: 2 };
        let mut iter = sim.step_iter(0);

        assert_eq!(iter.next().expect("first step").expect("success"), 1);
        assert_eq!(iter.next().expect("second step").expect("success"), 2);

        let error = iter
            .next()
            .expect("third step yields a result")
            .expect_err("third step is an error");
        assert_eq!(format!("{error}"), "3 is bigger than max value of 2");

        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn step_many_propagates_error() {
        let mut sim = Counter { max: 5 };

        assert!(sim.step_many(0, 5).is_ok());
        assert!(sim.step_many(0, 6).is_err());
    }
}
