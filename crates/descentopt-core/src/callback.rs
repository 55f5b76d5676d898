//! Callback support for optimization algorithms.
//!
//! Callbacks observe a run without changing its arithmetic. They are the
//! channel for progress reporting (the drivers themselves only emit `log`
//! records) and for cooperative cancellation: returning `Ok(false)` from
//! [`OptimizationCallback::on_iteration_end`] stops the run with
//! [`TerminationReason::CallbackRequest`](crate::optimizer::TerminationReason).

use crate::{
    error::Result,
    optimizer::DirectionKind,
    types::{DVector, Scalar},
};
use std::time::Duration;

/// Information passed to callbacks after each accepted step.
#[derive(Clone, Debug)]
pub struct IterationInfo<'a, T>
where
    T: Scalar,
{
    /// Index of the iteration that just finished (0 is the first step)
    pub iteration: usize,

    /// The new iterate x_{k+1}
    pub point: &'a DVector<T>,

    /// f(x_{k+1})
    pub value: T,

    /// ‖∇f(x_{k+1})‖
    pub gradient_norm: T,

    /// Accepted step size α_k
    pub step_size: T,

    /// Which direction produced the step
    pub direction: DirectionKind,

    /// Elapsed time since optimization start
    pub elapsed: Duration,
}

/// Trait for optimization callbacks.
///
/// All methods have default implementations, so an observer only overrides
/// the events it cares about.
pub trait OptimizationCallback<T>
where
    T: Scalar,
{
    /// Called once, before the first iteration, with the starting point.
    fn on_optimization_start(&mut self, initial_point: &DVector<T>, initial_value: T) -> Result<()> {
        let _ = (initial_point, initial_value);
        Ok(())
    }

    /// Called at the end of each iteration.
    ///
    /// Returns `true` to continue optimization, `false` to stop early.
    fn on_iteration_end(&mut self, info: &IterationInfo<'_, T>) -> Result<bool> {
        let _ = info;
        Ok(true)
    }

    /// Called once when the run ends, whatever the reason.
    fn on_optimization_end(&mut self, iterations: usize, value: T, elapsed: Duration) -> Result<()> {
        let _ = (iterations, value, elapsed);
        Ok(())
    }
}

impl<T, C> OptimizationCallback<T> for &mut C
where
    T: Scalar,
    C: OptimizationCallback<T> + ?Sized,
{
    fn on_optimization_start(&mut self, initial_point: &DVector<T>, initial_value: T) -> Result<()> {
        (**self).on_optimization_start(initial_point, initial_value)
    }

    fn on_iteration_end(&mut self, info: &IterationInfo<'_, T>) -> Result<bool> {
        (**self).on_iteration_end(info)
    }

    fn on_optimization_end(&mut self, iterations: usize, value: T, elapsed: Duration) -> Result<()> {
        (**self).on_optimization_end(iterations, value, elapsed)
    }
}

/// A no-op callback that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl<T: Scalar> OptimizationCallback<T> for NoOpCallback {}

/// A callback that reports progress through the `log` facade.
///
/// Emits one `info` record every `log_every` iterations plus one when the
/// run starts and one when it ends.
#[derive(Debug, Clone)]
pub struct LogProgressCallback {
    log_every: usize,
}

impl LogProgressCallback {
    /// Create a new progress logging callback.
    pub fn new(log_every: usize) -> Self {
        Self {
            log_every: log_every.max(1),
        }
    }
}

impl<T: Scalar> OptimizationCallback<T> for LogProgressCallback {
    fn on_optimization_start(&mut self, _initial_point: &DVector<T>, initial_value: T) -> Result<()> {
        log::info!("starting optimization, f(x0) = {initial_value}");
        Ok(())
    }

    fn on_iteration_end(&mut self, info: &IterationInfo<'_, T>) -> Result<bool> {
        if info.iteration % self.log_every == 0 {
            log::info!(
                "iteration {}: f = {}, |grad| = {}, alpha = {} ({})",
                info.iteration,
                info.value,
                info.gradient_norm,
                info.step_size,
                info.direction
            );
        }
        Ok(true)
    }

    fn on_optimization_end(&mut self, iterations: usize, value: T, elapsed: Duration) -> Result<()> {
        log::info!("optimization finished after {iterations} iterations in {elapsed:?}, f = {value}");
        Ok(())
    }
}

/// Adapts a closure into an iteration callback.
///
/// ```rust
/// # use descentopt_core::prelude::*;
/// let mut seen = Vec::new();
/// let mut callback = FnCallback::new(|info: &IterationInfo<'_, f64>| {
///     seen.push(info.iteration);
///     info.iteration < 5
/// });
/// # let _ = &mut callback;
/// ```
pub struct FnCallback<F> {
    f: F,
}

impl<F> FnCallback<F> {
    /// Wraps `f`; the run continues while it returns `true`.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> std::fmt::Debug for FnCallback<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCallback").finish_non_exhaustive()
    }
}

impl<T, F> OptimizationCallback<T> for FnCallback<F>
where
    T: Scalar,
    F: FnMut(&IterationInfo<'_, T>) -> bool,
{
    fn on_iteration_end(&mut self, info: &IterationInfo<'_, T>) -> Result<bool> {
        Ok((self.f)(info))
    }
}
