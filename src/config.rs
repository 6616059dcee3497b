//! Simulation parameters.
//!
//! Everything the solver and integrator can be tuned with lives in
//! [`ClothConfig`]. The defaults reproduce the reference cloth: light damping,
//! a quarter step, and fifteen relaxation passes per frame.
//!
//! # Example
//!
//! ```ignore
//! let config = ClothConfig::default()
//!     .with_spring_iterations(30)   // stiffer cloth
//!     .with_damping(0.02);          // settles faster
//!
//! let cloth = Cloth::with_config(5.0, 10.0, 40, 40, config)?;
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default velocity damping applied by the Verlet update.
pub const DEFAULT_DAMPING: f32 = 0.0075;
/// Default step size of the RK4-style force blend.
pub const DEFAULT_STEP_SIZE: f32 = 0.25;
/// Default number of relaxation passes per frame.
pub const DEFAULT_SPRING_ITERATIONS: usize = 15;
/// Default number of anchors a cloth can hold.
pub const DEFAULT_ANCHOR_CAPACITY: usize = 2;
/// Springs shorter than this are skipped by the solver.
pub const DEFAULT_MIN_SPRING_DISTANCE: f32 = 1e-6;

/// Tunable simulation parameters for a [`Cloth`](crate::Cloth).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothConfig {
    /// Fraction of the implicit velocity removed every step (0..=1).
    pub damping: f32,
    /// Step size `h` of the RK4-style force blend.
    pub step_size: f32,
    /// Full solver passes over all springs per update.
    pub spring_iterations: usize,
    /// Maximum number of anchors.
    pub anchor_capacity: usize,
    /// Particle separation below which a spring is not corrected.
    pub min_spring_distance: f32,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            step_size: DEFAULT_STEP_SIZE,
            spring_iterations: DEFAULT_SPRING_ITERATIONS,
            anchor_capacity: DEFAULT_ANCHOR_CAPACITY,
            min_spring_distance: DEFAULT_MIN_SPRING_DISTANCE,
        }
    }
}

impl ClothConfig {
    /// Set the velocity damping.
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Set the integration step size.
    pub fn with_step_size(mut self, step_size: f32) -> Self {
        self.step_size = step_size;
        self
    }

    /// Set the number of solver passes per update.
    ///
    /// More passes give stiffer, more accurate cloth at higher cost.
    pub fn with_spring_iterations(mut self, iterations: usize) -> Self {
        self.spring_iterations = iterations;
        self
    }

    /// Set the anchor capacity.
    pub fn with_anchor_capacity(mut self, capacity: usize) -> Self {
        self.anchor_capacity = capacity;
        self
    }

    /// Set the degenerate-spring threshold.
    pub fn with_min_spring_distance(mut self, distance: f32) -> Self {
        self.min_spring_distance = distance;
        self
    }

    /// Check that every parameter is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(ConfigError::invalid(
                "damping",
                format!("{} is not in [0, 1]", self.damping),
            ));
        }
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(ConfigError::invalid(
                "step_size",
                format!("{} must be finite and positive", self.step_size),
            ));
        }
        if self.spring_iterations == 0 {
            return Err(ConfigError::invalid(
                "spring_iterations",
                "at least one relaxation pass is required",
            ));
        }
        if self.min_spring_distance.is_nan() || self.min_spring_distance < 0.0 {
            return Err(ConfigError::invalid(
                "min_spring_distance",
                format!("{} must be non-negative", self.min_spring_distance),
            ));
        }
        Ok(())
    }
}
