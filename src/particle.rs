//! Point masses of the cloth grid.

use glam::Vec3;

/// A point mass in the cloth grid.
///
/// Velocity is implicit: it is the difference between `position` and
/// `previous_position`, so the integrator never stores it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Current position.
    pub position: Vec3,
    /// Position one step ago.
    pub previous_position: Vec3,
    /// Force / mass accumulated since the last step.
    pub acceleration: Vec3,
    /// Unnormalized shading normal, rebuilt by `Cloth::compute_normals`.
    pub normal: Vec3,
    /// Pinned particles are never moved by the integrator or the solver.
    pub is_fixed: bool,
    pub mass: f32,
}

impl Particle {
    /// Create a free particle of unit mass at `position`.
    ///
    /// `previous_position` starts at the origin, so a particle away from the
    /// origin carries an implicit velocity into its first step.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            previous_position: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            normal: Vec3::ZERO,
            is_fixed: false,
            mass: 1.0,
        }
    }

    /// Implicit per-step velocity.
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.position - self.previous_position
    }

    /// Accumulate a force, scaled by this particle's mass.
    #[inline]
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force / self.mass;
    }
}
