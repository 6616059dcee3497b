//! Per-particle time integration.
//!
//! Each step blends four force evaluations in the shape of a classic RK4
//! step and folds them into a damped Verlet position update:
//!
//! ```text
//! k1 = f(m,       a)
//! k2 = f(m + h/2, a + k1 * h/2)
//! k3 = f(m + h/2, a + k2 * h/2)
//! k4 = f(m + h,   a + k3 * h)
//!
//! x' = x + (x - x_prev) * (1 - damping) + h/6 * (k1 + k2 + k3 + k4)
//! ```
//!
//! where `f(m, a) = m * a`. The RK4 structure is applied to the force rather
//! than to a position/velocity ODE, so this is a tuned approximation and not
//! an exact solve. Stiffness comes from the constraint solver, not from here.

use crate::config::ClothConfig;
use crate::particle::Particle;
use glam::Vec3;

/// Force probe used by the RK4 blend.
#[inline]
pub fn force_function(mass: f32, acceleration: Vec3) -> Vec3 {
    mass * acceleration
}

/// Sum of the four force probes `k1 + k2 + k3 + k4` for one step.
pub fn rk4_force_sum(mass: f32, acceleration: Vec3, step_size: f32) -> Vec3 {
    let half = step_size / 2.0;

    let k1 = force_function(mass, acceleration);
    let k2 = force_function(mass + half, acceleration + k1 * half);
    let k3 = force_function(mass + half, acceleration + k2 * half);
    let k4 = force_function(mass + step_size, acceleration + k3 * step_size);

    k1 + k2 + k3 + k4
}

/// Advance one particle by a single step and clear its accumulator.
///
/// Fixed particles keep both their position and previous position; only
/// their accumulator is cleared so forces do not pile up while pinned.
pub fn integrate(particle: &mut Particle, config: &ClothConfig) {
    if particle.is_fixed {
        particle.acceleration = Vec3::ZERO;
        return;
    }

    let h = config.step_size;
    let old_position = particle.position;
    let inertia = (particle.position - particle.previous_position) * (1.0 - config.damping);
    let forcing = (h / 6.0) * rk4_force_sum(particle.mass, particle.acceleration, h);

    particle.position = particle.position + inertia + forcing;
    particle.previous_position = old_position;
    particle.acceleration = Vec3::ZERO;
}
