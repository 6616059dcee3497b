//! Iterative spring constraint relaxation.
//!
//! Springs are corrected one at a time in a fixed order (Gauss-Seidel), each
//! correction immediately visible to the next spring. A single pass leaves
//! residual error wherever springs compete for the same particle; repeating
//! the pass converges toward all rest lengths at once. More passes give a
//! stiffer cloth at higher cost.

use crate::particle::Particle;
use crate::spring::Spring;

/// Pull the endpoints of one spring toward its rest length.
///
/// Each free endpoint moves by half the correction; fixed endpoints stay
/// put, so a spring with one fixed end only recovers half its error per
/// pass. Springs whose endpoints are closer than `min_distance` have no
/// usable direction and are skipped.
///
/// Returns `false` if the spring was skipped.
pub fn satisfy(particles: &mut [Particle], spring: &Spring, min_distance: f32) -> bool {
    let (i1, i2) = (spring.p1(), spring.p2());
    let delta = particles[i2].position - particles[i1].position;
    let current_distance = delta.length();

    if current_distance <= min_distance || !current_distance.is_finite() {
        return false;
    }

    let correction = delta * (1.0 - spring.rest_length() / current_distance);
    let half = correction / 2.0;

    if !particles[i1].is_fixed {
        particles[i1].position += half;
    }
    if !particles[i2].is_fixed {
        particles[i2].position -= half;
    }
    true
}

/// Run `passes` full relaxation passes over `springs` in order.
///
/// Returns the number of spring corrections skipped as degenerate.
pub fn relax(
    particles: &mut [Particle],
    springs: &[Spring],
    passes: usize,
    min_distance: f32,
) -> usize {
    let mut skipped = 0;
    for _ in 0..passes {
        for spring in springs {
            if !satisfy(particles, spring, min_distance) {
                skipped += 1;
            }
        }
    }
    skipped
}

/// Sum of squared deviations between current and rest lengths.
pub fn spring_error(particles: &[Particle], springs: &[Spring]) -> f32 {
    springs
        .iter()
        .map(|s| {
            let deviation = s.current_length(particles) - s.rest_length();
            deviation * deviation
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spring::SpringKind;
    use glam::Vec3;

    fn pair(a: Vec3, b: Vec3) -> Vec<Particle> {
        vec![Particle::new(a), Particle::new(b)]
    }

    #[test]
    fn test_stretched_spring_pulls_both_ends() {
        let mut particles = pair(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let spring = Spring::new(&particles, 0, 1, SpringKind::Structural);
        particles[1].position = Vec3::new(3.0, 0.0, 0.0);

        assert!(satisfy(&mut particles, &spring, 1e-6));

        assert!((particles[0].position.x - 1.0).abs() < 1e-6);
        assert!((particles[1].position.x - 2.0).abs() < 1e-6);
        assert!((spring.current_length(&particles) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_compressed_spring_pushes_apart() {
        let mut particles = pair(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0));
        let spring = Spring::new(&particles, 0, 1, SpringKind::Structural);
        particles[0].position = Vec3::new(0.0, 0.5, 0.0);
        particles[1].position = Vec3::new(0.0, 1.5, 0.0);

        satisfy(&mut particles, &spring, 1e-6);

        assert!((spring.current_length(&particles) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_fixed_endpoint_is_untouched() {
        let mut particles = pair(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let spring = Spring::new(&particles, 0, 1, SpringKind::Structural);
        particles[0].is_fixed = true;
        particles[1].position = Vec3::new(3.0, 0.0, 0.0);

        satisfy(&mut particles, &spring, 1e-6);

        assert_eq!(particles[0].position, Vec3::ZERO);
        // Only the free half of the correction is applied.
        assert!((particles[1].position.x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_coincident_endpoints_are_skipped() {
        let mut particles = pair(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let spring = Spring::new(&particles, 0, 1, SpringKind::Structural);
        particles[1].position = Vec3::ZERO;

        assert!(!satisfy(&mut particles, &spring, 1e-6));
        assert_eq!(particles[0].position, Vec3::ZERO);
        assert_eq!(particles[1].position, Vec3::ZERO);
        assert!(particles.iter().all(|p| p.position.is_finite()));
    }

    #[test]
    fn test_relax_counts_skips_per_pass() {
        let mut particles = pair(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let spring = Spring::new(&particles, 0, 1, SpringKind::Structural);
        particles[1].position = Vec3::ZERO;

        assert_eq!(relax(&mut particles, &[spring], 3, 1e-6), 3);
    }

    #[test]
    fn test_spring_error() {
        let mut particles = vec![
            Particle::new(Vec3::ZERO),
            Particle::new(Vec3::new(1.0, 0.0, 0.0)),
            Particle::new(Vec3::new(1.0, 1.0, 0.0)),
        ];
        let springs = [
            Spring::new(&particles, 0, 1, SpringKind::Structural),
            Spring::new(&particles, 1, 2, SpringKind::Structural),
        ];
        assert_eq!(spring_error(&particles, &springs), 0.0);

        particles[2].position = Vec3::new(1.0, 3.0, 0.0);
        assert!((spring_error(&particles, &springs) - 4.0).abs() < 1e-6);
    }
}
