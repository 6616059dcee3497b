//! Distance constraints between particle pairs.

use crate::particle::Particle;

/// Topological category of a spring.
///
/// All kinds are corrected with the same strength; the tag only records why
/// the spring exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpringKind {
    /// Immediate row or column neighbor. Resists stretch.
    Structural,
    /// Skip-one row or column neighbor. Resists folding.
    Bend,
    /// Diagonal or skip-one diagonal neighbor. Resists shear.
    Shear,
}

/// A distance constraint between two particles of the same cloth.
///
/// Endpoints are indices into the cloth's particle storage. The rest length
/// is measured once at creation and never changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    p1: usize,
    p2: usize,
    rest_length: f32,
    kind: SpringKind,
}

impl Spring {
    /// Create a spring whose rest length is the current distance between
    /// `particles[p1]` and `particles[p2]`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn new(particles: &[Particle], p1: usize, p2: usize, kind: SpringKind) -> Self {
        let rest_length = particles[p1].position.distance(particles[p2].position);
        Self {
            p1,
            p2,
            rest_length,
            kind,
        }
    }

    #[inline]
    pub fn p1(&self) -> usize {
        self.p1
    }

    #[inline]
    pub fn p2(&self) -> usize {
        self.p2
    }

    #[inline]
    pub fn rest_length(&self) -> f32 {
        self.rest_length
    }

    #[inline]
    pub fn kind(&self) -> SpringKind {
        self.kind
    }

    /// Current distance between the endpoints.
    #[inline]
    pub fn current_length(&self, particles: &[Particle]) -> f32 {
        particles[self.p1].position.distance(particles[self.p2].position)
    }
}
