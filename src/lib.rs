//! # sailcloth
//!
//! Real-time mass-spring cloth: a rectangular grid of point masses held
//! together by distance constraints, pushed around by gravity and wind, and
//! pinned by anchors that can be moved at runtime.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sailcloth::prelude::*;
//!
//! fn main() -> Result<(), ClothError> {
//!     let mut cloth = Cloth::new(5.0, 10.0, 40, 40);
//!     cloth.add_anchor(0, 39)?;
//!     cloth.add_anchor(39, 39)?;
//!
//!     for _ in 0..600 {
//!         cloth.add_force(Vec3::new(0.0, -0.05, 0.0), ForceMode::Uniform);
//!         cloth.add_force(Vec3::new(0.25, 0.0, -0.25), ForceMode::PerTriangle);
//!         cloth.update_particle_positions();
//!     }
//!
//!     cloth.compute_normals();
//!     let vertices = mesh::triangle_vertices(&cloth);
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles and springs
//!
//! The [`Cloth`] owns every [`Particle`] in one flat arena. A [`Spring`] names
//! its two endpoints by index and remembers the rest length it was built with.
//! Springs come in three kinds:
//!
//! | Kind | Connects | Resists |
//! |------|----------|---------|
//! | [`SpringKind::Structural`] | immediate neighbors | stretch |
//! | [`SpringKind::Bend`] | skip-one neighbors | folding |
//! | [`SpringKind::Shear`] | diagonals and skip-one diagonals | shear |
//!
//! ### The frame
//!
//! 1. Forces are accumulated with [`Cloth::add_force`], uniformly
//!    ([`ForceMode::Uniform`]) or weighted by triangle orientation
//!    ([`ForceMode::PerTriangle`]).
//! 2. [`Cloth::update_particle_positions`] relaxes all springs a fixed number
//!    of times, then integrates every free particle once and clears the
//!    accumulators.
//! 3. [`Cloth::compute_normals`] refreshes shading normals for a renderer.
//!
//! Stiffness comes from the number of relaxation passes
//! ([`ClothConfig::spring_iterations`]), not from the integrator.
//!
//! ### Anchors
//!
//! Anchored particles are pinned: neither the solver nor the integrator moves
//! them. [`Cloth::move_active_anchor`] is the one way to move a pin.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: construction and rejected
//! anchors at `debug`, per-frame residuals at `trace`. The `sailcloth` binary
//! installs `env_logger`, so `RUST_LOG=sailcloth=debug` shows them.

pub mod cloth;
pub mod config;
pub mod error;
pub mod integrator;
pub mod mesh;
pub mod particle;
pub mod session;
pub mod solver;
pub mod spring;

pub use cloth::{Cell, Cloth, ForceMode};
pub use config::ClothConfig;
pub use error::{ClothError, ConfigError, SessionError};
pub use glam::Vec3;
pub use mesh::{AnchorMarker, ClothVertex, DrawMode};
pub use particle::Particle;
pub use session::{AnchorDirection, Command, GridSetup, Session, SessionConfig};
pub use spring::{Spring, SpringKind};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use sailcloth::prelude::*;
/// ```
pub mod prelude {
    pub use crate::cloth::{Cloth, ForceMode};
    pub use crate::config::ClothConfig;
    pub use crate::error::{ClothError, ConfigError, SessionError};
    pub use crate::mesh::{self, ClothVertex, DrawMode};
    pub use crate::particle::Particle;
    pub use crate::session::{AnchorDirection, Command, Session, SessionConfig};
    pub use crate::spring::{Spring, SpringKind};
    pub use crate::Vec3;
}
