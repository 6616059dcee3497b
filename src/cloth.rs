//! The cloth grid: particle arena, spring topology, forces and anchors.
//!
//! # Layout
//!
//! A cloth of `width_count × height_count` particles is stored as one flat
//! `Vec<Particle>`. Grid coordinate `(i, j)` (with `i` along the width) maps
//! to `i * height_count + j`, which for the usual square grid is exactly
//! `i * width_count + j`. Springs and cells refer to particles by this index.
//!
//! # Frame
//!
//! ```ignore
//! let mut cloth = Cloth::new(5.0, 10.0, 40, 40);
//! cloth.add_anchor(0, 39)?;
//! cloth.add_anchor(39, 39)?;
//!
//! // once per frame
//! cloth.add_force(Vec3::new(0.0, -0.05, 0.0), ForceMode::Uniform);
//! cloth.add_force(Vec3::new(0.25, 0.0, -0.25), ForceMode::PerTriangle);
//! cloth.update_particle_positions();
//! cloth.compute_normals();
//! ```
//!
//! Grids with fewer than two particles along an axis are degenerate: they have
//! no cells, so per-triangle forces and normals do nothing, and only the
//! springs along the other axis exist.

use crate::config::ClothConfig;
use crate::error::{ClothError, ConfigError};
use crate::integrator;
use crate::particle::Particle;
use crate::solver;
use crate::spring::{Spring, SpringKind};
use glam::Vec3;

/// How [`Cloth::add_force`] distributes a force over the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForceMode {
    /// Every particle receives `force / mass`. Gravity.
    Uniform,
    /// Every triangle receives the force projected onto its normal, scaled by
    /// its area, and passes it to its three corners. Wind.
    PerTriangle,
}

/// One grid cell, split into triangles `(p2, p1, p3)` and `(p4, p2, p3)`.
///
/// ```text
///   p3 ---- p4        j + 1
///   |  \     |
///   |    \   |
///   p1 ---- p2        j
///   i      i + 1
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub p1: usize,
    pub p2: usize,
    pub p3: usize,
    pub p4: usize,
}

/// Unnormalized normal of triangle `(v1, v2, v3)`; its length is twice the area.
#[inline]
pub fn triangle_normal(v1: Vec3, v2: Vec3, v3: Vec3) -> Vec3 {
    (v2 - v1).cross(v3 - v1)
}

/// Part of `force` acting on a triangle with unnormalized normal `normal`.
///
/// Returns `None` for zero-area triangles, which have no orientation.
#[inline]
fn triangle_force(normal: Vec3, force: Vec3) -> Option<Vec3> {
    normal
        .try_normalize()
        .map(|direction| normal * force.dot(direction))
}

/// A rectangular mass-spring cloth.
#[derive(Clone, Debug)]
pub struct Cloth {
    width_count: usize,
    height_count: usize,
    particles: Vec<Particle>,
    springs: Vec<Spring>,
    anchors: Vec<usize>,
    active_anchor: usize,
    config: ClothConfig,
}

impl Cloth {
    /// Create a cloth with the default [`ClothConfig`].
    ///
    /// `width` and `height` are physical extents, `width_count` and
    /// `height_count` the number of particles along each axis.
    pub fn new(width: f32, height: f32, width_count: usize, height_count: usize) -> Self {
        Self::build(width, height, width_count, height_count, ClothConfig::default())
    }

    /// Create a cloth with custom simulation parameters.
    pub fn with_config(
        width: f32,
        height: f32,
        width_count: usize,
        height_count: usize,
        config: ClothConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(width, height, width_count, height_count, config))
    }

    fn build(
        width: f32,
        height: f32,
        width_count: usize,
        height_count: usize,
        config: ClothConfig,
    ) -> Self {
        let mut cloth = Self {
            width_count,
            height_count,
            particles: Vec::with_capacity(width_count * height_count),
            springs: Vec::new(),
            anchors: Vec::with_capacity(config.anchor_capacity),
            active_anchor: 0,
            config,
        };

        // Push order must follow `index`: i outer, j inner.
        for i in 0..width_count {
            let u = i as f32 / width_count as f32;
            for j in 0..height_count {
                let v = j as f32 / height_count as f32;
                // x and z share the width coordinate, so the sheet starts
                // tilted 45 degrees about the y axis.
                let position = Vec3::new(width * u * 0.5, height * v, width * u * 0.5);
                cloth.particles.push(Particle::new(position));
            }
        }

        cloth.build_springs();

        log::debug!(
            "Built {}x{} cloth: {} particles, {} springs",
            width_count,
            height_count,
            cloth.particles.len(),
            cloth.springs.len()
        );
        cloth
    }

    /// Connect every cell to its structural, bend and shear neighbors.
    fn build_springs(&mut self) {
        let (w, h) = (self.width_count, self.height_count);

        for i in 0..w {
            for j in 0..h {
                let here = self.index(i, j);

                if i + 1 < w {
                    self.link(here, self.index(i + 1, j), SpringKind::Structural);
                    if i + 2 < w {
                        self.link(here, self.index(i + 2, j), SpringKind::Bend);
                    }
                }
                if j + 1 < h {
                    self.link(here, self.index(i, j + 1), SpringKind::Structural);
                    if j + 2 < h {
                        self.link(here, self.index(i, j + 2), SpringKind::Bend);
                    }
                }
                if i + 1 < w && j + 1 < h {
                    self.link(here, self.index(i + 1, j + 1), SpringKind::Shear);
                    if i + 2 < w && j + 2 < h {
                        self.link(here, self.index(i + 2, j + 2), SpringKind::Shear);
                    }

                    self.link(self.index(i + 1, j), self.index(i, j + 1), SpringKind::Shear);
                    if i + 2 < w && j + 2 < h {
                        self.link(self.index(i + 2, j), self.index(i, j + 2), SpringKind::Shear);
                    }
                }
            }
        }
    }

    fn link(&mut self, p1: usize, p2: usize, kind: SpringKind) {
        let spring = Spring::new(&self.particles, p1, p2, kind);
        self.springs.push(spring);
    }

    // ========== Grid access ==========

    /// Flat index of grid coordinate `(i, j)`.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i * self.height_count + j
    }

    /// Grid coordinate of a flat index.
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.height_count, index % self.height_count)
    }

    #[inline]
    pub fn contains(&self, i: usize, j: usize) -> bool {
        i < self.width_count && j < self.height_count
    }

    #[inline]
    pub fn width_count(&self) -> usize {
        self.width_count
    }

    #[inline]
    pub fn height_count(&self) -> usize {
        self.height_count
    }

    #[inline]
    pub fn config(&self) -> &ClothConfig {
        &self.config
    }

    /// All particles in index order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the particle arena.
    ///
    /// Changing `is_fixed` here bypasses the anchor list; prefer the anchor
    /// methods for pinning.
    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn particle(&self, i: usize, j: usize) -> Option<&Particle> {
        if self.contains(i, j) {
            self.particles.get(self.index(i, j))
        } else {
            None
        }
    }

    pub fn particle_mut(&mut self, i: usize, j: usize) -> Option<&mut Particle> {
        if self.contains(i, j) {
            let index = self.index(i, j);
            self.particles.get_mut(index)
        } else {
            None
        }
    }

    #[inline]
    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    /// Every grid cell, ordered by `i` then `j`.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.width_count.saturating_sub(1);
        let rows = self.height_count.saturating_sub(1);
        (0..cols).flat_map(move |i| {
            (0..rows).map(move |j| Cell {
                p1: self.index(i, j),
                p2: self.index(i + 1, j),
                p3: self.index(i, j + 1),
                p4: self.index(i + 1, j + 1),
            })
        })
    }

    /// Unnormalized normals of the two triangles of `cell`.
    pub fn cell_normals(&self, cell: &Cell) -> (Vec3, Vec3) {
        let pos = |index: usize| self.particles[index].position;
        (
            triangle_normal(pos(cell.p2), pos(cell.p1), pos(cell.p3)),
            triangle_normal(pos(cell.p4), pos(cell.p2), pos(cell.p3)),
        )
    }

    // ========== Simulation ==========

    /// Accumulate a force for the next update.
    ///
    /// Call once per force source per frame; accumulators are cleared by
    /// [`update_particle_positions`](Self::update_particle_positions).
    pub fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Uniform => {
                for particle in &mut self.particles {
                    particle.apply_force(force);
                }
            }
            ForceMode::PerTriangle => {
                let cells: Vec<Cell> = self.cells().collect();
                for cell in &cells {
                    let (normal_a, normal_b) = self.cell_normals(cell);

                    if let Some(f) = triangle_force(normal_a, force) {
                        for index in [cell.p1, cell.p2, cell.p3] {
                            self.particles[index].apply_force(f);
                        }
                    }
                    if let Some(f) = triangle_force(normal_b, force) {
                        for index in [cell.p4, cell.p2, cell.p3] {
                            self.particles[index].apply_force(f);
                        }
                    }
                }
            }
        }
    }

    /// Advance the cloth one frame.
    ///
    /// Runs `spring_iterations` relaxation passes, then integrates every
    /// particle once. Afterwards every acceleration is zero.
    pub fn update_particle_positions(&mut self) {
        let skipped = self.relax_springs(self.config.spring_iterations);
        if skipped > 0 {
            log::debug!("Skipped {} degenerate spring corrections", skipped);
        }

        for particle in &mut self.particles {
            integrator::integrate(particle, &self.config);
        }

        if log::log_enabled!(log::Level::Trace) {
            log::trace!("Spring residual after update: {:.6}", self.spring_error());
        }
    }

    /// Run `passes` relaxation passes without integrating.
    ///
    /// Returns the number of skipped degenerate corrections.
    pub fn relax_springs(&mut self, passes: usize) -> usize {
        solver::relax(
            &mut self.particles,
            &self.springs,
            passes,
            self.config.min_spring_distance,
        )
    }

    /// Sum of squared spring length deviations.
    pub fn spring_error(&self) -> f32 {
        solver::spring_error(&self.particles, &self.springs)
    }

    /// Rebuild per-particle shading normals.
    ///
    /// Each particle receives the sum of the unnormalized normals of the
    /// triangles it belongs to, so larger triangles weigh more. Normalize per
    /// vertex before shading.
    pub fn compute_normals(&mut self) {
        for particle in &mut self.particles {
            particle.normal = Vec3::ZERO;
        }

        let cells: Vec<Cell> = self.cells().collect();
        for cell in &cells {
            let (normal_a, normal_b) = self.cell_normals(cell);
            for index in [cell.p2, cell.p1, cell.p3] {
                self.particles[index].normal += normal_a;
            }
            for index in [cell.p4, cell.p2, cell.p3] {
                self.particles[index].normal += normal_b;
            }
        }
    }

    // ========== Anchors ==========

    /// Pin the particle at `(i, j)` and register it as an anchor.
    ///
    /// Returns `Ok(false)` without changing anything when all anchor slots
    /// are taken.
    pub fn add_anchor(&mut self, i: usize, j: usize) -> Result<bool, ClothError> {
        if !self.contains(i, j) {
            return Err(ClothError::AnchorOutOfBounds {
                i,
                j,
                width_count: self.width_count,
                height_count: self.height_count,
            });
        }
        if self.anchors.len() >= self.config.anchor_capacity {
            log::debug!(
                "Ignoring anchor ({}, {}): capacity {} reached",
                i,
                j,
                self.config.anchor_capacity
            );
            return Ok(false);
        }

        let index = self.index(i, j);
        self.particles[index].is_fixed = true;
        self.anchors.push(index);
        Ok(true)
    }

    /// Particle indices of the registered anchors, in registration order.
    #[inline]
    pub fn anchors(&self) -> &[usize] {
        &self.anchors
    }

    /// Slot of the active anchor within [`anchors`](Self::anchors).
    #[inline]
    pub fn active_anchor_slot(&self) -> usize {
        self.active_anchor
    }

    /// Particle index of the active anchor, if any anchor exists.
    pub fn active_anchor(&self) -> Option<usize> {
        self.anchors.get(self.active_anchor).copied()
    }

    /// Make the next anchor active, wrapping around.
    pub fn change_active_anchor(&mut self) {
        if self.anchors.is_empty() {
            return;
        }
        self.active_anchor = (self.active_anchor + 1) % self.anchors.len();
    }

    /// Translate the active anchor by `offset`.
    pub fn move_active_anchor(&mut self, offset: Vec3) -> Result<(), ClothError> {
        let index = self.active_anchor().ok_or(ClothError::NoAnchors)?;
        let target = self.particles[index].position + offset;
        self.relocate_anchor(self.active_anchor, target)
    }

    /// Move the anchor in `slot` to `position`.
    ///
    /// This is the only way a pinned particle moves: the pin is released,
    /// the particle placed, and the pin restored.
    pub fn relocate_anchor(&mut self, slot: usize, position: Vec3) -> Result<(), ClothError> {
        let index = *self
            .anchors
            .get(slot)
            .ok_or(ClothError::AnchorSlotOutOfRange {
                slot,
                count: self.anchors.len(),
            })?;

        let particle = &mut self.particles[index];
        particle.is_fixed = false;
        particle.position = position;
        particle.is_fixed = true;

        log::debug!("Anchor {} moved to {:?}", slot, position);
        Ok(())
    }
}
