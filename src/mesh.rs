//! Render-facing export of the cloth surface.
//!
//! The simulation does not draw. A renderer reads a flat vertex stream from
//! here, uploads it as-is (vertices are `Pod`), and picks the primitive
//! topology from [`DrawMode`].
//!
//! # Vertex order
//!
//! Each grid cell contributes six vertices, `p2, p1, p3, p4, p2, p3`:
//!
//! | Draw mode | Interpretation of the six vertices |
//! |-----------|------------------------------------|
//! | [`DrawMode::Points`] | six points (shared corners repeat) |
//! | [`DrawMode::Lines`] | segments `p2-p1`, `p3-p4`, `p2-p3` |
//! | [`DrawMode::Triangles`] | triangles `(p2, p1, p3)` and `(p4, p2, p3)` |

use crate::cloth::Cloth;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Primitive topology used to draw the cloth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawMode {
    #[default]
    Points,
    Lines,
    Triangles,
}

impl DrawMode {
    /// Next mode in the cycle Points → Lines → Triangles → Points.
    pub fn next(self) -> Self {
        match self {
            DrawMode::Points => DrawMode::Lines,
            DrawMode::Lines => DrawMode::Triangles,
            DrawMode::Triangles => DrawMode::Points,
        }
    }
}

/// GPU-ready cloth vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ClothVertex {
    pub position: [f32; 3],
    /// Unit normal, or zero where the surface has no orientation.
    pub normal: [f32; 3],
}

impl ClothVertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.normalize_or_zero().to_array(),
        }
    }
}

/// Vertices emitted per grid cell.
pub const VERTICES_PER_CELL: usize = 6;

/// Build the vertex stream for the current particle state.
///
/// Normals are read from the particles as they are; call
/// [`Cloth::compute_normals`] first if positions changed.
pub fn triangle_vertices(cloth: &Cloth) -> Vec<ClothVertex> {
    let particles = cloth.particles();
    let vertex = |index: usize| ClothVertex::new(particles[index].position, particles[index].normal);

    let mut vertices = Vec::with_capacity(cloth.cells().count() * VERTICES_PER_CELL);
    for cell in cloth.cells() {
        vertices.extend_from_slice(&[
            vertex(cell.p2),
            vertex(cell.p1),
            vertex(cell.p3),
            vertex(cell.p4),
            vertex(cell.p2),
            vertex(cell.p3),
        ]);
    }
    vertices
}

/// Position of an anchor and whether it is the one being steered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorMarker {
    pub position: Vec3,
    pub active: bool,
}

/// Anchor markers in slot order, for highlighting pins.
pub fn anchor_markers(cloth: &Cloth) -> Vec<AnchorMarker> {
    cloth
        .anchors()
        .iter()
        .enumerate()
        .map(|(slot, &index)| AnchorMarker {
            position: cloth.particles()[index].position,
            active: slot == cloth.active_anchor_slot(),
        })
        .collect()
}
