//! Interactive session state around a cloth.
//!
//! A [`Session`] is what a windowed application keeps between frames: the
//! cloth, the strength of the force sources, the draw mode, and the input
//! commands that change them. Nothing here touches a window; a front end maps
//! its key or mouse events to [`Command`]s and calls [`Session::frame`] once
//! per redraw.
//!
//! # Example
//!
//! ```ignore
//! let mut session = Session::new(SessionConfig::load("cloth.json")?)?;
//!
//! loop {
//!     for command in pending_input() {
//!         session.apply(command)?;
//!     }
//!     session.frame();
//!     renderer.draw(session.draw_mode(), &mesh::triangle_vertices(session.cloth()));
//! }
//! ```

use crate::cloth::{Cloth, ForceMode};
use crate::config::ClothConfig;
use crate::error::{ClothError, ConfigError, SessionError};
use crate::mesh::DrawMode;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Physical size and resolution of the cloth.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSetup {
    pub width: f32,
    pub height: f32,
    pub width_count: usize,
    pub height_count: usize,
}

impl Default for GridSetup {
    fn default() -> Self {
        Self {
            width: 5.0,
            height: 10.0,
            width_count: 40,
            height_count: 40,
        }
    }
}

/// Complete session configuration, loadable from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub grid: GridSetup,
    pub simulation: ClothConfig,
    /// Grid coordinates `[i, j]` pinned at startup, in slot order.
    pub anchors: Vec<[usize; 2]>,
    /// Uniform force per frame, before scaling by the step size.
    pub gravity: Vec3,
    /// Per-triangle force direction, scaled by strength and step size.
    pub wind: Vec3,
    /// Initial multiplier on `wind`.
    pub force_strength: f32,
    /// Change applied by [`Command::StrengthenForces`] / [`Command::WeakenForces`].
    pub force_strength_step: f32,
    /// Distance an anchor travels per [`Command::MoveAnchor`].
    pub anchor_step: f32,
    pub draw_mode: DrawMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let grid = GridSetup::default();
        let top = grid.height_count - 1;
        Self {
            grid,
            simulation: ClothConfig::default(),
            anchors: vec![[0, top], [grid.width_count - 1, top]],
            gravity: Vec3::new(0.0, -0.2, 0.0),
            wind: Vec3::new(0.5, 0.0, -0.5),
            force_strength: 2.0,
            force_strength_step: 0.1,
            anchor_step: 1.0,
            draw_mode: DrawMode::Points,
        }
    }
}

impl SessionConfig {
    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// Check the grid and force parameters.
    ///
    /// Unlike [`Cloth::new`], a session refuses grids without cells.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()?;

        let grid = &self.grid;
        if grid.width_count < 2 || grid.height_count < 2 {
            return Err(ConfigError::invalid(
                "grid",
                format!(
                    "{}x{} particles leaves no cells; both counts must be at least 2",
                    grid.width_count, grid.height_count
                ),
            ));
        }
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(grid.width) || !positive(grid.height) {
            return Err(ConfigError::invalid(
                "grid",
                format!("size {}x{} must be finite and positive", grid.width, grid.height),
            ));
        }
        if !self.gravity.is_finite() || !self.wind.is_finite() {
            return Err(ConfigError::invalid("gravity/wind", "forces must be finite"));
        }
        if self.force_strength.is_nan() || self.force_strength < 0.0 {
            return Err(ConfigError::invalid(
                "force_strength",
                format!("{} must be non-negative", self.force_strength),
            ));
        }
        Ok(())
    }
}

/// Direction an anchor is nudged in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnchorDirection {
    Up,
    Down,
    Left,
    Right,
}

impl AnchorDirection {
    fn unit(self) -> Vec3 {
        match self {
            AnchorDirection::Up => Vec3::Y,
            AnchorDirection::Down => Vec3::NEG_Y,
            AnchorDirection::Left => Vec3::NEG_X,
            AnchorDirection::Right => Vec3::X,
        }
    }
}

/// User input understood by a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Move the active anchor one `anchor_step`.
    MoveAnchor(AnchorDirection),
    /// Steer the next anchor.
    CycleAnchor,
    /// Raise the wind multiplier by one step.
    StrengthenForces,
    /// Lower the wind multiplier by one step, not below zero.
    WeakenForces,
    /// Points → Lines → Triangles → Points.
    CycleDrawMode,
}

/// A cloth plus the mutable application state driving it.
#[derive(Clone, Debug)]
pub struct Session {
    cloth: Cloth,
    config: SessionConfig,
    force_strength: f32,
    draw_mode: DrawMode,
    frame: u64,
}

impl Session {
    /// Build the cloth and pin the configured anchors.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;

        let grid = config.grid;
        let mut cloth = Cloth::with_config(
            grid.width,
            grid.height,
            grid.width_count,
            grid.height_count,
            config.simulation,
        )?;
        for &[i, j] in &config.anchors {
            if !cloth.add_anchor(i, j)? {
                log::warn!(
                    "Anchor ({}, {}) dropped: capacity is {}",
                    i,
                    j,
                    config.simulation.anchor_capacity
                );
            }
        }

        log::info!(
            "Session ready: {}x{} cloth, {} anchors",
            grid.width_count,
            grid.height_count,
            cloth.anchors().len()
        );

        Ok(Self {
            cloth,
            force_strength: config.force_strength,
            draw_mode: config.draw_mode,
            config,
            frame: 0,
        })
    }

    /// Apply this frame's forces, step the cloth and refresh normals.
    pub fn frame(&mut self) {
        let step = self.cloth.config().step_size;

        self.cloth.add_force(self.config.gravity * step, ForceMode::Uniform);
        self.cloth.add_force(
            self.config.wind * self.force_strength * step,
            ForceMode::PerTriangle,
        );
        self.cloth.update_particle_positions();
        self.cloth.compute_normals();

        self.frame += 1;
    }

    /// Handle one input command.
    pub fn apply(&mut self, command: Command) -> Result<(), ClothError> {
        log::debug!("Frame {}: {:?}", self.frame, command);
        match command {
            Command::MoveAnchor(direction) => {
                let offset = direction.unit() * self.config.anchor_step;
                self.cloth.move_active_anchor(offset)?;
            }
            Command::CycleAnchor => self.cloth.change_active_anchor(),
            Command::StrengthenForces => {
                self.force_strength += self.config.force_strength_step;
            }
            Command::WeakenForces => {
                self.force_strength =
                    (self.force_strength - self.config.force_strength_step).max(0.0);
            }
            Command::CycleDrawMode => self.draw_mode = self.draw_mode.next(),
        }
        Ok(())
    }

    #[inline]
    pub fn cloth(&self) -> &Cloth {
        &self.cloth
    }

    #[inline]
    pub fn cloth_mut(&mut self) -> &mut Cloth {
        &mut self.cloth
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn force_strength(&self) -> f32 {
        self.force_strength
    }

    #[inline]
    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    /// Frames simulated so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SessionConfig {
        SessionConfig {
            grid: GridSetup {
                width: 2.0,
                height: 2.0,
                width_count: 5,
                height_count: 5,
            },
            anchors: vec![[0, 4], [4, 4]],
            ..SessionConfig::default()
        }
    }

    #[test]
    fn test_default_session_pins_top_corners() {
        let session = Session::new(SessionConfig::default()).unwrap();
        let cloth = session.cloth();
        assert_eq!(cloth.particles().len(), 1600);
        assert_eq!(cloth.anchors(), &[cloth.index(0, 39), cloth.index(39, 39)]);
        assert_eq!(session.draw_mode(), DrawMode::Points);
        assert_eq!(session.force_strength(), 2.0);
    }

    #[test]
    fn test_frame_moves_free_particles_only() {
        let mut session = Session::new(small_config()).unwrap();
        let before: Vec<Vec3> = session.cloth().particles().iter().map(|p| p.position).collect();

        for _ in 0..10 {
            session.frame();
        }

        assert_eq!(session.frame_count(), 10);
        let cloth = session.cloth();
        for (index, p) in cloth.particles().iter().enumerate() {
            if cloth.anchors().contains(&index) {
                assert_eq!(p.position, before[index]);
            } else {
                assert_ne!(p.position, before[index]);
            }
            assert!(p.position.is_finite());
            assert_eq!(p.acceleration, Vec3::ZERO);
        }
    }

    #[test]
    fn test_force_strength_commands() {
        let mut session = Session::new(small_config()).unwrap();
        session.apply(Command::StrengthenForces).unwrap();
        assert!((session.force_strength() - 2.1).abs() < 1e-6);

        for _ in 0..30 {
            session.apply(Command::WeakenForces).unwrap();
        }
        assert_eq!(session.force_strength(), 0.0);
    }

    #[test]
    fn test_draw_mode_command() {
        let mut session = Session::new(small_config()).unwrap();
        session.apply(Command::CycleDrawMode).unwrap();
        assert_eq!(session.draw_mode(), DrawMode::Lines);
        session.apply(Command::CycleDrawMode).unwrap();
        session.apply(Command::CycleDrawMode).unwrap();
        assert_eq!(session.draw_mode(), DrawMode::Points);
    }

    #[test]
    fn test_anchor_commands() {
        let mut session = Session::new(small_config()).unwrap();
        let second = session.cloth().index(4, 4);
        let start = session.cloth().particles()[second].position;

        session.apply(Command::CycleAnchor).unwrap();
        session.apply(Command::MoveAnchor(AnchorDirection::Right)).unwrap();
        session.apply(Command::MoveAnchor(AnchorDirection::Down)).unwrap();

        let moved = session.cloth().particles()[second];
        assert!(moved.is_fixed);
        assert!((moved.position - (start + Vec3::new(1.0, -1.0, 0.0))).length() < 1e-6);
    }

    #[test]
    fn test_move_anchor_without_anchors() {
        let config = SessionConfig {
            anchors: Vec::new(),
            ..small_config()
        };
        let mut session = Session::new(config).unwrap();
        assert_eq!(
            session.apply(Command::MoveAnchor(AnchorDirection::Up)),
            Err(ClothError::NoAnchors)
        );
    }

    #[test]
    fn test_extra_anchors_are_dropped() {
        let config = SessionConfig {
            anchors: vec![[0, 0], [1, 0], [2, 0]],
            ..small_config()
        };
        let session = Session::new(config).unwrap();
        assert_eq!(session.cloth().anchors().len(), 2);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let degenerate = SessionConfig {
            grid: GridSetup {
                width_count: 1,
                ..GridSetup::default()
            },
            ..SessionConfig::default()
        };
        assert!(matches!(Session::new(degenerate), Err(SessionError::Config(_))));

        let off_grid = SessionConfig {
            anchors: vec![[10, 10]],
            ..small_config()
        };
        assert!(matches!(
            Session::new(off_grid),
            Err(SessionError::Cloth(ClothError::AnchorOutOfBounds { .. }))
        ));

        let negative = SessionConfig {
            force_strength: -1.0,
            ..small_config()
        };
        assert!(Session::new(negative).is_err());
    }

    #[test]
    fn test_config_from_partial_json() {
        let json = r#"{
            "grid": { "width": 1.0, "height": 1.0, "width_count": 8, "height_count": 6 },
            "anchors": [[0, 5]],
            "gravity": [0.0, -1.0, 0.0],
            "draw_mode": "Triangles"
        }"#;
        let config: SessionConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.grid.width_count, 8);
        assert_eq!(config.anchors, vec![[0, 5]]);
        assert_eq!(config.gravity, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(config.draw_mode, DrawMode::Triangles);
        assert_eq!(config.wind, SessionConfig::default().wind);
        assert_eq!(config.simulation, ClothConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("sailcloth-session-{}.json", std::process::id()));
        let config = small_config();

        config.save(&path).unwrap();
        let loaded = SessionConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SessionConfig::load("/nonexistent/sailcloth.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
