//! Session configuration
//!
//! Every tunable is fixed at session construction. Geometry that would break
//! the simulation (walls out of order, lose line below the floor) is a
//! programmer error and fails fast here instead of being tolerated at runtime.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a [`SimConfig`] violates its geometric invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("container walls out of order: left_x {left_x} must be < right_x {right_x}")]
    WallOrder { left_x: f32, right_x: f32 },

    #[error("lose line y {lose_line_y} must be above floor y {floor_y}")]
    LoseLineBelowFloor { lose_line_y: f32, floor_y: f32 },

    #[error("fps must be nonzero")]
    ZeroFps,

    #[error("substeps must be nonzero")]
    ZeroSubsteps,

    #[error("radius_step {0} must be positive so radius grows strictly with kind")]
    NonPositiveRadiusStep(f32),

    #[error("max_kind {0} out of range (1..=63)")]
    KindRange(u8),
}

/// Complete simulation configuration.
///
/// Defaults are tuned for a 480x720 playfield. `y` increases downward, so the
/// lose line sits near the top at a *smaller* `y` than the floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    // === Screen / timing ===
    pub width: u32,
    pub height: u32,
    /// External frame rate; one `step` advances `1/fps` seconds
    pub fps: u32,

    // === Container (inside area) ===
    pub wall_thickness: f32,
    pub left_x: f32,
    pub right_x: f32,
    pub floor_y: f32,
    /// Horizontal threshold near the top; a fruit crossing it ends the run
    pub lose_line_y: f32,

    // === Spawn / control ===
    pub spawn_y: f32,
    /// Cursor speed in px/sec at full deflection
    pub move_speed: f32,

    // === Physics ===
    pub gravity: f32,
    /// Fixed physics substeps per external step
    pub substeps: u32,
    /// Bounciness on contact, 0..1
    pub restitution: f32,
    /// Tangential damping on contact, 0..1
    pub friction: f32,
    /// Global multiplicative velocity damping per substep
    pub vel_damp: f32,
    /// Speed cap (px/sec), applied direction-preserving
    pub max_speed: f32,

    // === Game limits ===
    pub max_fruits: usize,
    /// Last kind (like the watermelon); max-kind fruits never merge
    pub max_kind: u8,
    /// Radius of a kind-0 fruit (px)
    pub radius_base: f32,
    /// Radius growth per kind (px)
    pub radius_step: f32,

    /// RNG seed for `next_kind` sampling
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 720,
            fps: 60,

            wall_thickness: 12.0,
            left_x: 40.0,
            right_x: 440.0,
            floor_y: 700.0,
            lose_line_y: 10.0,

            spawn_y: 100.0,
            move_speed: 360.0,

            gravity: 1400.0,
            substeps: 4,
            restitution: 0.90,
            friction: 0.10,
            vel_damp: 0.999,
            max_speed: 2500.0,

            max_fruits: 70,
            max_kind: 10,
            radius_base: 16.0,
            radius_step: 6.0,

            seed: 0,
        }
    }
}

impl SimConfig {
    /// Check the geometric and numeric invariants this simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.left_x >= self.right_x {
            return Err(ConfigError::WallOrder {
                left_x: self.left_x,
                right_x: self.right_x,
            });
        }
        if self.lose_line_y >= self.floor_y {
            return Err(ConfigError::LoseLineBelowFloor {
                lose_line_y: self.lose_line_y,
                floor_y: self.floor_y,
            });
        }
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.substeps == 0 {
            return Err(ConfigError::ZeroSubsteps);
        }
        if self.radius_step <= 0.0 {
            return Err(ConfigError::NonPositiveRadiusStep(self.radius_step));
        }
        // Score is 1 << new_kind in a u64, so kinds must stay below 64.
        if self.max_kind == 0 || self.max_kind >= 64 {
            return Err(ConfigError::KindRange(self.max_kind));
        }
        Ok(())
    }

    /// Duration of one external step (seconds).
    #[inline]
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// Duration of one physics substep (seconds).
    #[inline]
    pub fn sub_dt(&self) -> f32 {
        self.frame_dt() / self.substeps as f32
    }

    /// Interior width between the walls (px).
    #[inline]
    pub fn container_width(&self) -> f32 {
        self.right_x - self.left_x
    }

    /// Interior height between lose line and floor (px).
    #[inline]
    pub fn container_height(&self) -> f32 {
        self.floor_y - self.lose_line_y
    }

    /// Radius for a fruit kind; strictly increasing in kind.
    #[inline]
    pub fn radius_for_kind(&self, kind: u8) -> f32 {
        self.radius_base + kind as f32 * self.radius_step
    }
}
