//! Observation normalizer
//!
//! Maps absolute pixel-space session state into a bounded, resolution-
//! independent view for external consumers (renderer, agent, trace).
//! Presentation-only: nothing here feeds back into the physics.

use serde::{Deserialize, Serialize};

use super::state::Session;

/// One fruit, container-relative.
///
/// `x` is normalized by container width, `y` by the lose-line-to-floor span,
/// velocity by the speed cap, radius by container width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FruitObs {
    pub kind: u8,
    pub x_norm: f32,
    pub y_norm: f32,
    pub vx_norm: f32,
    pub vy_norm: f32,
    pub r_norm: f32,
}

/// Externally visible snapshot of the session after a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Kind the next drop will spawn
    pub next_kind: u8,
    /// Cursor position, 0..1 across the container interior
    pub cursor_x_norm: f32,
    pub score: u64,
    /// Active fruits in store order
    pub fruits: Vec<FruitObs>,
    pub fruit_count: usize,
    /// Merges resolved during the step that produced this observation
    pub merges_last_step: u32,
}

/// Build the normalized observation for the session's current state.
pub fn observe(session: &Session) -> Observation {
    let cfg = session.config();
    let w = cfg.container_width();
    let h = cfg.container_height();

    let fruits = session
        .fruits
        .iter()
        .map(|f| FruitObs {
            kind: f.kind,
            x_norm: (f.pos.x - cfg.left_x) / w,
            y_norm: (f.pos.y - cfg.lose_line_y) / h,
            vx_norm: f.vel.x / cfg.max_speed,
            vy_norm: f.vel.y / cfg.max_speed,
            r_norm: f.radius / w,
        })
        .collect();

    Observation {
        next_kind: session.next_kind,
        cursor_x_norm: (session.cursor_x - cfg.left_x) / w,
        score: session.score,
        fruits,
        fruit_count: session.fruits.len(),
        merges_last_step: session.merges_last_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    #[test]
    fn test_cursor_starts_centered() {
        let session = Session::new(SimConfig::default()).unwrap();
        let obs = observe(&session);
        assert!((obs.cursor_x_norm - 0.5).abs() < 1e-6);
        assert_eq!(obs.fruit_count, 0);
        assert!(obs.fruits.is_empty());
    }

    #[test]
    fn test_fruit_normalization() {
        let cfg = SimConfig::default();
        let mut session = Session::new(cfg.clone()).unwrap();
        session.spawn_fruit(2, cfg.left_x, cfg.lose_line_y);
        session.spawn_fruit(0, cfg.right_x, cfg.floor_y);
        session.fruits[1].vel.y = cfg.max_speed;

        let obs = observe(&session);
        let a = &obs.fruits[0];
        assert_eq!(a.kind, 2);
        assert!((a.x_norm - 0.0).abs() < 1e-6);
        assert!((a.y_norm - 0.0).abs() < 1e-6);
        assert!((a.r_norm - cfg.radius_for_kind(2) / cfg.container_width()).abs() < 1e-6);

        let b = &obs.fruits[1];
        assert!((b.x_norm - 1.0).abs() < 1e-6);
        assert!((b.y_norm - 1.0).abs() < 1e-6);
        assert!((b.vy_norm - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_observation_preserves_store_order() {
        let mut session = Session::new(SimConfig::default()).unwrap();
        session.spawn_fruit(1, 100.0, 200.0);
        session.spawn_fruit(0, 300.0, 200.0);
        let obs = observe(&session);
        assert_eq!(obs.fruits[0].kind, 1);
        assert_eq!(obs.fruits[1].kind, 0);
    }

    #[test]
    fn test_observation_serializes_to_json() {
        let session = Session::new(SimConfig::default()).unwrap();
        let obs = observe(&session);
        let json = serde_json::to_string(&obs).unwrap();
        let back: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, obs);
    }
}
