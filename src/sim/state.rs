//! Session state and core simulation types
//!
//! The session exclusively owns the fruit store; only the integrator, the
//! collision resolver, and the merge engine mutate it, and only from inside
//! `step`. Iteration order is insertion order, which makes every scan
//! deterministic for a given seed and action sequence.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::observe::{Observation, observe};
use crate::config::{ConfigError, SimConfig};

/// Spawn weights per kind, biased toward the small fruits. Kinds past the
/// table (or with weight 0) never spawn and only appear through merging.
const KIND_WEIGHTS: [u32; 11] = [3, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0];

/// A fruit: one circular body in the container.
///
/// `radius` is always derived from `kind`; a merge replaces both inputs with
/// a fresh fruit rather than resizing one in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Fruit {
    pub id: u32,
    pub kind: u8,
    /// Center position in px; y increases downward
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// Complete session state (deterministic).
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) cfg: SimConfig,
    /// Session-owned RNG; seeded once at construction, never a process global
    rng: Pcg32,
    /// Active fruits in insertion order
    pub fruits: Vec<Fruit>,
    /// Drop cursor, clamped inside the container
    pub cursor_x: f32,
    /// Kind the next drop will spawn
    pub next_kind: u8,
    pub score: u64,
    /// Terminal flag; once set, `step` is a no-op until `reset`
    pub done: bool,
    /// Simulated time in seconds
    pub elapsed: f32,
    /// Merges resolved during the most recent step
    pub merges_last_step: u32,
    /// Next entity ID
    pub(crate) next_id: u32,
}

impl Session {
    /// Create a new session, validating the configuration first.
    pub fn new(cfg: SimConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let rng = Pcg32::seed_from_u64(cfg.seed);
        let mut session = Self {
            cfg,
            rng,
            fruits: Vec::new(),
            cursor_x: 0.0,
            next_kind: 0,
            score: 0,
            done: false,
            elapsed: 0.0,
            merges_last_step: 0,
            next_id: 1,
        };
        session.reset();
        Ok(session)
    }

    /// Reinitialize all session state and return the initial observation.
    ///
    /// The RNG stream continues across resets; reproducibility is defined
    /// from construction with a given seed.
    pub fn reset(&mut self) -> Observation {
        self.fruits.clear();
        self.score = 0;
        self.done = false;
        self.elapsed = 0.0;
        self.merges_last_step = 0;
        self.next_id = 1;
        self.cursor_x = (self.cfg.left_x + self.cfg.right_x) * 0.5;
        self.next_kind = self.sample_next_kind();
        observe(self)
    }

    /// The configuration this session was built with.
    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    /// Allocate a new entity ID.
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a fruit at rest. Raw store operation: the body-cap rule is
    /// enforced by the step controller, which refuses the drop instead.
    pub fn spawn_fruit(&mut self, kind: u8, x: f32, y: f32) {
        let id = self.next_entity_id();
        let radius = self.cfg.radius_for_kind(kind);
        self.fruits.push(Fruit {
            id,
            kind,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius,
        });
    }

    /// Sample the kind of the next drop from the cumulative weight table.
    pub(crate) fn sample_next_kind(&mut self) -> u8 {
        let weight = |kind: u8| KIND_WEIGHTS.get(kind as usize).copied().unwrap_or(0);
        let total: u32 = (0..=self.cfg.max_kind).map(weight).sum();
        let mut roll = self.rng.random_range(0..total);
        for kind in 0..=self.cfg.max_kind {
            let w = weight(kind);
            if roll < w {
                return kind;
            }
            roll -= w;
        }
        0
    }
}
