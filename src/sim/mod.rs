//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one `step` = `substeps` equal physics slices)
//! - Seeded, session-owned RNG only
//! - Stable iteration order (insertion order, entity ids allocated monotonically)
//! - No rendering or platform dependencies
//!
//! Within a substep the order is fixed: integrate, resolve collisions, merge.

pub mod collision;
pub mod integrate;
pub mod merge;
pub mod observe;
pub mod state;
pub mod step;

pub use merge::score_for_merge;
pub use observe::{FruitObs, Observation, observe};
pub use state::{Fruit, Session};
pub use step::{Action, EndReason, StepOutcome, step};
