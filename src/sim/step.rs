//! Session step controller
//!
//! One `step` is the whole external contract: apply the action (cursor move,
//! optional drop), run the fixed substep loop (integrate, resolve collisions,
//! merge), evaluate termination once, and report the observation, the score
//! delta as reward, and the done flag. After `done`, `step` is a no-op until
//! `reset`.

use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::integrate::integrate;
use super::merge::merge_pass;
use super::observe::{Observation, observe};
use super::state::Session;
use crate::consts::{CURSOR_MARGIN, MAX_MERGES_PER_SUBSTEP};

/// Input for a single step. All fields are defensively clamped; there is no
/// invalid action.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Action {
    /// Cursor move in [-1, +1] (full-speed left to full-speed right)
    #[serde(rename = "move")]
    pub move_dir: f32,
    /// Spawn the pending fruit at the cursor
    pub drop: bool,
}

/// Why a step reported `done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// A drop was refused because the container already holds `max_fruits`
    MaxFruits,
    /// A fruit's top edge crossed the lose line after physics
    LoseLine,
    /// The session was already terminal when `step` was called
    Done,
}

/// Externally visible result of one step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub obs: Observation,
    /// Score gained during this step
    pub reward: f32,
    pub done: bool,
    pub reason: Option<EndReason>,
}

/// Advance the session by one external frame.
pub fn step(session: &mut Session, action: &Action) -> StepOutcome {
    if session.done {
        return StepOutcome {
            obs: observe(session),
            reward: 0.0,
            done: true,
            reason: Some(EndReason::Done),
        };
    }

    let dt = session.cfg.frame_dt();

    // Cursor move
    let move_dir = action.move_dir.clamp(-1.0, 1.0);
    session.cursor_x = (session.cursor_x + move_dir * session.cfg.move_speed * dt).clamp(
        session.cfg.left_x + CURSOR_MARGIN,
        session.cfg.right_x - CURSOR_MARGIN,
    );

    // Drop: a spawn past the body cap terminates instead of adding a fruit,
    // and skips physics entirely.
    if action.drop {
        if session.fruits.len() >= session.cfg.max_fruits {
            session.done = true;
            return StepOutcome {
                obs: observe(session),
                reward: 0.0,
                done: true,
                reason: Some(EndReason::MaxFruits),
            };
        }
        let kind = session.next_kind;
        let x = session.cursor_x;
        let y = session.cfg.spawn_y;
        session.spawn_fruit(kind, x, y);
        session.next_kind = session.sample_next_kind();
    }

    // Fixed substep loop; the documented order per substep is integrate,
    // resolve collisions, merge.
    let sub_dt = session.cfg.sub_dt();
    let prev_score = session.score;
    session.merges_last_step = 0;

    for _ in 0..session.cfg.substeps {
        integrate(&mut session.fruits, &session.cfg, sub_dt);
        resolve_collisions(&mut session.fruits, &session.cfg);
        let stats = merge_pass(
            &mut session.fruits,
            &session.cfg,
            &mut session.next_id,
            MAX_MERGES_PER_SUBSTEP,
        );
        session.score += stats.score;
        session.merges_last_step += stats.merges;
    }

    // Lose condition, evaluated once on the settled body set
    let mut reason = None;
    if check_lose(session) {
        session.done = true;
        reason = Some(EndReason::LoseLine);
    }

    let reward = (session.score - prev_score) as f32;
    session.elapsed += dt;

    StepOutcome {
        obs: observe(session),
        reward,
        done: session.done,
        reason,
    }
}

/// A fruit whose top edge crosses the lose line ends the run.
fn check_lose(session: &Session) -> bool {
    session
        .fruits
        .iter()
        .any(|f| f.pos.y - f.radius < session.cfg.lose_line_y)
}
