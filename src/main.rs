//! Melon Drop entry point
//!
//! Headless demo runner: drives the simulation core with a small heuristic
//! agent, the same way any external controller would — observations in,
//! actions out, nothing else crosses the boundary.
//!
//! Usage: `melon-drop [seed] [episodes] [--trace]`
//! `--trace` prints one observation per step as a JSON line.

use melon_drop::sim::{Action, Observation, Session, observe, step};
use melon_drop::{EndReason, SimConfig};

/// Safety cap so a stalling agent cannot run an episode forever.
const MAX_EPISODE_STEPS: u32 = 7200;

/// Heuristic drop agent: steer toward the nearest fruit of the pending kind
/// (merging beats stacking), drop once aligned, with a cadence so the pile
/// gets a moment to settle between drops.
#[derive(Default)]
struct Agent {
    drop_cooldown: u32,
    steps_since_drop: u32,
}

impl Agent {
    fn act(&mut self, obs: &Observation) -> Action {
        let target = obs
            .fruits
            .iter()
            .filter(|f| f.kind == obs.next_kind)
            .min_by(|a, b| {
                let da = (a.x_norm - obs.cursor_x_norm).abs();
                let db = (b.x_norm - obs.cursor_x_norm).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|f| f.x_norm)
            .unwrap_or(0.5);

        let error = target - obs.cursor_x_norm;
        let move_dir = (error * 8.0).clamp(-1.0, 1.0);

        if self.drop_cooldown > 0 {
            self.drop_cooldown -= 1;
        }
        let aligned = error.abs() < 0.02;
        let overdue = self.steps_since_drop > 180;
        let drop = self.drop_cooldown == 0 && (aligned || overdue);
        if drop {
            self.drop_cooldown = 45;
            self.steps_since_drop = 0;
        } else {
            self.steps_since_drop += 1;
        }

        Action { move_dir, drop }
    }
}

fn main() {
    env_logger::init();
    log::info!("Melon Drop (headless) starting...");

    let mut trace = false;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--trace" {
            trace = true;
        } else {
            positional.push(arg);
        }
    }
    let seed: u64 = positional.first().and_then(|s| s.parse().ok()).unwrap_or(0);
    let episodes: u64 = positional.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);

    for ep in 0..episodes {
        let cfg = SimConfig {
            seed: seed + ep,
            ..SimConfig::default()
        };
        let mut session = Session::new(cfg).expect("default config is valid");
        let mut agent = Agent::default();
        let mut obs = observe(&session);
        let mut steps = 0u32;

        let reason = loop {
            let action = agent.act(&obs);
            let out = step(&mut session, &action);
            if trace {
                println!(
                    "{}",
                    serde_json::to_string(&out.obs).expect("observation serializes")
                );
            }
            obs = out.obs;
            steps += 1;
            if out.done {
                break out.reason;
            }
            if steps >= MAX_EPISODE_STEPS {
                break None;
            }
        };

        let reason = match reason {
            Some(EndReason::MaxFruits) => "max_fruits",
            Some(EndReason::LoseLine) => "lose_line",
            Some(EndReason::Done) => "done",
            None => "step_cap",
        };
        log::info!(
            "episode {} (seed {}): score {} in {} steps, {} fruits left, ended by {}",
            ep,
            seed + ep,
            obs.score,
            steps,
            obs.fruit_count,
            reason
        );
    }
}
