//! Fixed-substep integrator
//!
//! Semi-implicit Euler per fruit: gravity into velocity, global damping, a
//! direction-preserving speed cap, then position. Runs exactly once per
//! substep, before collision resolution, and is order-independent across
//! fruits.

use super::state::Fruit;
use crate::config::SimConfig;

/// Advance every fruit by one substep under gravity and damping.
pub fn integrate(fruits: &mut [Fruit], cfg: &SimConfig, dt: f32) {
    for f in fruits {
        f.vel.y += cfg.gravity * dt;
        f.vel *= cfg.vel_damp;

        // Cap speed, keeping direction
        let speed = f.vel.length();
        if speed > cfg.max_speed {
            f.vel *= cfg.max_speed / speed;
        }

        f.pos += f.vel * dt;
    }
}
