//! Same-kind merge engine
//!
//! After each substep's collision resolution, overlapping same-kind pairs
//! collapse into one fruit of the next kind. The pass is greedy (deepest
//! overlap first) and bounded per substep so that a pathological pileup can
//! never loop forever inside one frame; leftover overlaps simply carry to the
//! next substep. The candidate scan is recomputed after every merge, so no
//! index is ever held across a removal.

use super::state::Fruit;
use crate::config::SimConfig;
use crate::consts::MERGE_CONTACT_SLACK;

/// Result of one merge pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeStats {
    pub merges: u32,
    pub score: u64,
}

/// Score awarded for producing a fruit of `new_kind`.
#[inline]
pub fn score_for_merge(new_kind: u8) -> u64 {
    1u64 << new_kind
}

/// Run one bounded merge pass over the store.
///
/// `next_id` is the session's entity-id counter; merged fruits get fresh ids.
pub(crate) fn merge_pass(
    fruits: &mut Vec<Fruit>,
    cfg: &SimConfig,
    next_id: &mut u32,
    max_merges: u32,
) -> MergeStats {
    let mut stats = MergeStats::default();

    while stats.merges < max_merges {
        let Some((i, j)) = find_merge_pair(fruits, cfg) else {
            break;
        };

        // i < j always: remove the higher index first
        let b = fruits.remove(j);
        let a = fruits.remove(i);
        let new_kind = a.kind + 1;

        let id = *next_id;
        *next_id += 1;
        fruits.push(Fruit {
            id,
            kind: new_kind,
            pos: (a.pos + b.pos) * 0.5,
            vel: (a.vel + b.vel) * 0.5,
            radius: cfg.radius_for_kind(new_kind),
        });

        stats.score += score_for_merge(new_kind);
        stats.merges += 1;
    }

    stats
}

/// Find the overlapping same-kind pair with the deepest overlap.
///
/// Max-kind fruits never qualify. Pairs the collision resolver left in exact
/// contact count as candidates (within `MERGE_CONTACT_SLACK`), so merging
/// never depends on which way the last positional correction rounded.
/// Exactly equal depths tie-break to the first pair in scan order; ties are
/// measure-zero in practice, so no fairness is attempted.
fn find_merge_pair(fruits: &[Fruit], cfg: &SimConfig) -> Option<(usize, usize)> {
    let mut best = None;
    let mut best_overlap = -MERGE_CONTACT_SLACK;

    for i in 0..fruits.len() {
        for j in (i + 1)..fruits.len() {
            let a = &fruits[i];
            let b = &fruits[j];
            if a.kind != b.kind || a.kind >= cfg.max_kind {
                continue;
            }

            let overlap = (a.radius + b.radius) - a.pos.distance(b.pos);
            if overlap > best_overlap {
                best_overlap = overlap;
                best = Some((i, j));
            }
        }
    }

    best
}
