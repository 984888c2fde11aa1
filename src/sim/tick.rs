//! Per-tick mover update
//!
//! Movers advance, then every mover is checked against the static blockers
//! and the other movers. Processing is sequential in slice order, so later
//! movers see the directions earlier ones picked this tick.
//!
//! Balls bounce off everything. Pushers only bounce off what also blocks the
//! player (blockers and other pushers) and pass through balls. A contact with
//! anything that blocks the player counts as a squeeze.

use super::collision::collides;
use super::response::Mover;
use super::shape::{Body, Positioned};

/// A mover taking part in more collisions than this in one tick is stuck
const MAX_COLLISIONS: usize = 2;
/// A mover squeezed against more player-blocking bodies than this in one tick is stuck
const MAX_SQUEEZES: usize = 1;

/// Advance every mover along its heading; `factor` scales the step
pub fn advance_movers(movers: &mut [Mover], factor: f64) {
    for mover in movers.iter_mut() {
        mover.advance(factor);
    }
}

/// Bounce movers off blockers and each other
///
/// A contact only counts when the mover is heading into it. Returns the
/// indices (ascending) of movers that were caught in too many contacts this
/// tick; the host removes them.
pub fn bounce_movers(movers: &mut [Mover], blockers: &[Body], speed_step: f64) -> Vec<usize> {
    let mut stuck = Vec::new();

    for index in 0..movers.len() {
        let mut collisions = 0;
        let mut squeezes = 0;

        for blocker in blockers {
            if bounce(&mut movers[index], blocker, speed_step) {
                collisions += 1;
                squeezes += 1;
            }
        }

        for other in 0..movers.len() {
            if other == index {
                continue;
            }
            let other_blocks_player = movers[other].is_pusher();
            if movers[index].is_pusher() && !other_blocks_player {
                continue;
            }
            let other_body = movers[other].body();
            if bounce(&mut movers[index], &other_body, speed_step) {
                collisions += 1;
                if other_blocks_player {
                    squeezes += 1;
                }
            }
        }

        if collisions > MAX_COLLISIONS || squeezes > MAX_SQUEEZES {
            log::debug!(
                "mover {} stuck: {} collisions, {} squeezes",
                index,
                collisions,
                squeezes
            );
            stuck.push(index);
        }
    }

    stuck
}

/// React to `other` if touching it head-on; returns whether it did
fn bounce(mover: &mut Mover, other: &Body, speed_step: f64) -> bool {
    if collides(&mover.body(), other) && mover.is_on_collision_course(other) {
        mover.react_to_collision(other, speed_step);
        true
    } else {
        false
    }
}
