//! Per-frame simulation update
//!
//! A frame is: move every body, bounce off the walls, then resolve all
//! overlapping pairs. Rendering reads the set only after `tick` returns.

use super::body::Body;
use super::collision::{resolve_pair, separate_pair};
use super::state::{BodySet, Bounds};

/// Overlap left after relaxation that is accepted as touching
pub const SEPARATION_SLOP: f32 = 1e-3;
/// Upper bound on position-only passes per step
pub const MAX_SEPARATION_PASSES: usize = 64;

/// Resolve every overlapping pair
///
/// Pairs are visited as `(i, j)` for `i` in `0..n`, `j` in `0..i`, so the
/// outcome depends only on the set's contents and order. Each overlapping
/// pair gets one elastic response; then position-only passes in the same
/// order push apart any pair a later correction drove back into overlap.
/// Returns the number of pairs that were in contact.
pub fn step(set: &mut BodySet) -> usize {
    let bodies = set.bodies_mut();
    let mut contacts = 0;

    for i in 1..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i);
        let body_i = &mut tail[0];
        for (j, body_j) in head.iter_mut().enumerate() {
            if let Some(contact) = resolve_pair(body_i, body_j) {
                log::trace!(
                    "contact {}<->{} depth {:.3} normal {:?}",
                    i,
                    j,
                    contact.penetration,
                    contact.normal
                );
                contacts += 1;
            }
        }
    }

    if contacts > 0 {
        relax(bodies);
    }
    contacts
}

/// Position-only passes until no pair overlaps by more than the slop
fn relax(bodies: &mut [Body]) {
    for pass in 0..MAX_SEPARATION_PASSES {
        let mut moved = false;
        for i in 1..bodies.len() {
            let (head, tail) = bodies.split_at_mut(i);
            let body_i = &mut tail[0];
            for body_j in head.iter_mut() {
                moved |= separate_pair(body_i, body_j, SEPARATION_SLOP).is_some();
            }
        }
        if !moved {
            return;
        }
        log::trace!("separation pass {} moved bodies", pass);
    }
    log::debug!(
        "overlap left after {} separation passes",
        MAX_SEPARATION_PASSES
    );
}

/// Move each body by one frame of velocity and bounce it off the bounds
pub fn advance(set: &mut BodySet) {
    let bounds = set.bounds;
    for body in set.bodies_mut() {
        body.pos += body.vel;
        bounce_wall(body, &bounds);
    }
}

/// Point the velocity back inside when a body's edge has left the bounds
///
/// Only the velocity is changed; the next `advance` carries the body back.
pub fn bounce_wall(body: &mut Body, bounds: &Bounds) {
    let r = body.radius();
    if body.pos.x > bounds.max.x - r {
        body.vel.x = -body.vel.x.abs();
    } else if body.pos.x < bounds.min.x + r {
        body.vel.x = body.vel.x.abs();
    }
    if body.pos.y > bounds.max.y - r {
        body.vel.y = -body.vel.y.abs();
    } else if body.pos.y < bounds.min.y + r {
        body.vel.y = body.vel.y.abs();
    }
}

/// Advance the set by one frame and return the number of contacts resolved
pub fn tick(set: &mut BodySet) -> usize {
    advance(set);
    step(set)
}
