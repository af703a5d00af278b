//! Contact detection and elastic response between two discs
//!
//! Response works along the contact normal only: the normal components of
//! the two velocities go through the 1-D elastic collision law, tangential
//! components are left alone. The overlap is then removed by pushing the
//! bodies apart along the same normal, lighter body moving further.

use glam::Vec2;

use super::body::Body;

/// Centers closer than this are treated as coincident
const COINCIDENT_EPSILON: f32 = 1e-6;

/// Normal used when two centers coincide and no direction can be derived
pub const FALLBACK_NORMAL: Vec2 = Vec2::X;

/// Geometry of an overlapping pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first body's center toward the second's
    pub normal: Vec2,
    /// How far the discs interpenetrate (sum of radii minus distance)
    pub penetration: f32,
}

/// Check two bodies for overlap
///
/// Touching discs (distance exactly equal to the sum of radii) do not count.
pub fn body_contact(a: &Body, b: &Body) -> Option<Contact> {
    let delta = b.pos - a.pos;
    let reach = a.radius() + b.radius();
    let dist_sq = delta.length_squared();
    if dist_sq >= reach * reach {
        return None;
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > COINCIDENT_EPSILON {
        delta / dist
    } else {
        FALLBACK_NORMAL
    };

    Some(Contact {
        normal,
        penetration: reach - dist,
    })
}

/// Split a velocity into (normal, tangential) parts for a unit normal
#[inline]
pub fn decompose(vel: Vec2, normal: Vec2) -> (Vec2, Vec2) {
    let along = normal * vel.dot(normal);
    (along, vel - along)
}

/// 1-D elastic collision: returns the post-impact speeds of two masses
#[inline]
pub fn elastic_exchange(u1: f32, u2: f32, m1: f32, m2: f32) -> (f32, f32) {
    let total = m1 + m2;
    let v1 = (u1 * (m1 - m2) + 2.0 * m2 * u2) / total;
    let v2 = (u2 * (m2 - m1) + 2.0 * m1 * u1) / total;
    (v1, v2)
}

/// Resolve one pair: exchange normal velocity, then separate
///
/// Returns the contact if the pair overlapped, `None` if nothing changed.
/// The velocity exchange is skipped when the pair is already separating so
/// that a pair pushed apart last frame is not pulled back together.
pub fn resolve_pair(a: &mut Body, b: &mut Body) -> Option<Contact> {
    let contact = body_contact(a, b)?;
    let n = contact.normal;

    let (a_normal, a_tangent) = decompose(a.vel, n);
    let (b_normal, b_tangent) = decompose(b.vel, n);
    let ua = a_normal.dot(n);
    let ub = b_normal.dot(n);

    if ua - ub > 0.0 {
        let (va, vb) = elastic_exchange(ua, ub, a.mass(), b.mass());
        a.vel = a_tangent + n * va;
        b.vel = b_tangent + n * vb;
    }

    push_apart(a, b, &contact);
    Some(contact)
}

/// Remove any overlap deeper than `slop` without touching velocities
pub fn separate_pair(a: &mut Body, b: &mut Body, slop: f32) -> Option<Contact> {
    let contact = body_contact(a, b).filter(|c| c.penetration > slop)?;
    push_apart(a, b, &contact);
    Some(contact)
}

/// Split the penetration by inverse mass, lighter body moving further
fn push_apart(a: &mut Body, b: &mut Body, contact: &Contact) {
    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let share = contact.penetration / (inv_a + inv_b);
    a.pos -= contact.normal * (share * inv_a);
    b.pos += contact.normal * (share * inv_b);
}
