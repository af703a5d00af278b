//! Elastic collision simulation for circular sprites
//!
//! This module must stay pure and deterministic:
//! - Randomness only at spawn time, from a seeded RNG
//! - Stable pair iteration order (by index in the set)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod state;
pub mod tick;

pub use body::Body;
pub use collision::{Contact, FALLBACK_NORMAL, body_contact, resolve_pair, separate_pair};
pub use state::{BodySet, Bounds, SpawnConfig, create_random_bodies};
pub use tick::{advance, bounce_wall, step, tick};
