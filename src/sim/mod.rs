//! Deterministic simulation module
//!
//! All collision and movement logic lives here. This module must be pure and
//! deterministic:
//! - Every query is a function of the positions and shapes passed in
//! - Seeded RNG only
//! - Stable iteration order (slice order)
//! - No rendering or platform dependencies

pub mod angle;
pub mod arena;
pub mod collision;
pub mod geometry;
pub mod input;
pub mod movement;
pub mod response;
pub mod shape;
pub mod tick;

pub use angle::Angle;
pub use arena::arena_walls;
pub use collision::{Contact, collides, collision_angle, contact};
pub use geometry::{angle_to_point, direction_after_collision, speed_after_collision};
pub use input::{MoveDirection, MoveKey, MoveKeys};
pub use movement::{
    Player, PlayerMove, Push, allowed_direction, allowed_distance, resolve_player_move,
    resolve_push,
};
pub use response::{Mover, MoverKind, SpeedBand};
pub use shape::{Body, Positioned, Shape};
pub use tick::{advance_movers, bounce_movers};
