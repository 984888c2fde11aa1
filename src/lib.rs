//! Dodge Arena - collision and movement core for a 2D dodge game
//!
//! Core modules:
//! - `sim`: Angle algebra, shapes, collision tests, player movement solver,
//!   mover collision response
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::DVec2;

use sim::Angle;

/// Game configuration constants
pub mod consts {
    /// Player speed in pixels per tick
    pub const PLAYER_SPEED: f64 = 4.2;
    pub const PLAYER_RADIUS: f64 = 5.0;

    /// Speed lost (head-on) or gained (glancing) by a mover on every bounce
    pub const COLLISION_SPEED_CHANGE: f64 = 0.4;

    /// Below this allowed distance the solver slides instead of creeping
    pub const MIN_MOVE_DISTANCE: f64 = 0.1;

    /// Game ball speed band (pixels per tick)
    pub const GAMEBALL_MIN_SPEED: f64 = 2.4;
    pub const GAMEBALL_MAX_SPEED: f64 = 3.8;
    pub const GAMEBALL_MIN_RADIUS: f64 = 5.0;
    pub const GAMEBALL_MAX_RADIUS: f64 = 30.0;

    /// Fixed obstacles
    pub const FIXEDBALL_RADIUS: f64 = 15.0;
    pub const FIXEDBLOCK_SIDE_LENGTH: f64 = 30.0;

    /// Blocks that shove the player around
    pub const PUSHER_SIDE_LENGTH: f64 = 30.0;
    pub const PUSHER_SPEED: f64 = 0.8;

    /// Arena size in pixels
    pub const ARENA_WIDTH: f64 = 800.0;
    pub const ARENA_HEIGHT: f64 = 600.0;

    /// Chamfer size of the arena corners
    pub const CORNER_SIZE: f64 = 40.0;

    pub const SLOW_MOTION_FACTOR: f64 = 0.5;
}

/// Point reached by walking `distance` from `pos` along `direction`
#[inline]
pub fn step_from(pos: DVec2, direction: Angle, distance: f64) -> DVec2 {
    pos + direction.unit_vector() * distance
}
