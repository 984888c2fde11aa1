//! Collision response for autonomous movers
//!
//! Balls and moving blocks travel in a straight line until they hit
//! something, then bounce off using the fixed reflection rule and gain or
//! lose a little speed.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::angle::Angle;
use super::collision::collision_angle;
use super::geometry::{direction_after_collision, speed_after_collision};
use super::shape::{Body, Positioned, Shape};

/// Allowed speed range of a mover (pixels per tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedBand {
    pub min: f64,
    pub max: f64,
}

impl SpeedBand {
    pub fn new(min: f64, max: f64) -> Self {
        debug_assert!(min <= max, "speed band {min}..{max} is empty");
        Self { min, max }
    }

    /// A band that pins the speed, for movers that never speed up or slow down
    pub fn fixed(speed: f64) -> Self {
        Self {
            min: speed,
            max: speed,
        }
    }

    #[inline]
    pub fn clamp(&self, speed: f64) -> f64 {
        speed.max(self.min).min(self.max)
    }
}

/// What a mover bounces off and how it treats the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoverKind {
    /// Bounces off everything; hurts the player on contact
    #[default]
    Ball,
    /// Blocks and shoves the player; ignores balls
    Pusher,
}

/// A body with a travel direction and speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub pos: DVec2,
    pub shape: Shape,
    pub direction: Angle,
    pub speed: f64,
    pub band: SpeedBand,
    pub kind: MoverKind,
}

impl Mover {
    /// New ball starting at the slowest speed of its band
    pub fn new(body: Body, direction: Angle, band: SpeedBand) -> Self {
        Self {
            pos: body.pos,
            shape: body.shape,
            direction,
            speed: band.min,
            band,
            kind: MoverKind::Ball,
        }
    }

    /// New pusher travelling at a fixed speed
    pub fn pusher(body: Body, direction: Angle, speed: f64) -> Self {
        Self {
            kind: MoverKind::Pusher,
            ..Self::new(body, direction, SpeedBand::fixed(speed))
        }
    }

    pub fn is_pusher(&self) -> bool {
        self.kind == MoverKind::Pusher
    }

    /// Builder: start at a given speed, clamped into the band
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = self.band.clamp(speed);
        self
    }

    /// Move along the current direction; `factor` scales the step (slow motion)
    pub fn advance(&mut self, factor: f64) {
        self.pos = crate::step_from(self.pos, self.direction, self.speed * factor);
    }

    /// Whether the mover is heading into `other` rather than away from it
    ///
    /// Only heading-in contacts bounce; this keeps a mover that is still
    /// overlapping after a bounce from flipping straight back.
    pub fn is_on_collision_course(&self, other: &Body) -> bool {
        let collision = collision_angle(&self.body(), other);
        Angle::smaller_angle_between(collision, self.direction) < Angle::DEG_90
    }

    /// Bounce off `other`, adjusting speed by `speed_step` within the band
    pub fn react_to_collision(&mut self, other: &Body, speed_step: f64) {
        let collision = collision_angle(&self.body(), other);
        self.speed = self
            .band
            .clamp(speed_after_collision(collision, self.direction, self.speed, speed_step));
        self.direction = direction_after_collision(collision, self.direction);
    }
}

impl Positioned for Mover {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn shape(&self) -> Shape {
        self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{COLLISION_SPEED_CHANGE, GAMEBALL_MAX_SPEED, GAMEBALL_MIN_SPEED};

    fn ball(x: f64, y: f64, direction: Angle, speed: f64) -> Mover {
        Mover::new(
            Body::disc(DVec2::new(x, y), 10.0),
            direction,
            SpeedBand::new(GAMEBALL_MIN_SPEED, GAMEBALL_MAX_SPEED),
        )
        .with_speed(speed)
    }

    #[test]
    fn test_speed_band_clamps() {
        let band = SpeedBand::new(2.4, 3.8);
        assert_eq!(band.clamp(1.0), 2.4);
        assert_eq!(band.clamp(5.0), 3.8);
        assert_eq!(band.clamp(3.0), 3.0);
        assert_eq!(SpeedBand::fixed(0.8).clamp(3.0), 0.8);
    }

    #[test]
    fn test_advance() {
        let mut mover = ball(0.0, 0.0, Angle::DEG_90, 3.0);
        mover.advance(1.0);
        assert!((mover.pos.y - 3.0).abs() < 1e-12);
        mover.advance(0.5);
        assert!((mover.pos.y - 4.5).abs() < 1e-12);
        assert!(mover.pos.x.abs() < 1e-12);
    }

    #[test]
    fn test_collision_course() {
        let wall = Body::segment(DVec2::new(-50.0, 8.0), 100.0, Angle::DEG_0);
        let heading_in = ball(0.0, 0.0, Angle::DEG_45, 3.0);
        assert!(heading_in.is_on_collision_course(&wall));
        let heading_out = ball(0.0, 0.0, Angle::DEG_270, 3.0);
        assert!(!heading_out.is_on_collision_course(&wall));
    }

    #[test]
    fn test_head_on_bounce_reverses_and_slows() {
        let mut mover = ball(0.0, 0.0, Angle::DEG_0, 3.0);
        let other = Body::disc(DVec2::new(18.0, 0.0), 10.0);
        mover.react_to_collision(&other, COLLISION_SPEED_CHANGE);
        assert!((mover.direction.degrees() - 180.0).abs() < 1e-9);
        assert!((mover.speed - 2.6).abs() < 1e-12);
    }

    #[test]
    fn test_bounce_speed_stays_in_band() {
        let other = Body::disc(DVec2::new(18.0, 0.0), 10.0);

        let mut slow = ball(0.0, 0.0, Angle::DEG_0, GAMEBALL_MIN_SPEED);
        slow.react_to_collision(&other, COLLISION_SPEED_CHANGE);
        assert_eq!(slow.speed, GAMEBALL_MIN_SPEED);

        // Moving away from the contact speeds up, capped at the band maximum
        let mut fast = ball(0.0, 0.0, Angle::DEG_180, GAMEBALL_MAX_SPEED);
        fast.react_to_collision(&other, COLLISION_SPEED_CHANGE);
        assert_eq!(fast.speed, GAMEBALL_MAX_SPEED);
    }

    #[test]
    fn test_fixed_speed_mover_only_turns() {
        let mut block = Mover::pusher(Body::square(DVec2::ZERO, 30.0), Angle::DEG_0, 0.8);
        assert!(block.is_pusher());
        assert_eq!(block.band, SpeedBand::fixed(0.8));
        let wall = Body::segment(DVec2::new(16.0, -50.0), 100.0, Angle::DEG_90);
        block.react_to_collision(&wall, COLLISION_SPEED_CHANGE);
        assert_eq!(block.speed, 0.8);
        assert!((block.direction.degrees() - 180.0).abs() < 1e-9);
    }
}
