//! Point-to-point geometry and bounce rules
//!
//! Small free functions shared by the collision engine, the movement solver
//! and mover collision response.

use std::f64::consts::FRAC_PI_2;

use glam::DVec2;

use super::angle::Angle;

/// Signed x offset from `p` to `q`
#[inline]
pub fn x_difference(p: DVec2, q: DVec2) -> f64 {
    q.x - p.x
}

/// Signed y offset from `p` to `q`
#[inline]
pub fn y_difference(p: DVec2, q: DVec2) -> f64 {
    q.y - p.y
}

#[inline]
pub fn x_distance(p: DVec2, q: DVec2) -> f64 {
    (p.x - q.x).abs()
}

#[inline]
pub fn y_distance(p: DVec2, q: DVec2) -> f64 {
    (p.y - q.y).abs()
}

/// Direction of the ray from `p` to `q`
///
/// Built per quadrant from `atan` of the absolute coordinate ratios. Matches
/// `atan2` on the axes too: a zero delta makes one ratio infinite, and
/// `atan(inf)` is exactly 90°. Coincident points give 0°.
pub fn angle_to_point(p: DVec2, q: DVec2) -> Angle {
    let dx = x_difference(p, q);
    let dy = y_difference(p, q);
    if dx == 0.0 && dy == 0.0 {
        return Angle::DEG_0;
    }

    let from_horizontal = (dy.abs() / dx.abs()).atan();
    let from_vertical = (dx.abs() / dy.abs()).atan();

    if dx >= 0.0 && dy >= 0.0 {
        Angle::new(from_horizontal)
    } else if dx < 0.0 && dy >= 0.0 {
        Angle::new(FRAC_PI_2 + from_vertical)
    } else if dx < 0.0 {
        Angle::new(Angle::DEG_180.radians() + from_horizontal)
    } else {
        Angle::new(Angle::DEG_270.radians() + from_vertical)
    }
}

/// New travel direction after bouncing off a contact at `collision_angle`
///
/// Head-on hits (within 90° of the contact) turn by twice the complement;
/// glancing or retreating hits turn by half of what is left to 180°. Of the
/// two possible turns the one leading farther away from the contact wins,
/// ties go to the counter-clockwise turn.
pub fn direction_after_collision(collision_angle: Angle, direction: Angle) -> Angle {
    let between = Angle::smaller_angle_between(collision_angle, direction);
    let change = if between <= Angle::DEG_90 {
        (Angle::DEG_90 - between) * 2.0
    } else {
        (Angle::DEG_180 - between) / 2.0
    };

    let clockwise = direction - change;
    let counter_clockwise = direction + change;
    let away_clockwise = Angle::smaller_angle_between(clockwise, collision_angle);
    let away_counter_clockwise = Angle::smaller_angle_between(counter_clockwise, collision_angle);

    if away_clockwise > away_counter_clockwise {
        clockwise
    } else {
        counter_clockwise
    }
}

/// Speed after a bounce: head-on hits lose `step`, glancing ones gain it
///
/// The result is not clamped; movers clamp into their own speed band.
pub fn speed_after_collision(collision_angle: Angle, direction: Angle, speed: f64, step: f64) -> f64 {
    if Angle::smaller_angle_between(collision_angle, direction) <= Angle::DEG_90 {
        speed - step
    } else {
        speed + step
    }
}
