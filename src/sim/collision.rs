//! Collision detection and collision angles between positioned shapes
//!
//! Every shape pair has one rule, written once for a fixed operand order.
//! The public entry points swap operands where needed so that
//! `collides(a, b) == collides(b, a)`, and so the collision angle is always
//! expressed from the first body's point of view.

use std::f64::consts::SQRT_2;

use glam::DVec2;

use super::angle::Angle;
use super::geometry::{angle_to_point, x_distance, y_distance};
use super::shape::{Body, Shape};

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Whether the bodies overlap
    pub hit: bool,
    /// Direction, seen from the first body, in which the second was struck.
    /// Only meaningful when `hit` is set.
    pub angle: Angle,
}

impl Contact {
    pub fn miss() -> Self {
        Self {
            hit: false,
            angle: Angle::DEG_0,
        }
    }
}

/// Check whether two bodies overlap and, if so, where the contact is
pub fn contact(a: &Body, b: &Body) -> Contact {
    if collides(a, b) {
        Contact {
            hit: true,
            angle: collision_angle(a, b),
        }
    } else {
        Contact::miss()
    }
}

/// Whether two bodies overlap (touching counts for discs and squares)
pub fn collides(a: &Body, b: &Body) -> bool {
    match (a.shape, b.shape) {
        (Shape::Disc { radius: r1 }, Shape::Disc { radius: r2 }) => {
            a.pos.distance(b.pos) <= r1 + r2
        }
        (Shape::AxisSquare { side_length: s1 }, Shape::AxisSquare { side_length: s2 }) => {
            let min_distance = (s1 + s2) / 2.0;
            x_distance(a.pos, b.pos) <= min_distance && y_distance(a.pos, b.pos) <= min_distance
        }
        (Shape::Disc { radius }, Shape::AxisSquare { side_length }) => {
            disc_square_overlap(a.pos, radius, b.pos, side_length)
        }
        (Shape::AxisSquare { side_length }, Shape::Disc { radius }) => {
            disc_square_overlap(b.pos, radius, a.pos, side_length)
        }
        (Shape::Segment { length, angle }, Shape::Disc { radius }) => {
            segment_disc_overlap(a.pos, length, angle, b.pos, radius)
        }
        (Shape::Disc { radius }, Shape::Segment { length, angle }) => {
            segment_disc_overlap(b.pos, length, angle, a.pos, radius)
        }
        (Shape::Segment { length, angle }, Shape::AxisSquare { side_length }) => {
            segment_square_overlap(a.pos, length, angle, b.pos, side_length)
        }
        (Shape::AxisSquare { side_length }, Shape::Segment { length, angle }) => {
            segment_square_overlap(b.pos, length, angle, a.pos, side_length)
        }
        (Shape::Segment { .. }, Shape::Segment { .. }) => false,
    }
}

/// Direction, from `a`'s frame, in which `b` was struck
///
/// Only meaningful when the bodies collide. Segment pairs have no contact
/// surface; asking for one is a caller bug and yields 0° in release builds.
pub fn collision_angle(a: &Body, b: &Body) -> Angle {
    match (a.shape, b.shape) {
        (Shape::Disc { .. }, Shape::Disc { .. }) => angle_to_point(a.pos, b.pos),
        (Shape::AxisSquare { .. }, Shape::AxisSquare { .. }) => {
            Cardinal::of(angle_to_point(a.pos, b.pos)).angle()
        }
        (Shape::Disc { .. }, Shape::AxisSquare { side_length }) => {
            disc_square_angle(a.pos, b.pos, side_length)
        }
        (Shape::AxisSquare { side_length }, Shape::Disc { .. }) => {
            disc_square_angle(b.pos, a.pos, side_length).opposite()
        }
        (Shape::Segment { angle, .. }, Shape::Disc { .. } | Shape::AxisSquare { .. }) => {
            segment_normal_toward(b.pos, a.pos, angle).opposite()
        }
        (Shape::Disc { .. } | Shape::AxisSquare { .. }, Shape::Segment { angle, .. }) => {
            segment_normal_toward(a.pos, b.pos, angle)
        }
        (Shape::Segment { .. }, Shape::Segment { .. }) => {
            debug_assert!(false, "segment pairs have no collision angle");
            log::warn!("collision angle requested for two segments");
            Angle::DEG_0
        }
    }
}

/// One of the four axis directions, in screen coordinates (y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cardinal {
    Right,
    Down,
    Left,
    Up,
}

impl Cardinal {
    /// Quadrant an angle falls into
    ///
    /// The down and up quadrants own their 45° diagonals, the left and right
    /// ones do not.
    pub(crate) fn of(angle: Angle) -> Self {
        if angle.is_between_or_equal(Angle::DEG_45, Angle::DEG_135) {
            Cardinal::Down
        } else if angle.is_between(Angle::DEG_135, Angle::DEG_225) {
            Cardinal::Left
        } else if angle.is_between_or_equal(Angle::DEG_225, Angle::DEG_315) {
            Cardinal::Up
        } else {
            Cardinal::Right
        }
    }

    pub(crate) fn angle(self) -> Angle {
        match self {
            Cardinal::Right => Angle::DEG_0,
            Cardinal::Down => Angle::DEG_90,
            Cardinal::Left => Angle::DEG_180,
            Cardinal::Up => Angle::DEG_270,
        }
    }
}

/// Corners and edges of an axis-aligned square
struct SquareBounds {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl SquareBounds {
    fn new(center: DVec2, side_length: f64) -> Self {
        let half = side_length / 2.0;
        Self {
            left: center.x - half,
            right: center.x + half,
            top: center.y - half,
            bottom: center.y + half,
        }
    }

    fn top_left(&self) -> DVec2 {
        DVec2::new(self.left, self.top)
    }

    fn top_right(&self) -> DVec2 {
        DVec2::new(self.right, self.top)
    }

    fn bottom_left(&self) -> DVec2 {
        DVec2::new(self.left, self.bottom)
    }

    fn bottom_right(&self) -> DVec2 {
        DVec2::new(self.right, self.bottom)
    }

    fn corners(&self) -> [DVec2; 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_left(),
            self.bottom_right(),
        ]
    }
}

fn disc_square_overlap(disc: DVec2, radius: f64, square: DVec2, side_length: f64) -> bool {
    let min_distance = radius + side_length / 2.0;
    let bounds = SquareBounds::new(square, side_length);

    // Facing one of the four sides
    if disc.x >= bounds.left && disc.x <= bounds.right && y_distance(disc, square) <= min_distance {
        return true;
    }
    if disc.y >= bounds.top && disc.y <= bounds.bottom && x_distance(disc, square) <= min_distance {
        return true;
    }

    // Diagonal to the square: only a corner can touch
    bounds
        .corners()
        .iter()
        .any(|corner| corner.distance(disc) <= radius)
}

/// Collision angle seen from the disc
fn disc_square_angle(disc: DVec2, square: DVec2, side_length: f64) -> Angle {
    let bounds = SquareBounds::new(square, side_length);

    match Cardinal::of(angle_to_point(disc, square)) {
        Cardinal::Down => {
            if disc.x < bounds.left {
                angle_to_point(disc, bounds.top_left())
            } else if disc.x > bounds.right {
                angle_to_point(disc, bounds.top_right())
            } else {
                Angle::DEG_90
            }
        }
        Cardinal::Left => {
            if disc.y < bounds.top {
                angle_to_point(disc, bounds.top_right())
            } else if disc.y > bounds.bottom {
                angle_to_point(disc, bounds.bottom_right())
            } else {
                Angle::DEG_180
            }
        }
        Cardinal::Up => {
            if disc.x < bounds.left {
                angle_to_point(disc, bounds.bottom_left())
            } else if disc.x > bounds.right {
                angle_to_point(disc, bounds.bottom_right())
            } else {
                Angle::DEG_270
            }
        }
        Cardinal::Right => {
            if disc.y < bounds.top {
                angle_to_point(disc, bounds.top_left())
            } else if disc.y > bounds.bottom {
                angle_to_point(disc, bounds.bottom_left())
            } else {
                Angle::DEG_0
            }
        }
    }
}

/// Angle between a segment and the direction from its start to `point`,
/// if `point` lies within the segment's perpendicular band
///
/// Returns the offset and the distance from the segment start.
fn segment_band_offset(start: DVec2, length: f64, angle: Angle, point: DVec2) -> Option<(f64, f64)> {
    let offset = Angle::smaller_angle_between(angle_to_point(start, point), angle);
    if offset > Angle::DEG_90 {
        return None;
    }
    let offset = offset.radians();
    let distance = start.distance(point);
    if distance > length / offset.cos() {
        return None;
    }
    Some((offset, distance))
}

fn segment_disc_overlap(start: DVec2, length: f64, angle: Angle, disc: DVec2, radius: f64) -> bool {
    let end = crate::step_from(start, angle, length);
    if start.distance(disc) < radius || end.distance(disc) < radius {
        return true;
    }

    match segment_band_offset(start, length, angle, disc) {
        Some((offset, distance)) => offset.sin() * distance < radius,
        None => false,
    }
}

fn segment_square_overlap(
    start: DVec2,
    length: f64,
    angle: Angle,
    square: DVec2,
    side_length: f64,
) -> bool {
    let half = side_length / 2.0;
    let end = crate::step_from(start, angle, length);
    let inside = |p: DVec2| x_distance(p, square) < half && y_distance(p, square) < half;
    if inside(start) || inside(end) {
        return true;
    }

    let Some((offset, distance)) = segment_band_offset(start, length, angle, square) else {
        return false;
    };

    // Distance from the square center to its outline, measured perpendicular
    // to the segment: half the side when the segment is axis aligned, half
    // the diagonal when it runs diagonally.
    let octant = Angle::DEG_45.radians();
    let mut grid_offset = angle.radians() % octant;
    if ((angle.radians() / octant) as i64) % 2 == 0 {
        grid_offset = octant - grid_offset;
    }
    let min_distance = grid_offset.cos() * SQRT_2 * half;

    offset.sin() * distance < min_distance
}

/// Normal of a segment pointing from `point` toward the segment line
fn segment_normal_toward(point: DVec2, start: DVec2, angle: Angle) -> Angle {
    let to_point = angle_to_point(start, point);
    if to_point.is_between_or_equal(angle, angle.opposite()) {
        angle - Angle::DEG_90
    } else {
        angle + Angle::DEG_90
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(x: f64, y: f64) -> DVec2 {
        DVec2::new(x, y)
    }

    fn assert_deg(angle: Angle, expected: f64) {
        assert!(
            Angle::smaller_angle_between(angle, Angle::from_degrees(expected)).degrees() < 1e-6,
            "expected {expected}°, got {}°",
            angle.degrees()
        );
    }

    #[test]
    fn test_disc_disc_touching_counts() {
        let a = Body::disc(v(0.0, 0.0), 5.0);
        let b = Body::disc(v(15.0, 0.0), 10.0);
        assert!(collides(&a, &b));
        assert!(!collides(&a, &b.at(v(15.001, 0.0))));
        assert_eq!(collision_angle(&a, &b), Angle::DEG_0);
        assert_eq!(collision_angle(&b, &a), Angle::DEG_180);
    }

    #[test]
    fn test_square_square() {
        let a = Body::square(v(0.0, 0.0), 20.0);
        let b = Body::square(v(25.0, 10.0), 30.0);
        assert!(collides(&a, &b));
        assert!(!collides(&a, &b.at(v(25.1, 0.0))));
        assert_eq!(collision_angle(&a, &b), Angle::DEG_0);
        assert_eq!(collision_angle(&a, &b.at(v(0.0, -20.0))), Angle::DEG_270);
    }

    #[test]
    fn test_square_quadrant_boundaries() {
        let a = Body::square(v(0.0, 0.0), 20.0);
        // Exactly 45° belongs to the vertical quadrant
        assert_eq!(collision_angle(&a, &a.at(v(10.0, 10.0))), Angle::DEG_90);
        // Exactly 135° belongs to the vertical quadrant too
        assert_eq!(collision_angle(&a, &a.at(v(-10.0, 10.0))), Angle::DEG_90);
        assert_eq!(collision_angle(&a, &a.at(v(-10.0, -10.0))), Angle::DEG_270);
        assert_eq!(collision_angle(&a, &a.at(v(10.0, -10.0))), Angle::DEG_270);
    }

    #[test]
    fn test_disc_square_side_and_corner() {
        let square = Body::square(v(0.0, 0.0), 20.0);

        // Facing the right side
        let disc = Body::disc(v(14.0, 3.0), 5.0);
        assert!(collides(&disc, &square));
        assert!(collides(&square, &disc));
        assert_eq!(collision_angle(&disc, &square), Angle::DEG_180);
        assert_eq!(collision_angle(&square, &disc), Angle::DEG_0);

        // Diagonal: within radius + half on both axes, but far from the corner
        let disc = Body::disc(v(14.0, 14.0), 5.0);
        assert!(!collides(&disc, &square));

        // Near the bottom-right corner
        let disc = Body::disc(v(13.0, 13.0), 5.0);
        assert!(collides(&disc, &square));
        assert_deg(collision_angle(&disc, &square), 225.0);
    }

    #[test]
    fn test_segment_disc_endpoints_always_hit() {
        let wall = Body::segment(v(0.0, 0.0), 100.0, Angle::DEG_0);
        assert!(collides(&wall, &Body::disc(v(0.0, 0.0), 3.0)));
        assert!(collides(&wall, &Body::disc(v(100.0, 0.0), 3.0)));
        // Behind the start, only reachable through the endpoint test
        assert!(collides(&wall, &Body::disc(v(-2.0, 0.5), 3.0)));
    }

    #[test]
    fn test_segment_disc_band() {
        let wall = Body::segment(v(0.0, 0.0), 100.0, Angle::DEG_0);
        assert!(collides(&wall, &Body::disc(v(50.0, 4.0), 5.0)));
        assert!(collides(&Body::disc(v(50.0, -4.0), 5.0), &wall));
        assert!(!collides(&wall, &Body::disc(v(50.0, 6.0), 5.0)));
        // Past the end of the segment
        assert!(!collides(&wall, &Body::disc(v(110.0, 1.0), 5.0)));
    }

    #[test]
    fn test_segment_collision_angle_points_at_wall() {
        // Horizontal wall, disc below it (y down): the disc hits it going up
        let wall = Body::segment(v(0.0, 0.0), 100.0, Angle::DEG_0);
        let disc = Body::disc(v(50.0, 4.0), 5.0);
        assert_deg(collision_angle(&disc, &wall), 270.0);
        assert_deg(collision_angle(&wall, &disc), 90.0);

        let disc = Body::disc(v(50.0, -4.0), 5.0);
        assert_deg(collision_angle(&disc, &wall), 90.0);
    }

    #[test]
    fn test_segment_square() {
        let wall = Body::segment(v(0.0, 0.0), 100.0, Angle::DEG_0);
        assert!(collides(&wall, &Body::square(v(50.0, 14.0), 30.0)));
        assert!(!collides(&wall, &Body::square(v(50.0, 16.0), 30.0)));
        // Endpoint inside the square
        assert!(collides(&Body::square(v(-10.0, 0.0), 30.0), &wall));

        // Diagonal wall against a square: a corner reaches half the diagonal
        let diagonal = Body::segment(v(0.0, 0.0), 100.0, Angle::DEG_45);
        let along = v(50.0, 50.0);
        let normal = Angle::DEG_135.unit_vector();
        assert!(collides(&diagonal, &Body::square(along + normal * 21.0, 30.0)));
        assert!(!collides(&diagonal, &Body::square(along + normal * 22.0, 30.0)));

        let block = Body::square(v(50.0, 14.0), 30.0);
        assert_deg(collision_angle(&block, &wall), 270.0);
    }

    #[test]
    fn test_segment_pair_never_collides() {
        let a = Body::segment(v(0.0, 0.0), 100.0, Angle::DEG_0);
        let b = Body::segment(v(50.0, -50.0), 100.0, Angle::DEG_90);
        assert!(!collides(&a, &b));
        assert!(!contact(&a, &b).hit);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "no collision angle")]
    fn test_segment_pair_angle_is_a_bug() {
        let a = Body::segment(v(0.0, 0.0), 100.0, Angle::DEG_0);
        let _ = collision_angle(&a, &a);
    }

    #[test]
    fn test_contact_combines_both_queries() {
        let a = Body::disc(v(0.0, 0.0), 5.0);
        let b = Body::disc(v(0.0, 8.0), 5.0);
        let hit = contact(&a, &b);
        assert!(hit.hit);
        assert_eq!(hit.angle, Angle::DEG_90);
        assert_eq!(contact(&a, &b.at(v(0.0, 20.0))), Contact::miss());
    }

    proptest! {
        #[test]
        fn prop_disc_disc_symmetric(
            x in -50.0f64..50.0, y in -50.0f64..50.0,
            r1 in 0.0f64..30.0, r2 in 0.0f64..30.0,
        ) {
            let a = Body::disc(v(0.0, 0.0), r1);
            let b = Body::disc(v(x, y), r2);
            prop_assert_eq!(collides(&a, &b), collides(&b, &a));
        }

        #[test]
        fn prop_square_angle_is_cardinal(x in -50.0f64..50.0, y in -50.0f64..50.0) {
            let a = Body::square(v(0.0, 0.0), 20.0);
            let b = Body::square(v(x, y), 30.0);
            let angle = collision_angle(&a, &b);
            prop_assert!([Angle::DEG_0, Angle::DEG_90, Angle::DEG_180, Angle::DEG_270].contains(&angle));
        }

        #[test]
        fn prop_mixed_pairs_symmetric(x in -60.0f64..60.0, y in -60.0f64..60.0, len in 1.0f64..80.0, t in 0.0f64..6.28) {
            let wall = Body::segment(v(0.0, 0.0), len, Angle::new(t));
            let disc = Body::disc(v(x, y), 8.0);
            let square = Body::square(v(x, y), 16.0);
            prop_assert_eq!(collides(&wall, &disc), collides(&disc, &wall));
            prop_assert_eq!(collides(&wall, &square), collides(&square, &wall));
            prop_assert_eq!(collides(&disc, &square.at(v(y, x))), collides(&square.at(v(y, x)), &disc));
        }
    }
}
