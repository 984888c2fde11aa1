//! Collision shapes and positioned bodies

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::angle::Angle;

/// The closed set of shapes the collision engine understands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Circle centered on the owner position
    Disc { radius: f64 },
    /// Axis-aligned square centered on the owner position
    AxisSquare { side_length: f64 },
    /// Line segment starting at the owner position
    Segment { length: f64, angle: Angle },
}

impl Shape {
    pub fn disc(radius: f64) -> Self {
        debug_assert!(radius >= 0.0, "negative disc radius {radius}");
        Shape::Disc { radius }
    }

    pub fn square(side_length: f64) -> Self {
        debug_assert!(side_length >= 0.0, "negative square side {side_length}");
        Shape::AxisSquare { side_length }
    }

    pub fn segment(length: f64, angle: Angle) -> Self {
        debug_assert!(length >= 0.0, "negative segment length {length}");
        Shape::Segment { length, angle }
    }

    /// Characteristic half-extent, used for spawn spacing and effects
    pub fn size(&self) -> f64 {
        match *self {
            Shape::Disc { radius } => radius,
            Shape::AxisSquare { side_length } => side_length / 2.0,
            Shape::Segment { length, .. } => length / 2.0,
        }
    }
}

/// A shape placed in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: DVec2,
    pub shape: Shape,
}

impl Body {
    pub fn new(pos: DVec2, shape: Shape) -> Self {
        Self { pos, shape }
    }

    pub fn disc(pos: DVec2, radius: f64) -> Self {
        Self::new(pos, Shape::disc(radius))
    }

    pub fn square(pos: DVec2, side_length: f64) -> Self {
        Self::new(pos, Shape::square(side_length))
    }

    pub fn segment(pos: DVec2, length: f64, angle: Angle) -> Self {
        Self::new(pos, Shape::segment(length, angle))
    }

    /// Second endpoint of a segment body (the position itself for other shapes)
    pub fn segment_end(&self) -> DVec2 {
        match self.shape {
            Shape::Segment { length, angle } => crate::step_from(self.pos, angle, length),
            _ => self.pos,
        }
    }

    /// Copy of this body moved to another position
    pub fn at(&self, pos: DVec2) -> Self {
        Self { pos, ..*self }
    }
}

/// Anything that occupies a shape at a position
///
/// The collision and movement functions only ever look at this capability,
/// never at what kind of game object sits behind it.
pub trait Positioned {
    fn position(&self) -> DVec2;

    fn shape(&self) -> Shape;

    fn body(&self) -> Body {
        Body::new(self.position(), self.shape())
    }
}

impl Positioned for Body {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn shape(&self) -> Shape {
        self.shape
    }

    fn body(&self) -> Body {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_size_is_half_extent() {
        assert_eq!(Shape::disc(12.0).size(), 12.0);
        assert_eq!(Shape::square(30.0).size(), 15.0);
        assert_eq!(Shape::segment(80.0, Angle::DEG_90).size(), 40.0);
    }

    #[test]
    fn test_segment_end() {
        let wall = Body::segment(DVec2::new(10.0, 10.0), 50.0, Angle::DEG_90);
        let end = wall.segment_end();
        assert!((end.x - 10.0).abs() < 1e-9);
        assert!((end.y - 60.0).abs() < 1e-9);

        let ball = Body::disc(DVec2::new(3.0, 4.0), 5.0);
        assert_eq!(ball.segment_end(), ball.pos);
    }

    #[test]
    fn test_body_copy_is_independent() {
        let block = Body::square(DVec2::ZERO, 30.0);
        let moved = block.at(DVec2::new(5.0, 0.0));
        assert_eq!(block.pos, DVec2::ZERO);
        assert_eq!(moved.shape, block.shape);
    }
}
