//! Arena boundary
//!
//! The play field is a rectangle with its four corners cut off at 45°, so
//! balls never get stuck in a right-angled corner.

use std::f64::consts::SQRT_2;

use glam::DVec2;

use super::angle::Angle;
use super::shape::Body;

/// The eight wall segments enclosing a `width` x `height` field
///
/// Walls are walked clockwise on screen, starting with the top edge; each
/// one ends where the next begins.
pub fn arena_walls(width: f64, height: f64, corner: f64) -> [Body; 8] {
    debug_assert!(
        width >= 2.0 * corner && height >= 2.0 * corner,
        "arena {width}x{height} too small for corner {corner}"
    );
    let corner_diagonal = SQRT_2 * corner;
    let x_edge = width - 2.0 * corner;
    let y_edge = height - 2.0 * corner;

    [
        Body::segment(DVec2::new(corner, 0.0), x_edge, Angle::DEG_0),
        Body::segment(DVec2::new(width - corner, 0.0), corner_diagonal, Angle::DEG_45),
        Body::segment(DVec2::new(width, corner), y_edge, Angle::DEG_90),
        Body::segment(DVec2::new(width, height - corner), corner_diagonal, Angle::DEG_135),
        Body::segment(DVec2::new(width - corner, height), x_edge, Angle::DEG_180),
        Body::segment(DVec2::new(corner, height), corner_diagonal, Angle::DEG_225),
        Body::segment(DVec2::new(0.0, height - corner), y_edge, Angle::DEG_270),
        Body::segment(DVec2::new(0.0, corner), corner_diagonal, Angle::DEG_315),
    ]
}
