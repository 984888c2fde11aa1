//! Circular angle algebra
//!
//! An [`Angle`] is a direction on the circle, always stored normalized to
//! `[0, 2π)` radians. All arithmetic produces a fresh, re-normalized value.
//!
//! Positions use screen coordinates (y grows downward), so 90° points down
//! and 270° points up.

use std::f64::consts::{PI, TAU};
use std::ops::{Add, Div, Mul, Sub};

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Normalized direction in `[0, 2π)`
///
/// Equality is exact: two angles are equal only if their normalized radian
/// values are bit-for-bit the same number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Angle(f64);

impl Angle {
    pub const DEG_0: Angle = Angle(0.0);
    pub const DEG_45: Angle = Angle(PI * 0.25);
    pub const DEG_90: Angle = Angle(PI * 0.5);
    pub const DEG_135: Angle = Angle(PI * 0.75);
    pub const DEG_180: Angle = Angle(PI);
    pub const DEG_225: Angle = Angle(PI * 1.25);
    pub const DEG_270: Angle = Angle(PI * 1.5);
    pub const DEG_315: Angle = Angle(PI * 1.75);

    /// Create an angle from radians, wrapping into `[0, 2π)`
    #[inline]
    pub fn new(radians: f64) -> Self {
        Self(normalize(radians))
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self::new(degrees.to_radians())
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0
    }

    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }

    /// Uniformly random direction
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.random_range(0.0..TAU))
    }

    /// Unit vector pointing along this angle
    #[inline]
    pub fn unit_vector(self) -> DVec2 {
        DVec2::new(self.0.cos(), self.0.sin())
    }

    /// The direction pointing the other way (`self + 180°`)
    #[inline]
    pub fn opposite(self) -> Self {
        self + Self::DEG_180
    }

    /// Non-reflex separation between two directions, always in `[0, π]`
    pub fn smaller_angle_between(a: Angle, b: Angle) -> Angle {
        let difference = (a.0 - b.0).abs();
        if difference > PI {
            Self::new(-difference)
        } else {
            Self(difference)
        }
    }

    /// Strictly inside the counter-clockwise arc from `low` to `high`
    ///
    /// When `low >= high` the arc wraps through 0.
    pub fn is_between(self, low: Angle, high: Angle) -> bool {
        if low.0 >= high.0 {
            self.0 > low.0 || self.0 < high.0
        } else {
            self.0 > low.0 && self.0 < high.0
        }
    }

    /// Like [`Angle::is_between`] but both endpoints count as inside
    pub fn is_between_or_equal(self, low: Angle, high: Angle) -> bool {
        if low.0 >= high.0 {
            self.0 >= low.0 || self.0 <= high.0
        } else {
            self.0 >= low.0 && self.0 <= high.0
        }
    }
}

/// Wrap radians into `[0, 2π)`
#[inline]
fn normalize(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::new(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::new(self.0 - rhs.0)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Angle {
        Angle::new(self.0 * rhs)
    }
}

impl Div<f64> for Angle {
    type Output = Angle;

    /// Dividing by zero is a caller bug; release builds leave the angle as is.
    fn div(self, rhs: f64) -> Angle {
        debug_assert!(rhs != 0.0, "Angle divided by zero");
        if rhs == 0.0 {
            return self;
        }
        Angle::new(self.0 / rhs)
    }
}

impl From<f64> for Angle {
    fn from(radians: f64) -> Self {
        Angle::new(radians)
    }
}

impl From<Angle> for f64 {
    fn from(angle: Angle) -> Self {
        angle.0
    }
}
