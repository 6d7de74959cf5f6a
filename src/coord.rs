//! This module contains a struct, [`Coord`](coord::Coord), that models a 3D coordinate space and supports limited
//! math in 3 dimensions with scalars and other coordinates. Used to unify math that is the same
//! across color types, just with different projections into 3D space: scaling tristimulus values,
//! measuring color differences, and moving between the rectangular and polar forms of the CAM16
//! uniform color spaces.

use std::ops::{Add, Div, Mul, Sub};
use num;
use num::{Num, NumCast};

/// Represents a scalar value that can be easily converted, described using the common numeric traits
/// in [`num`]. Anything that falls under this category can be multiplied by a [`Coord`] to scale
/// it. This has no added functionality: it's just for convenience.
pub trait Scalar: NumCast + Num {}

impl<T: NumCast + Num> Scalar for T {}

/// A point in 3D space. Supports many common arithmetic operations on points.
/// `Coord` has three axes, denoted `x`, `y`, and `z`. These are not any different in any method of
/// `Coord`, so the distinction between them is completely conventional. Any color type that
/// converts to and from a `Coord` matches its components with these axes in the order of the
/// letters in its name: for example, `CAM16UCSColor` maps to a coordinate such that `j` is on the
/// x-axis, `a` is on the y-axis, and `b` is on the z-axis, and `HCTColor` puts hue on the x-axis.
///
/// # Examples
/// ```
/// # use cam16::coord::Coord;
/// let point_1 = Coord{x: 1., y: 8., z: 7.};
/// let point_2 = Coord{x: 7., y: 2., z: 3.};
/// // Add two points together to do componentwise addition.
/// let sum = point_1 + point_2;  // the point (8, 10, 10)
/// // Subtract two points the same way.
/// let diff = point_1 - point_2;  // the point (-6, 6, 4)
/// // Scale by any numeric type.
/// let prod = point_1 * 2u8; // the point (2, 16, 14)
/// let quot = point_1 / 2.; // the point (0.5, 4, 3.5)
/// assert_eq!(sum.x, 8.);
/// assert_eq!(diff.y, 6.);
/// assert_eq!(prod.z, 14.);
/// assert_eq!(quot.x, 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coord {
    /// The first axis.
    pub x: f64,
    /// The second axis.
    pub y: f64,
    /// The third axis.
    pub z: f64,
}

impl Add for Coord {
    type Output = Coord;
    fn add(self, rhs: Coord) -> Coord {
        Coord {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for Coord {
    type Output = Coord;
    fn sub(self, rhs: Coord) -> Coord {
        Coord {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

// Scalars that can't be represented as a float become NaN rather than panicking: every primitive
// numeric type converts, so this only matters for exotic `Num` implementations.
fn scalar_to_f64<U: Scalar>(s: U) -> f64 {
    num::cast(s).unwrap_or(::std::f64::NAN)
}

impl<U: Scalar> Mul<U> for Coord {
    type Output = Coord;
    fn mul(self, rhs: U) -> Coord {
        let r = scalar_to_f64(rhs);
        Coord {
            x: self.x * r,
            y: self.y * r,
            z: self.z * r,
        }
    }
}

impl<U: Scalar> Div<U> for Coord {
    type Output = Coord;
    fn div(self, rhs: U) -> Coord {
        let r = scalar_to_f64(rhs);
        Coord {
            x: self.x / r,
            y: self.y / r,
            z: self.z / r,
        }
    }
}

impl Coord {
    /// Builds a coordinate from an array of its three axes, in order.
    pub fn from_array(arr: [f64; 3]) -> Coord {
        Coord {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
    /// The three axes as an array, in order.
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
    /// The Euclidean difference between two 3D points, defined as the square root of the sum of
    /// squares of differences in each axis. In the CAM16 uniform color spaces this is a decent
    /// approximation of perceived color difference; in most other projections it is not.
    /// # Example
    /// ```
    /// # use cam16::coord::Coord;
    /// let point1 = Coord{x: 0., y: 0., z: -1.};
    /// let point2 = Coord{x: 2., y: 3., z: 5.};
    /// let dist = point1.euclidean_distance(&point2);
    /// assert!((dist - 7.).abs() <= 1e-10);
    /// ```
    pub fn euclidean_distance(&self, other: &Coord) -> f64 {
        self.weighted_distance(other, [1.0, 1.0, 1.0])
    }
    /// Like `euclidean_distance`, but the difference along each axis is divided by the
    /// corresponding weight first. Color difference formulas use this to discount lightness
    /// differences relative to chromatic ones.
    pub fn weighted_distance(&self, other: &Coord, weights: [f64; 3]) -> f64 {
        let diff = *self - *other;
        ((diff.x / weights[0]).powi(2) + (diff.y / weights[1]).powi(2) + (diff.z / weights[2]).powi(2))
            .sqrt()
    }
    /// Interprets `y` and `z` as rectangular coordinates in a plane and returns them as (radius,
    /// angle), with the angle in degrees. The angle is whatever `atan2` gives, so it can be
    /// negative.
    pub fn yz_polar(&self) -> (f64, f64) {
        (self.y.hypot(self.z), self.z.atan2(self.y).to_degrees())
    }
    /// The inverse of `yz_polar`: builds a coordinate from an `x` value and a polar (radius, angle
    /// in degrees) pair that becomes `y` and `z`.
    pub fn from_yz_polar(x: f64, radius: f64, degrees: f64) -> Coord {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Coord {
            x,
            y: radius * cos,
            z: radius * sin,
        }
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_scalar_ops() {
        let c = Coord { x: 1.0, y: -2.0, z: 0.5 };
        assert_eq!(c * 100u8, Coord { x: 100.0, y: -200.0, z: 50.0 });
        assert_eq!((c * 100) / 100.0, c);
    }

    #[test]
    fn test_weighted_distance() {
        let c1 = Coord { x: 10.0, y: 3.0, z: 0.0 };
        let c2 = Coord { x: 0.0, y: 0.0, z: 4.0 };
        assert!((c1.euclidean_distance(&c2) - 125f64.sqrt()).abs() <= 1e-12);
        assert!((c1.weighted_distance(&c2, [2.0, 1.0, 1.0]) - 50f64.sqrt()).abs() <= 1e-12);
    }

    #[test]
    fn test_polar() {
        let c = Coord::from_yz_polar(50.0, 2.0, 90.0);
        assert!(c.y.abs() <= 1e-12);
        assert!((c.z - 2.0).abs() <= 1e-12);
        let (r, h) = Coord { x: 0.0, y: -1.0, z: -1.0 }.yz_polar();
        assert!((r - 2f64.sqrt()).abs() <= 1e-12);
        assert!((h + 135.0).abs() <= 1e-12);
    }
}
