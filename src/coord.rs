//! This module contains a struct, [`Coord`](struct.Coord.html), that models a 3D coordinate space
//! and supports limited math in 3 dimensions with scalars and other coordinates. It exists to
//! unify math that is the same across different projections of color into 3D space: the gamut
//! solver walks points of linear RGB through it, while the appearance model measures perceptual
//! distance with it.

use num;
use num::{Num, NumCast};
use std::ops::{Add, Div, Mul, Sub};

/// Represents a scalar value that can be easily converted, described using the common numeric
/// traits in [`num`]. Anything that falls under this category can be multiplied by a [`Coord`] to
/// scale it. This has no added functionality: it's just for convenience.
pub trait Scalar: NumCast + Num {}

impl<T: NumCast + Num> Scalar for T {}

/// A point in 3D space. Supports the common arithmetic operations on points. `Coord` has three
/// axes, denoted `x`, `y`, and `z`, which are not distinguished by any method of `Coord`: the
/// mapping between them and the components of a color is purely conventional. For example, a point
/// of linear RGB intensities puts red on the x-axis, green on the y-axis, and blue on the z-axis.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coord {
    /// The first axis.
    pub x: f64,
    /// The second axis.
    pub y: f64,
    /// The third axis.
    pub z: f64,
}

// Addition and subtraction are componentwise, as are division and multiplication by scalars.
// Multiplication of points by points has no single sensible definition in 3D space, so we don't
// pick one: nothing in this crate needs it.
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

/// This is a perfect analogue to numbers: for any Coords c1, c2, and c3 with the same type, c1 +
/// c2 = c3 implies c3 - c2 = c1 and c3 - c1 = c2, down to floating point error.
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

impl<U: Scalar> Mul<U> for Coord {
    type Output = Coord;
    fn mul(self, rhs: U) -> Coord {
        let r: f64 = num::cast(rhs).unwrap();
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
        if rhs.is_zero() {
            panic!("Division by 0!");
        } else {
            let r: f64 = num::cast(rhs).unwrap();
            Coord {
                x: self.x / r,
                y: self.y / r,
                z: self.z / r,
            }
        }
    }
}

impl Coord {
    /// The midpoint between two 3D points: returns a new Coord.
    /// # Example
    /// ```
    /// # use huetone::coord::Coord;
    /// let point1 = Coord{x: 0.25, y: 0., z: 1.};
    /// let point2 = Coord{x: 0.75, y: 1., z: 1.};
    /// let mid = point1.midpoint(&point2);
    /// assert!((mid.x - 0.5).abs() <= 1e-10);
    /// assert!((mid.y - 0.5).abs() <= 1e-10);
    /// assert!((mid.z - 1.).abs() <= 1e-10);
    /// ```
    pub fn midpoint(&self, other: &Coord) -> Coord {
        (*self + *other) / 2.0
    }
    /// Linear interpolation between two 3D points: returns the point `t` of the way along the line
    /// from `self` to `other`. `t = 0` gives back `self` and `t = 1` gives back `other`. Values of
    /// `t` outside [0, 1] extrapolate along the same line, which is occasionally useful and never
    /// checked.
    /// # Example
    /// ```
    /// # use huetone::coord::Coord;
    /// let point1 = Coord{x: 0.2, y: 0., z: 1.};
    /// let point2 = Coord{x: 1., y: 0.8, z: 1.};
    /// let partway = point1.lerp(&point2, 0.75);
    /// assert!((partway.x - 0.8).abs() <= 1e-10);
    /// assert!((partway.y - 0.6).abs() <= 1e-10);
    /// assert!((partway.z - 1.).abs() <= 1e-10);
    /// ```
    pub fn lerp(&self, other: &Coord, t: f64) -> Coord {
        *self + (*other - *self) * t
    }
    /// The Euclidean distance between two 3D points, defined as the square root of the sum of
    /// squares of differences in each axis. Whether this is a good analogue for perceptual
    /// difference between two colors depends entirely on the projection: in most color spaces it
    /// is not, which is why [`CAM16Color`](../cam16/struct.CAM16Color.html) measures distance in
    /// its uniform coordinates rather than anywhere else.
    /// # Example
    /// ```
    /// # use huetone::coord::Coord;
    /// let point1 = Coord{x: 0., y: 0., z: -1.};
    /// let point2 = Coord{x: 2., y: 3., z: 5.};
    /// let dist = point1.euclidean_distance(&point2);
    /// assert!((dist - 7.).abs() <= 1e-10);
    /// ```
    pub fn euclidean_distance(&self, other: &Coord) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2))
            .sqrt()
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;
    use float_cmp::ApproxEqUlps;

    #[test]
    fn test_midpoint() {
        let point1 = Coord {
            x: 0.,
            y: -4.,
            z: 7.,
        };
        let point2 = Coord { x: 1., y: 4., z: 0. };
        let mid = point1.midpoint(&point2);
        assert!(mid.x.approx_eq_ulps(&0.5, 2));
        assert!(mid.y.approx_eq_ulps(&0.0, 2));
        assert!(mid.z.approx_eq_ulps(&3.5, 2));
    }

    #[test]
    fn test_lerp_endpoints() {
        let point1 = Coord {
            x: 12.,
            y: 0.5,
            z: -3.,
        };
        let point2 = Coord {
            x: -7.,
            y: 18.,
            z: 0.25,
        };
        assert_eq!(point1.lerp(&point2, 0.), point1);
        assert_eq!(point1.lerp(&point2, 1.), point2);
        // halfway along is the midpoint
        assert_eq!(point1.lerp(&point2, 0.5), point1.midpoint(&point2));
    }

    #[test]
    fn test_distance_is_metric() {
        let point1 = Coord {
            x: 1.,
            y: 2.,
            z: 3.,
        };
        let point2 = Coord {
            x: -4.,
            y: 0.,
            z: 9.,
        };
        assert!(point1.euclidean_distance(&point1).approx_eq_ulps(&0.0, 2));
        assert!(point1
            .euclidean_distance(&point2)
            .approx_eq_ulps(&point2.euclidean_distance(&point1), 2));
    }
}
