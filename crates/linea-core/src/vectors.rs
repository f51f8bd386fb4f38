//! 2D vector arithmetic and polar/cartesian conversion.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

/// Magnitude and direction (degrees, counter-clockwise from +x).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polar {
    pub magnitude: f64,
    pub degrees: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn to_polar(&self) -> Polar {
        from_components(self.x, self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Vec2::new(x, y)
    }
}

pub fn to_components(magnitude: f64, degrees: f64) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(magnitude * rad.cos(), magnitude * rad.sin())
}

/// Inverse of [`to_components`], with degrees in [-180, 180]. The angle of
/// the zero vector is 0.
pub fn from_components(x: f64, y: f64) -> Polar {
    let magnitude = x.hypot(y);
    let degrees = if magnitude == 0.0 {
        0.0
    } else {
        y.atan2(x).to_degrees()
    };
    Polar { magnitude, degrees }
}

pub fn add(u: Vec2, v: Vec2) -> Vec2 {
    u + v
}

pub fn subtract(u: Vec2, v: Vec2) -> Vec2 {
    u - v
}

pub fn dot(u: Vec2, v: Vec2) -> f64 {
    u.x * v.x + u.y * v.y
}

/// z-component of `u × v` with both vectors lifted into the xy-plane.
pub fn cross(u: Vec2, v: Vec2) -> f64 {
    u.x * v.y - u.y * v.x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_vector_has_zero_angle() {
        let p = from_components(0.0, 0.0);
        assert_eq!(p.magnitude, 0.0);
        assert_eq!(p.degrees, 0.0);
        // Only the origin gets the zero-angle rule.
        assert!((from_components(-1.0, 0.0).degrees.abs() - 180.0).abs() < 1e-12);
    }

    #[test]
    fn negative_x_axis_keeps_the_sign_of_zero() {
        assert_eq!(from_components(-1.0, 0.0).degrees, 180.0);
        assert_eq!(from_components(-1.0, -0.0).degrees, -180.0);
    }

    #[test]
    fn axis_directions() {
        let up = to_components(2.0, 90.0);
        assert!(up.x.abs() < 1e-12);
        assert!((up.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn operators_match_free_functions() {
        let u = Vec2::new(1.0, 2.0);
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(add(u, v), Vec2::new(4.0, 6.0));
        assert_eq!(subtract(u, v), Vec2::new(-2.0, -2.0));
        assert_eq!(dot(u, v), 11.0);
        assert_eq!(cross(u, v), -2.0);
    }
}
