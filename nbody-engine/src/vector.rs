// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Planar position and polar vector types
//!
//! All quantities live in a shared 2D coordinate space with the origin in the
//! top-left corner and the y-axis pointing down, matching raster conventions.
//! Angles are measured from the positive x-axis via `atan2(dy, dx)`, so a
//! positive angle turns toward +y (downward on screen).
//!
//! Velocities, forces and the uniform gravity field are carried in polar form
//! ([`Vector2Polar`]). Composition converts to Cartesian components, adds, and
//! converts back, so it inherits the associativity and commutativity of
//! ordinary vector addition.

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// 2D position with double-precision coordinates
///
/// # Examples
///
/// ```
/// use nbody_engine::vector::Position;
///
/// let pos = Position::new(350.0, 120.0);
/// assert_eq!(pos.x(), 350.0);
/// assert!(pos.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Create a new position with the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Create a position at the origin
    pub fn zero() -> Self {
        Position::new(0.0, 0.0)
    }

    /// Get the x coordinate
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Get the y coordinate
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Set the x coordinate
    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    /// Set the y coordinate
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Check if both coordinates are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Return this position moved by `vector` scaled by `factor`
    pub fn offset(&self, vector: Vector2Polar, factor: f64) -> Position {
        Position::new(self.x + vector.x() * factor, self.y + vector.y() * factor)
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: &Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::zero()
    }
}

/// A 2D quantity in angle/magnitude form
///
/// The magnitude is never negative; constructors fold a negative magnitude
/// into the opposite heading. The angle is not normalized to any canonical
/// range, so callers must tolerate values outside `[0, 2π)`.
///
/// # Examples
///
/// ```
/// use nbody_engine::vector::Vector2Polar;
/// use std::f64::consts::FRAC_PI_2;
///
/// let east = Vector2Polar::new(0.0, 3.0);
/// let south = Vector2Polar::new(FRAC_PI_2, 4.0);
/// let sum = east.compose(south);
/// assert!((sum.magnitude() - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector2Polar {
    angle: f64,
    magnitude: f64,
}

impl Vector2Polar {
    /// Create a polar vector, folding a negative magnitude into the opposite heading
    pub fn new(angle: f64, magnitude: f64) -> Self {
        if magnitude < 0.0 {
            Vector2Polar {
                angle: angle + std::f64::consts::PI,
                magnitude: -magnitude,
            }
        } else {
            Vector2Polar { angle, magnitude }
        }
    }

    /// The zero vector (angle 0, magnitude 0)
    pub fn zero() -> Self {
        Vector2Polar {
            angle: 0.0,
            magnitude: 0.0,
        }
    }

    /// Convert Cartesian components to polar form
    ///
    /// A zero vector maps to angle 0 rather than whatever sign of zero
    /// `atan2` would pick up.
    pub fn from_cartesian(x: f64, y: f64) -> Self {
        let magnitude = x.hypot(y);
        if magnitude == 0.0 {
            return Vector2Polar::zero();
        }
        Vector2Polar {
            angle: y.atan2(x),
            magnitude,
        }
    }

    /// Vector pointing from `from` to `to`
    pub fn from_displacement(from: Position, to: Position) -> Self {
        Vector2Polar::from_cartesian(to.x() - from.x(), to.y() - from.y())
    }

    /// Heading in radians
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Length of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Cartesian x component
    pub fn x(&self) -> f64 {
        self.angle.cos() * self.magnitude
    }

    /// Cartesian y component
    pub fn y(&self) -> f64 {
        self.angle.sin() * self.magnitude
    }

    /// Vector sum expressed in polar form
    pub fn compose(self, other: Vector2Polar) -> Vector2Polar {
        Vector2Polar::from_cartesian(self.x() + other.x(), self.y() + other.y())
    }

    /// Multiply the magnitude by `factor`; a negative factor reverses the heading
    pub fn scaled(self, factor: f64) -> Vector2Polar {
        Vector2Polar::new(self.angle, self.magnitude * factor)
    }

    /// Same heading with a different magnitude
    pub fn with_magnitude(self, magnitude: f64) -> Vector2Polar {
        Vector2Polar::new(self.angle, magnitude)
    }

    /// Same magnitude with a different heading
    pub fn with_angle(self, angle: f64) -> Vector2Polar {
        Vector2Polar::new(angle, self.magnitude)
    }

    /// Check that both angle and magnitude are finite
    pub fn is_valid(&self) -> bool {
        self.angle.is_finite() && self.magnitude.is_finite()
    }

    /// Compare two vectors by their Cartesian components
    ///
    /// Angles that differ by whole turns, and any angle on a zero-length
    /// vector, compare equal.
    pub fn approx_eq(&self, other: &Vector2Polar, tolerance: f64) -> bool {
        (self.x() - other.x()).abs() <= tolerance && (self.y() - other.y()).abs() <= tolerance
    }
}

impl Default for Vector2Polar {
    fn default() -> Self {
        Vector2Polar::zero()
    }
}

impl Add for Vector2Polar {
    type Output = Vector2Polar;

    fn add(self, rhs: Vector2Polar) -> Vector2Polar {
        self.compose(rhs)
    }
}
