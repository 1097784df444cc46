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
//! Point-mass bodies and the bounded domain they move in
//!
//! A [`Body`] carries its position, polar velocity, radius and mass along
//! with the last net gravitational pull computed for it. Mass defaults to
//! `radius²`. One body per simulation may be marked fixed: it sources
//! gravity for everything else but is never integrated or reflected.

use crate::error::ConfigError;
use crate::vector::{Position, Vector2Polar};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Axis-aligned rectangle `[0, width] x [0, height]` bounding all bodies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Extent along x
    pub width: f64,
    /// Extent along y
    pub height: f64,
}

impl Domain {
    /// Create a new domain
    pub fn new(width: f64, height: f64) -> Self {
        Domain { width, height }
    }

    /// Centre of the domain
    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    /// Check that both extents are positive and finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f64| v > 0.0 && v.is_finite();
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ConfigError::InvalidDomain {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Domain::new(700.0, 700.0)
    }
}

/// A point mass moving in the simulation plane
///
/// # Examples
///
/// ```
/// use nbody_engine::body::Body;
/// use nbody_engine::vector::Position;
///
/// let body = Body::new(Position::new(100.0, 100.0), 15.0).with_velocity(4.0, 0.0);
/// assert_eq!(body.mass(), 225.0);
/// assert_eq!(body.velocity().magnitude(), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    position: Position,
    velocity: Vector2Polar,
    radius: f64,
    mass: f64,
    fixed: bool,
    pending_force: Vector2Polar,
}

impl Body {
    /// Create a body at rest with mass `radius²`
    pub fn new(position: Position, radius: f64) -> Self {
        Body {
            position,
            velocity: Vector2Polar::zero(),
            radius,
            mass: radius * radius,
            fixed: false,
            pending_force: Vector2Polar::zero(),
        }
    }

    /// Set the initial speed and heading
    pub fn with_velocity(mut self, speed: f64, heading: f64) -> Self {
        self.velocity = Vector2Polar::new(heading, speed);
        self
    }

    /// Override the `radius²` mass convention
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Mark this body as the fixed anchor
    pub fn anchored(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Current position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current speed and heading
    pub fn velocity(&self) -> Vector2Polar {
        self.velocity
    }

    /// Radius, also the margin kept from the domain edges
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Gravitational mass
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Whether this is the fixed anchor body
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Net gravitational acceleration computed at the start of the last step
    ///
    /// Excludes the uniform gravity field. Stays zero for the fixed body.
    pub fn pending_force(&self) -> Vector2Polar {
        self.pending_force
    }

    /// Overwrite the position
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Overwrite the velocity
    pub fn set_velocity(&mut self, velocity: Vector2Polar) {
        self.velocity = velocity;
    }

    /// Cache the net force for this step
    pub fn set_pending_force(&mut self, force: Vector2Polar) {
        self.pending_force = force;
    }

    /// Scale speed by the per-step drag multiplier
    pub fn apply_drag(&mut self, drag: f64) {
        self.velocity = self.velocity.with_magnitude(self.velocity.magnitude() * drag);
    }

    /// Kinetic energy `0.5 * m * v²`; zero for the fixed body
    pub fn kinetic_energy(&self) -> f64 {
        if self.fixed {
            return 0.0;
        }
        0.5 * self.mass * self.velocity.magnitude() * self.velocity.magnitude()
    }

    /// Reflect off the domain edges
    ///
    /// Each axis is checked independently so a corner hit reflects on both.
    /// Positions past `extent - radius` (or below `radius`) are mirrored
    /// about that line, the heading is mirrored about the wall, and speed is
    /// scaled by `elasticity`. Returns `true` if any reflection happened.
    /// The fixed body is never reflected.
    pub fn bounce(&mut self, domain: &Domain, elasticity: f64) -> bool {
        if self.fixed {
            return false;
        }

        let r = self.radius;
        let mut x = self.position.x();
        let mut y = self.position.y();
        let mut angle = self.velocity.angle();
        let mut speed = self.velocity.magnitude();
        let mut reflected = false;

        if x > domain.width - r {
            x = 2.0 * (domain.width - r) - x;
            angle = PI - angle;
            speed *= elasticity;
            reflected = true;
        } else if x < r {
            x = 2.0 * r - x;
            angle = PI - angle;
            speed *= elasticity;
            reflected = true;
        }

        if y > domain.height - r {
            y = 2.0 * (domain.height - r) - y;
            angle = 2.0 * PI - angle;
            speed *= elasticity;
            reflected = true;
        } else if y < r {
            y = 2.0 * r - y;
            angle = 2.0 * PI - angle;
            speed *= elasticity;
            reflected = true;
        }

        if reflected {
            self.position = Position::new(x, y);
            self.velocity = Vector2Polar::new(angle, speed);
        }
        reflected
    }
}

/// Initial conditions for one body
///
/// Deserializes from scenario files; `mass` defaults to `radius²` and
/// `fixed` to `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    /// Starting position
    pub position: Position,
    /// Starting speed
    #[serde(default)]
    pub speed: f64,
    /// Starting heading in radians
    #[serde(default)]
    pub heading: f64,
    /// Radius (must be positive)
    pub radius: f64,
    /// Mass override
    #[serde(default)]
    pub mass: Option<f64>,
    /// Whether this body is the fixed anchor
    #[serde(default)]
    pub fixed: bool,
}

impl BodySpec {
    /// A free body at `position` with the given radius, at rest
    pub fn new(position: Position, radius: f64) -> Self {
        BodySpec {
            position,
            speed: 0.0,
            heading: 0.0,
            radius,
            mass: None,
            fixed: false,
        }
    }

    /// Set speed and heading
    pub fn moving(mut self, speed: f64, heading: f64) -> Self {
        self.speed = speed;
        self.heading = heading;
        self
    }

    /// Set an explicit mass
    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    /// Mark as the fixed anchor
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Validate and build the body; `index` is only used in error reports
    pub fn build(&self, index: usize) -> Result<Body, ConfigError> {
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(ConfigError::InvalidRadius {
                index,
                radius: self.radius,
            });
        }
        if !self.position.is_valid() {
            return Err(ConfigError::NonFinitePosition { index });
        }
        if !(self.speed.is_finite() && self.heading.is_finite()) {
            return Err(ConfigError::NonFiniteVelocity { index });
        }

        let mut body = Body::new(self.position, self.radius).with_velocity(self.speed, self.heading);
        if let Some(mass) = self.mass {
            if !(mass >= 0.0 && mass.is_finite()) {
                return Err(ConfigError::InvalidMass { index, mass });
            }
            body = body.with_mass(mass);
        }
        if self.fixed {
            body = body.anchored();
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn domain() -> Domain {
        Domain::new(700.0, 500.0)
    }

    #[test]
    fn test_mass_defaults_to_radius_squared() {
        let body = Body::new(Position::new(10.0, 10.0), 15.0);
        assert_eq!(body.mass(), 225.0);
        assert_eq!(body.with_mass(9000.0).mass(), 9000.0);
    }

    #[test]
    fn test_bounce_right_wall() {
        let d = domain();
        let eps = 0.5;
        let mut body = Body::new(Position::new(d.width - 15.0 + eps, 250.0), 15.0).with_velocity(3.0, 0.0);

        assert!(body.bounce(&d, 0.8));
        assert!((body.position().x() - (d.width - 15.0 - eps)).abs() < EPS);
        assert_eq!(body.position().y(), 250.0);
        assert!((body.velocity().angle() - PI).abs() < EPS);
        assert!((body.velocity().magnitude() - 2.4).abs() < EPS);
    }

    #[test]
    fn test_bounce_left_wall() {
        let mut body = Body::new(Position::new(8.0, 250.0), 10.0).with_velocity(2.0, PI);
        assert!(body.bounce(&domain(), 1.0));
        assert!((body.position().x() - 12.0).abs() < EPS);
        // Heading reversed to point along +x
        assert!(body.velocity().x() > 0.0);
        assert!((body.velocity().magnitude() - 2.0).abs() < EPS);
    }

    #[test]
    fn test_bounce_bottom_and_top_walls() {
        let d = domain();
        let mut body = Body::new(Position::new(300.0, d.height - 9.0), 10.0)
            .with_velocity(1.0, std::f64::consts::FRAC_PI_2);
        assert!(body.bounce(&d, 1.0));
        assert!((body.position().y() - (d.height - 11.0)).abs() < EPS);
        assert!(body.velocity().y() < 0.0);

        let mut body = Body::new(Position::new(300.0, 4.0), 5.0)
            .with_velocity(1.0, -std::f64::consts::FRAC_PI_2);
        assert!(body.bounce(&d, 1.0));
        assert!((body.position().y() - 6.0).abs() < EPS);
        assert!(body.velocity().y() > 0.0);
    }

    #[test]
    fn test_bounce_corner_reflects_both_axes() {
        let d = domain();
        let heading = std::f64::consts::FRAC_PI_4;
        let mut body = Body::new(Position::new(d.width - 9.0, d.height - 9.0), 10.0).with_velocity(2.0, heading);
        assert!(body.bounce(&d, 0.5));

        assert!((body.position().x() - (d.width - 11.0)).abs() < EPS);
        assert!((body.position().y() - (d.height - 11.0)).abs() < EPS);
        assert!(body.velocity().x() < 0.0);
        assert!(body.velocity().y() < 0.0);
        // Elasticity applied once per axis
        assert!((body.velocity().magnitude() - 0.5).abs() < EPS);
    }

    #[test]
    fn test_bounce_inside_is_noop() {
        let mut body = Body::new(Position::new(350.0, 250.0), 15.0).with_velocity(3.0, 1.0);
        let before = body.clone();
        assert!(!body.bounce(&domain(), 0.5));
        assert_eq!(body, before);
    }

    #[test]
    fn test_fixed_body_never_bounces() {
        let mut body = Body::new(Position::new(-50.0, -50.0), 30.0).anchored();
        assert!(!body.bounce(&domain(), 1.0));
        assert_eq!(body.position(), Position::new(-50.0, -50.0));
    }

    #[test]
    fn test_apply_drag() {
        let mut body = Body::new(Position::new(1.0, 1.0), 1.0).with_velocity(10.0, 0.3);
        body.apply_drag(0.9);
        assert!((body.velocity().magnitude() - 9.0).abs() < EPS);
        assert!((body.velocity().angle() - 0.3).abs() < EPS);
    }

    #[test]
    fn test_kinetic_energy() {
        let body = Body::new(Position::zero(), 2.0).with_velocity(3.0, 0.0);
        assert!((body.kinetic_energy() - 0.5 * 4.0 * 9.0).abs() < EPS);
        assert_eq!(body.clone().anchored().kinetic_energy(), 0.0);
    }

    #[test]
    fn test_spec_build_validation() {
        let ok = BodySpec::new(Position::new(1.0, 2.0), 3.0).moving(1.0, 0.5).mass(50.0);
        let body = ok.build(0).unwrap();
        assert_eq!(body.mass(), 50.0);
        assert!((body.velocity().angle() - 0.5).abs() < EPS);

        let err = BodySpec::new(Position::zero(), 0.0).build(4).unwrap_err();
        assert_eq!(err, ConfigError::InvalidRadius { index: 4, radius: 0.0 });

        let err = BodySpec::new(Position::zero(), 1.0).mass(-1.0).build(1).unwrap_err();
        assert_eq!(err, ConfigError::InvalidMass { index: 1, mass: -1.0 });

        let err = BodySpec::new(Position::new(f64::NAN, 0.0), 1.0).build(2).unwrap_err();
        assert_eq!(err, ConfigError::NonFinitePosition { index: 2 });

        let err = BodySpec::new(Position::zero(), 1.0).moving(f64::INFINITY, 0.0).build(3).unwrap_err();
        assert_eq!(err, ConfigError::NonFiniteVelocity { index: 3 });
    }

    #[test]
    fn test_domain_validation() {
        assert!(Domain::new(10.0, 10.0).validate().is_ok());
        assert!(Domain::new(0.0, 10.0).validate().is_err());
        assert!(Domain::new(10.0, f64::NAN).validate().is_err());
        assert_eq!(Domain::new(10.0, 20.0).center(), Position::new(5.0, 10.0));
    }
}
