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
//! Simulation parameters and scenario descriptions
//!
//! Everything the engine needs is supplied in memory through
//! [`SimulationParams`] and a list of [`BodySpec`]s. For convenience the same
//! data can be read from YAML through [`ScenarioConfig`]:
//!
//! ```yaml
//! params:
//!   g: 0.7
//!   gravity_field: { angle: 3.14159, magnitude: 0.0 }
//!   drag: 1.0
//!   elasticity: 1.0
//!   domain: { width: 700.0, height: 700.0 }
//!   integrator: rk4          # or "euler"
//!   min_distance: 1.0
//!
//! bodies:
//!   - position: { x: 600.0, y: 350.0 }
//!     speed: 4.0
//!     heading: 1.5708
//!     radius: 15.0
//!   - position: { x: 350.0, y: 350.0 }
//!     radius: 30.0
//!     mass: 9000.0
//!     fixed: true
//! ```
//!
//! Every field of `params` is optional and falls back to [`SimulationParams::default`].

use crate::body::{BodySpec, Domain};
use crate::error::{ConfigError, ScenarioError};
use crate::gravity::DEFAULT_MIN_DISTANCE;
use crate::integration::IntegratorKind;
use crate::simulation::Simulation;
use crate::vector::Vector2Polar;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Gravitational constant used by the reference scenarios
pub const DEFAULT_G: f64 = 0.7;

/// Physical and numerical parameters of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Gravitational constant (non-negative)
    pub g: f64,
    /// Uniform acceleration applied to every free body
    pub gravity_field: Vector2Polar,
    /// Per-step speed multiplier in `[0, 1]`
    pub drag: f64,
    /// Speed multiplier on each wall reflection, in `[0, 1]`
    pub elasticity: f64,
    /// Bounding rectangle
    pub domain: Domain,
    /// Stepping strategy
    pub integrator: IntegratorKind,
    /// Lower bound on pair separation used by the force law
    pub min_distance: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            g: DEFAULT_G,
            gravity_field: Vector2Polar::new(std::f64::consts::PI, 0.0),
            drag: 1.0,
            elasticity: 1.0,
            domain: Domain::default(),
            integrator: IntegratorKind::Euler,
            min_distance: DEFAULT_MIN_DISTANCE,
        }
    }
}

impl SimulationParams {
    /// Set the gravitational constant
    pub fn with_g(mut self, g: f64) -> Self {
        self.g = g;
        self
    }

    /// Set the uniform gravity field
    pub fn with_gravity_field(mut self, field: Vector2Polar) -> Self {
        self.gravity_field = field;
        self
    }

    /// Set the drag multiplier
    pub fn with_drag(mut self, drag: f64) -> Self {
        self.drag = drag;
        self
    }

    /// Set the wall elasticity
    pub fn with_elasticity(mut self, elasticity: f64) -> Self {
        self.elasticity = elasticity;
        self
    }

    /// Set the domain
    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    /// Set the integrator
    pub fn with_integrator(mut self, integrator: IntegratorKind) -> Self {
        self.integrator = integrator;
        self
    }

    /// Set the separation clamp
    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Check every parameter
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.g >= 0.0 && self.g.is_finite()) {
            return Err(ConfigError::InvalidGravitationalConstant(self.g));
        }
        if !self.gravity_field.is_valid() || self.gravity_field.magnitude() < 0.0 {
            return Err(ConfigError::InvalidGravityField);
        }
        if !(0.0..=1.0).contains(&self.drag) {
            return Err(ConfigError::InvalidDrag(self.drag));
        }
        if !(0.0..=1.0).contains(&self.elasticity) {
            return Err(ConfigError::InvalidElasticity(self.elasticity));
        }
        if !(self.min_distance > 0.0 && self.min_distance.is_finite()) {
            return Err(ConfigError::InvalidMinDistance(self.min_distance));
        }
        self.domain.validate()
    }
}

/// A complete scenario: parameters plus initial bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Run parameters
    #[serde(default)]
    pub params: SimulationParams,
    /// Initial bodies, in simulation order
    pub bodies: Vec<BodySpec>,
}

impl ScenarioConfig {
    /// Parse a scenario from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a scenario from a YAML reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Serialize back to YAML
    pub fn to_yaml_string(&self) -> Result<String, ScenarioError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate and build the simulation
    pub fn build(&self) -> Result<Simulation, ScenarioError> {
        Ok(Simulation::new(&self.bodies, self.params.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Position;

    const SCENARIO: &str = r#"
params:
  g: 1.5
  drag: 0.99
  domain: { width: 400.0, height: 300.0 }
  integrator: rk4
bodies:
  - position: { x: 100.0, y: 100.0 }
    speed: 2.0
    heading: 0.5
    radius: 10.0
  - position: { x: 200.0, y: 150.0 }
    radius: 20.0
    mass: 5000.0
    fixed: true
"#;

    #[test]
    fn test_defaults_match_reference_program() {
        let params = SimulationParams::default();
        assert_eq!(params.g, 0.7);
        assert_eq!(params.drag, 1.0);
        assert_eq!(params.elasticity, 1.0);
        assert_eq!(params.domain, Domain::new(700.0, 700.0));
        assert_eq!(params.gravity_field.magnitude(), 0.0);
        assert_eq!(params.integrator, IntegratorKind::Euler);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_parameters() {
        let base = SimulationParams::default();
        assert_eq!(
            base.clone().with_g(-1.0).validate(),
            Err(ConfigError::InvalidGravitationalConstant(-1.0))
        );
        assert_eq!(base.clone().with_drag(1.1).validate(), Err(ConfigError::InvalidDrag(1.1)));
        assert_eq!(
            base.clone().with_elasticity(-0.1).validate(),
            Err(ConfigError::InvalidElasticity(-0.1))
        );
        assert_eq!(
            base.clone().with_min_distance(0.0).validate(),
            Err(ConfigError::InvalidMinDistance(0.0))
        );
        assert!(base.clone().with_domain(Domain::new(0.0, 0.0)).validate().is_err());
        assert_eq!(
            base.with_gravity_field(Vector2Polar::new(f64::NAN, 1.0)).validate(),
            Err(ConfigError::InvalidGravityField)
        );
    }

    #[test]
    fn test_parse_yaml_scenario() {
        let scenario = ScenarioConfig::from_yaml_str(SCENARIO).unwrap();
        assert_eq!(scenario.params.g, 1.5);
        assert_eq!(scenario.params.drag, 0.99);
        assert_eq!(scenario.params.integrator, IntegratorKind::Rk4);
        // Unspecified fields fall back to defaults
        assert_eq!(scenario.params.elasticity, 1.0);
        assert_eq!(scenario.params.min_distance, DEFAULT_MIN_DISTANCE);

        assert_eq!(scenario.bodies.len(), 2);
        assert_eq!(scenario.bodies[0].position, Position::new(100.0, 100.0));
        assert_eq!(scenario.bodies[0].mass, None);
        assert!(scenario.bodies[1].fixed);
        assert_eq!(scenario.bodies[1].mass, Some(5000.0));
    }

    #[test]
    fn test_build_from_yaml() {
        let sim = ScenarioConfig::from_yaml_str(SCENARIO).unwrap().build().unwrap();
        assert_eq!(sim.len(), 2);
        assert_eq!(sim.fixed_index(), Some(1));
        assert_eq!(sim.bodies()[0].mass(), 100.0);
    }

    #[test]
    fn test_yaml_round_trip() {
        let scenario = ScenarioConfig::from_yaml_str(SCENARIO).unwrap();
        let text = scenario.to_yaml_string().unwrap();
        assert_eq!(ScenarioConfig::from_yaml_str(&text).unwrap(), scenario);
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = ScenarioConfig::from_yaml_str("bodies: [ {").unwrap_err();
        assert!(matches!(err, ScenarioError::Parse(_)));
    }

    #[test]
    fn test_invalid_scenario_is_config_error() {
        let err = ScenarioConfig::from_yaml_str("bodies: []").unwrap().build().unwrap_err();
        assert!(matches!(err, ScenarioError::Config(ConfigError::EmptyBodies)));
    }
}
