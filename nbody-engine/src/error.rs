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
//! Error types for simulation construction, stepping and scenario loading.
//!
//! Invalid configuration is rejected when a simulation is created, so a
//! running simulation can only fail on a bad timestep.

use std::fmt;

/// Errors detected while validating bodies and parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No bodies were supplied.
    EmptyBodies,
    /// A body radius is zero, negative or not finite.
    InvalidRadius {
        /// Index of the offending body
        index: usize,
        /// Supplied radius
        radius: f64,
    },
    /// A body mass is negative or not finite.
    InvalidMass {
        /// Index of the offending body
        index: usize,
        /// Supplied mass
        mass: f64,
    },
    /// A body position has a NaN or infinite coordinate.
    NonFinitePosition {
        /// Index of the offending body
        index: usize,
    },
    /// A body speed or heading is NaN or infinite.
    NonFiniteVelocity {
        /// Index of the offending body
        index: usize,
    },
    /// More than one body is flagged fixed.
    MultipleFixedBodies {
        /// First fixed body
        first: usize,
        /// Second fixed body
        second: usize,
    },
    /// Gravitational constant is negative or not finite.
    InvalidGravitationalConstant(f64),
    /// Domain extents are missing, non-positive or not finite.
    InvalidDomain {
        /// Supplied width
        width: f64,
        /// Supplied height
        height: f64,
    },
    /// Drag outside `[0, 1]`.
    InvalidDrag(f64),
    /// Elasticity outside `[0, 1]`.
    InvalidElasticity(f64),
    /// Minimum interaction distance is not positive and finite.
    InvalidMinDistance(f64),
    /// Uniform gravity field has a non-finite component.
    InvalidGravityField,
    /// A body is too large to fit inside the domain on some axis.
    BodyExceedsDomain {
        /// Index of the offending body
        index: usize,
        /// Supplied radius
        radius: f64,
    },
    /// A scenario generator range is empty, inverted or not finite.
    InvalidRange {
        /// Name of the generator field
        field: &'static str,
        /// Lower bound
        start: f64,
        /// Upper bound
        end: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyBodies => write!(f, "Simulation requires at least one body"),
            ConfigError::InvalidRadius { index, radius } => {
                write!(f, "Body {} has invalid radius {}; radius must be positive and finite", index, radius)
            }
            ConfigError::InvalidMass { index, mass } => {
                write!(f, "Body {} has invalid mass {}; mass must be non-negative and finite", index, mass)
            }
            ConfigError::NonFinitePosition { index } => {
                write!(f, "Body {} has a non-finite position", index)
            }
            ConfigError::NonFiniteVelocity { index } => {
                write!(f, "Body {} has a non-finite speed or heading", index)
            }
            ConfigError::MultipleFixedBodies { first, second } => write!(
                f,
                "Bodies {} and {} are both marked fixed; at most one anchor body is allowed",
                first, second
            ),
            ConfigError::InvalidGravitationalConstant(g) => {
                write!(f, "Gravitational constant {} must be non-negative and finite", g)
            }
            ConfigError::InvalidDomain { width, height } => write!(
                f,
                "Domain {} x {} is invalid; both extents must be positive and finite",
                width, height
            ),
            ConfigError::InvalidDrag(d) => write!(f, "Drag {} must lie in [0, 1]", d),
            ConfigError::InvalidElasticity(e) => write!(f, "Elasticity {} must lie in [0, 1]", e),
            ConfigError::InvalidMinDistance(d) => {
                write!(f, "Minimum interaction distance {} must be positive and finite", d)
            }
            ConfigError::InvalidGravityField => {
                write!(f, "Uniform gravity field must have a finite angle and magnitude")
            }
            ConfigError::BodyExceedsDomain { index, radius } => write!(
                f,
                "Body {} with radius {} does not fit inside the domain; its diameter must not exceed either extent",
                index, radius
            ),
            ConfigError::InvalidRange { field, start, end } => write!(
                f,
                "Range {}..={} for {} is empty or not finite",
                start, end, field
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors returned by [`Simulation::step`](crate::Simulation::step)
#[derive(Debug, Clone, PartialEq)]
pub enum StepError {
    /// Timestep is zero, negative or not finite.
    InvalidTimestep(f64),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::InvalidTimestep(dt) => {
                write!(f, "Invalid timestep: {}. Must be positive and finite.", dt)
            }
        }
    }
}

impl std::error::Error for StepError {}

/// Errors that can occur while loading a scenario description.
#[derive(Debug)]
pub enum ScenarioError {
    /// The YAML document could not be parsed.
    Parse(serde_yaml::Error),
    /// The scenario parsed but describes an invalid simulation.
    Config(ConfigError),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Parse(e) => write!(f, "Failed to parse scenario: {}", e),
            ScenarioError::Config(e) => write!(f, "Invalid scenario: {}", e),
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScenarioError::Parse(e) => Some(e),
            ScenarioError::Config(e) => Some(e),
        }
    }
}

impl From<serde_yaml::Error> for ScenarioError {
    fn from(e: serde_yaml::Error) -> Self {
        ScenarioError::Parse(e)
    }
}

impl From<ConfigError> for ScenarioError {
    fn from(e: ConfigError) -> Self {
        ScenarioError::Config(e)
    }
}
