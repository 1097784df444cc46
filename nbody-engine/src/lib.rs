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
//! # N-Body Engine
//!
//! A 2D gravitational n-body engine: point masses attract each other
//! pairwise, optionally around a heavy fixed anchor, are integrated forward
//! in time and reflect off the edges of a bounded domain.
//!
//! ## Features
//!
//! - **Polar vectors**: velocities and forces carried as angle/magnitude pairs
//! - **Brute-force gravity**: O(n²) pairwise pull with a close-encounter clamp
//! - **Interchangeable integrators**: explicit Euler or classical RK4
//! - **Boundary reflection**: elastic or damped bounces off the domain edges
//! - **Parallelization**: Optional Rayon integration over a start-of-step snapshot
//! - **Scenarios**: in-memory parameters or YAML scenario files
//!
//! Rendering and input handling are left to the caller, which drives one
//! [`Simulation::step`] per frame and reads bodies back through
//! [`Simulation::bodies`].
//!
//! ## Example
//!
//! ```rust
//! use nbody_engine::{create_simulation, SimulationParams};
//! use nbody_engine::integration::IntegratorKind;
//! use nbody_engine::scenario::RadialOrbit;
//!
//! let params = SimulationParams::default().with_integrator(IntegratorKind::Rk4);
//! let specs = RadialOrbit::new(3).specs(&params.domain);
//! let mut sim = create_simulation(&specs, params).unwrap();
//!
//! for _ in 0..60 {
//!     sim.step(1.0).unwrap();
//! }
//! for body in sim.bodies() {
//!     let _ = (body.position(), body.velocity(), body.pending_force());
//! }
//! ```

#![warn(missing_docs)]

/// Planar positions and polar vectors
pub mod vector;

/// Bodies, initial conditions and the bounding domain
pub mod body;

/// Pairwise gravitational field
pub mod gravity;

/// Numerical integration methods
pub mod integration;

/// Simulation driver
pub mod simulation;

/// Parameters and scenario loading
pub mod config;

/// Reference initial conditions
pub mod scenario;

/// Error types
pub mod error;

pub use body::{Body, BodySpec, Domain};
pub use config::{ScenarioConfig, SimulationParams};
pub use error::{ConfigError, ScenarioError, StepError};
pub use simulation::{create_simulation, Simulation};
pub use vector::{Position, Vector2Polar};
