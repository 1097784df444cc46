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
//! Numerical integration methods for the n-body simulation
//!
//! Each integrator advances a single free body by one timestep given the
//! force field and a read-only snapshot of every body taken at the start of
//! the step. The body's own trial states live in locals, never in the
//! snapshot, so other bodies never observe them.
//!
//! # Integrators
//!
//! - **Explicit Euler**: one force evaluation per step, first-order accurate.
//!   Energy drifts over long runs, which is acceptable for real-time display.
//! - **RK4 (Runge-Kutta 4th order)**: four force evaluations per step, much
//!   more accurate for the same timestep.
//!
//! The choice is fixed at construction through [`IntegratorKind`]; nothing
//! switches strategy at runtime.
//!
//! # Timestep Guidelines
//!
//! - Too small: Numerical precision issues and wasted computation
//! - Too large: Instability, and bodies tunnelling through each other
//! - The reference scenarios run at `dt = 1` per rendered frame

use crate::body::Body;
use crate::error::StepError;
use crate::gravity::ForceField;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod euler;
mod rk4;

pub use euler::EulerIntegrator;
pub use rk4::RK4Integrator;

/// Total kinetic energy of all bodies (the fixed body contributes nothing)
pub fn total_kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::kinetic_energy).sum()
}

/// Kinetic plus gravitational potential energy
///
/// The uniform gravity field has no reference height and is not included,
/// so this is only conserved when that field is zero.
pub fn total_energy(bodies: &[Body], field: &ForceField) -> f64 {
    total_kinetic_energy(bodies) + field.potential_energy(bodies)
}

/// Check a timestep before stepping
///
/// Non-positive or non-finite values are rejected. Values that are legal but
/// likely to misbehave are logged as warnings.
pub fn validate_timestep(dt: f64) -> Result<(), StepError> {
    if dt <= 0.0 || !dt.is_finite() {
        return Err(StepError::InvalidTimestep(dt));
    }

    if dt < 1e-9 {
        log::warn!(
            "Timestep {} is extremely small and may cause precision loss with f64",
            dt
        );
    } else if dt > 1.0 {
        log::warn!("Timestep {} is large and may cause instability", dt);
    }

    Ok(())
}

/// Trait for numerical integration methods
///
/// Implementations advance one body's position and velocity. Drag is applied
/// uniformly afterwards by [`Integrator::step_body`].
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Number of force-field evaluations performed per body per step,
    /// counting the cached start-of-step evaluation
    fn force_evaluations(&self) -> usize;

    /// Advance `body` by `dt`
    ///
    /// `body` is a private working copy of `snapshot[index]`. Its
    /// [`pending_force`](Body::pending_force) must already hold the net pull
    /// at its current position; that is the first force sample. Further
    /// samples are taken against `snapshot`, skipping `index`.
    ///
    /// If the update produces a non-finite state, the body is left as it was.
    fn advance(&self, index: usize, body: &mut Body, field: &ForceField, snapshot: &[Body], dt: f64);

    /// Advance `body` and then scale its speed by `drag`
    fn step_body(
        &self,
        index: usize,
        body: &mut Body,
        field: &ForceField,
        snapshot: &[Body],
        dt: f64,
        drag: f64,
    ) {
        self.advance(index, body, field, snapshot, dt);
        body.apply_drag(drag);
    }
}

/// Selects the stepping strategy
///
/// Deserializes from `"euler"` or `"rk4"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegratorKind {
    /// Explicit first-order Euler
    #[default]
    Euler,
    /// Classical fourth-order Runge-Kutta
    Rk4,
}

impl IntegratorKind {
    /// Instantiate the integrator
    pub fn build(self) -> Box<dyn Integrator> {
        match self {
            IntegratorKind::Euler => Box::new(EulerIntegrator::new()),
            IntegratorKind::Rk4 => Box::new(RK4Integrator::new()),
        }
    }
}

impl fmt::Display for IntegratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegratorKind::Euler => write!(f, "euler"),
            IntegratorKind::Rk4 => write!(f, "rk4"),
        }
    }
}

impl FromStr for IntegratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euler" => Ok(IntegratorKind::Euler),
            "rk4" => Ok(IntegratorKind::Rk4),
            other => Err(format!("Unknown integrator '{}'; expected 'euler' or 'rk4'", other)),
        }
    }
}
