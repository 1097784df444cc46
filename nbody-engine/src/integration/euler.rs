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
//! Explicit (forward) Euler integrator
//!
//! ```text
//! x(t + dt) = x(t) + v(t) * dt
//! v(t + dt) = v(t) ⊕ g * dt ⊕ a(x(t)) * dt
//! ```
//!
//! where `⊕` is polar composition, `g` the uniform gravity field and `a` the
//! pairwise pull cached at the start of the step. First-order accurate with
//! a single force evaluation.

use crate::body::Body;
use crate::gravity::ForceField;
use super::Integrator;

/// Explicit Euler integrator
///
/// # Example
///
/// ```
/// use nbody_engine::integration::{EulerIntegrator, Integrator};
///
/// let integrator = EulerIntegrator::new();
/// assert_eq!(integrator.name(), "Explicit Euler");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerIntegrator;

impl EulerIntegrator {
    /// Create a new Euler integrator
    pub fn new() -> Self {
        EulerIntegrator
    }
}

impl Integrator for EulerIntegrator {
    fn name(&self) -> &str {
        "Explicit Euler"
    }

    fn force_evaluations(&self) -> usize {
        1
    }

    fn advance(&self, index: usize, body: &mut Body, field: &ForceField, _snapshot: &[Body], dt: f64) {
        let velocity = body.velocity();
        let new_position = body.position().offset(velocity, dt);
        let new_velocity = velocity
            .compose(field.external().scaled(dt))
            .compose(body.pending_force().scaled(dt));

        if !new_position.is_valid() || !new_velocity.is_valid() {
            log::warn!("Invalid state after Euler update for body {}, keeping previous state", index);
            return;
        }

        body.set_position(new_position);
        body.set_velocity(new_velocity);
    }
}
