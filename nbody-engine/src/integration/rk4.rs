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
//! Runge-Kutta 4th order (RK4) integrator implementation
//!
//! The RK4 method is a classical explicit integrator that provides fourth-order
//! accuracy for smooth ordinary differential equations.
//!
//! # Algorithm
//!
//! For our second-order system (position and polar velocity), with `a(x)` the
//! total acceleration at position `x`:
//!
//! ```text
//! v1 = v0                    a1 = a(x0)           (cached pending force)
//! v2 = v0 ⊕ a1*dt/2          a2 = a(x0 + v1*dt/2)
//! v3 = v0 ⊕ a2*dt/2          a3 = a(x0 + v2*dt/2)
//! v4 = v0 ⊕ a3*dt            a4 = a(x0 + v3*dt)
//!
//! x(t + dt) = x0 + (v1 + 2*v2 + 2*v3 + v4) * dt/6     (per Cartesian axis)
//! v(t + dt) = v0 ⊕ a1*dt/6 ⊕ a2*dt/3 ⊕ a3*dt/3 ⊕ a4*dt/6
//! ```
//!
//! Only the integrated body moves to its trial positions. Every other body is
//! read from the start-of-step snapshot, so the sub-stages are never visible
//! to anyone else.
//!
//! # Properties
//!
//! - **Fourth-order accurate**: Local error O(dt⁵), global error O(dt⁴)
//! - **Not symplectic**: Energy may drift over long simulations
//! - **Four evaluations per step**: Four times the cost of Euler
//!
//! # References
//!
//! - Butcher, J. C. (2016). Numerical Methods for Ordinary Differential Equations
//!   (3rd ed.). Wiley. Chapter 3.
//! - Press, W. H., Teukolsky, S. A., Vetterling, W. T., & Flannery, B. P. (2007).
//!   Numerical Recipes: The Art of Scientific Computing (3rd ed.). Cambridge
//!   University Press. Section 17.1.

use crate::body::Body;
use crate::gravity::ForceField;
use crate::vector::{Position, Vector2Polar};
use super::Integrator;

/// Runge-Kutta 4th order integrator
///
/// # Example
///
/// ```
/// use nbody_engine::integration::{RK4Integrator, Integrator};
///
/// let integrator = RK4Integrator::new();
/// assert_eq!(integrator.name(), "Runge-Kutta 4");
/// assert_eq!(integrator.force_evaluations(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RK4Integrator;

impl RK4Integrator {
    /// Create a new RK4 integrator
    pub fn new() -> Self {
        RK4Integrator
    }

    /// Total acceleration on body `index` at a trial position
    fn sample(index: usize, at: Position, field: &ForceField, snapshot: &[Body]) -> Vector2Polar {
        field.acceleration(field.net_force_on(index, at, snapshot))
    }
}

impl Integrator for RK4Integrator {
    fn name(&self) -> &str {
        "Runge-Kutta 4"
    }

    fn force_evaluations(&self) -> usize {
        4
    }

    fn advance(&self, index: usize, body: &mut Body, field: &ForceField, snapshot: &[Body], dt: f64) {
        let dt_2 = dt * 0.5;
        let dt_3 = dt / 3.0;
        let dt_6 = dt / 6.0;

        let x0 = body.position();
        let v0 = body.velocity();

        // Stage 1: current state
        let v1 = v0;
        let a1 = field.acceleration(body.pending_force());

        // Stage 2: half step along stage 1
        let x2 = x0.offset(v1, dt_2);
        let v2 = v0.compose(a1.scaled(dt_2));
        let a2 = Self::sample(index, x2, field, snapshot);

        // Stage 3: half step along stage 2
        let x3 = x0.offset(v2, dt_2);
        let v3 = v0.compose(a2.scaled(dt_2));
        let a3 = Self::sample(index, x3, field, snapshot);

        // Stage 4: full step along stage 3
        let x4 = x0.offset(v3, dt);
        let v4 = v0.compose(a3.scaled(dt));
        let a4 = Self::sample(index, x4, field, snapshot);

        let new_position = Position::new(
            x0.x() + (v1.x() + 2.0 * v2.x() + 2.0 * v3.x() + v4.x()) * dt_6,
            x0.y() + (v1.y() + 2.0 * v2.y() + 2.0 * v3.y() + v4.y()) * dt_6,
        );
        let new_velocity = v0
            .compose(a1.scaled(dt_6))
            .compose(a2.scaled(dt_3))
            .compose(a3.scaled(dt_3))
            .compose(a4.scaled(dt_6));

        if !new_position.is_valid() || !new_velocity.is_valid() {
            log::warn!("Invalid state after RK4 update for body {}, keeping previous state", index);
            return;
        }

        body.set_position(new_position);
        body.set_velocity(new_velocity);
    }
}
