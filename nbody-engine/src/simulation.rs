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
//! Simulation driver
//!
//! Owns the bodies and advances them one timestep at a time. Each
//! [`Simulation::step`] runs three passes in a fixed order:
//!
//! 1. Copy every body into a snapshot, then compute each free body's net
//!    pull from that snapshot and cache it as the body's pending force.
//! 2. Advance each free body with the configured integrator against the same
//!    snapshot, then apply drag.
//! 3. Reflect free bodies off the domain edges.
//!
//! Because every read in passes 1 and 2 goes to the snapshot, force
//! evaluation is simultaneous: no body sees another's partially advanced
//! state, and the result does not depend on iteration order. That is what
//! makes the optional Rayon path in passes 1 and 2 produce the same bits as
//! the sequential one.
//!
//! The fixed body, if any, is never advanced or reflected but remains in the
//! snapshot as a gravity source.

use crate::body::{Body, BodySpec};
use crate::config::SimulationParams;
use crate::error::{ConfigError, StepError};
use crate::gravity::ForceField;
use crate::integration::{self, Integrator};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Body count at which the force and integration passes go parallel
#[cfg(feature = "parallel")]
pub const PARALLEL_THRESHOLD: usize = 64;

/// Validate inputs and build a simulation
///
/// Equivalent to [`Simulation::new`].
pub fn create_simulation(specs: &[BodySpec], params: SimulationParams) -> Result<Simulation, ConfigError> {
    Simulation::new(specs, params)
}

/// A running n-body simulation
///
/// # Example
///
/// ```
/// use nbody_engine::{create_simulation, BodySpec, SimulationParams};
/// use nbody_engine::vector::Position;
///
/// let specs = vec![
///     BodySpec::new(Position::new(200.0, 350.0), 10.0).moving(1.0, 1.5),
///     BodySpec::new(Position::new(350.0, 350.0), 30.0).mass(9000.0).fixed(),
/// ];
/// let mut sim = create_simulation(&specs, SimulationParams::default()).unwrap();
/// sim.step(1.0).unwrap();
/// assert_eq!(sim.bodies()[1].position(), Position::new(350.0, 350.0));
/// ```
pub struct Simulation {
    bodies: Vec<Body>,
    snapshot: Vec<Body>,
    params: SimulationParams,
    field: ForceField,
    integrator: Box<dyn Integrator>,
    fixed: Option<usize>,
    elapsed: f64,
    steps: u64,
}

impl Simulation {
    /// Validate inputs and build a simulation
    ///
    /// Rejects an empty body list, invalid bodies, invalid parameters,
    /// bodies too large to fit the domain and more than one fixed body.
    pub fn new(specs: &[BodySpec], params: SimulationParams) -> Result<Self, ConfigError> {
        params.validate()?;
        if specs.is_empty() {
            return Err(ConfigError::EmptyBodies);
        }

        let mut bodies = Vec::with_capacity(specs.len());
        let mut fixed = None;
        for (index, spec) in specs.iter().enumerate() {
            let body = spec.build(index)?;
            let diameter = 2.0 * body.radius();
            if diameter > params.domain.width || diameter > params.domain.height {
                return Err(ConfigError::BodyExceedsDomain {
                    index,
                    radius: body.radius(),
                });
            }
            if body.is_fixed() {
                if let Some(first) = fixed {
                    return Err(ConfigError::MultipleFixedBodies { first, second: index });
                }
                fixed = Some(index);
            }
            bodies.push(body);
        }

        let field = ForceField::new(params.g, params.gravity_field).with_min_distance(params.min_distance);
        let integrator = params.integrator.build();

        log::debug!(
            "created simulation: {} bodies, fixed={:?}, integrator={}, G={}, domain={}x{}",
            bodies.len(),
            fixed,
            integrator.name(),
            params.g,
            params.domain.width,
            params.domain.height
        );

        Ok(Simulation {
            snapshot: Vec::with_capacity(bodies.len()),
            bodies,
            params,
            field,
            integrator,
            fixed,
            elapsed: 0.0,
            steps: 0,
        })
    }

    /// Advance every free body by `dt`
    ///
    /// Fails without touching any state if `dt` is not positive and finite.
    pub fn step(&mut self, dt: f64) -> Result<(), StepError> {
        integration::validate_timestep(dt)?;

        self.snapshot.clear();
        self.snapshot.extend_from_slice(&self.bodies);

        if self.uses_parallel() {
            #[cfg(feature = "parallel")]
            {
                compute_forces_parallel(&mut self.bodies, &self.snapshot, &self.field);
                advance_parallel(
                    &mut self.bodies,
                    &self.snapshot,
                    &self.field,
                    self.integrator.as_ref(),
                    dt,
                    self.params.drag,
                );
            }
        } else {
            compute_forces_sequential(&mut self.bodies, &self.snapshot, &self.field);
            advance_sequential(
                &mut self.bodies,
                &self.snapshot,
                &self.field,
                self.integrator.as_ref(),
                dt,
                self.params.drag,
            );
        }

        for body in self.bodies.iter_mut().filter(|b| !b.is_fixed()) {
            body.bounce(&self.params.domain, self.params.elasticity);
        }

        self.elapsed += dt;
        self.steps += 1;
        Ok(())
    }

    /// Run `count` steps of size `dt`
    pub fn run(&mut self, dt: f64, count: usize) -> Result<(), StepError> {
        for _ in 0..count {
            self.step(dt)?;
        }
        Ok(())
    }

    /// Whether `step` fans out across the Rayon pool
    #[cfg(feature = "parallel")]
    pub fn uses_parallel(&self) -> bool {
        self.bodies.len() >= PARALLEL_THRESHOLD
    }

    /// Whether `step` fans out across the Rayon pool
    #[cfg(not(feature = "parallel"))]
    pub fn uses_parallel(&self) -> bool {
        false
    }

    /// All bodies in their stable simulation order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// A single body
    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    /// Number of bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Always false for a constructed simulation
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Index of the fixed body, if any
    pub fn fixed_index(&self) -> Option<usize> {
        self.fixed
    }

    /// Parameters the simulation was built with
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// The force field
    pub fn field(&self) -> &ForceField {
        &self.field
    }

    /// Name of the active integrator
    pub fn integrator_name(&self) -> &str {
        self.integrator.name()
    }

    /// Sum of all timesteps taken
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed
    }

    /// Number of completed steps
    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Total kinetic energy
    pub fn kinetic_energy(&self) -> f64 {
        integration::total_kinetic_energy(&self.bodies)
    }

    /// Kinetic plus pairwise potential energy
    pub fn total_energy(&self) -> f64 {
        integration::total_energy(&self.bodies, &self.field)
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("bodies", &self.bodies)
            .field("params", &self.params)
            .field("integrator", &self.integrator.name())
            .field("elapsed", &self.elapsed)
            .field("steps", &self.steps)
            .finish()
    }
}

fn compute_forces_sequential(bodies: &mut [Body], snapshot: &[Body], field: &ForceField) {
    for (index, body) in bodies.iter_mut().enumerate().filter(|(_, b)| !b.is_fixed()) {
        body.set_pending_force(field.net_force_on(index, snapshot[index].position(), snapshot));
    }
}

fn advance_sequential(
    bodies: &mut [Body],
    snapshot: &[Body],
    field: &ForceField,
    integrator: &dyn Integrator,
    dt: f64,
    drag: f64,
) {
    for (index, body) in bodies.iter_mut().enumerate().filter(|(_, b)| !b.is_fixed()) {
        integrator.step_body(index, body, field, snapshot, dt, drag);
    }
}

#[cfg(feature = "parallel")]
fn compute_forces_parallel(bodies: &mut [Body], snapshot: &[Body], field: &ForceField) {
    bodies
        .par_iter_mut()
        .enumerate()
        .filter(|(_, b)| !b.is_fixed())
        .for_each(|(index, body)| {
            body.set_pending_force(field.net_force_on(index, snapshot[index].position(), snapshot));
        });
}

#[cfg(feature = "parallel")]
fn advance_parallel(
    bodies: &mut [Body],
    snapshot: &[Body],
    field: &ForceField,
    integrator: &dyn Integrator,
    dt: f64,
    drag: f64,
) {
    bodies
        .par_iter_mut()
        .enumerate()
        .filter(|(_, b)| !b.is_fixed())
        .for_each(|(index, body)| {
            integrator.step_body(index, body, field, snapshot, dt, drag);
        });
}
