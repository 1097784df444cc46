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
//! Brute-force pairwise gravitational field
//!
//! For a body at position `p`, every other body `o` contributes a pull of
//! magnitude
//!
//! **a = G * mₒ / d²**
//!
//! directed from `p` toward `o`, where `d` is their separation. This is the
//! acceleration of the target body, not a force: the target's own mass does
//! not appear, so in a two-body system the two bodies see `G * m₂ / d²` and
//! `G * m₁ / d²` respectively. Contributions are summed with
//! [`Vector2Polar::compose`] starting from the zero vector.
//!
//! # Close encounters
//!
//! Bodies are points and may pass through each other. The separation used in
//! the magnitude is clamped to at least `min_distance` so a near-coincidence
//! produces a large but finite pull.
//!
//! The clamp fixes the magnitude but not the direction, and an exactly
//! coincident pair has no direction to clamp along. That one case is an
//! intentional exception to the clamp: the pair contributes the zero vector
//! for that evaluation instead of a clamped pull. Any nonzero separation,
//! however small, still gets the clamped magnitude along its true heading.
//!
//! # Cost
//!
//! Each evaluation visits every other body, so a full step is O(n²). That is
//! fine for the tens of bodies this engine targets.

use crate::body::Body;
use crate::vector::{Position, Vector2Polar};

/// Default lower bound on pair separation, in domain units
pub const DEFAULT_MIN_DISTANCE: f64 = 1.0;

/// Gravitational field produced by a set of bodies plus a uniform pull
///
/// # Example
///
/// ```
/// use nbody_engine::body::Body;
/// use nbody_engine::gravity::ForceField;
/// use nbody_engine::vector::{Position, Vector2Polar};
///
/// let field = ForceField::new(1.0, Vector2Polar::zero());
/// let bodies = vec![
///     Body::new(Position::new(0.0, 0.0), 1.0),
///     Body::new(Position::new(10.0, 0.0), 2.0),
/// ];
/// let pull = field.net_force_on(0, bodies[0].position(), &bodies);
/// assert!((pull.magnitude() - 4.0 / 100.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ForceField {
    g_constant: f64,
    external: Vector2Polar,
    min_distance: f64,
}

impl ForceField {
    /// Create a field with the given gravitational constant and uniform pull
    ///
    /// Parameters are expected to be validated by the caller; see
    /// [`SimulationParams::validate`](crate::config::SimulationParams::validate).
    pub fn new(g_constant: f64, external: Vector2Polar) -> Self {
        ForceField {
            g_constant,
            external,
            min_distance: DEFAULT_MIN_DISTANCE,
        }
    }

    /// Set the separation clamp used for close encounters
    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Gravitational constant
    pub fn g_constant(&self) -> f64 {
        self.g_constant
    }

    /// Uniform pull applied to every free body
    pub fn external(&self) -> Vector2Polar {
        self.external
    }

    /// Separation clamp
    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Pull on one body from a single source
    ///
    /// Returns `None` for a coincident pair or a non-finite result.
    fn pairwise(&self, at: Position, source: &Body) -> Option<Vector2Polar> {
        let displacement = Vector2Polar::from_displacement(at, source.position());
        if displacement.magnitude() == 0.0 {
            return None;
        }

        let distance = if displacement.magnitude() < self.min_distance {
            log::trace!(
                "clamping separation {:.3e} to {:.3e}",
                displacement.magnitude(),
                self.min_distance
            );
            self.min_distance
        } else {
            displacement.magnitude()
        };

        let magnitude = self.g_constant * source.mass() / (distance * distance);
        if !magnitude.is_finite() {
            log::warn!("dropping non-finite gravitational contribution ({})", magnitude);
            return None;
        }

        Some(displacement.with_magnitude(magnitude))
    }

    /// Net pairwise pull on body `index` if it were at `at`
    ///
    /// `bodies` supplies the sources; the entry at `index` is skipped by
    /// position in the slice, never by comparing field values, so two bodies
    /// in identical states still attract each other. `at` may differ from
    /// `bodies[index].position()` when an integrator samples a trial state.
    /// The uniform pull is not included.
    ///
    /// Separations below `min_distance` are clamped, except that a source at
    /// exactly `at` is skipped rather than clamped, since the pull would have
    /// no heading. See the module docs on close encounters.
    pub fn net_force_on(&self, index: usize, at: Position, bodies: &[Body]) -> Vector2Polar {
        bodies
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .filter_map(|(_, other)| self.pairwise(at, other))
            .fold(Vector2Polar::zero(), Vector2Polar::compose)
    }

    /// Total acceleration: the uniform pull composed with `pairwise`
    pub fn acceleration(&self, pairwise: Vector2Polar) -> Vector2Polar {
        self.external.compose(pairwise)
    }

    /// Gravitational potential energy of the whole set, `-Σ G mᵢ mⱼ / dᵢⱼ`
    ///
    /// Uses the same separation clamp as the force so the two stay consistent.
    /// Coincident pairs are skipped.
    pub fn potential_energy(&self, bodies: &[Body]) -> f64 {
        let mut total = 0.0;
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                let d = a.position().distance_to(&b.position());
                if d == 0.0 {
                    continue;
                }
                total -= self.g_constant * a.mass() * b.mass() / d.max(self.min_distance);
            }
        }
        total
    }
}
