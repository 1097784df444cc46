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
//! Ready-made initial conditions
//!
//! - [`RadialOrbit`]: bodies spaced evenly on a ring around a heavy fixed
//!   anchor at the domain centre, each launched tangentially.
//! - [`RandomBodies`]: free bodies with random size, position, speed and
//!   heading. Placement is driven by a seeded ChaCha generator, so the same
//!   seed always yields the same scenario.

use crate::body::{BodySpec, Domain};
use crate::error::ConfigError;
use crate::vector::Position;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

/// Speed of a circular orbit of radius `r` around mass `m`: `sqrt(G m / r)`
pub fn circular_orbit_speed(g: f64, mass: f64, r: f64) -> f64 {
    (g * mass / r).sqrt()
}

/// Ring of bodies orbiting a fixed anchor
#[derive(Debug, Clone, PartialEq)]
pub struct RadialOrbit {
    /// Number of orbiting bodies
    pub count: usize,
    /// Distance from the centre to each body
    pub ring_radius: f64,
    /// Radius of each orbiting body
    pub body_radius: f64,
    /// Initial tangential speed
    pub speed: f64,
    /// Radius of the anchor
    pub anchor_radius: f64,
    /// Mass of the anchor
    pub anchor_mass: f64,
}

impl Default for RadialOrbit {
    fn default() -> Self {
        RadialOrbit {
            count: 1,
            ring_radius: 250.0,
            body_radius: 15.0,
            speed: 4.0,
            anchor_radius: 30.0,
            anchor_mass: 9000.0,
        }
    }
}

impl RadialOrbit {
    /// `count` bodies with the default geometry
    pub fn new(count: usize) -> Self {
        RadialOrbit {
            count,
            ..RadialOrbit::default()
        }
    }

    /// Body specs: the ring in angular order, followed by the anchor
    ///
    /// Body `n` sits at angle `2πn / count` and heads a quarter turn ahead of
    /// that, i.e. along the ring.
    pub fn specs(&self, domain: &Domain) -> Vec<BodySpec> {
        let center = domain.center();
        let mut specs = Vec::with_capacity(self.count + 1);
        for n in 0..self.count {
            let theta = TAU * n as f64 / self.count as f64;
            let position = Position::new(
                center.x() + self.ring_radius * theta.cos(),
                center.y() + self.ring_radius * theta.sin(),
            );
            specs.push(BodySpec::new(position, self.body_radius).moving(self.speed, theta + FRAC_PI_2));
        }
        specs.push(BodySpec::new(center, self.anchor_radius).mass(self.anchor_mass).fixed());
        specs
    }
}

/// Randomly placed free bodies
#[derive(Debug, Clone, PartialEq)]
pub struct RandomBodies {
    /// Number of bodies
    pub count: usize,
    /// Seed for the generator
    pub seed: u64,
    /// Range of body radii
    pub radius: RangeInclusive<f64>,
    /// Range of initial speeds
    pub speed: RangeInclusive<f64>,
}

impl RandomBodies {
    /// `count` bodies with radius in `[10, 20]` and speed in `[0.3, 1]`
    pub fn new(count: usize, seed: u64) -> Self {
        RandomBodies {
            count,
            seed,
            radius: 10.0..=20.0,
            speed: 0.3..=1.0,
        }
    }

    /// Body specs, each fully inside the domain
    ///
    /// Radii are clamped so a body always fits; headings are uniform over a
    /// full turn. Fails if the domain is invalid, if the radius range is not
    /// a finite non-empty range of positive values, or if the speed range is
    /// not a finite non-empty range of non-negative values.
    pub fn specs(&self, domain: &Domain) -> Result<Vec<BodySpec>, ConfigError> {
        domain.validate()?;
        check_range("radius", &self.radius, |start| start > 0.0)?;
        check_range("speed", &self.speed, |start| start >= 0.0)?;

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let max_fit = 0.5 * domain.width.min(domain.height);

        Ok((0..self.count)
            .map(|_| {
                let radius = rng.gen_range(self.radius.clone()).min(max_fit);
                let x = rng.gen_range(radius..=domain.width - radius);
                let y = rng.gen_range(radius..=domain.height - radius);
                let speed = rng.gen_range(self.speed.clone());
                let heading = rng.gen_range(0.0..TAU);
                BodySpec::new(Position::new(x, y), radius).moving(speed, heading)
            })
            .collect())
    }
}

/// Reject ranges that `gen_range` cannot sample
fn check_range(
    field: &'static str,
    range: &RangeInclusive<f64>,
    lower_ok: impl Fn(f64) -> bool,
) -> Result<(), ConfigError> {
    let (start, end) = (*range.start(), *range.end());
    if start.is_finite() && end.is_finite() && start <= end && lower_ok(start) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { field, start, end })
    }
}
