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
//! Tests comparing RK4 and Euler accuracy
//!
//! The orbit tests use a single body around a fixed anchor, for which the
//! equations of motion are exact (the source never moves during a step) and
//! each method shows its textbook order of convergence.

use nbody_engine::integration::IntegratorKind;
use nbody_engine::scenario::{circular_orbit_speed, RadialOrbit};
use nbody_engine::{create_simulation, BodySpec, Domain, Position, Simulation, SimulationParams};

const G: f64 = 0.7;
const ANCHOR_MASS: f64 = 9000.0;
const RING: f64 = 250.0;

/// One body on a circular orbit in a domain large enough to never bounce
fn orbit(kind: IntegratorKind) -> Simulation {
    let domain = Domain::new(2000.0, 2000.0);
    let layout = RadialOrbit {
        count: 1,
        ring_radius: RING,
        speed: circular_orbit_speed(G, ANCHOR_MASS, RING),
        anchor_mass: ANCHOR_MASS,
        ..RadialOrbit::default()
    };
    let params = SimulationParams::default()
        .with_g(G)
        .with_domain(domain)
        .with_integrator(kind);
    create_simulation(&layout.specs(&domain), params).unwrap()
}

fn position_after(kind: IntegratorKind, dt: f64, t_final: f64) -> Position {
    let mut sim = orbit(kind);
    let steps = (t_final / dt).round() as usize;
    sim.run(dt, steps).unwrap();
    sim.bodies()[0].position()
}

#[test]
fn test_single_step_agreement_is_second_order() {
    let dt = 0.01;
    let specs = vec![
        BodySpec::new(Position::new(300.0, 350.0), 10.0).moving(1.0, 0.3),
        BodySpec::new(Position::new(400.0, 350.0), 20.0).moving(0.5, 2.0),
    ];

    let mut euler = create_simulation(&specs, SimulationParams::default()).unwrap();
    let mut rk4 =
        create_simulation(&specs, SimulationParams::default().with_integrator(IntegratorKind::Rk4)).unwrap();
    euler.step(dt).unwrap();
    rk4.step(dt).unwrap();

    for (a, b) in euler.bodies().iter().zip(rk4.bodies()) {
        let dp = a.position().distance_to(&b.position());
        let dv = (a.velocity().x() - b.velocity().x()).hypot(a.velocity().y() - b.velocity().y());
        assert!(dp < dt * dt, "position difference {:.3e} exceeds dt²", dp);
        assert!(dv < dt * dt, "velocity difference {:.3e} exceeds dt²", dv);
    }
}

#[test]
fn test_methods_diverge_with_larger_steps() {
    let small = {
        let e = position_after(IntegratorKind::Euler, 0.5, 50.0);
        let r = position_after(IntegratorKind::Rk4, 0.5, 50.0);
        e.distance_to(&r)
    };
    let large = {
        let e = position_after(IntegratorKind::Euler, 2.0, 50.0);
        let r = position_after(IntegratorKind::Rk4, 2.0, 50.0);
        e.distance_to(&r)
    };
    assert!(large > small, "Euler/RK4 gap should grow with dt: {:.3e} vs {:.3e}", large, small);
}

#[test]
fn test_rk4_fourth_order_convergence() {
    let t_final = 40.0;
    let reference = position_after(IntegratorKind::Rk4, 0.05, t_final);

    let coarse = position_after(IntegratorKind::Rk4, 2.0, t_final).distance_to(&reference);
    let fine = position_after(IntegratorKind::Rk4, 1.0, t_final).distance_to(&reference);
    let ratio = coarse / fine;

    // Halving dt should cut the error by about 2⁴ = 16
    assert!(ratio > 10.0 && ratio < 24.0, "RK4 convergence ratio {:.2}", ratio);
}

#[test]
fn test_euler_first_order_convergence() {
    let t_final = 40.0;
    let reference = position_after(IntegratorKind::Rk4, 0.05, t_final);

    let coarse = position_after(IntegratorKind::Euler, 2.0, t_final).distance_to(&reference);
    let fine = position_after(IntegratorKind::Euler, 1.0, t_final).distance_to(&reference);
    let ratio = coarse / fine;

    assert!(ratio > 1.5 && ratio < 2.6, "Euler convergence ratio {:.2}", ratio);
}

#[test]
fn test_rk4_holds_circular_orbit_radius() {
    let mut euler = orbit(IntegratorKind::Euler);
    let mut rk4 = orbit(IntegratorKind::Rk4);
    let anchor = rk4.bodies()[1].position();

    // Roughly one full revolution
    euler.run(1.0, 310).unwrap();
    rk4.run(1.0, 310).unwrap();

    let euler_drift = (euler.bodies()[0].position().distance_to(&anchor) - RING).abs();
    let rk4_drift = (rk4.bodies()[0].position().distance_to(&anchor) - RING).abs();

    assert!(rk4_drift < 1e-3, "RK4 radius drift {:.3e}", rk4_drift);
    assert!(euler_drift > 100.0 * rk4_drift, "Euler {:.3e} vs RK4 {:.3e}", euler_drift, rk4_drift);
}
