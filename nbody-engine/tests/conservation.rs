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
//! Integration tests verifying conservation properties for integrators

use nbody_engine::integration::IntegratorKind;
use nbody_engine::scenario::{circular_orbit_speed, RadialOrbit};
use nbody_engine::{create_simulation, BodySpec, Domain, Position, Simulation, SimulationParams};

/// Total linear momentum `Σ m v` as Cartesian components
fn momentum(sim: &Simulation) -> (f64, f64) {
    sim.bodies().iter().fold((0.0, 0.0), |(px, py), b| {
        (px + b.mass() * b.velocity().x(), py + b.mass() * b.velocity().y())
    })
}

fn orbit(kind: IntegratorKind) -> Simulation {
    let domain = Domain::new(2000.0, 2000.0);
    let layout = RadialOrbit {
        count: 1,
        speed: circular_orbit_speed(0.7, 9000.0, 250.0),
        ..RadialOrbit::default()
    };
    let params = SimulationParams::default().with_domain(domain).with_integrator(kind);
    create_simulation(&layout.specs(&domain), params).unwrap()
}

#[test]
fn test_free_particle_conserves_kinetic_energy() {
    for kind in [IntegratorKind::Euler, IntegratorKind::Rk4] {
        let specs = vec![BodySpec::new(Position::new(100.0, 100.0), 3.0).moving(1.0, 0.4)];
        let mut sim = create_simulation(&specs, SimulationParams::default().with_integrator(kind)).unwrap();
        let initial = sim.kinetic_energy();
        sim.run(1.0, 100).unwrap();
        assert!(
            (sim.kinetic_energy() - initial).abs() < 1e-9,
            "{}: kinetic energy changed from {} to {}",
            kind,
            initial,
            sim.kinetic_energy()
        );
    }
}

#[test]
fn test_rk4_energy_drift_smaller_than_euler() {
    let mut euler = orbit(IntegratorKind::Euler);
    let mut rk4 = orbit(IntegratorKind::Rk4);
    let e0 = rk4.total_energy();
    assert!((euler.total_energy() - e0).abs() < 1e-9);

    euler.run(1.0, 300).unwrap();
    rk4.run(1.0, 300).unwrap();

    let euler_drift = ((euler.total_energy() - e0) / e0).abs();
    let rk4_drift = ((rk4.total_energy() - e0) / e0).abs();

    assert!(rk4_drift < 1e-5, "RK4 relative energy drift {:.3e}", rk4_drift);
    assert!(
        euler_drift > 100.0 * rk4_drift,
        "Euler drift {:.3e} should dwarf RK4 drift {:.3e}",
        euler_drift,
        rk4_drift
    );
}

#[test]
fn test_euler_energy_grows_on_orbit() {
    // Explicit Euler spirals outward, so the bound orbit gains energy
    let mut sim = orbit(IntegratorKind::Euler);
    let e0 = sim.total_energy();
    sim.run(1.0, 100).unwrap();
    assert!(sim.total_energy() > e0);
}

#[test]
fn test_euler_conserves_pair_momentum() {
    // Accelerations are G·m_other/d², so m₁a₁ = -m₂a₂ and Euler's simultaneous
    // update preserves total momentum.
    let specs = vec![
        BodySpec::new(Position::new(300.0, 350.0), 10.0).moving(0.5, 1.0),
        BodySpec::new(Position::new(400.0, 350.0), 20.0).moving(0.5, 1.0),
    ];
    let mut sim = create_simulation(&specs, SimulationParams::default()).unwrap();
    let (px0, py0) = momentum(&sim);

    sim.run(1.0, 20).unwrap();

    let (px, py) = momentum(&sim);
    assert!((px - px0).abs() < 1e-9, "x momentum {} -> {}", px0, px);
    assert!((py - py0).abs() < 1e-9, "y momentum {} -> {}", py0, py);
}

#[test]
fn test_drag_dissipates_energy_monotonically() {
    let specs = vec![
        BodySpec::new(Position::new(300.0, 300.0), 10.0).moving(2.0, 0.0),
        BodySpec::new(Position::new(400.0, 400.0), 10.0).moving(2.0, 3.0),
    ];
    let params = SimulationParams::default().with_g(0.0).with_drag(0.95);
    let mut sim = create_simulation(&specs, params).unwrap();

    let mut previous = sim.kinetic_energy();
    for _ in 0..30 {
        sim.step(1.0).unwrap();
        let current = sim.kinetic_energy();
        assert!(current < previous);
        previous = current;
    }
}

#[test]
fn test_elastic_bounce_preserves_speed() {
    let specs = vec![BodySpec::new(Position::new(50.0, 50.0), 5.0).moving(7.0, 0.9)];
    let params = SimulationParams::default()
        .with_g(0.0)
        .with_domain(Domain::new(100.0, 100.0));
    let mut sim = create_simulation(&specs, params).unwrap();

    sim.run(1.0, 200).unwrap();
    assert!((sim.bodies()[0].velocity().magnitude() - 7.0).abs() < 1e-9);
    let p = sim.bodies()[0].position();
    assert!(p.x() >= 5.0 && p.x() <= 95.0 && p.y() >= 5.0 && p.y() <= 95.0);
}
