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
//! Radial orbit example
//!
//! A ring of bodies circling a heavy fixed anchor at the centre of the
//! domain. Prints body positions and the energy budget at regular intervals.
//!
//! # Running
//!
//! ```bash
//! # Three bodies with the default Euler integrator
//! cargo run --example radial_orbit --release
//!
//! # Six bodies with RK4 for 2000 steps
//! cargo run --example radial_orbit --release -- --bodies 6 --integrator rk4 --steps 2000
//!
//! # Start the ring at circular-orbit speed
//! cargo run --example radial_orbit --release -- --circular
//! ```

use nbody_engine::integration::IntegratorKind;
use nbody_engine::scenario::{circular_orbit_speed, RadialOrbit};
use nbody_engine::{create_simulation, SimulationParams};

struct DemoConfig {
    bodies: usize,
    integrator: IntegratorKind,
    steps: usize,
    dt: f64,
    circular: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            bodies: 3,
            integrator: IntegratorKind::Euler,
            steps: 600,
            dt: 1.0,
            circular: false,
        }
    }
}

fn parse_args() -> DemoConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = DemoConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--circular" => {
                config.circular = true;
                i += 1;
            }
            flag @ ("--bodies" | "--integrator" | "--steps" | "--dt") => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: {} requires an argument", flag);
                    std::process::exit(1);
                };
                match flag {
                    "--bodies" => match value.parse() {
                        Ok(n) => config.bodies = n,
                        Err(_) => eprintln!("Warning: Invalid body count '{}', using {}", value, config.bodies),
                    },
                    "--integrator" => match value.parse() {
                        Ok(kind) => config.integrator = kind,
                        Err(e) => eprintln!("Warning: {}, using {}", e, config.integrator),
                    },
                    "--steps" => match value.parse() {
                        Ok(n) => config.steps = n,
                        Err(_) => eprintln!("Warning: Invalid step count '{}', using {}", value, config.steps),
                    },
                    _ => match value.parse() {
                        Ok(dt) => config.dt = dt,
                        Err(_) => eprintln!("Warning: Invalid timestep '{}', using {}", value, config.dt),
                    },
                }
                i += 2;
            }
            other => {
                eprintln!("Warning: Unknown argument '{}'", other);
                i += 1;
            }
        }
    }

    config
}

fn main() {
    println!("==========================================================");
    println!("       Radial Orbit");
    println!("==========================================================");
    println!();

    let config = parse_args();
    let params = SimulationParams::default().with_integrator(config.integrator);

    let mut layout = RadialOrbit::new(config.bodies);
    if config.circular {
        layout.speed = circular_orbit_speed(params.g, layout.anchor_mass, layout.ring_radius);
    }

    let specs = layout.specs(&params.domain);
    let mut sim = match create_simulation(&specs, params) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Configuration:");
    println!("  Bodies:     {} + anchor", config.bodies);
    println!("  Integrator: {}", sim.integrator_name());
    println!("  Timestep:   {}", config.dt);
    println!("  Steps:      {}", config.steps);
    println!("  Speed:      {:.4}", layout.speed);
    println!();

    let initial_energy = sim.total_energy();
    let report_every = (config.steps / 10).max(1);

    for step in 0..config.steps {
        if let Err(e) = sim.step(config.dt) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }

        if (step + 1) % report_every == 0 {
            println!("t = {:>8.1}  E = {:>14.4}", sim.elapsed_time(), sim.total_energy());
            for (i, body) in sim.bodies().iter().enumerate().filter(|(_, b)| !b.is_fixed()) {
                let p = body.position();
                println!(
                    "    body {:>2}: ({:>8.2}, {:>8.2})  speed {:>7.4}",
                    i,
                    p.x(),
                    p.y(),
                    body.velocity().magnitude()
                );
            }
        }
    }

    let final_energy = sim.total_energy();
    println!();
    println!("Energy: {:.4} -> {:.4}", initial_energy, final_energy);
    if initial_energy != 0.0 {
        println!(
            "Relative drift: {:.3e}",
            ((final_energy - initial_energy) / initial_energy).abs()
        );
    }
}
