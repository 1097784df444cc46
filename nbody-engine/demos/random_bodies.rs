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
//! Random bodies example
//!
//! Scatters seeded random bodies through the domain and lets them attract
//! each other. The same seed always produces the same run.
//!
//! # Running
//!
//! ```bash
//! cargo run --example random_bodies --release -- 100 42
//! ```

use nbody_engine::scenario::RandomBodies;
use nbody_engine::{create_simulation, Domain, SimulationParams};
use std::time::Instant;

fn main() {
    println!("Random Bodies");
    println!("=============\n");

    let args: Vec<String> = std::env::args().collect();
    let count = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(50);
    let seed = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1);

    let params = SimulationParams::default()
        .with_domain(Domain::new(1200.0, 1200.0))
        .with_drag(0.999)
        .with_elasticity(0.8);
    let built = RandomBodies::new(count, seed)
        .specs(&params.domain)
        .and_then(|specs| create_simulation(&specs, params));

    let mut sim = match built {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Bodies: {}  seed: {}  parallel: {}", sim.len(), seed, sim.uses_parallel());
    println!("Initial kinetic energy: {:.4}\n", sim.kinetic_energy());

    let start = Instant::now();
    for round in 1..=5 {
        if let Err(e) = sim.run(1.0, 200) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        let fastest = sim
            .bodies()
            .iter()
            .map(|b| b.velocity().magnitude())
            .fold(0.0, f64::max);
        println!(
            "  after {:>4} steps: KE = {:>12.4}  fastest = {:>8.4}",
            round * 200,
            sim.kinetic_energy(),
            fastest
        );
    }

    let elapsed = start.elapsed();
    println!(
        "\n{} steps in {:.2?} ({:.1} steps/s)",
        sim.step_count(),
        elapsed,
        sim.step_count() as f64 / elapsed.as_secs_f64()
    );
}
