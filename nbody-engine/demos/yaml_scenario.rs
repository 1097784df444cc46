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
//! YAML scenario example
//!
//! Loads a scenario from a YAML file (or a built-in one when no path is
//! given), runs it and prints the final state.
//!
//! # Running
//!
//! ```bash
//! cargo run --example yaml_scenario
//! cargo run --example yaml_scenario -- path/to/scenario.yaml
//! ```

use nbody_engine::ScenarioConfig;
use std::fs::File;

const BUILTIN: &str = r#"
params:
  g: 0.7
  drag: 1.0
  elasticity: 0.9
  integrator: rk4
  domain:
    width: 700.0
    height: 700.0
bodies:
  - position: { x: 350.0, y: 350.0 }
    radius: 30.0
    mass: 9000.0
    fixed: true
  - position: { x: 600.0, y: 350.0 }
    radius: 15.0
    speed: 4.0
    heading: 1.5707963267948966
  - position: { x: 100.0, y: 350.0 }
    radius: 10.0
    speed: 4.0
    heading: -1.5707963267948966
"#;

fn main() {
    println!("YAML Scenario");
    println!("=============\n");

    let loaded = match std::env::args().nth(1) {
        Some(path) => match File::open(&path) {
            Ok(file) => {
                println!("Loading {}", path);
                ScenarioConfig::from_reader(file)
            }
            Err(e) => {
                eprintln!("Error: cannot open {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            println!("No path given, using the built-in scenario");
            ScenarioConfig::from_yaml_str(BUILTIN)
        }
    };

    let mut sim = match loaded.and_then(|scenario| scenario.build()) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("{:?}\n", sim);

    if let Err(e) = sim.run(1.0, 500) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!("After {} steps (t = {:.1}):", sim.step_count(), sim.elapsed_time());
    for (i, body) in sim.bodies().iter().enumerate() {
        let p = body.position();
        println!(
            "  body {}{}: ({:.2}, {:.2}) speed {:.4}",
            i,
            if body.is_fixed() { " [fixed]" } else { "" },
            p.x(),
            p.y(),
            body.velocity().magnitude()
        );
    }
}
