//! Starmap generator
//!
//! Generate one star map from `STARMAP_*` environment settings and print it.

use starmap_gen::{GeneratorConfig, MapGenerator};
use std::env;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: starmap-gen [summary|dump|json]";

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Logs go to stderr so json output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "starmap_gen=info,starmap_lattice=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = env::args().nth(1).unwrap_or_else(|| "summary".into());
    if !matches!(output.as_str(), "summary" | "dump" | "json") {
        eprintln!("{USAGE}");
        return Ok(ExitCode::from(2));
    }

    let config = GeneratorConfig::from_env()?;
    let mut generator = MapGenerator::new(config);
    let report = generator.run()?;

    match output.as_str() {
        "dump" => print!("{}", generator.graph().dump(true)),
        "json" => println!("{}", generator.world_map().to_json()?),
        _ => println!("{report}"),
    }

    Ok(ExitCode::SUCCESS)
}
