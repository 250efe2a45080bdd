//! Starmap Gen
//!
//! Turns a [`starmap_lattice::Graph`] into a finished star map.
//!
//! A [`MapGenerator`] grows the lattice to a preset size, then prunes edges
//! and nodes while keeping the number of constellations within budget. The
//! result can be exported as a [`WorldMap`] for rendering.
//!
//! ```no_run
//! use starmap_gen::{GeneratorConfig, MapGenerator};
//!
//! let mut generator = MapGenerator::new(GeneratorConfig::from_env()?);
//! let report = generator.run()?;
//! println!("{report}");
//! # Ok::<(), starmap_gen::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod world;

pub use config::{Connectivity, GeneratorConfig, MapSize};
pub use error::{Error, Result};
pub use generator::{GenerationReport, MapGenerator, PruneReport};
pub use world::{Lane, Star, WorldMap, WORLD_SCALE};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_errors_convert() {
        let err: Error = starmap_lattice::Error::EmptyPool.into();
        assert!(matches!(err, Error::Lattice(starmap_lattice::Error::EmptyPool)));
        assert!(err.to_string().starts_with("lattice error:"));
    }

    #[test]
    fn world_map_matches_final_graph() {
        let mut generator = MapGenerator::new(GeneratorConfig {
            seed: Some(12),
            size: MapSize::Small,
            ..Default::default()
        });
        let report = generator.run().unwrap();
        let map = generator.world_map();

        assert_eq!(map.seed, 12);
        assert_eq!(map.stars.len(), report.node_count);
        assert_eq!(map.lanes.len(), report.edge_count);
    }
}
