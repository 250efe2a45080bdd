//! Generation presets and configuration.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use starmap_lattice::PickMode;

use crate::error::{Error, Result};

/// Preset map sizes, by number of materializations after the seed triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapSize {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Huge,
    Massive,
    Gargantuan,
}

impl MapSize {
    pub const ALL: [Self; 7] = [
        Self::Tiny,
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::Huge,
        Self::Massive,
        Self::Gargantuan,
    ];

    /// Nodes to materialize for this size.
    pub const fn node_count(self) -> usize {
        match self {
            Self::Tiny => 12,
            Self::Small => 30,
            Self::Medium => 48,
            Self::Large => 102,
            Self::Huge => 164,
            Self::Massive => 224,
            Self::Gargantuan => 428,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Huge => "huge",
            Self::Massive => "massive",
            Self::Gargantuan => "gargantuan",
        }
    }
}

/// How aggressively edges are pruned after growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    Webbed,
    Connected,
    #[default]
    Average,
    Displaced,
    Stranded,
}

impl Connectivity {
    pub const ALL: [Self; 5] = [
        Self::Webbed,
        Self::Connected,
        Self::Average,
        Self::Displaced,
        Self::Stranded,
    ];

    /// Multiplier on half the map size giving the number of edges to cut.
    pub const fn edge_deletion_coefficient(self) -> f32 {
        match self {
            Self::Webbed => 0.24,
            Self::Connected => 0.68,
            Self::Average => 1.0,
            Self::Displaced => 1.34,
            Self::Stranded => 1.78,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Webbed => "webbed",
            Self::Connected => "connected",
            Self::Average => "average",
            Self::Displaced => "displaced",
            Self::Stranded => "stranded",
        }
    }
}

macro_rules! named_enum {
    ($ty:ty, $what:literal) => {
        impl Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let lower = s.trim().to_ascii_lowercase();
                Self::ALL
                    .into_iter()
                    .find(|v| v.name() == lower)
                    .ok_or_else(|| format!(concat!("unknown ", $what, ": {}"), s))
            }
        }
    };
}

named_enum!(MapSize, "map size");
named_enum!(Connectivity, "connectivity");

/// Configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Seed for the graph PRNG (drawn at random when absent)
    pub seed: Option<i64>,
    /// Size preset
    pub size: MapSize,
    /// Pruning preset
    pub connectivity: Connectivity,
    /// Growth heuristic
    pub pick_mode: PickMode,
    /// Materializations to use instead of the size preset
    pub node_count_override: Option<usize>,
    /// Most constellations pruning may leave behind
    pub max_constellations: usize,
    /// Share of nodes to delete after edge pruning
    pub node_loss_ratio: f32,
    /// Attempts allowed per requested deletion before a phase gives up
    pub attempt_factor: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            size: MapSize::default(),
            connectivity: Connectivity::default(),
            pick_mode: PickMode::default(),
            node_count_override: None,
            max_constellations: 1,
            node_loss_ratio: 0.05,
            attempt_factor: 4,
        }
    }
}

impl GeneratorConfig {
    /// Read overrides from `STARMAP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from a key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(v) = parse("STARMAP_SEED") {
            config.seed = Some(parse_value("STARMAP_SEED", &v)?);
        }
        if let Some(v) = parse("STARMAP_SIZE") {
            config.size = parse_value("STARMAP_SIZE", &v)?;
        }
        if let Some(v) = parse("STARMAP_CONNECTIVITY") {
            config.connectivity = parse_value("STARMAP_CONNECTIVITY", &v)?;
        }
        if let Some(v) = parse("STARMAP_PICK") {
            config.pick_mode = parse_value("STARMAP_PICK", &v)?;
        }
        if let Some(v) = parse("STARMAP_NODES") {
            config.node_count_override = Some(parse_value("STARMAP_NODES", &v)?);
        }
        if let Some(v) = parse("STARMAP_MAX_CONSTELLATIONS") {
            config.max_constellations = parse_value("STARMAP_MAX_CONSTELLATIONS", &v)?;
        }
        if let Some(v) = parse("STARMAP_NODE_LOSS") {
            config.node_loss_ratio = parse_value("STARMAP_NODE_LOSS", &v)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values no run could satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.max_constellations == 0 {
            return Err(Error::InvalidConfig("max_constellations must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.node_loss_ratio) {
            return Err(Error::InvalidConfig(format!(
                "node_loss_ratio must be within [0, 1], got {}",
                self.node_loss_ratio
            )));
        }
        if self.attempt_factor == 0 {
            return Err(Error::InvalidConfig("attempt_factor must be at least 1".into()));
        }
        Ok(())
    }

    /// Nodes to materialize after the seed triangle.
    pub fn nodes_to_add(&self) -> usize {
        self.node_count_override.unwrap_or_else(|| self.size.node_count())
    }

    /// Edges to cut during pruning.
    pub fn edges_to_delete(&self) -> usize {
        (self.nodes_to_add() as f32 * 0.5 * self.connectivity.edge_deletion_coefficient()) as usize
    }

    /// Nodes to delete out of `live` remaining nodes.
    pub fn nodes_to_delete(&self, live: usize) -> usize {
        (live as f32 * self.node_loss_ratio) as usize
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::InvalidConfig(format!("{key}={value}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn preset_tables() {
        let counts: Vec<_> = MapSize::ALL.iter().map(|s| s.node_count()).collect();
        assert_eq!(counts, vec![12, 30, 48, 102, 164, 224, 428]);
        assert_eq!(Connectivity::Stranded.edge_deletion_coefficient(), 1.78);
    }

    #[test]
    fn edge_budget_uses_half_the_size() {
        let config = GeneratorConfig {
            size: MapSize::Gargantuan,
            connectivity: Connectivity::Webbed,
            ..Default::default()
        };
        // 428 * 0.5 * 0.24 = 51.36
        assert_eq!(config.edges_to_delete(), 51);

        let custom = GeneratorConfig {
            node_count_override: Some(100),
            ..Default::default()
        };
        assert_eq!(custom.nodes_to_add(), 100);
        assert_eq!(custom.edges_to_delete(), 50);
        assert_eq!(custom.nodes_to_delete(100), 5);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("Huge".parse::<MapSize>(), Ok(MapSize::Huge));
        assert_eq!("stranded".parse::<Connectivity>(), Ok(Connectivity::Stranded));
        assert!("enormous".parse::<MapSize>().is_err());
        for size in MapSize::ALL {
            assert_eq!(size.to_string().parse::<MapSize>(), Ok(size));
        }
    }

    #[test]
    fn empty_lookup_gives_defaults() {
        let config = GeneratorConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn lookup_overrides() {
        let config = GeneratorConfig::from_lookup(lookup(&[
            ("STARMAP_SEED", "-1234"),
            ("STARMAP_SIZE", "large"),
            ("STARMAP_CONNECTIVITY", "webbed"),
            ("STARMAP_PICK", "tentacular"),
            ("STARMAP_NODES", " 77 "),
            ("STARMAP_MAX_CONSTELLATIONS", "3"),
            ("STARMAP_NODE_LOSS", "0.2"),
        ]))
        .unwrap();

        assert_eq!(config.seed, Some(-1234));
        assert_eq!(config.size, MapSize::Large);
        assert_eq!(config.connectivity, Connectivity::Webbed);
        assert_eq!(config.pick_mode, PickMode::Tentacular);
        assert_eq!(config.nodes_to_add(), 77);
        assert_eq!(config.max_constellations, 3);
        assert_eq!(config.node_loss_ratio, 0.2);
    }

    #[test]
    fn bad_values_are_rejected() {
        let err = GeneratorConfig::from_lookup(lookup(&[("STARMAP_SEED", "twelve")])).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(msg) if msg.starts_with("STARMAP_SEED=twelve")));

        assert!(GeneratorConfig::from_lookup(lookup(&[("STARMAP_MAX_CONSTELLATIONS", "0")])).is_err());
        assert!(GeneratorConfig::from_lookup(lookup(&[("STARMAP_NODE_LOSS", "1.5")])).is_err());
    }
}
