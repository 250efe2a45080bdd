//! Grow, then prune, a star map under a rifting budget.
//!
//! The lattice itself has no notion of an acceptable number of
//! constellations. This driver makes every deletion speculative: an edge cut
//! that rifts the map past the budget is re-linked, and a node whose removal
//! would do the same is skipped.

use rand::Rng;
use serde::{Deserialize, Serialize};
use starmap_lattice::Graph;
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::world::WorldMap;

/// Seeds drawn when the config leaves the seed open.
const RANDOM_SEED_RANGE: std::ops::Range<i64> = -100_000..100_000;

/// Outcome of one pruning phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneReport {
    /// Deletions the phase aimed for
    pub requested: usize,
    /// Deletions that were kept
    pub removed: usize,
    /// Deletions rolled back or skipped for rifting
    pub rejected: usize,
    /// Nodes shredded as a consequence of kept deletions
    pub shredded: usize,
}

impl PruneReport {
    fn new(requested: usize) -> Self {
        Self {
            requested,
            ..Default::default()
        }
    }
}

/// Outcome of a full generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: i64,
    pub grown: usize,
    pub edge_losses: PruneReport,
    pub node_losses: PruneReport,
    pub node_count: usize,
    pub edge_count: usize,
    pub constellations: usize,
}

impl std::fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Seed: {}", self.seed)?;
        writeln!(f, "  Grown: {} nodes", self.grown)?;
        writeln!(
            f,
            "  Edges lost: {}/{} ({} rejected, {} shredded)",
            self.edge_losses.removed,
            self.edge_losses.requested,
            self.edge_losses.rejected,
            self.edge_losses.shredded
        )?;
        writeln!(
            f,
            "  Nodes lost: {}/{} ({} rejected, {} shredded)",
            self.node_losses.removed,
            self.node_losses.requested,
            self.node_losses.rejected,
            self.node_losses.shredded
        )?;
        writeln!(f, "  Systems: {}", self.node_count)?;
        writeln!(f, "  Lanes: {}", self.edge_count)?;
        write!(f, "  Constellations: {}", self.constellations)
    }
}

/// Drives a [`Graph`] through growth and pruning.
pub struct MapGenerator {
    config: GeneratorConfig,
    graph: Graph,
}

impl MapGenerator {
    /// Create a generator. An open seed is drawn from thread randomness.
    pub fn new(config: GeneratorConfig) -> Self {
        let seed = config
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen_range(RANDOM_SEED_RANGE));
        info!(seed, size = %config.size, pick = %config.pick_mode, "graph created");
        Self {
            config,
            graph: Graph::new(seed),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn seed(&self) -> i64 {
        self.graph.seed()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Seed triangle plus the configured number of materializations.
    ///
    /// Returns how many nodes were grown; stops early if the frontier
    /// empties.
    pub fn setup_nodes(&mut self) -> Result<usize> {
        self.graph.generate_first_seed()?;

        let target = self.config.nodes_to_add();
        let mut grown = 0;
        while grown < target {
            let coord = match self.graph.pick_candidate_site(self.config.pick_mode) {
                Ok(coord) => coord,
                Err(e) if e.is_recoverable() => {
                    warn!(grown, target, "frontier exhausted before target size");
                    break;
                }
                Err(e) => return Err(e.into()),
            };
            self.graph.materialize(coord)?;
            grown += 1;
        }

        info!(grown, nodes = self.graph.node_count(), "growth complete");
        Ok(grown)
    }

    /// Cut random edges, rolling back any cut that rifts past the budget.
    pub fn lose_edges(&mut self) -> Result<PruneReport> {
        let mut report = PruneReport::new(self.config.edges_to_delete());
        let max = self.config.max_constellations;
        let mut current = self.graph.constellation_count(None);

        let attempts = report.requested * self.config.attempt_factor;
        for _ in 0..attempts {
            if report.removed == report.requested {
                break;
            }
            let edge = match self.graph.pick_edge() {
                Ok(edge) => edge,
                Err(e) if e.is_recoverable() => break,
                Err(e) => return Err(e.into()),
            };

            let shredded = self.graph.delete_edge(edge.from, edge.dir)?;
            let after = self.graph.constellation_count(None);
            if after > current && after > max {
                // A split with both halves alive; put the edge back
                self.graph.link(edge.from, edge.dir, edge.weight)?;
                report.rejected += 1;
                debug!(from = %edge.from, dir = %edge.dir, after, "edge cut rolled back");
                continue;
            }

            report.removed += 1;
            report.shredded += shredded.len();
            current = after;
        }

        info!(
            removed = report.removed,
            requested = report.requested,
            rejected = report.rejected,
            constellations = current,
            "edge losses applied"
        );
        Ok(report)
    }

    /// Delete random nodes, skipping any whose loss rifts past the budget.
    pub fn lose_nodes(&mut self) -> Result<PruneReport> {
        let mut report =
            PruneReport::new(self.config.nodes_to_delete(self.graph.node_count()));
        let max = self.config.max_constellations;
        let mut current = self.graph.constellation_count(None);

        let attempts = report.requested * self.config.attempt_factor;
        for _ in 0..attempts {
            if report.removed == report.requested {
                break;
            }
            let node = match self.graph.pick_node() {
                Ok(node) => node,
                Err(e) if e.is_recoverable() => break,
                Err(e) => return Err(e.into()),
            };

            let projected = self.graph.constellation_count(Some(node));
            if projected > current && projected > max {
                report.rejected += 1;
                debug!(%node, projected, "node loss skipped");
                continue;
            }

            report.shredded += self.graph.delete_node(node)?.len().saturating_sub(1);
            report.removed += 1;
            current = self.graph.constellation_count(None);
        }

        info!(
            removed = report.removed,
            requested = report.requested,
            rejected = report.rejected,
            constellations = current,
            "node losses applied"
        );
        Ok(report)
    }

    /// Grow, lose edges, lose nodes.
    pub fn run(&mut self) -> Result<GenerationReport> {
        let grown = self.setup_nodes()?;
        let edge_losses = self.lose_edges()?;
        let node_losses = self.lose_nodes()?;

        Ok(GenerationReport {
            seed: self.seed(),
            grown,
            edge_losses,
            node_losses,
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            constellations: self.graph.constellation_count(None),
        })
    }

    /// Snapshot of the current graph for world building.
    pub fn world_map(&self) -> WorldMap {
        WorldMap::from_graph(&self.graph)
    }
}
