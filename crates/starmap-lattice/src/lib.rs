//! Starmap Lattice
//!
//! Procedural growth and pruning of a triangular lattice of star systems.
//!
//! # Coordinate Scheme
//!
//! Sites live on a doubled-coordinate grid: the six lattice directions have
//! deltas UR=(1,1), R=(2,0), DR=(1,-1), DL=(-1,-1), L=(-2,0), UL=(-1,1).
//! Every delta stays integral while the adjacency keeps the topology of a
//! hexagonal tiling, so each site has exactly six lattice neighbors.
//!
//! # Growth
//!
//! A [`Graph`] starts from a closed triangle of three nodes. The empty
//! lattice positions bordering the grown region are tracked as
//! [`CandidateSite`]s, each carrying a bitset of which surrounding positions
//! already hold nodes. A [`PickMode`] chooses the next site by that
//! occupancy, favoring compact (high count) or sprawling (low count) growth,
//! and [`Graph::materialize`] turns the site into a node wired to all of its
//! occupied neighbors.
//!
//! # Pruning
//!
//! Edges and nodes are removed with [`Graph::delete_edge`] and
//! [`Graph::delete_node`]. Nodes left without edges are shredded immediately.
//! [`Graph::constellation_count`] counts connected components without
//! mutating the graph so that callers can reject deletions that would rift
//! the lattice into too many constellations.

mod candidate;
mod coord;
mod direction;
mod error;
mod graph;
mod node;
mod pick;

pub use candidate::CandidateSite;
pub use coord::Coord;
pub use direction::{Direction, DirectionSet};
pub use error::{Error, Result};
pub use graph::{Edge, Graph};
pub use node::{Node, NodeId};
pub use pick::{weighted01, PickMode, PickWeights};

/// Lattice neighbors per site (fixed degree of the triangular lattice).
pub const LATTICE_DEGREE: usize = 6;

/// Nodes created by [`Graph::generate_first_seed`].
pub const SEED_NODES: usize = 3;

// Opposite directions are half a turn apart
const _: () = assert!(LATTICE_DEGREE % 2 == 0);
