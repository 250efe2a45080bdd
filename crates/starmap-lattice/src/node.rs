//! Materialized lattice nodes.

use crate::{Coord, Direction, DirectionSet};

/// Unique node identifier.
///
/// Assigned monotonically and never reused, so live ids may have gaps after
/// pruning. The id doubles as the node's slot in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

impl NodeId {
    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A materialized star system with up to six edges.
///
/// Edges are stored as arena ids of the neighbor in each direction. The
/// graph keeps them symmetric: if this node links to B in `dir`, B links back
/// in `dir.opposite()` and sits at `coord + dir.delta()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    coord: Coord,
    neighbors: [Option<NodeId>; 6],
    edge_weights: [f32; 6],
}

impl Node {
    pub(crate) fn new(id: NodeId, coord: Coord) -> Self {
        Self {
            id,
            coord,
            neighbors: [None; 6],
            edge_weights: [0.0; 6],
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub fn has_neighbor(&self, dir: Direction) -> bool {
        self.neighbors[dir.index()].is_some()
    }

    /// Neighbor id in `dir`, if linked.
    #[inline]
    pub fn neighbor(&self, dir: Direction) -> Option<NodeId> {
        self.neighbors[dir.index()]
    }

    /// Weight of the edge in `dir` (0 when unlinked).
    pub fn edge_weight(&self, dir: Direction) -> f32 {
        self.edge_weights[dir.index()]
    }

    /// Directions with an edge.
    pub fn links(&self) -> DirectionSet {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.has_neighbor(d))
            .collect()
    }

    pub fn neighbor_count(&self) -> usize {
        self.neighbors.iter().filter(|n| n.is_some()).count()
    }

    /// Linked neighbors with their directions, in ring order.
    pub fn linked(&self) -> impl Iterator<Item = (Direction, NodeId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbor(d).map(|id| (d, id)))
    }

    pub(crate) fn set_link(&mut self, dir: Direction, other: NodeId, weight: f32) {
        self.neighbors[dir.index()] = Some(other);
        self.edge_weights[dir.index()] = weight;
    }

    pub(crate) fn clear_link(&mut self, dir: Direction) {
        self.neighbors[dir.index()] = None;
        self.edge_weights[dir.index()] = 0.0;
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node {} | ", self.id)?;
        for (dir, other) in self.linked() {
            write!(f, "{}: {}, ", dir, other)?;
        }
        write!(f, "| {}", self.coord)
    }
}
