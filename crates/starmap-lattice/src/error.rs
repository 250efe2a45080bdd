//! Error types for starmap-lattice.

use thiserror::Error;

use crate::{Coord, Direction, NodeId};

/// Result type for lattice operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while growing or pruning a lattice.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// No candidate site exists at the coordinate (stale caller state).
    #[error("no candidate site at {0}")]
    CandidateNotFound(Coord),

    /// The node has no edge in the given direction.
    #[error("node {node} has no edge towards {dir}")]
    EdgeNotFound { node: NodeId, dir: Direction },

    /// The node already has an edge in the given direction.
    #[error("node {node} already has an edge towards {dir}")]
    EdgeExists { node: NodeId, dir: Direction },

    /// No candidate sites remain to pick from.
    #[error("candidate pool is empty")]
    EmptyPool,

    /// No live nodes or edges remain to pick from.
    #[error("graph has no live nodes or edges")]
    EmptyGraph,

    /// The id does not name a live node.
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    /// No live node occupies the coordinate.
    #[error("no node at {0}")]
    NoNodeAt(Coord),

    /// The seed triangle can only be generated on an empty graph.
    #[error("graph already holds nodes or candidate sites")]
    AlreadySeeded,

    /// A structural invariant does not hold.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl Error {
    /// Whether the caller can keep driving the graph after this error.
    ///
    /// Running out of candidates or live elements just ends a phase. Every
    /// other error means the caller passed stale state or the graph is
    /// corrupt.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::EmptyPool | Error::EmptyGraph)
    }
}
