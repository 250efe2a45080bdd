//! Read-only world map handed to the rendering layer.

use serde::{Deserialize, Serialize};
use starmap_lattice::{Coord, Graph, NodeId};

use crate::error::Result;

/// World units per lattice unit along x and y.
pub const WORLD_SCALE: [f32; 2] = [10.0, 20.0];

/// A star system placed in world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub id: NodeId,
    pub coord: Coord,
    pub position: [f32; 2],
}

/// A hyperlane between two star systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lane {
    pub from: NodeId,
    pub to: NodeId,
}

/// Snapshot of a finished graph: every live node once, every edge once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldMap {
    pub seed: i64,
    pub stars: Vec<Star>,
    pub lanes: Vec<Lane>,
}

impl WorldMap {
    pub fn from_graph(graph: &Graph) -> Self {
        let stars = graph
            .nodes()
            .map(|node| Star {
                id: node.id(),
                coord: node.coord(),
                position: world_position(node.coord()),
            })
            .collect();
        let lanes = graph
            .edges()
            .map(|edge| Lane {
                from: edge.from,
                to: edge.to,
            })
            .collect();

        Self {
            seed: graph.seed(),
            stars,
            lanes,
        }
    }

    pub fn star(&self, id: NodeId) -> Option<&Star> {
        self.stars.iter().find(|s| s.id == id)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// World-space position of a lattice coordinate.
pub fn world_position(coord: Coord) -> [f32; 2] {
    [
        WORLD_SCALE[0] * coord.x as f32,
        WORLD_SCALE[1] * coord.y as f32,
    ]
}
