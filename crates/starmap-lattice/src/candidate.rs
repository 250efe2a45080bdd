//! Candidate sites: empty lattice positions on the growth frontier.

use crate::{Coord, Direction, DirectionSet};

/// An un-materialized lattice position bordering the grown region.
///
/// `occupied` records which of the six surrounding positions currently hold
/// a live node. This is occupancy around an empty site, not edges of the
/// site itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSite {
    coord: Coord,
    occupied: DirectionSet,
}

impl CandidateSite {
    pub(crate) fn new(coord: Coord, occupied: DirectionSet) -> Self {
        Self { coord, occupied }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Directions around the site that hold a live node.
    pub fn occupied(&self) -> DirectionSet {
        self.occupied
    }

    #[inline]
    pub fn has_neighbor(&self, dir: Direction) -> bool {
        self.occupied.contains(dir)
    }

    /// Number of occupied surrounding positions, the primary pick metric.
    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.occupied.len()
    }

    /// Union another occupancy observation into this one.
    pub(crate) fn merge(&mut self, occupied: DirectionSet) {
        self.occupied = self.occupied.union(occupied);
    }

    pub(crate) fn set_occupied(&mut self, occupied: DirectionSet) {
        self.occupied = occupied;
    }

    /// The unoccupied directions bordering the occupied arc(s).
    ///
    /// Scanning the ring in order, the first gap is the unoccupied direction
    /// just before the first occupied direction that has one, and the last
    /// gap is the unoccupied direction just after the last occupied
    /// direction that has one. A fully surrounded or empty site has neither.
    pub fn frontier_gaps(&self) -> (Option<Direction>, Option<Direction>) {
        let mut first = None;
        let mut last = None;
        for dir in self.occupied.iter() {
            if !self.has_neighbor(dir.next()) {
                last = Some(dir.next());
            }
            if first.is_none() && !self.has_neighbor(dir.prev()) {
                first = Some(dir.prev());
            }
        }
        (first, last)
    }
}

impl std::fmt::Display for CandidateSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Candidate {} | {}", self.occupied, self.coord)
    }
}
