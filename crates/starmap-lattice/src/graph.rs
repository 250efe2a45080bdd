//! The lattice graph: node arena, candidate frontier and seeded PRNG.
//!
//! Nodes live in an arena indexed by [`NodeId`]; shredded nodes leave an
//! empty slot so ids are never reused. Cross references are always ids.
//! Coordinates are indexed for both nodes and candidate sites, which keeps
//! occupancy derivation and candidate lookup O(1).

use std::collections::{HashMap, VecDeque};
use std::fmt::Write as _;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::pick::PoolFilter;
use crate::{
    CandidateSite, Coord, Direction, DirectionSet, Error, Node, NodeId, PickMode, PickWeights,
    Result,
};

/// An undirected edge, named from the endpoint whose direction is forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub dir: Direction,
    pub to: NodeId,
    pub weight: f32,
}

/// A growable, prunable lattice of star systems.
///
/// Generation is reproducible: the graph owns its PRNG, seeded once at
/// construction and advanced only by pick operations. Two graphs built from
/// the same seed and driven through the same calls are identical.
#[derive(Debug, Clone)]
pub struct Graph {
    seed: i64,
    nodes: Vec<Option<Node>>,
    live: usize,
    by_coord: HashMap<Coord, NodeId>,
    candidates: Vec<CandidateSite>,
    candidate_index: HashMap<Coord, usize>,
    rng: StdRng,
    weights: PickWeights,
}

impl Graph {
    /// Create an empty graph with the default pick weights.
    pub fn new(seed: i64) -> Self {
        Self::with_weights(seed, PickWeights::default())
    }

    /// Create an empty graph with custom pick weights.
    pub fn with_weights(seed: i64, weights: PickWeights) -> Self {
        Self {
            seed,
            nodes: Vec::new(),
            live: 0,
            by_coord: HashMap::new(),
            candidates: Vec::new(),
            candidate_index: HashMap::new(),
            // Bit-for-bit reinterpretation keeps negative seeds distinct
            rng: StdRng::seed_from_u64(seed as u64),
            weights,
        }
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn weights(&self) -> PickWeights {
        self.weights
    }

    // ---------------------------------------------------------------------
    // Read access
    // ---------------------------------------------------------------------

    /// Live nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().flatten()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.slot()).and_then(Option::as_ref)
    }

    pub fn node_at(&self, coord: Coord) -> Option<&Node> {
        self.by_coord.get(&coord).and_then(|&id| self.node(id))
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.live
    }

    /// Whether no live nodes remain.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Every live undirected edge, once.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes().flat_map(|node| {
            Direction::FORWARD.into_iter().filter_map(move |dir| {
                node.neighbor(dir).map(|to| Edge {
                    from: node.id(),
                    dir,
                    to,
                    weight: node.edge_weight(dir),
                })
            })
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// The growth frontier. Order is stable for a given call sequence.
    pub fn candidate_sites(&self) -> &[CandidateSite] {
        &self.candidates
    }

    pub fn candidate_at(&self, coord: Coord) -> Option<&CandidateSite> {
        self.candidate_index.get(&coord).map(|&i| &self.candidates[i])
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.slot())
            .and_then(Option::as_mut)
            .ok_or(Error::NodeNotFound(id))
    }

    fn node_id_at(&self, coord: Coord) -> Result<NodeId> {
        self.by_coord.get(&coord).copied().ok_or(Error::NoNodeAt(coord))
    }

    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    /// Create the starting triangle and its three candidate sites.
    ///
    /// Nodes land at (0,0), (1,1) and (2,0), linked UR, DR and R. Growth must
    /// start from a closed 3-cycle so that every later site has an inside.
    pub fn generate_first_seed(&mut self) -> Result<()> {
        if !self.nodes.is_empty() || !self.candidates.is_empty() {
            return Err(Error::AlreadySeeded);
        }

        let a = self.spawn(Coord::ORIGIN);
        let b = self.spawn(Coord::ORIGIN.step(Direction::UpRight));
        let c = self.spawn(Coord::ORIGIN.step(Direction::Right));

        self.connect(a, Direction::UpRight, b, 0.0)?;
        self.connect(b, Direction::DownRight, c, 0.0)?;
        self.connect(a, Direction::Right, c, 0.0)?;

        self.add_candidate_site(a, Direction::UpLeft)?;
        self.add_candidate_site(b, Direction::Right)?;
        self.add_candidate_site(c, Direction::DownLeft)?;

        debug!(seed = self.seed, candidates = self.candidates.len(), "seed triangle generated");
        Ok(())
    }

    fn spawn(&mut self, coord: Coord) -> NodeId {
        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(Some(Node::new(id, coord)));
        self.by_coord.insert(coord, id);
        self.live += 1;
        id
    }

    /// Set the edge `a --dir--> b` on both endpoints.
    fn connect(&mut self, a: NodeId, dir: Direction, b: NodeId, weight: f32) -> Result<()> {
        self.node_mut(a)?.set_link(dir, b, weight);
        self.node_mut(b)?.set_link(dir.opposite(), a, weight);
        Ok(())
    }

    /// Link `node` to the live node one step away in `dir`.
    ///
    /// Drivers use this to restore an edge after a rejected deletion.
    /// Returns the id of the other endpoint.
    pub fn link(&mut self, node: NodeId, dir: Direction, weight: f32) -> Result<NodeId> {
        let from = self.node(node).ok_or(Error::NodeNotFound(node))?;
        if from.has_neighbor(dir) {
            return Err(Error::EdgeExists { node, dir });
        }
        let other = self.node_id_at(from.coord().step(dir))?;
        self.connect(node, dir, other, weight)?;
        trace!(%node, %dir, %other, "linked");
        Ok(other)
    }

    // ---------------------------------------------------------------------
    // Candidate frontier
    // ---------------------------------------------------------------------

    /// Which of the six positions around `coord` hold a live node.
    pub fn derive_occupancy(&self, coord: Coord) -> DirectionSet {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.by_coord.contains_key(&coord.step(d)))
            .collect()
    }

    /// Register the empty position one step from `from` in `dir`.
    ///
    /// A site already registered at that coordinate absorbs the new
    /// occupancy instead of being duplicated.
    fn add_candidate_site(&mut self, from: NodeId, dir: Direction) -> Result<()> {
        let origin = self.node(from).ok_or(Error::NodeNotFound(from))?.coord();
        let coord = origin.step(dir);
        if self.by_coord.contains_key(&coord) {
            return Ok(());
        }

        let occupied = self.derive_occupancy(coord);
        match self.candidate_index.get(&coord) {
            Some(&i) => self.candidates[i].merge(occupied),
            None => {
                self.candidate_index.insert(coord, self.candidates.len());
                self.candidates.push(CandidateSite::new(coord, occupied));
            }
        }
        Ok(())
    }

    fn remove_candidate(&mut self, index: usize) -> CandidateSite {
        let site = self.candidates.swap_remove(index);
        self.candidate_index.remove(&site.coord());
        if let Some(moved) = self.candidates.get(index) {
            self.candidate_index.insert(moved.coord(), index);
        }
        site
    }

    /// Re-derive the candidate sites adjacent to `coord`.
    ///
    /// Only these can change when a node appears at or vanishes from
    /// `coord`. Sites left with no occupied neighbor leave the frontier.
    fn refresh_candidates_around(&mut self, coord: Coord) {
        for around in coord.neighbors() {
            let Some(&i) = self.candidate_index.get(&around) else {
                continue;
            };
            let occupied = self.derive_occupancy(around);
            if occupied.is_empty() {
                self.remove_candidate(i);
            } else {
                self.candidates[i].set_occupied(occupied);
            }
        }
    }

    /// Re-derive every candidate site from scratch.
    ///
    /// Equivalent to the incremental refresh done by [`Graph::materialize`]
    /// and by shredding; kept for verification and for callers that want to
    /// re-sync the frontier explicitly.
    pub fn rescan_candidates(&mut self) {
        for i in (0..self.candidates.len()).rev() {
            let occupied = self.derive_occupancy(self.candidates[i].coord());
            if occupied.is_empty() {
                self.remove_candidate(i);
            } else {
                self.candidates[i].set_occupied(occupied);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Growth
    // ---------------------------------------------------------------------

    /// Turn the candidate site at `coord` into a node.
    ///
    /// The node is linked to every occupied neighbor of the site. The open
    /// directions bordering the occupied arc become new candidate sites.
    pub fn materialize(&mut self, coord: Coord) -> Result<NodeId> {
        let index = *self
            .candidate_index
            .get(&coord)
            .ok_or(Error::CandidateNotFound(coord))?;
        let site = self.candidates[index];
        if site.occupied().is_empty() {
            return Err(Error::InvariantViolation(format!(
                "candidate site at {coord} has no occupied neighbors"
            )));
        }

        let links = site
            .occupied()
            .iter()
            .map(|dir| self.node_id_at(coord.step(dir)).map(|id| (dir, id)))
            .collect::<Result<Vec<_>>>()?;

        self.remove_candidate(index);
        let id = self.spawn(coord);
        for (dir, other) in links {
            self.connect(id, dir, other, 0.0)?;
        }

        let (first_gap, last_gap) = site.frontier_gaps();
        self.refresh_candidates_around(coord);
        if let Some(dir) = first_gap {
            self.add_candidate_site(id, dir)?;
        }
        if let Some(dir) = last_gap {
            self.add_candidate_site(id, dir)?;
        }

        debug!(
            %id,
            %coord,
            degree = site.neighbor_count(),
            frontier = self.candidates.len(),
            "materialized"
        );
        Ok(id)
    }

    /// Choose the coordinate of a candidate site according to `mode`.
    pub fn pick_candidate_site(&mut self, mode: PickMode) -> Result<Coord> {
        if self.candidates.is_empty() {
            return Err(Error::EmptyPool);
        }

        let filter = PoolFilter::new(
            mode,
            self.weights,
            self.candidates.iter().map(CandidateSite::neighbor_count),
        );
        let mut pool = Vec::new();
        for site in &self.candidates {
            if filter.admits(site.neighbor_count(), &mut self.rng) {
                pool.push(site.coord());
            }
        }
        if pool.is_empty() {
            return Err(Error::EmptyPool);
        }

        let picked = pool[self.rng.gen_range(0..pool.len())];
        trace!(%mode, pool = pool.len(), %picked, "picked candidate site");
        Ok(picked)
    }

    /// A uniformly random live node.
    pub fn pick_node(&mut self) -> Result<NodeId> {
        let live: Vec<NodeId> = self.nodes().map(Node::id).collect();
        if live.is_empty() {
            return Err(Error::EmptyGraph);
        }
        Ok(live[self.rng.gen_range(0..live.len())])
    }

    /// A uniformly random live edge.
    pub fn pick_edge(&mut self) -> Result<Edge> {
        let edges: Vec<Edge> = self.edges().collect();
        if edges.is_empty() {
            return Err(Error::EmptyGraph);
        }
        Ok(edges[self.rng.gen_range(0..edges.len())])
    }

    // ---------------------------------------------------------------------
    // Pruning
    // ---------------------------------------------------------------------

    /// Remove the edge leaving `node` in `dir`.
    ///
    /// Endpoints left without edges are shredded; their ids are returned.
    pub fn delete_edge(&mut self, node: NodeId, dir: Direction) -> Result<Vec<NodeId>> {
        let other = self
            .node(node)
            .ok_or(Error::NodeNotFound(node))?
            .neighbor(dir)
            .ok_or(Error::EdgeNotFound { node, dir })?;

        self.node_mut(node)?.clear_link(dir);
        self.node_mut(other)?.clear_link(dir.opposite());

        let mut shredded = Vec::new();
        for id in [node, other] {
            if self.node(id).is_some_and(|n| n.neighbor_count() == 0) {
                self.shred(id)?;
                shredded.push(id);
            }
        }
        Ok(shredded)
    }

    /// Remove every edge of `node`, which shreds it.
    ///
    /// Returns all shredded ids: the node itself plus any neighbor whose
    /// last edge it was.
    pub fn delete_node(&mut self, node: NodeId) -> Result<Vec<NodeId>> {
        let links = self.node(node).ok_or(Error::NodeNotFound(node))?.links();
        if links.is_empty() {
            self.shred(node)?;
            return Ok(vec![node]);
        }

        let mut shredded = Vec::new();
        for dir in links.iter() {
            shredded.extend(self.delete_edge(node, dir)?);
        }
        Ok(shredded)
    }

    /// Drop a node from the live set.
    fn shred(&mut self, id: NodeId) -> Result<()> {
        let node = self
            .nodes
            .get_mut(id.slot())
            .and_then(Option::take)
            .ok_or(Error::NodeNotFound(id))?;
        self.by_coord.remove(&node.coord());
        self.live -= 1;
        self.refresh_candidates_around(node.coord());
        debug!(%id, coord = %node.coord(), live = self.live, "shredded");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Connectivity
    // ---------------------------------------------------------------------

    /// Number of connected components among live nodes.
    ///
    /// `exclude` is treated as already visited, answering "how many
    /// constellations if this node were gone" without mutating the graph.
    pub fn constellation_count(&self, exclude: Option<NodeId>) -> usize {
        let mut visited = vec![false; self.nodes.len()];
        if let Some(slot) = exclude.and_then(|id| visited.get_mut(id.slot())) {
            *slot = true;
        }

        let mut count = 0;
        let mut queue = VecDeque::new();
        for start in self.nodes() {
            if visited[start.id().slot()] {
                continue;
            }
            count += 1;
            visited[start.id().slot()] = true;
            queue.push_back(start.id());

            while let Some(id) = queue.pop_front() {
                let Some(current) = self.node(id) else {
                    continue;
                };
                for (_, next) in current.linked() {
                    if !visited[next.slot()] {
                        visited[next.slot()] = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        count
    }

    // ---------------------------------------------------------------------
    // Diagnostics
    // ---------------------------------------------------------------------

    /// Verify every structural invariant of nodes and candidate sites.
    pub fn check_invariants(&self) -> Result<()> {
        let violation = |msg: String| Err(Error::InvariantViolation(msg));

        let mut live = 0;
        for node in self.nodes() {
            live += 1;
            let id = node.id();
            if node.neighbor_count() == 0 {
                return violation(format!("node {id} is isolated"));
            }
            if self.by_coord.get(&node.coord()) != Some(&id) {
                return violation(format!("node {id} missing from coord index"));
            }
            for (dir, other_id) in node.linked() {
                let Some(other) = self.node(other_id) else {
                    return violation(format!("node {id} links {dir} to dead node {other_id}"));
                };
                if other.coord() != node.coord().step(dir) {
                    return violation(format!("node {id} links {dir} to {other_id} at {}", other.coord()));
                }
                if other.neighbor(dir.opposite()) != Some(id) {
                    return violation(format!("edge {id} {dir} {other_id} is one-sided"));
                }
                if other.edge_weight(dir.opposite()) != node.edge_weight(dir) {
                    return violation(format!("edge {id} {dir} {other_id} has mismatched weights"));
                }
            }
        }
        if live != self.live || self.by_coord.len() != self.live {
            return violation(format!(
                "{} live nodes, counter {}, {} indexed coords",
                live,
                self.live,
                self.by_coord.len()
            ));
        }

        if self.candidate_index.len() != self.candidates.len() {
            return violation("duplicate candidate coordinates".to_string());
        }
        for (i, site) in self.candidates.iter().enumerate() {
            let coord = site.coord();
            if self.candidate_index.get(&coord) != Some(&i) {
                return violation(format!("candidate {coord} missing from index"));
            }
            if self.by_coord.contains_key(&coord) {
                return violation(format!("candidate {coord} overlaps a node"));
            }
            let actual = self.derive_occupancy(coord);
            if site.occupied() != actual {
                return violation(format!(
                    "candidate {coord} records {} but {} is occupied",
                    site.occupied(),
                    actual
                ));
            }
            if actual.is_empty() {
                return violation(format!("candidate {coord} borders no node"));
            }
        }
        Ok(())
    }

    /// Human-readable listing of nodes and, optionally, candidate sites.
    pub fn dump(&self, include_candidates: bool) -> String {
        let mut out = String::from("===== GRAPH =====\n");
        for node in self.nodes() {
            let _ = writeln!(out, "{node}");
        }
        if include_candidates {
            for site in &self.candidates {
                let _ = writeln!(out, "{site}");
            }
        }
        out.push_str("=== END GRAPH ===\n");
        out
    }
}
