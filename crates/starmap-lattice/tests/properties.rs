//! Property tests for lattice growth and pruning.

use std::collections::HashSet;

use proptest::prelude::*;
use starmap_lattice::{Coord, Direction, Graph, NodeId, PickMode};

fn pick_mode() -> impl Strategy<Value = PickMode> {
    prop::sample::select(PickMode::ALL.to_vec())
}

fn grown(seed: i64, mode: PickMode, count: usize) -> Graph {
    let mut graph = Graph::new(seed);
    graph.generate_first_seed().unwrap();
    for _ in 0..count {
        let coord = graph.pick_candidate_site(mode).unwrap();
        graph.materialize(coord).unwrap();
    }
    graph
}

fn assert_symmetric(graph: &Graph) {
    for node in graph.nodes() {
        for (dir, other_id) in node.linked() {
            let other = graph.node(other_id).expect("linked node is live");
            assert_eq!(other.coord(), node.coord() + dir.delta());
            assert_eq!(other.neighbor(dir.opposite()), Some(node.id()));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn same_seed_same_lattice(seed in any::<i64>(), mode in pick_mode(), count in 0usize..60) {
        let a = grown(seed, mode, count);
        let b = grown(seed, mode, count);
        let layout = |g: &Graph| g.nodes().map(|n| (n.id(), n.coord(), n.links())).collect::<Vec<_>>();
        prop_assert_eq!(layout(&a), layout(&b));
        prop_assert_eq!(a.candidate_sites(), b.candidate_sites());
    }

    #[test]
    fn growth_keeps_invariants(seed in any::<i64>(), mode in pick_mode(), count in 0usize..80) {
        let graph = grown(seed, mode, count);
        prop_assert_eq!(graph.node_count(), count + 3);
        prop_assert_eq!(graph.constellation_count(None), 1);
        assert_symmetric(&graph);

        let mut coords = HashSet::new();
        for node in graph.nodes() {
            prop_assert!(node.neighbor_count() >= 1);
            prop_assert!(node.coord().is_lattice_point());
            prop_assert!(coords.insert(node.coord()));
        }
        let mut sites = HashSet::new();
        for site in graph.candidate_sites() {
            prop_assert!(!coords.contains(&site.coord()));
            prop_assert!(sites.insert(site.coord()));
        }
        prop_assert!(graph.check_invariants().is_ok());
    }

    #[test]
    fn materialize_round_trip(seed in any::<i64>(), mode in pick_mode(), count in 0usize..40) {
        let mut graph = grown(seed, mode, count);
        let coord = graph.pick_candidate_site(mode).unwrap();
        let expected = graph.candidate_at(coord).unwrap().neighbor_count();
        let before = graph.node_count();

        let id = graph.materialize(coord).unwrap();

        prop_assert!(graph.candidate_at(coord).is_none());
        prop_assert_eq!(graph.node_count(), before + 1);
        let node = graph.node_at(coord).unwrap();
        prop_assert_eq!(node.id(), id);
        prop_assert_eq!(node.neighbor_count(), expected);
    }

    #[test]
    fn incremental_refresh_matches_rescan(seed in any::<i64>(), mode in pick_mode(), count in 0usize..60, cuts in 0usize..20) {
        let mut graph = grown(seed, mode, count);
        for _ in 0..cuts {
            let Ok(edge) = graph.pick_edge() else { break };
            graph.delete_edge(edge.from, edge.dir).unwrap();
        }

        let mut incremental = graph.candidate_sites().to_vec();
        graph.rescan_candidates();
        let mut rescanned = graph.candidate_sites().to_vec();

        incremental.sort_by_key(|s| s.coord());
        rescanned.sort_by_key(|s| s.coord());
        prop_assert_eq!(incremental, rescanned);
    }

    #[test]
    fn edge_deletion_never_merges_constellations(seed in any::<i64>(), count in 5usize..60, cuts in 1usize..40) {
        let mut graph = grown(seed, PickMode::Shattered, count);
        for _ in 0..cuts {
            let Ok(edge) = graph.pick_edge() else { break };
            let before = graph.constellation_count(None);
            let shredded = graph.delete_edge(edge.from, edge.dir).unwrap();
            let after = graph.constellation_count(None);

            if shredded.len() == 2 {
                // An isolated pair vanished entirely
                prop_assert_eq!(after, before - 1);
            } else {
                prop_assert!(after == before || after == before + 1, "{} -> {}", before, after);
            }
            assert_symmetric(&graph);
            prop_assert!(graph.nodes().all(|n| n.neighbor_count() >= 1));
        }
        prop_assert!(graph.check_invariants().is_ok());
    }

    #[test]
    fn excluding_a_leaf_matches_removing_it(seed in any::<i64>(), count in 5usize..50, cuts in 1usize..30) {
        let mut graph = grown(seed, PickMode::Shattered, count);
        for _ in 0..cuts {
            let Ok(edge) = graph.pick_edge() else { break };
            graph.delete_edge(edge.from, edge.dir).unwrap();
        }

        // Leaves hanging off a node that keeps other edges
        let leaves: Vec<NodeId> = graph
            .nodes()
            .filter(|n| n.neighbor_count() == 1)
            .filter(|n| n.linked().all(|(_, id)| graph.node(id).unwrap().neighbor_count() > 1))
            .map(|n| n.id())
            .collect();
        for leaf in leaves {
            let mut pruned = graph.clone();
            prop_assert_eq!(pruned.delete_node(leaf).unwrap(), vec![leaf]);
            prop_assert_eq!(graph.constellation_count(Some(leaf)), pruned.constellation_count(None));
        }
    }
}

#[test]
fn seed_42_three_materializations() {
    let mut graph = Graph::new(42);
    graph.generate_first_seed().unwrap();
    let initial: Vec<Coord> = graph.candidate_sites().iter().map(|s| s.coord()).collect();
    assert_eq!(initial.len(), 3);

    for coord in initial {
        graph.materialize(coord).unwrap();
    }
    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.constellation_count(None), 1);
    graph.check_invariants().unwrap();
}

#[test]
fn different_seeds_do_not_interfere() {
    let mut a = Graph::new(1);
    let mut b = Graph::new(2);
    a.generate_first_seed().unwrap();
    b.generate_first_seed().unwrap();

    // Interleave calls; each graph must match a solo run with its seed
    for _ in 0..30 {
        let ca = a.pick_candidate_site(PickMode::Arranged).unwrap();
        a.materialize(ca).unwrap();
        let cb = b.pick_candidate_site(PickMode::Arranged).unwrap();
        b.materialize(cb).unwrap();
    }

    let solo = grown(1, PickMode::Arranged, 30);
    let layout = |g: &Graph| g.nodes().map(|n| n.coord()).collect::<Vec<_>>();
    assert_eq!(layout(&a), layout(&solo));
}

#[test]
fn leaf_cut_shreds_exactly_one() {
    // Growth always closes triangles, so open one up to make a leaf
    let mut graph = grown(4, PickMode::Tentacular, 30);
    let corner = NodeId(0);
    let links: Vec<Direction> = graph.node(corner).unwrap().links().iter().collect();
    for &dir in &links[1..] {
        graph.delete_edge(corner, dir).unwrap();
    }
    assert_eq!(graph.node(corner).unwrap().neighbor_count(), 1);
    let before = graph.node_count();

    let shredded = graph.delete_edge(corner, links[0]).unwrap();
    assert_eq!(shredded, vec![corner]);
    assert_eq!(graph.node_count(), before - 1);
    assert!(graph.node(corner).is_none());
    graph.check_invariants().unwrap();
}

#[test]
fn deleting_node_removes_all_its_edges() {
    let mut graph = grown(12, PickMode::Crystal, 40);
    let victim = NodeId(0);
    let neighbors: Vec<_> = graph.node(victim).unwrap().linked().collect();

    graph.delete_node(victim).unwrap();

    assert!(graph.node(victim).is_none());
    for (dir, id) in neighbors {
        if let Some(node) = graph.node(id) {
            assert!(!node.has_neighbor(dir.opposite()));
        }
    }
    assert!(graph.nodes().all(|n| n.linked().all(|(_, id)| id != victim)));
}
