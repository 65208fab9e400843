// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Generic cycle finder over abstract node ids.
//!
//! Depth-first search with an explicit path stack ("three colors"): a node is
//! *in progress* while on the current path and *done* once fully explored.
//! Reaching an in-progress node closes a cycle, which is the path segment from
//! that node's position to the current node.
//!
//! Start nodes and neighbours are visited in `Ord` order, so output is
//! deterministic. Each cycle is reported once, rotated to start at its
//! smallest node.

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Finds cycles in `graph` (node -> successors).
///
/// Edges to nodes that are not keys of `graph` are ignored. A self-loop is
/// reported as a one-node cycle.
///
/// ```
/// use addon_closure::references::find_cycles;
/// use std::collections::{BTreeMap, BTreeSet};
///
/// let mut graph: BTreeMap<u32, BTreeSet<u32>> = BTreeMap::new();
/// graph.insert(1, [2].into_iter().collect());
/// graph.insert(2, [3].into_iter().collect());
/// graph.insert(3, [1].into_iter().collect());
///
/// assert_eq!(find_cycles(&graph), vec![vec![1, 2, 3]]);
/// ```
pub fn find_cycles<N: Ord + Clone>(graph: &BTreeMap<N, BTreeSet<N>>) -> Vec<Vec<N>> {
    let mut marks: BTreeMap<N, Mark> = BTreeMap::new();
    let mut path: Vec<N> = Vec::new();
    let mut cycles: Vec<Vec<N>> = Vec::new();

    for start in graph.keys() {
        if !marks.contains_key(start) {
            visit(start, graph, &mut marks, &mut path, &mut cycles);
        }
    }

    cycles
}

fn visit<N: Ord + Clone>(
    node: &N,
    graph: &BTreeMap<N, BTreeSet<N>>,
    marks: &mut BTreeMap<N, Mark>,
    path: &mut Vec<N>,
    cycles: &mut Vec<Vec<N>>,
) {
    marks.insert(node.clone(), Mark::InProgress);
    path.push(node.clone());

    if let Some(successors) = graph.get(node) {
        for next in successors {
            match marks.get(next).copied() {
                None if graph.contains_key(next) => visit(next, graph, marks, path, cycles),
                Some(Mark::InProgress) => {
                    if let Some(start) = path.iter().position(|n| n == next) {
                        push_unique(cycles, canonical(&path[start..]));
                    }
                }
                _ => {}
            }
        }
    }

    path.pop();
    marks.insert(node.clone(), Mark::Done);
}

/// Rotates a cycle so it starts at its smallest node.
fn canonical<N: Ord + Clone>(cycle: &[N]) -> Vec<N> {
    let min_index = cycle
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.cmp(b.1))
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut rotated = cycle.to_vec();
    rotated.rotate_left(min_index);
    rotated
}

fn push_unique<N: Ord + Clone>(cycles: &mut Vec<Vec<N>>, cycle: Vec<N>) {
    if !cycles.contains(&cycle) {
        cycles.push(cycle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&'static str, &'static str)], nodes: &[&'static str]) -> BTreeMap<&'static str, BTreeSet<&'static str>> {
        let mut g: BTreeMap<&str, BTreeSet<&str>> = nodes.iter().map(|n| (*n, BTreeSet::new())).collect();
        for (from, to) in edges {
            g.entry(*from).or_default().insert(*to);
        }
        g
    }

    #[test]
    fn test_empty_graph() {
        let g: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        assert!(find_cycles(&g).is_empty());
    }

    #[test]
    fn test_acyclic_diamond() {
        let g = graph(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")], &["a", "b", "c", "d"]);
        assert!(find_cycles(&g).is_empty());
    }

    #[test]
    fn test_self_loop() {
        let g = graph(&[("a", "a")], &["a"]);
        assert_eq!(find_cycles(&g), vec![vec!["a"]]);
    }

    #[test]
    fn test_two_node_cycle_reported_once() {
        let g = graph(&[("a", "b"), ("b", "a")], &["a", "b"]);
        assert_eq!(find_cycles(&g), vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_cycle_in_tail_is_extracted() {
        // a -> b -> c -> d -> b; cycle is b, c, d
        let g = graph(&[("a", "b"), ("b", "c"), ("c", "d"), ("d", "b")], &["a", "b", "c", "d"]);
        assert_eq!(find_cycles(&g), vec![vec!["b", "c", "d"]]);
    }

    #[test]
    fn test_rotation_is_canonical() {
        // starting DFS at "a" reaches the c -> b back edge with path [a, c, b]
        let g = graph(&[("a", "c"), ("c", "b"), ("b", "c")], &["a", "b", "c"]);
        assert_eq!(find_cycles(&g), vec![vec!["b", "c"]]);
    }

    #[test]
    fn test_disjoint_cycles() {
        let g = graph(&[("a", "b"), ("b", "a"), ("x", "y"), ("y", "x")], &["a", "b", "x", "y"]);
        assert_eq!(find_cycles(&g), vec![vec!["a", "b"], vec!["x", "y"]]);
    }

    #[test]
    fn test_edges_to_unknown_nodes_are_ignored() {
        let mut g = graph(&[], &["a"]);
        g.get_mut("a").unwrap().insert("external");
        assert!(find_cycles(&g).is_empty());
    }
}
