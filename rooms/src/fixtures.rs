//! Hand built graphs and helpers shared by the tests of both crates.

use crate::room::{RoomGraph, RoomKind};
use petgraph::algo::astar;
use petgraph::graph::NodeIndex;

/// A(start) .. G(end)
///
/// A: B C D, B: A D F G, C: A E F, D: A B E, E: C D G, F: B C G, G: E F B
pub fn lettered_graph() -> RoomGraph {
    let mut graph = RoomGraph::new();
    for name in ["A", "B", "C", "D", "E", "F", "G"] {
        graph.add_room(name);
    }
    let edges = [
        (0, 1),
        (0, 2),
        (0, 3),
        (1, 3),
        (1, 5),
        (2, 4),
        (2, 5),
        (3, 4),
        (4, 6),
        (5, 6),
        (6, 1),
    ];
    for (a, b) in edges {
        graph.connect(a, b).unwrap();
    }
    graph.set_kind(0, RoomKind::Start);
    graph.set_kind(6, RoomKind::End);
    graph.validate().unwrap();
    graph
}

/// A shortest walk from `from` to `to`, both included.
pub fn route(graph: &RoomGraph, from: usize, to: usize) -> Option<Vec<usize>> {
    let (_, path) = astar(
        &graph.as_petgraph(),
        NodeIndex::new(from),
        |n| n == NodeIndex::new(to),
        |_| 1,
        |_| 0,
    )?;
    Some(path.into_iter().map(NodeIndex::index).collect())
}
