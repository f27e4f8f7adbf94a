use crate::error::{Result, RoomsError};
use crate::room::{RoomGraph, RoomKind, MIN_CONNECTIONS, NUM_ROOMS, ROOM_NAMES};
use itertools::Itertools;
use log::*;
use rand::seq::SliceRandom;
use rand::Rng;

/// Builds a random graph of `NUM_ROOMS` rooms where every room ends with
/// between `MIN_CONNECTIONS` and `MAX_CONNECTIONS` connections.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Result<RoomGraph> {
    let mut graph = RoomGraph::new();
    let mut names = ROOM_NAMES;
    let (chosen, _) = names.partial_shuffle(rng, NUM_ROOMS);
    for name in chosen.iter() {
        let index = graph.add_room(*name);
        trace!("room i:{} name:{}", index, name);
    }

    let (start, end) = pick_start_end(rng);
    graph.set_kind(start, RoomKind::Start);
    graph.set_kind(end, RoomKind::End);
    debug!(
        "start:{} end:{}",
        graph.room(start).name(),
        graph.room(end).name()
    );

    while let Some(short) = graph
        .rooms()
        .iter()
        .position(|room| room.connections().len() < MIN_CONNECTIONS)
    {
        add_random_connection(&mut graph, rng, short)?;
    }

    graph.validate()?;
    Ok(graph)
}

/// End is redrawn until it differs from start, start is never redrawn.
fn pick_start_end<R: Rng + ?Sized>(rng: &mut R) -> (usize, usize) {
    let start = rng.gen_range(0..NUM_ROOMS);
    loop {
        let end = rng.gen_range(0..NUM_ROOMS);
        if end != start {
            return (start, end);
        }
    }
}

fn add_random_connection<R: Rng + ?Sized>(
    graph: &mut RoomGraph,
    rng: &mut R,
    short: usize,
) -> Result<()> {
    let candidates = (0..graph.len())
        .tuple_combinations()
        .filter(|&(a, b)| {
            !graph.room(a).is_full() && !graph.room(b).is_full() && !graph.is_connected(a, b)
        })
        .collect_vec();
    let &(a, b) = candidates.choose(rng).ok_or_else(|| RoomsError::Saturated {
        room: graph.room(short).name().to_owned(),
        connections: graph.room(short).connections().len(),
    })?;
    graph.connect(a, b)?;
    trace!(
        "connection {}<->{} of {} candidates",
        graph.room(a).name(),
        graph.room(b).name(),
        candidates.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::MAX_CONNECTIONS;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn generated_graphs_hold_invariants() {
        for seed in 0..500 {
            let mut rng = Pcg64::seed_from_u64(seed);
            let graph = generate(&mut rng).unwrap();
            graph.validate().unwrap();
            assert_eq!(graph.len(), NUM_ROOMS);
            for room in graph.rooms() {
                assert!(ROOM_NAMES.contains(&room.name()));
                let count = room.connections().len();
                assert!((MIN_CONNECTIONS..=MAX_CONNECTIONS).contains(&count));
                for neighbor in graph.neighbors(room.index()) {
                    assert_ne!(neighbor.index(), room.index());
                    assert!(graph.is_connected(neighbor.index(), room.index()));
                }
            }
            assert_ne!(graph.start(), graph.end());
        }
    }

    #[test]
    fn same_seed_same_graph() {
        let a = generate(&mut Pcg64::seed_from_u64(8097123498761234)).unwrap();
        let b = generate(&mut Pcg64::seed_from_u64(8097123498761234)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn start_and_end_differ() {
        let mut rng = Pcg64::seed_from_u64(7);
        for _ in 0..1000 {
            let (start, end) = pick_start_end(&mut rng);
            assert_ne!(start, end);
            assert!(start < NUM_ROOMS && end < NUM_ROOMS);
        }
    }

    #[test]
    fn every_name_gets_used_eventually() {
        let mut seen = std::collections::HashSet::new();
        for seed in 0..200 {
            let graph = generate(&mut Pcg64::seed_from_u64(seed)).unwrap();
            seen.extend(graph.rooms().iter().map(|room| room.name().to_owned()));
        }
        assert_eq!(seen.len(), ROOM_NAMES.len());
    }
}
