use crate::error::{Result, RoomsError};
use itertools::Itertools;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use std::fmt;
use std::str::FromStr;

pub const NUM_ROOMS: usize = 7;
pub const MIN_CONNECTIONS: usize = 3;
pub const MAX_CONNECTIONS: usize = 6;

pub const ROOM_NAMES: [&str; 10] = [
    "Reptiles", "Cats", "Dogs", "Monkeys", "Birds", "Insects", "Rodents", "Turtles", "Octopi",
    "Humans",
];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RoomKind {
    Start,
    End,
    Mid,
}
impl RoomKind {
    pub fn label(self) -> &'static str {
        match self {
            RoomKind::Start => "START_ROOM",
            RoomKind::End => "END_ROOM",
            RoomKind::Mid => "MID_ROOM",
        }
    }
}
impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
impl FromStr for RoomKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "START_ROOM" => Ok(RoomKind::Start),
            "END_ROOM" => Ok(RoomKind::End),
            "MID_ROOM" => Ok(RoomKind::Mid),
            _ => Err(format!("unknown room type {:?}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    index: usize,
    name: String,
    kind: RoomKind,
    connections: Vec<usize>,
}
impl Room {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Room {
            index,
            name: name.into(),
            kind: RoomKind::Mid,
            connections: Vec::with_capacity(MAX_CONNECTIONS),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> RoomKind {
        self.kind
    }

    /// neighbour indices in the order they were connected
    pub fn connections(&self) -> &[usize] {
        &self.connections
    }

    pub fn is_full(&self) -> bool {
        self.connections.len() >= MAX_CONNECTIONS
    }
}

/// Rooms addressed by their index, with adjacency stored on both ends of every connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomGraph {
    rooms: Vec<Room>,
}
impl RoomGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_room(&mut self, name: impl Into<String>) -> usize {
        let index = self.rooms.len();
        self.rooms.push(Room::new(index, name));
        index
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, index: usize) -> &Room {
        &self.rooms[index]
    }

    pub fn set_kind(&mut self, index: usize, kind: RoomKind) {
        self.rooms[index].kind = kind;
    }

    pub fn by_name(&self, name: &str) -> Option<usize> {
        self.rooms.iter().position(|room| room.name == name)
    }

    fn find_kind(&self, kind: RoomKind) -> Option<usize> {
        self.rooms.iter().position(|room| room.kind == kind)
    }

    pub fn start(&self) -> Option<usize> {
        self.find_kind(RoomKind::Start)
    }

    pub fn end(&self) -> Option<usize> {
        self.find_kind(RoomKind::End)
    }

    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = &Room> + '_ {
        self.rooms[index]
            .connections
            .iter()
            .map(move |&c| &self.rooms[c])
    }

    pub fn is_connected(&self, a: usize, b: usize) -> bool {
        self.rooms[a].connections.contains(&b)
    }

    pub fn connection_names(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.neighbors(index).map(|room| room.name.as_str())
    }

    /// Connects `a` and `b` in both directions.
    /// Self loops, duplicates and full rooms are refused.
    pub fn connect(&mut self, a: usize, b: usize) -> Result<()> {
        let reason = if a == b {
            Some("a room cannot connect to itself")
        } else if self.is_connected(a, b) {
            Some("already connected")
        } else if self.rooms[a].is_full() || self.rooms[b].is_full() {
            Some("room has no free connection")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(RoomsError::Connect {
                a: self.rooms[a].name.clone(),
                b: self.rooms[b].name.clone(),
                reason,
            });
        }
        self.rooms[a].connections.push(b);
        self.rooms[b].connections.push(a);
        Ok(())
    }

    /// Appends `to` to `from`'s connections only, as read from `from`'s room file.
    /// Symmetry is left for `validate` to check once every room is linked.
    pub(crate) fn push_connection(&mut self, from: usize, to: usize) -> Result<()> {
        if self.rooms[from].is_full() {
            return Err(RoomsError::Connect {
                a: self.rooms[from].name.clone(),
                b: self.rooms[to].name.clone(),
                reason: "room has no free connection",
            });
        }
        self.rooms[from].connections.push(to);
        Ok(())
    }

    /// Checks every invariant a finished graph must hold.
    pub fn validate(&self) -> Result<()> {
        if self.rooms.len() != NUM_ROOMS {
            return Err(RoomsError::invalid(format!(
                "expected {} rooms, found {}",
                NUM_ROOMS,
                self.rooms.len()
            )));
        }
        if let Some((a, _)) = self
            .rooms
            .iter()
            .tuple_combinations()
            .find(|(a, b)| a.name == b.name)
        {
            return Err(RoomsError::invalid(format!(
                "multiple definitions for room {}",
                a.name
            )));
        }
        for room in &self.rooms {
            let count = room.connections.len();
            if !(MIN_CONNECTIONS..=MAX_CONNECTIONS).contains(&count) {
                return Err(RoomsError::invalid(format!(
                    "room {} has {} connections",
                    room.name, count
                )));
            }
            if room.connections.contains(&room.index) {
                return Err(RoomsError::invalid(format!(
                    "room {} connects to itself",
                    room.name
                )));
            }
            if room
                .connections
                .iter()
                .tuple_combinations()
                .any(|(a, b)| a == b)
            {
                return Err(RoomsError::invalid(format!(
                    "room {} has a duplicate connection",
                    room.name
                )));
            }
            for &c in &room.connections {
                if c >= self.rooms.len() || !self.rooms[c].connections.contains(&room.index) {
                    return Err(RoomsError::invalid(format!(
                        "connection from {} is not mirrored",
                        room.name
                    )));
                }
            }
        }
        for kind in [RoomKind::Start, RoomKind::End] {
            let count = self.rooms.iter().filter(|room| room.kind == kind).count();
            if count != 1 {
                return Err(RoomsError::invalid(format!(
                    "expected exactly one {}, found {}",
                    kind, count
                )));
            }
        }
        if connected_components(&self.as_petgraph()) != 1 {
            return Err(RoomsError::invalid("rooms are not all reachable"));
        }
        Ok(())
    }

    /// Undirected view where node `i` is room `i`. Each connection appears once.
    pub fn as_petgraph(&self) -> UnGraph<&str, ()> {
        let mut graph =
            UnGraph::with_capacity(self.rooms.len(), self.rooms.len() * MAX_CONNECTIONS);
        for room in &self.rooms {
            graph.add_node(room.name.as_str());
        }
        for room in &self.rooms {
            for &c in room.connections.iter().filter(|&&c| c > room.index) {
                graph.add_edge(NodeIndex::new(room.index), NodeIndex::new(c), ());
            }
        }
        graph
    }
}

/// Rooms entered during one session, in order. The start room is not part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPath {
    rooms: Vec<usize>,
}
impl UserPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, room: usize) {
        self.rooms.push(room);
    }

    /// number of steps taken
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.rooms.iter().copied()
    }

    pub fn names<'g>(&'g self, graph: &'g RoomGraph) -> impl Iterator<Item = &'g str> + 'g {
        self.iter().map(move |i| graph.room(i).name())
    }
}
