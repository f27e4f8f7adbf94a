//! The line based room file:
//!
//! ```text
//! ROOM NAME: <name>
//! CONNECTION 1: <neighbor name>
//! ...
//! ROOM TYPE: <START_ROOM|END_ROOM|MID_ROOM>
//! ```

use crate::error::{Result, RoomsError};
use crate::room::{RoomGraph, RoomKind};
use log::*;
use std::io::{self, Write};
use std::path::Path;

const NAME_HEADER: &str = "ROOM NAME: ";
const CONNECTION_HEADER: &str = "CONNECTION ";
const TYPE_HEADER: &str = "ROOM TYPE: ";

/// One parsed room file, connections still by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    pub name: String,
    pub connections: Vec<String>,
    pub kind: RoomKind,
}

pub fn write_room(output: &mut impl Write, graph: &RoomGraph, index: usize) -> io::Result<()> {
    let room = graph.room(index);
    writeln!(output, "{}{}", NAME_HEADER, room.name())?;
    graph
        .connection_names(index)
        .enumerate()
        .try_for_each(|(i, to)| writeln!(output, "{}{}: {}", CONNECTION_HEADER, i + 1, to))?;
    writeln!(output, "{}{}", TYPE_HEADER, room.kind().label())
}

/// Parses the exact layout above. `path` is only used for error reporting.
pub fn parse_room(path: &Path, text: &str) -> Result<RoomRecord> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l)).peekable();

    let (n, line) = lines
        .next()
        .ok_or_else(|| RoomsError::parse(path, 1, "missing ROOM NAME line"))?;
    let name = field(path, n, line, NAME_HEADER)?;
    let mut last = n;

    let mut connections = Vec::new();
    while let Some((n, line)) = lines.next_if(|(_, l)| l.starts_with(CONNECTION_HEADER)) {
        last = n;
        let rest = &line[CONNECTION_HEADER.len()..];
        let (number, to) = rest
            .split_once(": ")
            .ok_or_else(|| RoomsError::parse(path, n, format!("malformed line {:?}", line)))?;
        let expected = connections.len() + 1;
        if number.parse::<usize>().ok() != Some(expected) {
            return Err(RoomsError::parse(
                path,
                n,
                format!("expected CONNECTION {}, found {:?}", expected, line),
            ));
        }
        if to.is_empty() {
            return Err(RoomsError::parse(path, n, "empty connection name"));
        }
        connections.push(to.to_owned());
    }

    let (n, line) = lines
        .next()
        .ok_or_else(|| RoomsError::parse(path, last + 1, "missing ROOM TYPE line"))?;
    let kind = field(path, n, line, TYPE_HEADER)?
        .parse::<RoomKind>()
        .map_err(|message| RoomsError::parse(path, n, message))?;

    if let Some((n, line)) = lines.next() {
        return Err(RoomsError::parse(
            path,
            n,
            format!("unexpected line after ROOM TYPE {:?}", line),
        ));
    }

    trace!("parsed {} with {} connections", name, connections.len());
    Ok(RoomRecord {
        name: name.to_owned(),
        connections,
        kind,
    })
}

fn field<'l>(path: &Path, n: usize, line: &'l str, header: &str) -> Result<&'l str> {
    match line.strip_prefix(header) {
        Some(value) if !value.is_empty() => Ok(value),
        Some(_) => Err(RoomsError::parse(
            path,
            n,
            format!("empty value after {:?}", header.trim_end()),
        )),
        None => Err(RoomsError::parse(
            path,
            n,
            format!("expected {:?}, found {:?}", header.trim_end(), line),
        )),
    }
}

/// Resolves neighbour names to room indices. Rooms keep the order of `records`
/// and each room keeps the order of its connection lines.
pub fn link(records: &[RoomRecord]) -> Result<RoomGraph> {
    let mut graph = RoomGraph::new();
    for record in records {
        let index = graph.add_room(record.name.as_str());
        graph.set_kind(index, record.kind);
    }
    for (index, record) in records.iter().enumerate() {
        for to in &record.connections {
            let target = graph
                .by_name(to)
                .ok_or_else(|| RoomsError::UnknownConnection {
                    room: record.name.clone(),
                    to: to.clone(),
                })?;
            graph.push_connection(index, target)?;
        }
    }
    graph.validate()?;
    Ok(graph)
}
