use crate::error::{Result, RoomsError};
use crate::format::{link, parse_room, write_room, RoomRecord};
use crate::room::RoomGraph;
use log::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::SystemTime;

pub const DIR_PREFIX: &str = "rooms.";

/// Creates `<root>/rooms.<pid>`. Fails if it already exists so every run gets a fresh directory.
pub fn create_rooms_dir(root: &Path) -> Result<PathBuf> {
    let dir = root.join(format!("{}{}", DIR_PREFIX, process::id()));
    fs::create_dir(&dir).map_err(|e| RoomsError::io(&dir, e))?;
    info!("created {:?}", dir);
    Ok(dir)
}

/// Writes one file per room into `dir`, named after the room.
pub fn save(dir: &Path, graph: &RoomGraph) -> Result<()> {
    for room in graph.rooms() {
        let path = dir.join(room.name());
        let file = File::create(&path).map_err(|e| RoomsError::io(&path, e))?;
        let mut output = BufWriter::new(file);
        write_room(&mut output, graph, room.index())
            .and_then(|()| output.flush())
            .map_err(|e| RoomsError::io(&path, e))?;
        debug!("wrote {:?}", path);
    }
    Ok(())
}

/// The most recently modified directory in `root` whose name starts with `DIR_PREFIX`.
/// Equal timestamps go to the greater name.
pub fn find_newest(root: &Path) -> Result<PathBuf> {
    let mut newest: Option<(SystemTime, String, PathBuf)> = None;
    for entry in fs::read_dir(root).map_err(|e| RoomsError::io(root, e))? {
        let entry = entry.map_err(|e| RoomsError::io(root, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(DIR_PREFIX) {
            continue;
        }
        let path = entry.path();
        let metadata = entry.metadata().map_err(|e| RoomsError::io(&path, e))?;
        if !metadata.is_dir() {
            continue;
        }
        let modified = metadata.modified().map_err(|e| RoomsError::io(&path, e))?;
        trace!("candidate {:?} modified {:?}", path, modified);
        let key = (modified, name, path);
        if newest.as_ref().map_or(true, |best| (&key.0, &key.1) > (&best.0, &best.1)) {
            newest = Some(key);
        }
    }
    newest
        .map(|(_, _, path)| path)
        .ok_or_else(|| RoomsError::NoRoomsDirectory {
            prefix: DIR_PREFIX.to_owned(),
            root: root.to_owned(),
        })
}

/// Reads every room file in `dir` (in file name order) into a validated graph.
pub fn load(dir: &Path) -> Result<RoomGraph> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| RoomsError::io(dir, e))? {
        let entry = entry.map_err(|e| RoomsError::io(dir, e))?;
        paths.push(entry.path());
    }
    paths.sort();

    let records = paths
        .iter()
        .map(|path| load_room(path))
        .collect::<Result<Vec<_>>>()?;
    let graph = link(&records)?;
    info!("loaded {} rooms from {:?}", graph.len(), dir);
    Ok(graph)
}

fn load_room(path: &Path) -> Result<RoomRecord> {
    let text = fs::read_to_string(path).map_err(|e| RoomsError::io(path, e))?;
    let record = parse_room(path, &text)?;
    let file_name = path.file_name().map(|name| name.to_string_lossy());
    if file_name.as_deref() != Some(record.name.as_str()) {
        return Err(RoomsError::parse(
            path,
            1,
            format!("file holds room {:?}", record.name),
        ));
    }
    debug!("read {:?}", path);
    Ok(record)
}
