use chrono::Local;
use log::*;
use parking_lot::Mutex;
use rooms::{Result, RoomsError};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

pub const TIME_FILE: &str = "currentTime.txt";
pub const TIME_FORMAT: &str = "%-I:%M%P, %A, %B %-d, %Y";

/// Something the navigator can ask for the current time.
pub trait Clock {
    fn current_time(&self) -> Result<String>;
}

/// Writes the local time to `path` on a worker thread and waits for it.
/// Only one request runs at a time, each one replaces the file.
#[derive(Debug)]
pub struct TimeService {
    path: PathBuf,
    lock: Mutex<()>,
}
impl TimeService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TimeService {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(TIME_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn request(&self) -> Result<String> {
        let _guard = self.lock.lock();
        let path = self.path.as_path();
        thread::scope(|scope| {
            let worker = thread::Builder::new()
                .name("time".to_owned())
                .spawn_scoped(scope, move || write_current_time(path))
                .map_err(|e| RoomsError::io(path, e))?;
            worker.join().map_err(|_| RoomsError::Worker)?
        })
    }
}
impl Clock for TimeService {
    fn current_time(&self) -> Result<String> {
        self.request()
    }
}

fn write_current_time(path: &Path) -> Result<String> {
    let mut now = String::new();
    write!(now, "{}", Local::now().format(TIME_FORMAT)).map_err(|_| RoomsError::TimeFormat)?;
    fs::write(path, format!("{}\n", now)).map_err(|e| RoomsError::io(path, e))?;
    debug!("wrote {:?} to {:?}", now, path);
    Ok(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn file_matches_returned_time() {
        let dir = TempDir::new().unwrap();
        let service = TimeService::in_dir(dir.path());
        let time = service.request().unwrap();
        assert!(!time.is_empty());
        assert!(time.contains(':'));
        assert_eq!(fs::read_to_string(service.path()).unwrap(), format!("{}\n", time));
    }

    #[test]
    fn each_request_overwrites() {
        let dir = TempDir::new().unwrap();
        let service = TimeService::in_dir(dir.path());
        fs::write(service.path(), "stale\nand long\ncontent\n").unwrap();
        service.request().unwrap();
        let second = service.request().unwrap();
        assert_eq!(fs::read_to_string(service.path()).unwrap(), format!("{}\n", second));
    }

    #[test]
    fn concurrent_requests_leave_one_line() {
        let dir = TempDir::new().unwrap();
        let service = Arc::new(TimeService::in_dir(dir.path()));
        let handles = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || service.request().unwrap())
            })
            .collect::<Vec<_>>();
        let times = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>();
        let content = fs::read_to_string(service.path()).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(times.iter().any(|t| content == format!("{}\n", t)));
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let service = TimeService::in_dir(&dir.path().join("gone"));
        assert!(matches!(service.request(), Err(RoomsError::Io { .. })));
    }
}
