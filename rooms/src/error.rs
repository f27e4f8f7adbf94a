use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RoomsError>;

#[derive(Error, Debug)]
pub enum RoomsError {
    #[error("io error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read user input: {0}")]
    Input(#[source] io::Error),

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),

    #[error("input closed before reaching the end room")]
    InputClosed,

    #[error("no directory starting with {prefix:?} in {root:?}")]
    NoRoomsDirectory { prefix: String, root: PathBuf },

    #[error("{path:?} line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// room files reference each other by name, this one named nothing we loaded
    #[error("room {room} connects to unknown room {to}")]
    UnknownConnection { room: String, to: String },

    #[error("cannot connect {a} to {b}: {reason}")]
    Connect {
        a: String,
        b: String,
        reason: &'static str,
    },

    #[error("no valid connection left while {room} has {connections} connections")]
    Saturated { room: String, connections: usize },

    #[error("invalid room graph: {0}")]
    InvalidGraph(String),

    #[error("invalid configuration {key}={value:?}: {message}")]
    Config {
        key: &'static str,
        value: String,
        message: String,
    },

    #[error("failed to format the current time")]
    TimeFormat,

    #[error("time worker panicked")]
    Worker,
}

impl RoomsError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RoomsError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        RoomsError::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        RoomsError::InvalidGraph(message.into())
    }
}
