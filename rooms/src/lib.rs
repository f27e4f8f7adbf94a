pub mod config;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod fixtures;
pub mod format;
pub mod generate;
pub mod room;
pub mod store;

pub use config::Config;
pub use error::{Result, RoomsError};
pub use generate::generate;
pub use room::{Room, RoomGraph, RoomKind, UserPath};
