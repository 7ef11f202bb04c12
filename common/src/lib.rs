pub mod bingo;
pub mod config;
pub mod id_generator;
pub mod identifiers;
pub mod logger;
pub mod protocol;

pub use identifiers::*;
pub use protocol::{ClientMessage, PlayerSummary, ServerMessage};
