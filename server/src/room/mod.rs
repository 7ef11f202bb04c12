pub mod bingo_room;
pub mod broadcaster;
pub mod game_state;
pub mod player;

pub use bingo_room::BingoRoom;
pub use broadcaster::RoomBroadcaster;
pub use game_state::{BingoGame, Dispatch, GamePhase, Recipient};
pub use player::Player;
