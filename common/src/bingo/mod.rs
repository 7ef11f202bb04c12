pub mod board;
pub mod draw_pool;
pub mod session_rng;
pub mod win_validator;

pub use board::{Board, Cell, BOARD_SIZE, CELL_COUNT, CENTER_INDEX, MAX_NUMBER};
pub use draw_pool::DrawPool;
pub use session_rng::SessionRng;
pub use win_validator::{is_winning_board, winning_lines, Line};
