use common::bingo::Board;
use common::{ClientId, PlayerSummary};

#[derive(Debug, Clone)]
pub struct Player {
    pub id: ClientId,
    pub name: String,
    pub board: Board,
    pub marked_cells: Vec<u8>,
    pub ready_to_play: bool,
    pub ready_for_next: bool,
    pub is_winner: bool,
}

impl Player {
    pub fn new(id: ClientId, name: String, board: Board) -> Self {
        Self {
            id,
            name,
            board,
            marked_cells: Vec::new(),
            ready_to_play: false,
            ready_for_next: false,
            is_winner: false,
        }
    }

    /// Returns false when the number was already marked.
    pub fn mark(&mut self, number: u8) -> bool {
        if self.marked_cells.contains(&number) {
            return false;
        }
        self.marked_cells.push(number);
        true
    }

    pub fn clear_readiness(&mut self) {
        self.ready_to_play = false;
        self.ready_for_next = false;
    }

    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary {
            name: self.name.clone(),
            ready_to_play: self.ready_to_play,
            ready_for_next: self.ready_for_next,
            is_winner: self.is_winner,
        }
    }
}
