use std::collections::HashMap;

use common::bingo::{is_winning_board, winning_lines, Board, DrawPool, SessionRng};
use common::protocol::EndGameSummary;
use common::{log, ClientId, PlayerSummary, ServerMessage};

use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Lobby,
    Playing,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    Client(ClientId),
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub recipient: Recipient,
    pub message: ServerMessage,
}

/// The single room's rules. Every operation mutates in place and queues the
/// messages it produces; the caller drains them with `take_dispatches` and
/// checks `take_reset_request` to arm the delayed reset.
#[derive(Debug)]
pub struct BingoGame {
    rng: SessionRng,
    join_order: Vec<ClientId>,
    players: HashMap<ClientId, Player>,
    phase: GamePhase,
    draw_pool: DrawPool,
    current_number: Option<u8>,
    epoch: u64,
    pending_dispatches: Vec<Dispatch>,
    reset_requested: bool,
}

impl BingoGame {
    pub fn new(rng: SessionRng) -> Self {
        Self {
            rng,
            join_order: Vec::new(),
            players: HashMap::new(),
            phase: GamePhase::Lobby,
            draw_pool: DrawPool::new(),
            current_number: None,
            epoch: 0,
            pending_dispatches: Vec::new(),
            reset_requested: false,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        self.phase != GamePhase::Lobby
    }

    pub fn current_number(&self) -> Option<u8> {
        self.current_number
    }

    pub fn drawn_numbers(&self) -> &[u8] {
        self.draw_pool.drawn()
    }

    /// Bumped by every reset.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn player(&self, client_id: &ClientId) -> Option<&Player> {
        self.players.get(client_id)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn roster(&self) -> Vec<PlayerSummary> {
        self.join_order
            .iter()
            .filter_map(|id| self.players.get(id))
            .map(Player::summary)
            .collect()
    }

    pub fn take_dispatches(&mut self) -> Vec<Dispatch> {
        std::mem::take(&mut self.pending_dispatches)
    }

    pub fn take_reset_request(&mut self) -> bool {
        std::mem::take(&mut self.reset_requested)
    }

    /// A connection arriving mid-game is told to wait for the next round.
    pub fn connect(&mut self, client_id: &ClientId) {
        if self.is_started() {
            self.send_to(client_id, ServerMessage::Wait);
        }
    }

    pub fn join(&mut self, client_id: &ClientId, name: &str) -> Result<(), String> {
        if self.phase != GamePhase::Lobby {
            self.send_to(client_id, ServerMessage::Wait);
            return Err("Game already started".to_string());
        }
        if self.players.contains_key(client_id) {
            return Err("Already joined".to_string());
        }

        let name = match name.trim() {
            "" => client_id.to_string(),
            trimmed => trimmed.to_string(),
        };

        let board = Board::generate(&mut self.rng);
        self.send_to(client_id, ServerMessage::NewBoard(board.to_wire()));

        log!("[room] {} joined as '{}'", client_id, name);
        self.players
            .insert(client_id.clone(), Player::new(client_id.clone(), name, board));
        self.join_order.push(client_id.clone());
        self.broadcast_roster();
        Ok(())
    }

    pub fn regenerate_board(&mut self, client_id: &ClientId) -> Result<(), String> {
        if self.phase != GamePhase::Lobby {
            return Err("Boards are fixed once the game has started".to_string());
        }
        let board = Board::generate(&mut self.rng);
        let wire = board.to_wire();

        let player = self.player_mut(client_id)?;
        player.board = board;
        self.send_to(client_id, ServerMessage::NewBoard(wire));
        Ok(())
    }

    pub fn declare_ready_to_play(&mut self, client_id: &ClientId) -> Result<(), String> {
        if self.phase != GamePhase::Lobby {
            return Err("Game already started".to_string());
        }
        self.player_mut(client_id)?.ready_to_play = true;
        self.broadcast_roster();

        if self.all_ready_to_play() {
            self.start_game();
        }
        Ok(())
    }

    /// Marks the announced number if it is on the caller's board. The caller
    /// always gets a `dial-response`, even when the dial is rejected.
    pub fn dial(&mut self, client_id: &ClientId) -> bool {
        let valid = match (self.phase, self.current_number) {
            (GamePhase::Playing, Some(number)) => match self.players.get_mut(client_id) {
                Some(player) if player.board.contains(number) => {
                    player.mark(number);
                    true
                }
                _ => false,
            },
            _ => false,
        };

        self.send_to(client_id, ServerMessage::DialResponse(valid));
        valid
    }

    pub fn declare_ready_for_next(&mut self, client_id: &ClientId) -> Result<(), String> {
        if self.phase != GamePhase::Playing {
            return Err("No game in progress".to_string());
        }
        self.player_mut(client_id)?.ready_for_next = true;
        self.broadcast_roster();

        if self.all_ready_for_next() {
            self.advance_draw();
        }
        Ok(())
    }

    pub fn claim_bingo(&mut self, client_id: &ClientId) -> Result<(), String> {
        let Some(claimant) = self.players.get(client_id) else {
            return Err("Unknown player".to_string());
        };
        if self.phase != GamePhase::Playing {
            return Err("No game in progress".to_string());
        }
        if !is_winning_board(&claimant.board, &claimant.marked_cells) {
            return Err(format!(
                "Claim rejected with {} marked cells",
                claimant.marked_cells.len()
            ));
        }

        log!(
            "[room] {} wins with {:?}",
            client_id,
            winning_lines(&claimant.board, &claimant.marked_cells)
        );
        let summary = EndGameSummary {
            board: claimant.board.to_wire(),
            marked_cells: claimant.marked_cells.clone(),
        };

        for player in self.players.values_mut() {
            player.clear_readiness();
            if &player.id == client_id {
                player.is_winner = true;
            }
        }

        self.phase = GamePhase::Finished;
        self.send_to(client_id, ServerMessage::Winner);
        self.broadcast(ServerMessage::EndGame(summary));
        self.broadcast_roster();
        self.reset_requested = true;
        Ok(())
    }

    /// Returns false if the connection never joined.
    pub fn disconnect(&mut self, client_id: &ClientId) -> bool {
        if self.players.remove(client_id).is_none() {
            return false;
        }
        self.join_order.retain(|id| id != client_id);
        log!("[room] {} left, {} players remain", client_id, self.players.len());

        if self.players.is_empty() && self.is_started() {
            self.reset();
            return true;
        }

        self.broadcast_roster();

        match self.phase {
            GamePhase::Lobby if self.all_ready_to_play() => self.start_game(),
            GamePhase::Playing if self.all_ready_for_next() => self.advance_draw(),
            _ => {}
        }
        true
    }

    pub fn reset(&mut self) {
        self.players.clear();
        self.join_order.clear();
        self.draw_pool = DrawPool::new();
        self.current_number = None;
        self.phase = GamePhase::Lobby;
        self.epoch += 1;
        self.reset_requested = false;

        log!("[room] reset, epoch {}", self.epoch);
        self.broadcast(ServerMessage::Reset);
    }

    fn player_mut(&mut self, client_id: &ClientId) -> Result<&mut Player, String> {
        self.players
            .get_mut(client_id)
            .ok_or_else(|| "Unknown player".to_string())
    }

    fn all_ready_to_play(&self) -> bool {
        !self.players.is_empty() && self.players.values().all(|p| p.ready_to_play)
    }

    fn all_ready_for_next(&self) -> bool {
        !self.players.is_empty() && self.players.values().all(|p| p.ready_for_next)
    }

    fn start_game(&mut self) {
        log!(
            "[room] starting game with {} players (seed {})",
            self.players.len(),
            self.rng.seed()
        );
        self.phase = GamePhase::Playing;
        self.broadcast(ServerMessage::GameStarted);
        self.draw_number();
    }

    fn advance_draw(&mut self) {
        if !self.draw_number() {
            return;
        }
        for player in self.players.values_mut() {
            player.ready_for_next = false;
        }
        self.broadcast_roster();
    }

    fn draw_number(&mut self) -> bool {
        match self.draw_pool.draw(&mut self.rng) {
            Some(number) => {
                self.current_number = Some(number);
                self.broadcast(ServerMessage::NumberShown(number));
                true
            }
            None => {
                self.finish_exhausted();
                false
            }
        }
    }

    fn finish_exhausted(&mut self) {
        log!("[room] all numbers drawn without a winner");
        for player in self.players.values_mut() {
            player.clear_readiness();
        }
        self.phase = GamePhase::Finished;
        self.broadcast(ServerMessage::DrawExhausted);
        self.broadcast_roster();
        self.reset_requested = true;
    }

    fn broadcast_roster(&mut self) {
        let roster = self.roster();
        self.broadcast(ServerMessage::UpdatePlayers(roster));
    }

    fn send_to(&mut self, client_id: &ClientId, message: ServerMessage) {
        self.pending_dispatches.push(Dispatch {
            recipient: Recipient::Client(client_id.clone()),
            message,
        });
    }

    fn broadcast(&mut self, message: ServerMessage) {
        self.pending_dispatches.push(Dispatch {
            recipient: Recipient::All,
            message,
        });
    }

    #[cfg(test)]
    pub(crate) fn set_board(&mut self, client_id: &ClientId, board: Board) {
        if let Some(player) = self.players.get_mut(client_id) {
            player.board = board;
        }
    }

    #[cfg(test)]
    pub(crate) fn set_current_number(&mut self, number: u8) {
        self.current_number = Some(number);
    }
}
