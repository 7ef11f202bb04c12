use super::board::MAX_NUMBER;
use super::session_rng::SessionRng;

/// The shared bag of numbers 1-75. Every draw removes a number for good;
/// once the bag is empty `draw` keeps returning `None`.
#[derive(Debug, Clone)]
pub struct DrawPool {
    drawn: Vec<u8>,
    remaining: Vec<u8>,
}

impl Default for DrawPool {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawPool {
    pub fn new() -> Self {
        Self {
            drawn: Vec::with_capacity(MAX_NUMBER as usize),
            remaining: (1..=MAX_NUMBER).collect(),
        }
    }

    pub fn draw(&mut self, rng: &mut SessionRng) -> Option<u8> {
        if self.remaining.is_empty() {
            return None;
        }
        let pick = rng.random_range(0..self.remaining.len());
        let number = self.remaining.swap_remove(pick);
        self.drawn.push(number);
        Some(number)
    }

    /// Numbers in the order they were called.
    pub fn drawn(&self) -> &[u8] {
        &self.drawn
    }

    pub fn remaining_count(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn contains(&self, number: u8) -> bool {
        self.drawn.contains(&number)
    }
}
