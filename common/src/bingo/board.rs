use std::ops::RangeInclusive;

use super::session_rng::SessionRng;

pub const BOARD_SIZE: usize = 5;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;
pub const CENTER_INDEX: usize = cell_index(BOARD_SIZE / 2, BOARD_SIZE / 2);
pub const NUMBERS_PER_COLUMN: u8 = 15;
pub const MAX_NUMBER: u8 = NUMBERS_PER_COLUMN * BOARD_SIZE as u8;

const WIRE_SEPARATOR: &str = "-";
const FREE_CELL_TOKEN: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Free,
    Number(u8),
}

impl Cell {
    pub fn number(self) -> Option<u8> {
        match self {
            Cell::Free => None,
            Cell::Number(n) => Some(n),
        }
    }

    fn to_token(self) -> u8 {
        self.number().unwrap_or(FREE_CELL_TOKEN)
    }
}

/// Cells are stored column by column: (row, col) lives at `col * 5 + row`.
pub const fn cell_index(row: usize, col: usize) -> usize {
    col * BOARD_SIZE + row
}

/// Numbers allowed in a column: 1-15 for B, 16-30 for I, up to 61-75 for O.
pub fn column_range(col: usize) -> RangeInclusive<u8> {
    let low = 1 + col as u8 * NUMBERS_PER_COLUMN;
    low..=low + NUMBERS_PER_COLUMN - 1
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    pub fn generate(rng: &mut SessionRng) -> Self {
        let mut cells = [Cell::Free; CELL_COUNT];

        for col in 0..BOARD_SIZE {
            let mut pool: Vec<u8> = column_range(col).collect();
            for row in 0..BOARD_SIZE {
                let index = cell_index(row, col);
                if index == CENTER_INDEX {
                    continue;
                }
                let pick = rng.random_range(0..pool.len());
                cells[index] = Cell::Number(pool.swap_remove(pick));
            }
        }

        Self { cells }
    }

    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Result<Self, String> {
        for col in 0..BOARD_SIZE {
            let range = column_range(col);
            let mut seen = Vec::with_capacity(BOARD_SIZE);

            for row in 0..BOARD_SIZE {
                let index = cell_index(row, col);
                match cells[index] {
                    Cell::Free if index == CENTER_INDEX => {}
                    Cell::Free => {
                        return Err(format!("Free cell at row {} col {} is not the center", row, col));
                    }
                    Cell::Number(_) if index == CENTER_INDEX => {
                        return Err("Center cell must be free".to_string());
                    }
                    Cell::Number(n) => {
                        if !range.contains(&n) {
                            return Err(format!(
                                "Number {} out of range {}-{} for column {}",
                                n,
                                range.start(),
                                range.end(),
                                col
                            ));
                        }
                        if seen.contains(&n) {
                            return Err(format!("Number {} repeated in column {}", n, col));
                        }
                        seen.push(n);
                    }
                }
            }
        }

        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[cell_index(row, col)]
    }

    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().filter_map(|cell| cell.number())
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers().any(|n| n == number)
    }

    /// Row-major `-` separated tokens with the free cell as `0`, the layout
    /// browser clients render directly.
    pub fn to_wire(&self) -> String {
        let mut tokens = Vec::with_capacity(CELL_COUNT);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                tokens.push(self.cell(row, col).to_token().to_string());
            }
        }
        tokens.join(WIRE_SEPARATOR)
    }

    pub fn from_wire(wire: &str) -> Result<Self, String> {
        let tokens: Vec<&str> = wire.split(WIRE_SEPARATOR).collect();
        if tokens.len() != CELL_COUNT {
            return Err(format!(
                "Expected {} board tokens, got {}",
                CELL_COUNT,
                tokens.len()
            ));
        }

        let mut cells = [Cell::Free; CELL_COUNT];
        for (position, token) in tokens.iter().enumerate() {
            let value: u8 = token
                .trim()
                .parse()
                .map_err(|e| format!("Invalid board token '{}': {}", token, e))?;
            let (row, col) = (position / BOARD_SIZE, position % BOARD_SIZE);
            cells[cell_index(row, col)] = if value == FREE_CELL_TOKEN {
                Cell::Free
            } else {
                Cell::Number(value)
            };
        }

        Self::from_cells(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_index_is_middle_of_grid() {
        assert_eq!(CENTER_INDEX, 12);
        assert_eq!(MAX_NUMBER, 75);
    }

    #[test]
    fn test_column_ranges() {
        assert_eq!(column_range(0), 1..=15);
        assert_eq!(column_range(2), 31..=45);
        assert_eq!(column_range(4), 61..=75);
    }

    #[test]
    fn test_generated_boards_respect_column_ranges() {
        for seed in 0..200 {
            let mut rng = SessionRng::new(seed);
            let board = Board::generate(&mut rng);

            for col in 0..BOARD_SIZE {
                let mut column: Vec<u8> = (0..BOARD_SIZE)
                    .filter_map(|row| board.cell(row, col).number())
                    .collect();
                let expected_len = if col == 2 { 4 } else { 5 };
                assert_eq!(column.len(), expected_len, "seed {}", seed);
                assert!(column.iter().all(|n| column_range(col).contains(n)));

                column.sort_unstable();
                column.dedup();
                assert_eq!(column.len(), expected_len, "duplicate in column {}", col);
            }
        }
    }

    #[test]
    fn test_generated_board_has_single_free_cell_at_center() {
        for seed in 0..200 {
            let board = Board::generate(&mut SessionRng::new(seed));
            let free: Vec<usize> = board
                .cells()
                .iter()
                .enumerate()
                .filter(|(_, cell)| **cell == Cell::Free)
                .map(|(i, _)| i)
                .collect();
            assert_eq!(free, vec![CENTER_INDEX]);
        }
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = Board::generate(&mut SessionRng::new(42));
        let b = Board::generate(&mut SessionRng::new(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_wire_is_row_major_with_zero_center() {
        let board = Board::generate(&mut SessionRng::new(7));
        let wire = board.to_wire();
        let tokens: Vec<u8> = wire.split('-').map(|t| t.parse().unwrap()).collect();

        assert_eq!(tokens.len(), CELL_COUNT);
        assert_eq!(tokens[12], 0);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                assert_eq!(
                    tokens[row * BOARD_SIZE + col],
                    board.cell(row, col).number().unwrap_or(0)
                );
            }
        }
        assert!(!wire.ends_with('-'));
    }

    #[test]
    fn test_from_wire_restores_board() {
        let board = Board::generate(&mut SessionRng::new(99));
        assert_eq!(Board::from_wire(&board.to_wire()).unwrap(), board);
    }

    #[test]
    fn test_from_wire_rejects_wrong_token_count() {
        assert!(Board::from_wire("1-2-3").is_err());
    }

    #[test]
    fn test_from_wire_rejects_number_in_center() {
        let board = Board::generate(&mut SessionRng::new(3));
        let mut tokens: Vec<String> = board.to_wire().split('-').map(str::to_string).collect();
        tokens[12] = "40".to_string();
        let err = Board::from_wire(&tokens.join("-")).unwrap_err();
        assert!(err.contains("Center"));
    }

    #[test]
    fn test_from_wire_rejects_out_of_range_value() {
        let board = Board::generate(&mut SessionRng::new(3));
        let mut tokens: Vec<String> = board.to_wire().split('-').map(str::to_string).collect();
        tokens[0] = "70".to_string();
        assert!(Board::from_wire(&tokens.join("-")).is_err());
    }

    #[test]
    fn test_contains_ignores_free_cell() {
        let board = Board::generate(&mut SessionRng::new(5));
        assert!(!board.contains(0));
        let first = board.cell(0, 0).number().unwrap();
        assert!(board.contains(first));
    }
}
