use super::board::{cell_index, Board, Cell, BOARD_SIZE, CELL_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Row(usize),
    Column(usize),
    MainDiagonal,
    AntiDiagonal,
    Blackout,
}

impl Line {
    fn indices(self) -> Vec<usize> {
        match self {
            Line::Row(row) => (0..BOARD_SIZE).map(|col| cell_index(row, col)).collect(),
            Line::Column(col) => (0..BOARD_SIZE).map(|row| cell_index(row, col)).collect(),
            Line::MainDiagonal => (0..BOARD_SIZE).map(|i| cell_index(i, i)).collect(),
            Line::AntiDiagonal => (0..BOARD_SIZE)
                .map(|i| cell_index(i, BOARD_SIZE - 1 - i))
                .collect(),
            Line::Blackout => (0..CELL_COUNT).collect(),
        }
    }
}

fn candidate_lines() -> impl Iterator<Item = Line> {
    (0..BOARD_SIZE)
        .map(Line::Row)
        .chain((0..BOARD_SIZE).map(Line::Column))
        .chain([Line::MainDiagonal, Line::AntiDiagonal, Line::Blackout])
}

fn is_covered(cell: Cell, marked: &[u8]) -> bool {
    match cell {
        Cell::Free => true,
        Cell::Number(n) => marked.contains(&n),
    }
}

fn is_line_covered(board: &Board, marked: &[u8], line: Line) -> bool {
    let cells = board.cells();
    line.indices()
        .into_iter()
        .all(|index| is_covered(cells[index], marked))
}

/// Every line on `board` fully covered by `marked`; the free center always counts.
pub fn winning_lines(board: &Board, marked: &[u8]) -> Vec<Line> {
    candidate_lines()
        .filter(|&line| is_line_covered(board, marked, line))
        .collect()
}

pub fn is_winning_board(board: &Board, marked: &[u8]) -> bool {
    candidate_lines().any(|line| is_line_covered(board, marked, line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bingo::board::column_range;

    /// Column c holds the lowest five numbers of its range, top to bottom.
    fn fixed_board() -> Board {
        let mut cells = [Cell::Free; CELL_COUNT];
        for col in 0..BOARD_SIZE {
            let low = *column_range(col).start();
            for row in 0..BOARD_SIZE {
                if (row, col) != (2, 2) {
                    cells[cell_index(row, col)] = Cell::Number(low + row as u8);
                }
            }
        }
        Board::from_cells(cells).unwrap()
    }

    fn numbers_at(board: &Board, positions: &[(usize, usize)]) -> Vec<u8> {
        positions
            .iter()
            .filter_map(|&(row, col)| board.cell(row, col).number())
            .collect()
    }

    #[test]
    fn test_empty_marks_never_win() {
        let board = fixed_board();
        assert!(!is_winning_board(&board, &[]));
        assert!(winning_lines(&board, &[]).is_empty());
    }

    #[test]
    fn test_every_row_wins() {
        let board = fixed_board();
        for row in 0..BOARD_SIZE {
            let positions: Vec<_> = (0..BOARD_SIZE).map(|col| (row, col)).collect();
            let marked = numbers_at(&board, &positions);
            assert!(is_winning_board(&board, &marked), "row {}", row);
            assert_eq!(winning_lines(&board, &marked), vec![Line::Row(row)]);
        }
    }

    #[test]
    fn test_every_column_wins() {
        let board = fixed_board();
        for col in 0..BOARD_SIZE {
            let positions: Vec<_> = (0..BOARD_SIZE).map(|row| (row, col)).collect();
            let marked = numbers_at(&board, &positions);
            assert!(is_winning_board(&board, &marked), "column {}", col);
            assert_eq!(winning_lines(&board, &marked), vec![Line::Column(col)]);
        }
    }

    #[test]
    fn test_column_marks_stay_within_column_range() {
        let board = fixed_board();
        let positions: Vec<_> = (0..BOARD_SIZE).map(|row| (row, 0)).collect();
        let marked = numbers_at(&board, &positions);
        assert_eq!(marked, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_middle_row_uses_free_cell() {
        let board = fixed_board();
        let marked = numbers_at(&board, &[(2, 0), (2, 1), (2, 3), (2, 4)]);
        assert_eq!(marked.len(), 4);
        assert!(is_winning_board(&board, &marked));
    }

    #[test]
    fn test_diagonals_win() {
        let board = fixed_board();
        let main = numbers_at(&board, &[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
        let anti = numbers_at(&board, &[(0, 4), (1, 3), (2, 2), (3, 1), (4, 0)]);

        assert_eq!(winning_lines(&board, &main), vec![Line::MainDiagonal]);
        assert_eq!(winning_lines(&board, &anti), vec![Line::AntiDiagonal]);
    }

    #[test]
    fn test_strict_subset_of_any_line_loses() {
        let board = fixed_board();
        let lines: Vec<Vec<(usize, usize)>> = vec![
            (0..BOARD_SIZE).map(|col| (0, col)).collect(),
            (0..BOARD_SIZE).map(|row| (row, 4)).collect(),
            (0..BOARD_SIZE).map(|i| (i, i)).collect(),
            (0..BOARD_SIZE).map(|i| (i, BOARD_SIZE - 1 - i)).collect(),
        ];

        for line in lines {
            let marked = numbers_at(&board, &line);
            for skip in 0..marked.len() {
                let mut partial = marked.clone();
                partial.remove(skip);
                assert!(!is_winning_board(&board, &partial), "{:?} minus {}", line, skip);
            }
        }
    }

    #[test]
    fn test_blackout_wins() {
        let board = fixed_board();
        let marked: Vec<u8> = board.numbers().collect();
        assert_eq!(marked.len(), 24);

        let lines = winning_lines(&board, &marked);
        assert!(lines.contains(&Line::Blackout));
        assert_eq!(lines.len(), 13);
    }

    #[test]
    fn test_marks_not_on_board_do_not_count() {
        let board = fixed_board();
        let marked: Vec<u8> = (6..=15).collect();
        assert!(!is_winning_board(&board, &marked));
    }
}
