use std::fmt;

use thiserror::Error;

/// Fixed puzzle size: the classic 8-puzzle is a 3x3 grid.
pub const N: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("empty cell position ({0}, {1}) is outside the grid")]
    EmptyCellOutOfBounds(usize, usize),
    #[error("board tiles must be the values 0..{} each exactly once", N * N)]
    InvalidTiles,
    #[error("empty cell declared at ({0}, {1}) but that cell holds tile {2}")]
    EmptyCellMismatch(usize, usize, u32),
}

/// Direction the empty cell moves when generating a successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Generation order, which also fixes the tie-break order after a stable
    /// sort by heuristic in the search driver.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }
}

/// One puzzle configuration. Immutable value object: successors are built as
/// fresh values, the parent is never touched. The heuristic is computed once
/// at construction and cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    board: [[u32; N]; N],
    empty_row: usize,
    empty_col: usize,
    heuristic: u32,
}

impl Puzzle {
    /// Builds a puzzle from a board and the empty cell's coordinates,
    /// validating that the board is a permutation of 0..9 and that the
    /// declared empty cell really holds the 0.
    pub fn new(
        board: [[u32; N]; N],
        empty_row: usize,
        empty_col: usize,
    ) -> Result<Self, PuzzleError> {
        if empty_row >= N || empty_col >= N {
            return Err(PuzzleError::EmptyCellOutOfBounds(empty_row, empty_col));
        }

        let mut seen = [false; N * N];
        for row in &board {
            for &tile in row {
                if tile as usize >= N * N || seen[tile as usize] {
                    return Err(PuzzleError::InvalidTiles);
                }
                seen[tile as usize] = true;
            }
        }

        if board[empty_row][empty_col] != 0 {
            return Err(PuzzleError::EmptyCellMismatch(
                empty_row,
                empty_col,
                board[empty_row][empty_col],
            ));
        }

        Ok(Self::from_parts(board, empty_row, empty_col))
    }

    /// Unchecked construction for internally generated boards, where the
    /// swap itself keeps the empty cell coordinates in step with the board.
    fn from_parts(board: [[u32; N]; N], empty_row: usize, empty_col: usize) -> Self {
        let heuristic = Self::manhattan_distance(&board);
        Self {
            board,
            empty_row,
            empty_col,
            heuristic,
        }
    }

    pub fn heuristic(&self) -> u32 {
        self.heuristic
    }

    /// Sum over all non-empty tiles of the Manhattan distance between the
    /// tile's position and its goal position.
    fn manhattan_distance(board: &[[u32; N]; N]) -> u32 {
        let mut distance = 0;
        for i in 0..N {
            for j in 0..N {
                let value = board[i][j];
                if value != 0 {
                    let target_row = (value - 1) as usize / N;
                    let target_col = (value - 1) as usize % N;
                    distance += i.abs_diff(target_row) + j.abs_diff(target_col);
                }
            }
        }
        distance as u32
    }

    /// Direct positional goal check: tiles 1..8 in row-major order, empty
    /// cell last. Agrees with `heuristic() == 0`.
    pub fn is_goal(&self) -> bool {
        let mut expected = 1;

        for i in 0..N {
            for j in 0..N {
                if i == N - 1 && j == N - 1 {
                    if self.board[i][j] != 0 {
                        return false;
                    }
                } else {
                    if self.board[i][j] != expected {
                        return false;
                    }
                    expected += 1;
                }
            }
        }

        true
    }

    /// Canonical visited-set key: row-major tile values joined with a
    /// separator so adjacent values cannot merge ambiguously.
    pub fn key(&self) -> String {
        let mut key = String::with_capacity(N * N * 2);
        for row in &self.board {
            for &tile in row {
                key.push_str(&tile.to_string());
                key.push(',');
            }
        }
        key
    }

    /// Generates one fresh successor per legal direction of the empty cell,
    /// in `Move::ALL` order. Each successor swaps the empty cell with its
    /// neighbour and carries its own heuristic.
    pub fn successors(&self) -> Vec<Puzzle> {
        let mut moves = Vec::with_capacity(Move::ALL.len());

        for dir in Move::ALL {
            let (dr, dc) = dir.as_offset();
            let new_row = self.empty_row as isize + dr;
            let new_col = self.empty_col as isize + dc;

            if new_row >= 0 && new_row < N as isize && new_col >= 0 && new_col < N as isize {
                let new_row = new_row as usize;
                let new_col = new_col as usize;

                let mut board = self.board;
                board[self.empty_row][self.empty_col] = board[new_row][new_col];
                board[new_row][new_col] = 0;

                moves.push(Self::from_parts(board, new_row, new_col));
            }
        }

        moves
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.board {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
