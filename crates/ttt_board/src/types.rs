//! Core domain types for tic-tac-toe.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::action::MoveError;
use crate::phases::GameStatus;
use crate::rules;

/// Mark placed on the board by one side of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Mark {
    /// Participant A's mark.
    X,
    /// Participant B's mark.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Returns the character drawn on the board for this mark.
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell showing its position label.
    Open(char),
    /// Cell claimed by a mark.
    Marked(Mark),
}

impl Cell {
    /// Character shown for this cell when the board is drawn.
    pub fn glyph(self) -> char {
        match self {
            Cell::Open(label) => label,
            Cell::Marked(mark) => mark.symbol(),
        }
    }
}

/// Error returned when a board dimension is neither 3 nor 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("Invalid board size {}: must be 3 or 4", _0)]
pub struct BoardSizeError(pub usize);

impl std::error::Error for BoardSizeError {}

/// Supported board dimensions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum BoardSize {
    /// Classic 3x3 board.
    #[default]
    Three,
    /// 4x4 board.
    Four,
}

impl BoardSize {
    /// Side length of the grid.
    pub fn dimension(self) -> usize {
        match self {
            BoardSize::Three => 3,
            BoardSize::Four => 4,
        }
    }

    /// Total number of cells.
    pub fn cell_count(self) -> usize {
        self.dimension() * self.dimension()
    }
}

impl TryFrom<usize> for BoardSize {
    type Error = BoardSizeError;

    fn try_from(dimension: usize) -> Result<Self, Self::Error> {
        match dimension {
            3 => Ok(BoardSize::Three),
            4 => Ok(BoardSize::Four),
            other => Err(BoardSizeError(other)),
        }
    }
}

impl std::fmt::Display for BoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.dimension();
        write!(f, "{}x{}", n, n)
    }
}

/// Label shown in an empty cell at the given zero-based index.
///
/// The first nine cells are labelled `1`..`9`; later cells continue with
/// `A`, `B`, ... so a 4x4 board ends at `G`.
pub fn position_label(index: usize) -> char {
    if index < 9 {
        char::from(b'1' + index as u8)
    } else {
        char::from(b'A' + (index - 9) as u8)
    }
}

/// Square grid of cells in row-major order.
///
/// Positions are 1-based indices into the flattened grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Cell>,
    moves: usize,
}

impl Board {
    /// Creates a board with every cell open and no moves made.
    #[instrument]
    pub fn new(size: BoardSize) -> Self {
        let cells = (0..size.cell_count())
            .map(|index| Cell::Open(position_label(index)))
            .collect();
        Self {
            size,
            cells,
            moves: 0,
        }
    }

    /// Returns the board dimension.
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Returns the number of moves applied so far.
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Highest valid position on this board.
    pub fn max_position(&self) -> usize {
        self.size.cell_count()
    }

    /// Returns the cell at a 1-based position, if in range.
    pub fn cell(&self, position: usize) -> Option<Cell> {
        position
            .checked_sub(1)
            .and_then(|index| self.cells.get(index))
            .copied()
    }

    /// Returns the cell at a zero-based row and column.
    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size.dimension() + col]
    }

    /// Whether a move may be played at `position`.
    pub fn is_position_open(&self, position: usize) -> bool {
        matches!(self.cell(position), Some(Cell::Open(_)))
    }

    /// All currently open positions, ascending.
    pub fn open_positions(&self) -> Vec<usize> {
        (1..=self.max_position())
            .filter(|&position| self.is_position_open(position))
            .collect()
    }

    /// Places `mark` at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfRange`] if the position is outside
    /// `1..=size²`, or [`MoveError::Occupied`] if the cell already holds a
    /// mark. The board is unchanged on error.
    #[instrument(skip(self), fields(moves = self.moves))]
    pub fn apply_move(&mut self, position: usize, mark: Mark) -> Result<(), MoveError> {
        let max = self.max_position();
        match self.cell(position) {
            None => Err(MoveError::OutOfRange { position, max }),
            Some(Cell::Marked(_)) => Err(MoveError::Occupied(position)),
            Some(Cell::Open(_)) => {
                self.cells[position - 1] = Cell::Marked(mark);
                self.moves += 1;
                debug!(position, %mark, moves = self.moves, "Move applied");
                Ok(())
            }
        }
    }

    /// Whether `mark` fills a complete row, column or diagonal.
    pub fn detect_winner(&self, mark: Mark) -> bool {
        rules::has_line(self, mark)
    }

    /// Whether every cell has been played.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Derives the current status from the cells.
    pub fn status(&self) -> GameStatus {
        if let Some(winner) = rules::check_winner(self) {
            GameStatus::Won(winner)
        } else if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    /// Formats the board as a human-readable grid.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardSize::default())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.size.dimension();
        writeln!(f)?;
        for row in 0..n {
            write!(f, "   ")?;
            for col in 0..n {
                write!(f, " {} ", self.cell_at(row, col).glyph())?;
                if col < n - 1 {
                    write!(f, "|")?;
                }
            }
            writeln!(f)?;

            if row < n - 1 {
                write!(f, "   ")?;
                for col in 0..n {
                    write!(f, "---")?;
                    if col < n - 1 {
                        write!(f, "+")?;
                    }
                }
                writeln!(f)?;
            }
        }
        writeln!(f)
    }
}
