//! Board geometry: marks, cells, actions and the 3x3 grid

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Board side length
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

// ============================================================================
// MARKS AND CELLS
// ============================================================================

/// Player mark. X always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// Contents of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Taken(Mark),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Mark in this cell, if any
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Taken(mark) => Some(mark),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Taken(Mark::X) => 'X',
            Cell::Taken(Mark::O) => 'O',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            'X' | 'x' => Some(Cell::Taken(Mark::X)),
            'O' | 'o' => Some(Cell::Taken(Mark::O)),
            '.' | '_' | '-' => Some(Cell::Empty),
            _ => None,
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        Cell::Taken(mark)
    }
}

// ============================================================================
// ACTIONS AND LINES
// ============================================================================

/// Zero-based (row, column) coordinates of a move.
///
/// Ordering is lexicographic on (row, col), which is also the search
/// tie-break order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Action {
    pub row: u8,
    pub col: u8,
}

impl Action {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Check if this action addresses a cell on the board
    pub fn is_valid(&self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// All 9 coordinates in row-major order
    pub fn all() -> impl Iterator<Item = Action> {
        (0..BOARD_SIZE as u8)
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Action::new(row, col)))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A triple of cells that wins when uniformly marked
pub type Line = [Action; 3];

/// The 8 lines in scan order: row0, col0, row1, col1, row2, col2,
/// diagonal down, diagonal up.
pub const LINES: [Line; 8] = [
    [Action::new(0, 0), Action::new(0, 1), Action::new(0, 2)],
    [Action::new(0, 0), Action::new(1, 0), Action::new(2, 0)],
    [Action::new(1, 0), Action::new(1, 1), Action::new(1, 2)],
    [Action::new(0, 1), Action::new(1, 1), Action::new(2, 1)],
    [Action::new(2, 0), Action::new(2, 1), Action::new(2, 2)],
    [Action::new(0, 2), Action::new(1, 2), Action::new(2, 2)],
    [Action::new(0, 0), Action::new(1, 1), Action::new(2, 2)],
    [Action::new(0, 2), Action::new(1, 1), Action::new(2, 0)],
];

// ============================================================================
// MARK COUNTS
// ============================================================================

/// Derived tallies of the cells on a board
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarkCounts {
    pub x: u8,
    pub o: u8,
    pub empty: u8,
}

impl MarkCounts {
    pub fn of(&self, mark: Mark) -> u8 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    /// Total marks placed so far
    pub fn placed(&self) -> u8 {
        self.x + self.o
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// 3x3 grid. A plain value: transitions copy it, never share it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Board with every cell empty
    pub const fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Build a board from rows of optional marks (`None` = empty)
    pub fn from_marks(rows: [[Option<Mark>; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in rows.iter().enumerate() {
            for (c, mark) in row.iter().enumerate() {
                cells[r][c] = mark.map_or(Cell::Empty, Cell::Taken);
            }
        }
        Self { cells }
    }

    /// Cell at the given coordinates, `None` if off the board
    pub fn get(&self, action: Action) -> Option<Cell> {
        self.cells
            .get(action.row as usize)
            .and_then(|row| row.get(action.col as usize))
            .copied()
    }

    /// Iterate cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Action, Cell)> + '_ {
        Action::all().map(move |a| (a, self.cells[a.row as usize][a.col as usize]))
    }

    /// Copy of this board with one cell replaced. Caller checks bounds.
    pub(crate) fn with_cell(&self, action: Action, cell: Cell) -> Self {
        let mut next = *self;
        next.cells[action.row as usize][action.col as usize] = cell;
        next
    }

    /// Count X marks, O marks and empty cells
    pub fn counts(&self) -> MarkCounts {
        let mut counts = MarkCounts::default();
        for row in &self.cells {
            for cell in row {
                match cell {
                    Cell::Taken(Mark::X) => counts.x += 1,
                    Cell::Taken(Mark::O) => counts.o += 1,
                    Cell::Empty => counts.empty += 1,
                }
            }
        }
        counts
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|c| !c.is_empty())
    }

    /// Mark filling the whole line, if any
    pub fn line_owner(&self, line: &Line) -> Option<Mark> {
        let first = self.get(line[0])?.mark()?;
        line[1..]
            .iter()
            .all(|&a| self.get(a) == Some(Cell::Taken(first)))
            .then_some(first)
    }

    /// Compact single-line notation, e.g. `XX./OO./...`
    pub fn notation(&self) -> String {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                writeln!(f, "---------")?;
            }
            writeln!(f, "{} | {} | {}", row[0].symbol(), row[1].symbol(), row[2].symbol())?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = GameError;

    /// Parse 9 cell symbols in row-major order. `/` and whitespace are
    /// ignored; `X`, `O` mark cells and `.`, `_`, `-` are empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        let mut n = 0;

        for c in s.chars().filter(|c| *c != '/' && !c.is_whitespace()) {
            let cell = Cell::from_symbol(c)
                .ok_or_else(|| GameError::ParseBoard(format!("unexpected character '{}'", c)))?;
            if n >= CELL_COUNT {
                return Err(GameError::ParseBoard(format!(
                    "expected {} cells, found more",
                    CELL_COUNT
                )));
            }
            cells[n / BOARD_SIZE][n % BOARD_SIZE] = cell;
            n += 1;
        }

        if n != CELL_COUNT {
            return Err(GameError::ParseBoard(format!(
                "expected {} cells, found {}",
                CELL_COUNT, n
            )));
        }

        Ok(Self { cells })
    }
}
