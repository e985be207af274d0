use crate::game::{Block, BlockSource};
use crate::{COLS, INITIAL_ROWS, ROWS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Filled(Block),
}

/// Fixed `ROWS x COLS` grid. Row 0 is the top (loss) edge, row `ROWS - 1` the
/// newest row. Transitions return a new board and leave `self` untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::Empty; ROWS * COLS],
        }
    }

    /// Empty board with the bottom `INITIAL_ROWS` rows filled.
    pub fn initial(source: &mut BlockSource) -> Self {
        let mut board = Self::new();
        for row in ROWS - INITIAL_ROWS..ROWS {
            board.fill_row(row, source.generate_row());
        }
        board
    }

    pub fn rows(&self) -> usize {
        ROWS
    }

    pub fn cols(&self) -> usize {
        COLS
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * COLS + col
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < ROWS && col < COLS
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.idx(row, col)]
    }

    /// Occupant at `(row, col)`; `None` for empty or out-of-range cells.
    pub fn block_at(&self, row: usize, col: usize) -> Option<Block> {
        if !self.in_bounds(row, col) {
            return None;
        }
        match self.get(row, col) {
            Cell::Filled(block) => Some(block),
            Cell::Empty => None,
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: Cell) {
        let idx = self.idx(row, col);
        self.cells[idx] = value;
    }

    fn fill_row(&mut self, row: usize, blocks: [Block; COLS]) {
        for (col, block) in blocks.into_iter().enumerate() {
            self.set(row, col, Cell::Filled(block));
        }
    }

    pub fn is_top_row_occupied(&self) -> bool {
        (0..COLS).any(|col| matches!(self.get(0, col), Cell::Filled(_)))
    }

    /// Drops row 0, moves every other row up by one and appends a fresh bottom
    /// row. Whatever sat in row 0 is discarded, so callers check
    /// `is_top_row_occupied` first.
    pub fn shifted_up(&self, source: &mut BlockSource) -> Self {
        let mut next = Self::new();
        next.cells[..(ROWS - 1) * COLS].copy_from_slice(&self.cells[COLS..]);
        next.fill_row(ROWS - 1, source.generate_row());
        next
    }

    /// Copy of the board with the given cells emptied. Nothing falls into the
    /// gaps; out-of-range coordinates are skipped.
    pub fn without_cells(&self, coords: &[(usize, usize)]) -> Self {
        let mut next = self.clone();
        for &(row, col) in coords {
            if next.in_bounds(row, col) {
                next.set(row, col, Cell::Empty);
            }
        }
        next
    }

    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Cell::Filled(_)))
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
