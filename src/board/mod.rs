//! The board: grid state, insertion mechanics, scoring.
//!
//! ## Phases
//!
//! While any blank is live the board is in the setup phase: moves replace a
//! blank with a card directly. Once the last blank is consumed the board is
//! permanently in the rotation phase: moves insert a card from an outside
//! edge, shifting the whole row or column and pushing the far-end cell off.
//!
//! ## The joker
//!
//! The center cell is pinned. A rotation through the center line shifts the
//! joker one step; the board immediately hops the displaced neighbour over it
//! so the joker lands back on center. It can never be discarded.

pub mod cell;

pub use cell::{BlankCell, BlankId, Cell, Discard};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Suit;
use crate::core::GameConfig;
use crate::error::MoveError;

/// A value-semantic copy of the grid, taken before a speculative move and
/// restored after. Cheap: cells are small `Copy` values and boards are tiny.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridSnapshot {
    cells: Vec<Cell>,
}

/// The game board.
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    center: usize,
    grid: Vec<Cell>,
    blanks: Vec<BlankCell>,
    scoring: Vec<(i64, Vec<(usize, usize)>)>,
    finalized: bool,
}

impl Board {
    /// Build a board from configuration.
    ///
    /// Panics on malformed configuration: even or degenerate sizes, blanks
    /// out of bounds, duplicated, or on the center cell.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let size = config.board_size;
        assert!(size >= 3 && size % 2 == 1, "board size must be odd and >= 3");
        assert!(
            config.blank_cells.len() <= u8::MAX as usize,
            "too many blank cells"
        );

        let center = size / 2;
        let mut grid = vec![Cell::Neutral; size * size];
        grid[center * size + center] = Cell::Joker;

        let mut blanks = Vec::with_capacity(config.blank_cells.len());
        for (i, &(row, col)) in config.blank_cells.iter().enumerate() {
            assert!(row < size && col < size, "blank ({row}, {col}) out of bounds");
            assert!(
                (row, col) != (center, center),
                "blank ({row}, {col}) would displace the joker"
            );
            let idx = row * size + col;
            assert!(
                matches!(grid[idx], Cell::Neutral),
                "duplicate blank at ({row}, {col})"
            );
            grid[idx] = Cell::Blank(BlankId::new(i as u8));
            blanks.push(BlankCell::new((row + 1, col + 1)));
        }

        let scoring = vec![
            (
                config.diagonal_weight,
                vec![
                    (center - 1, center - 1),
                    (center - 1, center + 1),
                    (center + 1, center - 1),
                    (center + 1, center + 1),
                ],
            ),
            (
                config.orthogonal_weight,
                vec![
                    (center - 1, center),
                    (center, center - 1),
                    (center + 1, center),
                    (center, center + 1),
                ],
            ),
        ];

        Self {
            size,
            center,
            grid,
            blanks,
            scoring,
            finalized: false,
        }
    }

    /// Rebuild a board from persisted parts, validating structure.
    pub(crate) fn from_saved(
        config: &GameConfig,
        cells: Vec<Cell>,
        blanks: Vec<BlankCell>,
        finalized: bool,
    ) -> Result<Self, String> {
        let template = Board::new(config);
        if cells.len() != template.size * template.size {
            return Err(format!(
                "grid has {} cells, expected {}",
                cells.len(),
                template.size * template.size
            ));
        }
        let jokers = cells.iter().filter(|c| matches!(c, Cell::Joker)).count();
        if jokers != 1 {
            return Err(format!("grid has {jokers} jokers, expected exactly 1"));
        }
        let center_idx = template.center * template.size + template.center;
        if !matches!(cells[center_idx], Cell::Joker) {
            return Err("joker is not on the center cell".to_string());
        }
        if blanks.len() != template.blanks.len() {
            return Err(format!(
                "{} blanks saved, configuration defines {}",
                blanks.len(),
                template.blanks.len()
            ));
        }
        Ok(Self {
            grid: cells,
            blanks,
            finalized,
            ..template
        })
    }

    /// Board side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// 0-based index of the center cell along either axis.
    #[must_use]
    pub fn center(&self) -> usize {
        self.center
    }

    /// The cell at a 0-based coordinate.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.grid[self.idx(row, col)]
    }

    /// All blanks, live and consumed.
    #[must_use]
    pub fn blanks(&self) -> &[BlankCell] {
        &self.blanks
    }

    pub(crate) fn set_blank_discarded(&mut self, id: BlankId, discarded: bool) {
        self.blanks[id.index()].discarded = discarded;
    }

    /// 1-based origins of the blanks still waiting to be filled.
    #[must_use]
    pub fn open_cells(&self) -> Vec<(usize, usize)> {
        self.blanks
            .iter()
            .filter(|blank| !blank.discarded)
            .map(|blank| blank.origin)
            .collect()
    }

    /// Whether any blank is still live.
    #[must_use]
    pub fn in_setup_phase(&self) -> bool {
        self.blanks.iter().any(|blank| !blank.discarded)
    }

    /// Apply an insertion.
    ///
    /// Setup phase: `(row, column)` must be an open cell's 1-based origin;
    /// the blank is swapped out and becomes the discard. Rotation phase:
    /// exactly one coordinate must be a 0/`size+1` sentinel and the other a
    /// 1..=`size` line index; the line shifts and the far-end cell becomes
    /// the discard. Either way the discard's flag is set; card flags are the
    /// caller's job, since the board does not hold the card table.
    pub fn insert(&mut self, row: usize, column: usize, cell: Cell) -> Result<Discard, MoveError> {
        let open = self.open_cells();
        if !open.is_empty() {
            if !open.contains(&(row, column)) {
                return Err(MoveError::NotAnOpenCell { row, column });
            }
            let idx = self.idx(row - 1, column - 1);
            let previous = std::mem::replace(&mut self.grid[idx], cell);
            let Cell::Blank(blank) = previous else {
                panic!("open cell ({row}, {column}) held {previous:?} instead of a blank");
            };
            self.blanks[blank.index()].discarded = true;
            return Ok(Discard::Blank(blank));
        }
        self.insert_edge(row, column, cell)
    }

    fn insert_edge(
        &mut self,
        row: usize,
        column: usize,
        cell: Cell,
    ) -> Result<Discard, MoveError> {
        let n = self.size;
        let (is_row, from_near, line_index) = if (1..=n).contains(&row)
            && (column == 0 || column == n + 1)
        {
            (true, column == 0, row - 1)
        } else if (1..=n).contains(&column) && (row == 0 || row == n + 1) {
            (false, row == 0, column - 1)
        } else {
            return Err(MoveError::InvalidEdge { row, column });
        };

        // Columns are handled as rows of the transposed grid; far-edge
        // insertions as near-edge ones on the reversed line.
        let mut line: SmallVec<[Cell; 8]> = if is_row {
            (0..n).map(|c| self.grid[self.idx(line_index, c)]).collect()
        } else {
            (0..n).map(|r| self.grid[self.idx(r, line_index)]).collect()
        };
        if !from_near {
            line.reverse();
        }

        let pushed_off = line.pop().expect("board lines are never empty");
        line.insert(0, cell);

        // Pin the joker: it shifted one step off center, so hop the incoming
        // neighbour over it. Reversal keeps the center index fixed (odd size).
        if line_index == self.center {
            let joker = line.remove(self.center + 1);
            assert!(
                matches!(joker, Cell::Joker),
                "center line shifted without the joker at center"
            );
            line.insert(self.center, joker);
        }

        if !from_near {
            line.reverse();
        }
        if is_row {
            for (c, &value) in line.iter().enumerate() {
                let idx = self.idx(line_index, c);
                self.grid[idx] = value;
            }
        } else {
            for (r, &value) in line.iter().enumerate() {
                let idx = self.idx(r, line_index);
                self.grid[idx] = value;
            }
        }

        Ok(match pushed_off {
            Cell::Card(id) => Discard::Card(id),
            Cell::Blank(blank) => {
                self.blanks[blank.index()].discarded = true;
                Discard::Blank(blank)
            }
            Cell::Neutral => Discard::Neutral,
            Cell::Joker => unreachable!("the joker is pinned to the center"),
        })
    }

    /// Board score for a suit: Σ ring weight × card value over the eight
    /// cells around the center occupied by that suit.
    ///
    /// Panics if the board has been finalized: scores are frozen then, and
    /// asking again is a bookkeeping defect.
    #[must_use]
    pub fn score(&self, suit: Suit) -> i64 {
        assert!(!self.finalized, "scoring requested on a finalized board");
        let mut total = 0;
        for (weight, cells) in &self.scoring {
            for &(row, col) in cells {
                let cell = self.grid[self.idx(row, col)];
                if cell.suit() == Some(suit) {
                    total += weight * cell.value();
                }
            }
        }
        total
    }

    /// Freeze scoring. Called once when the game ends.
    pub fn finalize(&mut self) {
        self.finalized = true;
    }

    /// Re-enable scoring for what-if analysis.
    pub fn unfinalize(&mut self) {
        self.finalized = false;
    }

    /// Whether scoring is frozen.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Copy the grid for later restoration.
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            cells: self.grid.clone(),
        }
    }

    /// Restore the grid from a snapshot of this board.
    pub fn restore(&mut self, snapshot: &GridSnapshot) {
        assert_eq!(
            snapshot.cells.len(),
            self.grid.len(),
            "snapshot is from a different board"
        );
        self.grid.copy_from_slice(&snapshot.cells);
    }

    /// Ordered rows of display tokens for rendering collaborators.
    #[must_use]
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        (0..self.size)
            .map(|r| (0..self.size).map(|c| self.cell(r, c).token()).collect())
            .collect()
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.size && col < self.size);
        row * self.size + col
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows: Vec<String> = self
            .display_rows()
            .into_iter()
            .map(|row| row.join(" | "))
            .collect();
        write!(f, "{}", rows.join("\n"))
    }
}

/// Persisted board state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Row-major grid cells.
    pub cells: Vec<Cell>,

    /// Blank bookkeeping, in creation order.
    pub blanks: Vec<BlankCell>,

    /// Whether scoring was frozen.
    pub finalized: bool,
}

impl BoardSnapshot {
    /// Capture a board.
    #[must_use]
    pub fn capture(board: &Board) -> Self {
        Self {
            cells: board.grid.clone(),
            blanks: board.blanks.clone(),
            finalized: board.finalized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Rank};

    fn card(suit: Suit, rank: Rank) -> Cell {
        Cell::Card(CardId::new(suit, rank))
    }

    fn rotation_board() -> Board {
        Board::new(&GameConfig::default().with_blank_cells(vec![]))
    }

    #[test]
    fn test_new_board_layout() {
        let board = Board::new(&GameConfig::default());

        assert_eq!(board.size(), 5);
        assert!(matches!(board.cell(2, 2), Cell::Joker));
        assert!(matches!(board.cell(0, 0), Cell::Blank(_)));
        assert!(matches!(board.cell(1, 1), Cell::Neutral));
        assert_eq!(board.open_cells().len(), 12);
        assert!(board.in_setup_phase());
    }

    #[test]
    #[should_panic(expected = "board size must be odd")]
    fn test_even_size_rejected() {
        Board::new(&GameConfig::default().with_board_size(4));
    }

    #[test]
    fn test_setup_insert_swaps_blank() {
        let mut board = Board::new(&GameConfig::default());

        let discard = board
            .insert(1, 1, card(Suit::Hearts, Rank::King))
            .unwrap();

        assert!(matches!(discard, Discard::Blank(_)));
        assert!(matches!(board.cell(0, 0), Cell::Card(_)));
        assert_eq!(board.open_cells().len(), 11);
    }

    #[test]
    fn test_setup_insert_rejects_non_blank() {
        let mut board = Board::new(&GameConfig::default());

        let err = board
            .insert(2, 2, card(Suit::Hearts, Rank::King))
            .unwrap_err();

        assert_eq!(err, MoveError::NotAnOpenCell { row: 2, column: 2 });
        assert!(matches!(board.cell(1, 1), Cell::Neutral));
    }

    #[test]
    fn test_row_insert_from_left() {
        let mut board = rotation_board();

        // Insert into row 1 from the left: everything shifts right.
        let discard = board.insert(1, 0, card(Suit::Hearts, Rank::King)).unwrap();

        assert_eq!(discard, Discard::Neutral);
        assert_eq!(board.cell(0, 0), card(Suit::Hearts, Rank::King));
    }

    #[test]
    fn test_row_insert_from_right() {
        let mut board = rotation_board();

        let discard = board.insert(1, 6, card(Suit::Hearts, Rank::King)).unwrap();

        assert_eq!(discard, Discard::Neutral);
        assert_eq!(board.cell(0, 4), card(Suit::Hearts, Rank::King));
    }

    #[test]
    fn test_column_insert_from_top() {
        let mut board = rotation_board();

        board.insert(0, 2, card(Suit::Clubs, Rank::Seven)).unwrap();

        assert_eq!(board.cell(0, 1), card(Suit::Clubs, Rank::Seven));
    }

    #[test]
    fn test_column_insert_from_bottom() {
        let mut board = rotation_board();

        board.insert(6, 2, card(Suit::Clubs, Rank::Seven)).unwrap();

        assert_eq!(board.cell(4, 1), card(Suit::Clubs, Rank::Seven));
    }

    #[test]
    fn test_cells_shift_along_the_line() {
        let mut board = rotation_board();

        board.insert(1, 0, card(Suit::Hearts, Rank::King)).unwrap();
        board.insert(1, 0, card(Suit::Hearts, Rank::Queen)).unwrap();

        assert_eq!(board.cell(0, 0), card(Suit::Hearts, Rank::Queen));
        assert_eq!(board.cell(0, 1), card(Suit::Hearts, Rank::King));
    }

    #[test]
    fn test_joker_stays_centered_on_row_insert() {
        let mut board = rotation_board();

        // Row 3 runs through the joker. Insert from the left; the card that
        // would land on center hops over the joker instead.
        board.insert(3, 0, card(Suit::Spades, Rank::Nine)).unwrap();

        assert!(matches!(board.cell(2, 2), Cell::Joker));
        assert_eq!(board.cell(2, 0), card(Suit::Spades, Rank::Nine));

        // A second insertion pushes the nine along, never onto the center.
        board.insert(3, 0, card(Suit::Spades, Rank::Eight)).unwrap();
        assert!(matches!(board.cell(2, 2), Cell::Joker));
        assert_eq!(board.cell(2, 1), card(Suit::Spades, Rank::Nine));

        let mut board = rotation_board();
        board.insert(3, 6, card(Suit::Spades, Rank::Nine)).unwrap();
        board.insert(3, 6, card(Suit::Spades, Rank::Eight)).unwrap();
        assert!(matches!(board.cell(2, 2), Cell::Joker));
        assert_eq!(board.cell(2, 3), card(Suit::Spades, Rank::Nine));
    }

    #[test]
    fn test_joker_stays_centered_on_column_insert() {
        let mut board = rotation_board();

        for _ in 0..5 {
            board.insert(0, 3, card(Suit::Diamonds, Rank::Two)).unwrap();
        }

        assert!(matches!(board.cell(2, 2), Cell::Joker));
    }

    #[test]
    fn test_far_cell_is_discarded() {
        let mut board = rotation_board();

        board.insert(1, 0, card(Suit::Hearts, Rank::King)).unwrap();
        for _ in 0..4 {
            board.insert(1, 0, card(Suit::Hearts, Rank::Two)).unwrap();
        }

        // A fifth push from the left sends the king off the right edge.
        let discard = board.insert(1, 0, card(Suit::Hearts, Rank::Three)).unwrap();
        assert_eq!(discard, Discard::Card(CardId::new(Suit::Hearts, Rank::King)));
    }

    #[test]
    fn test_invalid_edges_rejected() {
        let mut board = rotation_board();
        let king = card(Suit::Hearts, Rank::King);

        for (row, column) in [(0, 0), (6, 6), (0, 6), (3, 3), (7, 1), (2, 9)] {
            let err = board.insert(row, column, king).unwrap_err();
            assert_eq!(err, MoveError::InvalidEdge { row, column });
        }
    }

    #[test]
    fn test_scoring_rings() {
        let mut board = Board::new(
            &GameConfig::default().with_blank_cells(vec![(1, 2), (1, 1), (2, 1)]),
        );

        // Orthogonally adjacent: weight 2.
        board.insert(2, 3, card(Suit::Hearts, Rank::Five)).unwrap();
        assert_eq!(board.score(Suit::Hearts), 10);

        // Diagonally adjacent: weight 1.
        board.insert(2, 2, card(Suit::Diamonds, Rank::Five)).unwrap();
        assert_eq!(board.score(Suit::Diamonds), 5);

        // Both rings accumulate for one suit.
        board.insert(3, 2, card(Suit::Hearts, Rank::Ace)).unwrap();
        assert_eq!(board.score(Suit::Hearts), 12);

        // Other suits see none of it.
        assert_eq!(board.score(Suit::Clubs), 0);
    }

    #[test]
    #[should_panic(expected = "scoring requested on a finalized board")]
    fn test_finalized_board_rejects_scoring() {
        let mut board = rotation_board();
        board.finalize();
        let _ = board.score(Suit::Hearts);
    }

    #[test]
    fn test_unfinalize_reenables_scoring() {
        let mut board = rotation_board();
        board.finalize();
        board.unfinalize();
        assert_eq!(board.score(Suit::Hearts), 0);
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut board = rotation_board();
        let snapshot = board.snapshot();
        let before = board.display_rows();

        board.insert(3, 0, card(Suit::Spades, Rank::Nine)).unwrap();
        board.insert(0, 2, card(Suit::Spades, Rank::Eight)).unwrap();
        assert_ne!(board.display_rows(), before);

        board.restore(&snapshot);
        assert_eq!(board.display_rows(), before);
    }

    #[test]
    fn test_display() {
        let board = Board::new(&GameConfig::default());
        let text = format!("{board}");

        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("Jkr"));
    }
}
