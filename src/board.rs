//! Board state, turn inference, and move transitions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, lines};

/// A cell on the 3x3 board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player owning this mark, or `None` for an empty cell.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game. X always moves first and maximizes the game value;
/// O minimizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to the mark it places
    pub fn mark(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// A move as a (row, column) coordinate pair, each index in 0..=2.
///
/// A move carries no state of its own; whether it targets an empty cell is
/// checked against the board it is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Move { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win(Player),
    Draw,
}

impl Outcome {
    /// The zero-sum payoff from X's perspective: +1, -1, or 0.
    pub fn utility(self) -> i32 {
        match self {
            Outcome::Win(Player::X) => 1,
            Outcome::Win(Player::O) => -1,
            Outcome::Draw => 0,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(player) => write!(f, "{player} wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// An immutable 3x3 board.
///
/// The board stores only the grid. Whose turn it is is always derived from
/// the mark counts (X moves first, so X leads O by at most one mark), which
/// keeps every board value self-describing. Boards are never mutated in
/// place: [`make_move`] returns a fresh value, so the search can hold many
/// sibling boards live at once.
///
/// This type implements `Copy` since it is only 9 bytes of cells.
///
/// [`make_move`]: Board::make_move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Create the starting board with all cells empty
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    /// Create a board from raw cells in row-major order, without validation.
    ///
    /// Grids that cannot arise from alternating play are accepted; the
    /// engine's own transitions never produce them, and [`validate`] is
    /// available where rejection is wanted.
    ///
    /// [`validate`]: Board::validate
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Board { cells }
    }

    /// Parse a board from a 9-character string in row-major order.
    ///
    /// Whitespace is ignored; `.` or `_` denote empty cells. The mark counts
    /// must be consistent with X having moved first.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not contain exactly 9 cell
    /// characters, contains an unknown character, or its mark counts cannot
    /// arise from alternating play.
    ///
    /// # Examples
    ///
    /// ```
    /// use oxo::{Board, Player};
    ///
    /// let board = Board::from_string("XX.OO....").unwrap();
    /// assert_eq!(board.to_move(), Player::X);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 9 {
            return Err(Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        let board = Board { cells };
        let (x_count, o_count) = board.mark_counts();
        if !(x_count == o_count || x_count == o_count + 1) {
            return Err(Error::InvalidPieceCounts { x_count, o_count });
        }

        Ok(board)
    }

    /// Encode the board as a 9-character row-major string, the inverse of
    /// [`from_string`].
    ///
    /// [`from_string`]: Board::from_string
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }

    fn index_of(row: usize, col: usize) -> Result<usize, Error> {
        if row < 3 && col < 3 {
            Ok(row * 3 + col)
        } else {
            Err(Error::OutOfRange { row, col })
        }
    }

    /// Look up the cell at (row, col).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if either index exceeds 2.
    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, Error> {
        Ok(self.cells[Self::index_of(row, col)?])
    }

    /// Check whether the cell at (row, col) is empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if either index exceeds 2.
    pub fn is_empty_cell(&self, row: usize, col: usize) -> Result<bool, Error> {
        Ok(self.cell(row, col)? == Cell::Empty)
    }

    /// Count the X and O marks on the board, in that order.
    pub fn mark_counts(&self) -> (usize, usize) {
        let mut x_count = 0;
        let mut o_count = 0;
        for cell in &self.cells {
            match cell {
                Cell::X => x_count += 1,
                Cell::O => o_count += 1,
                Cell::Empty => {}
            }
        }
        (x_count, o_count)
    }

    /// The player whose turn it is, derived from the mark counts.
    ///
    /// X moves whenever the counts are equal (including the empty board),
    /// O whenever X is ahead. The rule is deliberately unchecked: it gives a
    /// consistent answer for any grid, and the search relies on that
    /// self-consistency across every node it generates.
    pub fn to_move(&self) -> Player {
        let (x_count, o_count) = self.mark_counts();
        if x_count > o_count {
            Player::O
        } else {
            Player::X
        }
    }

    /// All empty coordinates in row-major order.
    pub fn empty_cells(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(idx, _)| Move::new(idx / 3, idx % 3))
            .collect()
    }

    /// Legal moves in this position: the empty cells, in row-major order,
    /// or nothing once the game is over.
    ///
    /// The ordering is deterministic because the search breaks ties in favor
    /// of the earliest move examined.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.empty_cells()
    }

    /// Apply a move and return the resulting board.
    ///
    /// The mark placed belongs to [`to_move`] evaluated on the receiver,
    /// before the move lands. The receiver itself is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the coordinates fall outside the
    /// grid, or [`Error::IllegalMove`] if the target cell is occupied.
    ///
    /// # Examples
    ///
    /// ```
    /// use oxo::{Board, Cell, Move, Player};
    ///
    /// let board = Board::new();
    /// let next = board.make_move(Move::new(1, 1)).unwrap();
    /// assert_eq!(next.cell(1, 1).unwrap(), Cell::X);
    /// assert_eq!(next.to_move(), Player::O);
    /// assert_eq!(board, Board::new());
    /// ```
    ///
    /// [`to_move`]: Board::to_move
    #[must_use = "make_move returns a new board; the original is unchanged"]
    pub fn make_move(&self, mv: Move) -> Result<Board, Error> {
        let idx = Self::index_of(mv.row, mv.col)?;
        if self.cells[idx] != Cell::Empty {
            return Err(Error::IllegalMove {
                row: mv.row,
                col: mv.col,
            });
        }

        let mut next = *self;
        next.cells[idx] = self.to_move().mark();
        Ok(next)
    }

    /// The player holding a completed line, if any.
    ///
    /// Lines are scanned rows first, then columns, then diagonals; on any
    /// board reachable through play at most one player can have a completed
    /// line, so the scan order is not observable there.
    pub fn winner(&self) -> Option<Player> {
        lines::winner_on(&self.cells)
    }

    /// The first completed line in scan order, as cell indices.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        lines::winning_line(&self.cells)
    }

    /// Check whether the game is over: a completed line or a full board.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || !self.cells.contains(&Cell::Empty)
    }

    /// The outcome of a finished game.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the game is still in progress;
    /// the outcome of an unfinished game is undefined, never silently a
    /// draw.
    pub fn outcome(&self) -> Result<Outcome, Error> {
        if !self.is_terminal() {
            return Err(Error::InvalidState {
                message: "outcome requested for a game still in progress".to_string(),
            });
        }
        Ok(match self.winner() {
            Some(player) => Outcome::Win(player),
            None => Outcome::Draw,
        })
    }

    /// The zero-sum payoff of a finished game from X's perspective:
    /// +1 if X won, -1 if O won, 0 for a draw.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the game is still in progress.
    pub fn utility(&self) -> Result<i32, Error> {
        Ok(self.outcome()?.utility())
    }

    /// Check that this board could have arisen from alternating play with X
    /// moving first.
    ///
    /// The engine itself never needs this; it exists for boundaries that
    /// accept boards from outside, such as the CLI.
    ///
    /// # Errors
    ///
    /// Returns an error if the mark counts are impossible, both players hold
    /// completed lines, or the winner's mark count contradicts having moved
    /// last.
    pub fn validate(&self) -> Result<(), Error> {
        let (x_count, o_count) = self.mark_counts();
        if !(x_count == o_count || x_count == o_count + 1) {
            return Err(Error::InvalidPieceCounts { x_count, o_count });
        }

        let x_wins = lines::has_won(&self.cells, Player::X);
        let o_wins = lines::has_won(&self.cells, Player::O);

        if x_wins && o_wins {
            return Err(Error::InvalidState {
                message: "both players hold completed lines".to_string(),
            });
        }
        if x_wins && x_count != o_count + 1 {
            return Err(Error::InvalidState {
                message: "X holds a completed line but did not move last".to_string(),
            });
        }
        if o_wins && x_count != o_count {
            return Err(Error::InvalidState {
                message: "O holds a completed line but did not move last".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_out(moves: &[(usize, usize)]) -> Board {
        let mut board = Board::new();
        for &(row, col) in moves {
            board = board.make_move(Move::new(row, col)).unwrap();
        }
        board
    }

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert_eq!(board.to_move(), Player::X);
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(board.cell(row, col).unwrap(), Cell::Empty);
            }
        }
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_make_move_places_derived_mark() {
        let board = Board::new();

        let next = board.make_move(Move::new(1, 1)).unwrap();
        assert_eq!(next.cell(1, 1).unwrap(), Cell::X);
        assert_eq!(next.to_move(), Player::O);

        let after = next.make_move(Move::new(0, 0)).unwrap();
        assert_eq!(after.cell(0, 0).unwrap(), Cell::O);
        assert_eq!(after.to_move(), Player::X);
    }

    #[test]
    fn test_make_move_rejects_occupied_cell() {
        let board = Board::new().make_move(Move::new(1, 1)).unwrap();
        let result = board.make_move(Move::new(1, 1));
        assert!(matches!(
            result,
            Err(Error::IllegalMove { row: 1, col: 1 })
        ));
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let board = Board::new();
        assert!(matches!(
            board.cell(3, 0),
            Err(Error::OutOfRange { row: 3, col: 0 })
        ));
        assert!(matches!(
            board.is_empty_cell(0, 7),
            Err(Error::OutOfRange { row: 0, col: 7 })
        ));
        assert!(matches!(
            board.make_move(Move::new(2, 3)),
            Err(Error::OutOfRange { row: 2, col: 3 })
        ));
    }

    #[test]
    fn test_make_move_leaves_input_unchanged() {
        let board = play_out(&[(0, 0), (1, 1)]);
        let snapshot = board;
        let _next = board.make_move(Move::new(2, 2)).unwrap();
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_to_move_counting_rule() {
        // Equal counts: X moves, including the empty board.
        assert_eq!(Board::new().to_move(), Player::X);
        assert_eq!(play_out(&[(0, 0), (1, 1)]).to_move(), Player::X);

        // X ahead by one: O moves.
        assert_eq!(play_out(&[(0, 0)]).to_move(), Player::O);

        // The rule answers consistently even for grids no legal game can
        // reach, such as O leading X.
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::O;
        assert_eq!(Board::from_cells(cells).to_move(), Player::X);
    }

    #[test]
    fn test_empty_cells_row_major_order() {
        let board = play_out(&[(0, 1), (1, 1)]);
        let empties = board.empty_cells();
        assert_eq!(empties.len(), 7);
        assert_eq!(empties[0], Move::new(0, 0));
        assert_eq!(empties[1], Move::new(0, 2));
        assert_eq!(empties[2], Move::new(1, 0));
        assert_eq!(empties.last(), Some(&Move::new(2, 2)));
    }

    #[test]
    fn test_legal_moves_shrink_and_vanish_at_terminal() {
        let mut board = Board::new();
        assert_eq!(board.legal_moves().len(), 9);

        board = board.make_move(Move::new(0, 0)).unwrap();
        assert_eq!(board.legal_moves().len(), 8);
        assert!(!board.legal_moves().contains(&Move::new(0, 0)));

        // X completes the top row; empty cells remain but the game is over.
        let won = play_out(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert!(won.is_terminal());
        assert!(won.legal_moves().is_empty());
        assert!(!won.empty_cells().is_empty());
    }

    #[test]
    fn test_win_detection_horizontal() {
        let board = play_out(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert!(board.is_terminal());
        assert_eq!(board.winner(), Some(Player::X));
        assert_eq!(board.winning_line(), Some([0, 1, 2]));
    }

    #[test]
    fn test_win_detection_vertical() {
        // O takes the middle column.
        let board = play_out(&[(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (2, 1)]);
        assert!(board.is_terminal());
        assert_eq!(board.winner(), Some(Player::O));
    }

    #[test]
    fn test_win_detection_diagonal() {
        let board = play_out(&[(0, 0), (0, 1), (1, 1), (0, 2), (2, 2)]);
        assert!(board.is_terminal());
        assert_eq!(board.winner(), Some(Player::X));
        assert_eq!(board.winning_line(), Some([0, 4, 8]));
    }

    #[test]
    fn test_draw_detection() {
        let board = play_out(&[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (2, 0),
            (1, 2),
            (2, 2),
            (2, 1),
        ]);
        assert!(board.is_terminal());
        assert_eq!(board.winner(), None);
        assert_eq!(board.outcome().unwrap(), Outcome::Draw);
        assert_eq!(board.utility().unwrap(), 0);
    }

    #[test]
    fn test_outcome_values() {
        let x_won = play_out(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert_eq!(x_won.outcome().unwrap(), Outcome::Win(Player::X));
        assert_eq!(x_won.utility().unwrap(), 1);

        let o_won = play_out(&[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (1, 2)]);
        assert_eq!(o_won.outcome().unwrap(), Outcome::Win(Player::O));
        assert_eq!(o_won.utility().unwrap(), -1);
    }

    #[test]
    fn test_utility_undefined_while_in_progress() {
        let board = play_out(&[(0, 0)]);
        assert!(matches!(board.utility(), Err(Error::InvalidState { .. })));
        assert!(matches!(board.outcome(), Err(Error::InvalidState { .. })));
    }

    #[test]
    fn test_from_string() {
        let board = Board::from_string("XOX......").unwrap();
        assert_eq!(board.cell(0, 0).unwrap(), Cell::X);
        assert_eq!(board.cell(0, 1).unwrap(), Cell::O);
        assert_eq!(board.cell(0, 2).unwrap(), Cell::X);
        assert_eq!(board.to_move(), Player::O);

        assert!(matches!(
            Board::from_string("XO"),
            Err(Error::InvalidBoardLength { got: 2, .. })
        ));
        assert!(matches!(
            Board::from_string("XOZ......"),
            Err(Error::InvalidCellCharacter { character: 'Z', .. })
        ));
        assert!(matches!(
            Board::from_string("XXX......"),
            Err(Error::InvalidPieceCounts {
                x_count: 3,
                o_count: 0
            })
        ));
        assert!(matches!(
            Board::from_string("O........"),
            Err(Error::InvalidPieceCounts {
                x_count: 0,
                o_count: 1
            })
        ));
    }

    #[test]
    fn test_from_string_ignores_whitespace() {
        let board = Board::from_string("XX. OO. ...").unwrap();
        assert_eq!(board.encode(), "XX.OO....");
    }

    #[test]
    fn test_encode_roundtrip() {
        let board = play_out(&[(1, 1), (0, 0), (2, 0)]);
        let encoded = board.encode();
        assert_eq!(encoded, "O...X.X..");
        assert_eq!(Board::from_string(&encoded).unwrap(), board);
        assert_eq!(Board::new().encode(), ".........");
    }

    #[test]
    fn test_display() {
        let board = Board::from_string("XOX.O.X..").unwrap();
        let display = format!("{board}");
        assert_eq!(display, "XOX\n.O.\nX..");
    }

    #[test]
    fn test_validate_accepts_played_positions() {
        assert!(Board::new().validate().is_ok());
        assert!(play_out(&[(0, 0), (1, 1), (2, 2)]).validate().is_ok());

        let won = play_out(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert!(won.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unreachable_grids() {
        // Both players with completed lines.
        let double = Board::from_string("XXXOOO...").unwrap();
        assert!(matches!(
            double.validate(),
            Err(Error::InvalidState { .. })
        ));

        // X "won" but the counts say X did not move last.
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[1] = Cell::X;
        cells[2] = Cell::X;
        cells[3] = Cell::O;
        cells[4] = Cell::O;
        cells[6] = Cell::O;
        let stale = Board::from_cells(cells);
        assert!(matches!(stale.validate(), Err(Error::InvalidState { .. })));

        // Impossible counts.
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[1] = Cell::X;
        assert!(matches!(
            Board::from_cells(cells).validate(),
            Err(Error::InvalidPieceCounts { .. })
        ));
    }

    #[test]
    fn test_player_alternation() {
        let mut board = Board::new();
        assert_eq!(board.to_move(), Player::X);

        board = board.make_move(Move::new(0, 0)).unwrap();
        assert_eq!(board.to_move(), Player::O);

        board = board.make_move(Move::new(0, 1)).unwrap();
        assert_eq!(board.to_move(), Player::X);

        board = board.make_move(Move::new(0, 2)).unwrap();
        assert_eq!(board.to_move(), Player::O);
    }
}
