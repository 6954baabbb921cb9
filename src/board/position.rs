use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::cell::{Cell, Kind};
use crate::board::grid::Grid;

/// Moves without a pawn advance after which the game is over.
pub const PAWNLESS_LIMIT: u32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

/// Which way round to draw a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum View {
    /// As stored: side to move at the bottom.
    #[default]
    Relative,
    /// White at the bottom, white pieces drawn as white glyphs.
    Absolute,
}

/// Immutable game state. Every transition produces a new value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub grid: Grid,
    pub move_count: u32,
    pub moves_since_pawn_advance: u32,
}

const fn initial_grid() -> Grid {
    use Kind::*;
    const fn back(active: bool) -> [Cell; 8] {
        [
            Cell::new(Rook, active, true), Cell::new(Knight, active, false),
            Cell::new(Bishop, active, false), Cell::new(Queen, active, false),
            Cell::new(King, active, true), Cell::new(Bishop, active, false),
            Cell::new(Knight, active, false), Cell::new(Rook, active, true),
        ]
    }
    let empty = [Cell::EMPTY; 8];
    Grid::from_cells([
        back(false),
        [Cell::new(Pawn, false, true); 8],
        empty, empty, empty, empty,
        [Cell::new(Pawn, true, true); 8],
        back(true),
    ])
}

impl Position {
    /// Standard initial arrangement, white to move.
    pub fn startpos() -> Self {
        Self { grid: initial_grid(), move_count: 1, moves_since_pawn_advance: 0 }
    }

    /// Fresh game state around an arbitrary grid.
    pub fn from_grid(grid: Grid) -> Self {
        Self { grid, move_count: 1, moves_since_pawn_advance: 0 }
    }

    pub fn with_counters(self, move_count: u32, moves_since_pawn_advance: u32) -> Self {
        Self { move_count, moves_since_pawn_advance, ..self }
    }

    /// Absolute color of the side to move; white moves on odd counts.
    pub fn side_to_move(&self) -> Color {
        if self.move_count % 2 == 1 { Color::White } else { Color::Black }
    }

    pub fn has_kings(&self) -> bool { self.grid.has_kings() }

    /// Game over: a king is gone, or fifty moves passed without a pawn move.
    pub fn is_terminal(&self) -> bool {
        self.moves_since_pawn_advance >= PAWNLESS_LIMIT || !self.has_kings()
    }

    /// The grid with bit 0 meaning "white" and white at the bottom.
    pub fn absolute_grid(&self) -> Grid {
        match self.side_to_move() {
            Color::White => self.grid,
            Color::Black => self.grid.swapped(),
        }
    }

    pub fn render(&self, view: View) -> String {
        match view {
            View::Relative => self.grid.to_string(),
            View::Absolute => self.absolute_grid().to_string(),
        }
    }
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.grid) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::grid::Square;

    fn sq(x: u8, y: u8) -> Square { Square::new(x, y).unwrap() }

    #[test]
    fn startpos_layout() {
        let p = Position::startpos();
        assert_eq!(p.grid.rows()[7], [0x1D, 7, 3, 11, 0x15, 3, 7, 0x1D]);
        assert_eq!(p.grid.rows()[1], [0x18; 8]);
        assert_eq!(p.grid.get(sq(3, 0)).kind(), Kind::Queen);
        assert!(!p.is_terminal());
        assert_eq!(p.side_to_move(), Color::White);
    }

    #[test]
    fn startpos_renders_as_glyphs() {
        let expected = "\
♜♞♝♛♚♝♞♜
♟♟♟♟♟♟♟♟
▪▫▪▫▪▫▪▫
▫▪▫▪▫▪▫▪
▪▫▪▫▪▫▪▫
▫▪▫▪▫▪▫▪
♙♙♙♙♙♙♙♙
♖♘♗♕♔♗♘♖";
        let p = Position::startpos();
        assert_eq!(p.render(View::Relative), expected);
        assert_eq!(p.render(View::Absolute), expected);
    }

    #[test]
    fn absolute_view_turns_black_around() {
        let p = Position::startpos();
        let black = Position { grid: p.grid.swapped(), move_count: 2, moves_since_pawn_advance: 0 };
        assert_eq!(black.render(View::Absolute), p.render(View::Relative));
        assert_ne!(black.render(View::Relative), p.render(View::Relative));
    }

    #[test]
    fn pawnless_limit_is_terminal() {
        let p = Position::startpos();
        assert!(!p.with_counters(99, 49).is_terminal());
        assert!(p.with_counters(100, 50).is_terminal());
    }
}
