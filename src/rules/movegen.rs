use std::fmt;

use crate::board::{Grid, Kind, Move, Square};
use crate::error::ChessError;
use crate::rules::offsets::{candidate_offsets, PAWN_ADVANCE, PAWN_CAPTURES, PAWN_DOUBLE};

/// A concrete move of the piece on `from`, optionally promoting it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PieceMove {
    pub from: Square,
    pub to: Square,
    pub mv: Move,
    pub promotion: Option<Kind>,
}

impl PieceMove {
    pub fn new(from: Square, mv: Move, promotion: Option<Kind>) -> Result<Self, ChessError> {
        Ok(Self { from, to: from.offset(mv)?, mv, promotion })
    }
}

impl fmt::Display for PieceMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)?;
        if let Some(k) = self.promotion { write!(f, "={k:?}")?; }
        Ok(())
    }
}

/// Bounds check; must run before anything indexes the destination.
pub fn is_on_board(from: Square, mv: Move) -> bool { from.offset(mv).is_ok() }

/// Forward moves need empty squares, the double step also needs the
/// unmoved flag, and diagonals need an opposing piece to take.
pub fn pawn_candidates(grid: &Grid, from: Square) -> Vec<Move> {
    let mut out = Vec::with_capacity(4);
    let empty = |mv: Move| from.offset(mv).map_or(false, |to| grid.get(to).is_empty());
    if empty(PAWN_ADVANCE) {
        out.push(PAWN_ADVANCE);
        if grid.get(from).is_unmoved() && empty(PAWN_DOUBLE) { out.push(PAWN_DOUBLE); }
    }
    for mv in PAWN_CAPTURES {
        if from.offset(mv).map_or(false, |to| grid.get(to).is_inactive()) { out.push(mv); }
    }
    out
}

/// On-board candidate offsets for whatever stands on `from`. Path and
/// destination checks happen in the legality filter.
pub fn candidates(grid: &Grid, from: Square) -> Vec<Move> {
    match grid.get(from).kind() {
        Kind::Pawn => pawn_candidates(grid, from),
        kind => candidate_offsets(kind).iter().copied().filter(|&mv| is_on_board(from, mv)).collect(),
    }
}
