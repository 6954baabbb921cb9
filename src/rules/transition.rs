use log::debug;

use crate::board::{Cell, Kind, Position};
use crate::error::ChessError;
use crate::rules::legality::MoveSource;
use crate::rules::movegen::PieceMove;

/// Moves the piece, bumps the counters, and turns the board around for the
/// other side. Assumes `pm` came out of the move generator.
pub(crate) fn transition(position: &Position, pm: &PieceMove) -> Position {
    let piece = position.grid.get(pm.from);
    let placed = match pm.promotion {
        Some(kind) => Cell::new(kind, true, false),
        None => piece.moved(),
    };
    let grid = position.grid.with(pm.from, Cell::EMPTY).with(pm.to, placed);
    let moves_since_pawn_advance = if piece.kind() == Kind::Pawn { 0 } else { position.moves_since_pawn_advance + 1 };
    Position {
        grid: grid.swapped(),
        move_count: position.move_count + 1,
        moves_since_pawn_advance,
    }
}

/// Checked transition: `pm` must be one of the generator's moves for the
/// piece on its origin, and must promote exactly when a pawn reaches row 0.
pub fn apply<S: MoveSource + ?Sized>(src: &S, position: &Position, pm: &PieceMove) -> Result<Position, ChessError> {
    let invalid = || ChessError::InvalidTransition { from: pm.from, mv: pm.mv };
    let piece = position.grid.get(pm.from);
    if !piece.is_active() || pm.from.offset(pm.mv) != Ok(pm.to) {
        debug!("rejecting transition {pm}: no own piece or inconsistent target");
        return Err(invalid());
    }
    if !src.valid_moves(&position.grid, pm.from).contains(&pm.mv) {
        debug!("rejecting transition {pm}: not generated for {:?}", piece.kind());
        return Err(invalid());
    }
    let promotes = piece.kind() == Kind::Pawn && pm.to.y == 0;
    match pm.promotion {
        Some(kind) if promotes && kind.can_promote_to() => {}
        None if !promotes => {}
        _ => return Err(invalid()),
    }
    Ok(transition(position, pm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Grid, Move, Square};
    use crate::rules::legality::Uncached;

    fn sq(x: u8, y: u8) -> Square { Square::new(x, y).unwrap() }

    #[test]
    fn pawn_double_step_rotates_and_resets_counter() {
        let p = Position::startpos().with_counters(7, 12);
        let pm = PieceMove::new(sq(4, 6), Move::new(0, 2), None).unwrap();
        let next = apply(&Uncached, &p, &pm).unwrap();
        assert_eq!(next.move_count, 8);
        assert_eq!(next.moves_since_pawn_advance, 0);
        // (4, 4) seen from the other side is (3, 3); the pawn lost its flag
        assert_eq!(next.grid.get(sq(3, 3)), Cell::new(Kind::Pawn, false, false));
        assert!(next.grid.get(sq(3, 1)).is_empty());
        assert_eq!(next.grid.get(sq(3, 6)), Cell::new(Kind::Pawn, true, true));
    }

    #[test]
    fn knight_move_counts_toward_pawnless_limit() {
        let p = Position::startpos();
        let pm = PieceMove::new(sq(1, 7), Move::new(1, 2), None).unwrap();
        let next = apply(&Uncached, &p, &pm).unwrap();
        assert_eq!(next.moves_since_pawn_advance, 1);
    }

    #[test]
    fn rejects_moves_never_generated() {
        let p = Position::startpos();
        let rook_jump = PieceMove::new(sq(0, 7), Move::new(0, 3), None).unwrap();
        assert!(matches!(apply(&Uncached, &p, &rook_jump), Err(ChessError::InvalidTransition { .. })));
        let empty = PieceMove::new(sq(4, 4), Move::new(0, 1), None).unwrap();
        assert!(apply(&Uncached, &p, &empty).is_err());
    }

    #[test]
    fn promotion_must_match_far_rank() {
        let g = Grid::default()
            .with(sq(0, 7), Cell::new(Kind::King, true, false))
            .with(sq(7, 0), Cell::new(Kind::King, false, false))
            .with(sq(2, 1), Cell::new(Kind::Pawn, true, false));
        let p = Position::from_grid(g);
        let bare = PieceMove::new(sq(2, 1), Move::new(0, 1), None).unwrap();
        assert!(apply(&Uncached, &p, &bare).is_err());
        let queen = PieceMove { promotion: Some(Kind::Queen), ..bare };
        let next = apply(&Uncached, &p, &queen).unwrap();
        assert_eq!(next.grid.get(sq(5, 7)), Cell::new(Kind::Queen, false, false));
        let king = PieceMove { promotion: Some(Kind::King), ..bare };
        assert!(apply(&Uncached, &p, &king).is_err());
    }

    #[test]
    fn oversized_offsets_are_invalid_transitions() {
        let p = Position::startpos();
        for mv in [Move::new(127, 0), Move::new(-128, -128), Move::new(0, 127)] {
            let pm = PieceMove { from: sq(7, 7), to: sq(7, 7), mv, promotion: None };
            assert!(matches!(apply(&Uncached, &p, &pm), Err(ChessError::InvalidTransition { .. })), "{mv}");
        }
    }
}
