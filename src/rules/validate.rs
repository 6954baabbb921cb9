use log::debug;

use crate::board::{Grid, Kind, Move, Mutation, Position};
use crate::error::ChessError;
use crate::rules::legality::{legal_plies, MoveSource};
use crate::rules::movegen::PieceMove;
use crate::rules::transition::transition;

fn reject(reason: String) -> ChessError {
    debug!("rejecting proposed grid: {reason}");
    ChessError::InvalidMove(reason)
}

/// Works out which single move turns `position`'s grid into `proposed`.
/// A pawn left unchanged on row 0 is read as a queen promotion.
pub fn infer_move(position: &Position, proposed: &Grid) -> Result<PieceMove, ChessError> {
    let diff = position.grid.diff(proposed);
    let [a, b] = diff.as_slice() else {
        return Err(reject(format!("expected exactly 2 changed squares, found {}", diff.len())));
    };
    let (origin, dest): (&Mutation, &Mutation) = match (a.after.is_empty(), b.after.is_empty()) {
        (true, false) => (a, b),
        (false, true) => (b, a),
        _ => return Err(reject("no single square was vacated".into())),
    };
    let piece = origin.before;
    if !piece.is_active() {
        return Err(reject(format!("{} does not hold a piece of the side to move", origin.square)));
    }
    if dest.before.is_active() {
        return Err(reject(format!("{} already holds a piece of the side to move", dest.square)));
    }
    if !dest.after.is_active() {
        return Err(reject(format!("{} does not receive a piece of the side to move", dest.square)));
    }
    let promotion = match (piece.kind(), dest.after.kind()) {
        (Kind::Pawn, arrived) if dest.square.y == 0 => {
            if arrived == Kind::Pawn { Some(Kind::Queen) }
            else if arrived.can_promote_to() { Some(arrived) }
            else { return Err(reject(format!("a pawn cannot promote to {arrived:?}"))); }
        }
        (moved, arrived) if moved == arrived => None,
        (moved, arrived) => return Err(reject(format!("{moved:?} turned into {arrived:?}"))),
    };
    let mv = Move::new(
        dest.square.x as i8 - origin.square.x as i8,
        origin.square.y as i8 - dest.square.y as i8,
    );
    Ok(PieceMove { from: origin.square, to: dest.square, mv, promotion })
}

/// Trust boundary for grids coming from outside. Accepts `proposed` only if
/// it is the result of one of the moves lookahead would offer from
/// `position`, then applies that move. `position` is never modified.
pub fn update<S: MoveSource + ?Sized>(src: &S, position: &Position, proposed: &Grid) -> Result<Position, ChessError> {
    if position.is_terminal() {
        return Err(ChessError::GameOver);
    }
    let pm = infer_move(position, proposed)?;
    if !legal_plies(src, position).contains(&pm) {
        return Err(reject(format!("{pm} is not a legal move")));
    }
    Ok(transition(position, &pm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Square};
    use crate::rules::legality::Uncached;

    fn sq(x: u8, y: u8) -> Square { Square::new(x, y).unwrap() }

    #[test]
    fn infers_pawn_double_step() {
        let p = Position::startpos();
        let from = sq(3, 6);
        let to = sq(3, 4);
        let g = p.grid.with(from, Cell::EMPTY).with(to, p.grid.get(from));
        let pm = infer_move(&p, &g).unwrap();
        assert_eq!(pm.mv, Move::new(0, 2));
        assert_eq!(pm.promotion, None);
        assert!(update(&Uncached, &p, &g).is_ok());
    }

    #[test]
    fn rejects_kind_change() {
        let p = Position::startpos();
        let from = sq(1, 7);
        let g = p.grid.with(from, Cell::EMPTY).with(sq(2, 5), Cell::new(Kind::Queen, true, false));
        assert!(matches!(infer_move(&p, &g), Err(ChessError::InvalidMove(_))));
    }

    #[test]
    fn rejects_unchanged_grid() {
        let p = Position::startpos();
        assert!(matches!(update(&Uncached, &p, &p.grid), Err(ChessError::InvalidMove(_))));
    }
}
