use std::sync::Arc;

use crate::board::{Grid, Kind, Move, Position, Square};
use crate::rules::movegen::{candidates, PieceMove};
use crate::rules::transition::transition;

/// Destination holds nothing of the mover's.
pub fn validate_ending(grid: &Grid, from: Square, mv: Move) -> bool {
    from.offset(mv).map_or(false, |to| !grid.get(to).is_active())
}

/// The destination passes `validate_ending`, and every square strictly
/// between origin and destination is empty.
pub fn validate_move(grid: &Grid, from: Square, mv: Move) -> bool {
    // an on-board destination keeps the step count below 8
    if !validate_ending(grid, from, mv) { return false; }
    let (unit, steps) = mv.unit();
    (1..steps).all(|k| from.offset(unit.scaled(k)).map_or(false, |sq| grid.get(sq).is_empty()))
}

/// Candidates for the piece on `from` that survive the per-kind filter.
pub fn valid_moves(grid: &Grid, from: Square) -> Vec<Move> {
    let kind = grid.get(from).kind();
    candidates(grid, from)
        .into_iter()
        .filter(|&mv| match kind {
            k if k.is_slider() => validate_move(grid, from, mv),
            Kind::King | Kind::Knight => validate_ending(grid, from, mv),
            _ => true,
        })
        .collect()
}

/// Where per-square move sets come from; the search plugs a memo cache in here.
pub trait MoveSource {
    fn valid_moves(&self, grid: &Grid, from: Square) -> Arc<[Move]>;
}

/// Recomputes every move set.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uncached;

impl MoveSource for Uncached {
    fn valid_moves(&self, grid: &Grid, from: Square) -> Arc<[Move]> { valid_moves(grid, from).into() }
}

impl<T: MoveSource + ?Sized> MoveSource for Arc<T> {
    fn valid_moves(&self, grid: &Grid, from: Square) -> Arc<[Move]> { (**self).valid_moves(grid, from) }
}

/// Whether the side to move can take the opposing king right now.
pub fn king_capturable<S: MoveSource + ?Sized>(src: &S, grid: &Grid) -> bool {
    grid.active_pieces().any(|(from, _)| {
        src.valid_moves(grid, from)
            .iter()
            .any(|&mv| from.offset(mv).map_or(false, |to| grid.get(to).is(Kind::King, false)))
    })
}

/// Every move for the side to move, without self-check filtering. When the
/// opposing king can be taken, only king captures are returned. A pawn
/// reaching row 0 fans out into one move per promotion kind.
pub fn plies<S: MoveSource + ?Sized>(src: &S, grid: &Grid) -> Vec<PieceMove> {
    let forced = king_capturable(src, grid);
    let mut out = Vec::with_capacity(48);
    for (from, cell) in grid.active_pieces() {
        for &mv in src.valid_moves(grid, from).iter() {
            let Ok(pm) = PieceMove::new(from, mv, None) else { continue };
            if forced && !grid.get(pm.to).is(Kind::King, false) { continue; }
            if cell.kind() == Kind::Pawn && pm.to.y == 0 {
                out.extend(Kind::PROMOTIONS.iter().map(|&k| PieceMove { promotion: Some(k), ..pm }));
            } else {
                out.push(pm);
            }
        }
    }
    out
}

/// After `pm`, could the opponent take the mover's king on the next ply?
/// A move that takes the opposing king ends the game, so nothing it exposes counts.
pub fn exposes_king<S: MoveSource + ?Sized>(src: &S, position: &Position, pm: &PieceMove) -> bool {
    let child = transition(position, pm);
    child.has_kings() && king_capturable(src, &child.grid)
}

/// `plies` minus the moves that leave the mover's own king capturable.
pub fn legal_plies<S: MoveSource + ?Sized>(src: &S, position: &Position) -> Vec<PieceMove> {
    plies(src, &position.grid).into_iter().filter(|pm| !exposes_king(src, position, pm)).collect()
}
