use crate::board::{Kind, Move};

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (1, 1), (-1, 1), (1, -1)];
const AXES: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

// Every magnitude that can land on an 8x8 board, per direction.
const fn rays<const D: usize, const N: usize>(dirs: [(i8, i8); D]) -> [Move; N] {
    let mut out = [Move::new(0, 0); N];
    let mut i = 0;
    let mut d = 0;
    while d < D {
        let mut k = 1;
        while k < 8 {
            out[i] = Move::new(dirs[d].0 * k, dirs[d].1 * k);
            i += 1;
            k += 1;
        }
        d += 1;
    }
    out
}

const fn concat<const A: usize, const B: usize, const N: usize>(a: [Move; A], b: [Move; B]) -> [Move; N] {
    let mut out = [Move::new(0, 0); N];
    let mut i = 0;
    while i < A { out[i] = a[i]; i += 1; }
    while i < N { out[i] = b[i - A]; i += 1; }
    out
}

pub const BISHOP_MOVES: [Move; 28] = rays(DIAGONALS);
pub const ROOK_MOVES: [Move; 28] = rays(AXES);
pub const QUEEN_MOVES: [Move; 56] = concat(BISHOP_MOVES, ROOK_MOVES);

pub const KING_MOVES: [Move; 8] = [
    Move::new(-1, -1), Move::new(-1, 0), Move::new(-1, 1), Move::new(0, -1),
    Move::new(0, 1), Move::new(1, -1), Move::new(1, 0), Move::new(1, 1),
];

pub const KNIGHT_MOVES: [Move; 8] = [
    Move::new(-2, -1), Move::new(-2, 1), Move::new(-1, -2), Move::new(-1, 2),
    Move::new(1, -2), Move::new(1, 2), Move::new(2, -1), Move::new(2, 1),
];

pub const PAWN_ADVANCE: Move = Move::new(0, 1);
pub const PAWN_DOUBLE: Move = Move::new(0, 2);
pub const PAWN_CAPTURES: [Move; 2] = [Move::new(-1, 1), Move::new(1, 1)];

/// Tabulated candidate offsets for a piece kind. Pawns are computed from the
/// board instead, so they (and empty squares) get an empty table.
pub fn candidate_offsets(kind: Kind) -> &'static [Move] {
    match kind {
        Kind::Bishop => &BISHOP_MOVES,
        Kind::King => &KING_MOVES,
        Kind::Knight => &KNIGHT_MOVES,
        Kind::Queen => &QUEEN_MOVES,
        Kind::Rook => &ROOK_MOVES,
        Kind::Pawn | Kind::None => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn slider_tables_are_distinct_magnitudes() {
        for (kind, n) in [(Kind::Bishop, 28), (Kind::Rook, 28), (Kind::Queen, 56)] {
            let set: HashSet<Move> = candidate_offsets(kind).iter().copied().collect();
            assert_eq!(set.len(), n, "{kind:?}");
            assert!(!set.contains(&Move::new(0, 0)));
        }
        assert!(BISHOP_MOVES.iter().all(|m| m.dx.abs() == m.dy.abs()));
        assert!(ROOK_MOVES.iter().all(|m| m.dx == 0 || m.dy == 0));
    }
}
