// Line counting: the same tree `Lookahead` walks, without building lines.
use rayon::prelude::*;

use crate::board::Position;
use crate::rules::legality::MoveSource;
use crate::search::lookahead::{children, SelfCheck};

/// Lines below a non-root node; `every_ply` applies the self-check filter here too.
pub fn count_subtree<S: MoveSource + ?Sized>(src: &S, position: &Position, depth: u32, every_ply: bool) -> u64 {
    if depth == 0 || position.is_terminal() { return 1; }
    children(src, position, every_ply)
        .iter()
        .map(|child| count_subtree(src, child, depth - 1, every_ply))
        .sum()
}

/// Number of lines `enumerate_exhaustive(position, depth)` yields.
pub fn count_lines<S: MoveSource + ?Sized>(src: &S, position: &Position, depth: u32, self_check: SelfCheck) -> u64 {
    if depth == 0 || position.is_terminal() { return 1; }
    let every_ply = self_check == SelfCheck::EveryPly;
    children(src, position, true)
        .iter()
        .map(|child| count_subtree(src, child, depth - 1, every_ply))
        .sum()
}

/// Root-split `count_lines`: each root move is counted on the rayon pool.
pub fn count_lines_parallel<S>(src: &S, position: &Position, depth: u32, self_check: SelfCheck) -> u64
where
    S: MoveSource + Sync + ?Sized,
{
    if depth == 0 || position.is_terminal() { return 1; }
    let every_ply = self_check == SelfCheck::EveryPly;
    let roots = children(src, position, true);
    roots.par_iter().map(|child| count_subtree(src, child, depth - 1, every_ply)).sum()
}

/// Per-root-move counts, in generation order.
pub fn divide<S: MoveSource + ?Sized>(src: &S, position: &Position, depth: u32, self_check: SelfCheck) -> Vec<(Position, u64)> {
    if depth == 0 || position.is_terminal() { return Vec::new(); }
    let every_ply = self_check == SelfCheck::EveryPly;
    children(src, position, true)
        .into_iter()
        .map(|child| {
            let n = count_subtree(src, &child, depth - 1, every_ply);
            (child, n)
        })
        .collect()
}
