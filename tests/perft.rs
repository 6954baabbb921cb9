use knightline::perft::{count_lines, count_lines_parallel, divide};
use knightline::rules::legality::Uncached;
use knightline::search::{enumerate_exhaustive, MoveCache, SelfCheck};
use knightline::Position;

#[test]
fn perft_startpos_small_depths() {
    let b = Position::startpos();
    assert_eq!(count_lines(&Uncached, &b, 1, SelfCheck::Root), 20);
    assert_eq!(count_lines(&Uncached, &b, 2, SelfCheck::Root), 400);
    assert_eq!(count_lines(&Uncached, &b, 3, SelfCheck::Root), 8902);
}

#[test]
fn perft_matches_enumeration() {
    let b = Position::startpos();
    assert_eq!(enumerate_exhaustive(&b, 2).count() as u64, count_lines(&Uncached, &b, 2, SelfCheck::Root));
    assert_eq!(count_lines(&Uncached, &b, 0, SelfCheck::Root), 1);
}

#[test]
fn perft_parallel_equals_sequential() {
    let b = Position::startpos();
    let cache = MoveCache::with_capacity(1 << 12);
    let seq = count_lines(&Uncached, &b, 3, SelfCheck::Root);
    let par = count_lines_parallel(&cache, &b, 3, SelfCheck::Root);
    assert_eq!(seq, par);
}

#[test]
fn perft_divide_sums_to_total() {
    let b = Position::startpos();
    let parts = divide(&Uncached, &b, 2, SelfCheck::Root);
    assert_eq!(parts.len(), 20);
    assert!(parts.iter().all(|(_, n)| *n == 20));
    assert_eq!(parts.iter().map(|(_, n)| n).sum::<u64>(), 400);
}

#[test]
fn perft_every_ply_filter_agrees_when_no_checks_possible() {
    let b = Position::startpos();
    assert_eq!(count_lines(&Uncached, &b, 3, SelfCheck::EveryPly), 8902);
}
