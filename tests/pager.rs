use knightline::search::{enumerate_exhaustive, enumerate_pruned, Line, Pager};
use knightline::{ChessError, Engine, EngineConfig, Mode, Position};

fn small_engine() -> Engine {
    Engine::new(EngineConfig { line_budget: 30, pruned_batch: 25, ..EngineConfig::default() })
}

fn drain(engine: &Engine, root: &Position, depth: u32, mode: Mode) -> Vec<Vec<Line>> {
    let mut pages = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = engine.slice_lookahead(root, cursor.as_deref(), depth, mode).unwrap();
        pages.push(page.lines);
        match page.cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }
    pages
}

#[test]
fn pages_concatenate_to_full_enumeration() {
    let engine = small_engine();
    let root = Position::startpos();
    let pages = drain(&engine, &root, 3, Mode::Exhaustive);
    let paged: Vec<Line> = pages.into_iter().flatten().collect();
    let direct: Vec<Line> = enumerate_exhaustive(&root, 3).collect();
    assert_eq!(paged.len(), 8902);
    assert!(paged == direct);
    assert!(engine.cursors().is_empty());
}

#[test]
fn pruned_pages_concatenate_to_full_enumeration() {
    let engine = small_engine();
    let root = Position::startpos();
    let paged: Vec<Line> = drain(&engine, &root, 2, Mode::Pruned).into_iter().flatten().collect();
    let direct: Vec<Line> = enumerate_pruned(&root, 2).collect();
    assert!(paged == direct);
}

#[test]
fn batches_respect_size_and_root_groups() {
    let engine = small_engine();
    let root = Position::startpos();
    let pages = drain(&engine, &root, 3, Mode::Exhaustive);
    for page in &pages {
        assert!(!page.is_empty());
        assert!(page.len() <= 10);
        let first = page[0].first();
        assert!(page.iter().all(|l| l.first() == first));
    }
    // each of the 20 root moves has at least 20 lines below it
    assert!(pages.len() >= 40);
}

#[test]
fn pager_stops_at_group_boundary() {
    let root = Position::startpos();
    let mut pager = Pager::new(enumerate_exhaustive(&root, 2), 1000);
    let batch = pager.next_batch();
    assert_eq!(batch.len(), 20);
    assert!(!pager.is_exhausted());
    let mut total = batch.len();
    while !pager.is_exhausted() {
        total += pager.next_batch().len();
    }
    assert_eq!(total, 400);
}

#[test]
fn cursor_is_single_use() {
    let engine = small_engine();
    let root = Position::startpos();
    let page = engine.slice_lookahead(&root, None, 3, Mode::Exhaustive).unwrap();
    let token = page.cursor.expect("more lines follow");
    let next = engine.slice_lookahead(&root, Some(&token), 3, Mode::Exhaustive).unwrap();
    assert_ne!(next.cursor.as_deref(), Some(token.as_str()));
    let again = engine.slice_lookahead(&root, Some(&token), 3, Mode::Exhaustive);
    assert!(matches!(again, Err(ChessError::UnknownCursor(t)) if t == token));
}

#[test]
fn cursor_is_bound_to_its_query() {
    let engine = small_engine();
    let root = Position::startpos();
    let token = engine.slice_lookahead(&root, None, 3, Mode::Exhaustive).unwrap().cursor.unwrap();

    let moved = engine.lookahead(&root, 1, Mode::Exhaustive).next().unwrap().nodes()[0];
    assert!(matches!(
        engine.slice_lookahead(&moved, Some(&token), 3, Mode::Exhaustive),
        Err(ChessError::UnknownCursor(_))
    ));
    assert!(matches!(
        engine.slice_lookahead(&root, Some(&token), 2, Mode::Exhaustive),
        Err(ChessError::UnknownCursor(_))
    ));
    // a mismatched query does not consume the token
    assert!(engine.slice_lookahead(&root, Some(&token), 3, Mode::Exhaustive).is_ok());
}

#[test]
fn unknown_token_is_rejected() {
    let engine = small_engine();
    let root = Position::startpos();
    let res = engine.slice_lookahead(&root, Some("not-a-cursor"), 2, Mode::Exhaustive);
    assert!(matches!(res, Err(ChessError::UnknownCursor(_))));
}

#[test]
fn expired_cursor_is_rejected() {
    let engine = Engine::new(EngineConfig {
        line_budget: 10,
        cursor_ttl: std::time::Duration::ZERO,
        ..EngineConfig::default()
    });
    let root = Position::startpos();
    let token = engine.slice_lookahead(&root, None, 2, Mode::Exhaustive).unwrap().cursor.unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    assert!(matches!(
        engine.slice_lookahead(&root, Some(&token), 2, Mode::Exhaustive),
        Err(ChessError::UnknownCursor(_))
    ));
}

#[test]
fn depth_one_pages_hold_one_root_move() {
    let engine = Engine::default();
    let root = Position::startpos();
    let page = engine.slice_lookahead(&root, None, 1, Mode::Exhaustive).unwrap();
    assert_eq!(page.lines.len(), 1);
    assert!(page.cursor.is_some());

    let done = root.with_counters(9, 50);
    let page = engine.slice_lookahead(&done, None, 3, Mode::Exhaustive).unwrap();
    assert_eq!(page.lines.len(), 1);
    assert_eq!(page.cursor, None);
}

#[test]
fn page_json_shape() {
    let engine = small_engine();
    let root = Position::startpos();
    let page = engine.slice_lookahead(&root, None, 2, Mode::Exhaustive).unwrap();
    let v = serde_json::to_value(&page).unwrap();
    assert!(v["cursor"].is_string());
    let boards = v["boards"].as_array().unwrap();
    assert_eq!(boards.len(), page.lines.len());
    for line in boards {
        let grids = line.as_array().unwrap();
        assert_eq!(grids.len(), 2);
        for grid in grids {
            let rows = grid.as_array().unwrap();
            assert_eq!(rows.len(), 8);
            assert!(rows.iter().all(|r| r.as_str().map_or(false, |s| s.len() == 16)));
        }
    }
    // root mover's king sits on the bottom row of every view
    assert_eq!(&boards[0][0][7].as_str().unwrap()[8..10], "15");
}
