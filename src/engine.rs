use log::debug;
use std::sync::Arc;

use crate::board::{Grid, Position, View};
use crate::config::EngineConfig;
use crate::error::ChessError;
use crate::rules::legality::legal_plies;
use crate::rules::movegen::PieceMove;
use crate::rules::validate;
use crate::search::cache::MoveCache;
use crate::search::lookahead::{Lookahead, Mode, SearchParams};
use crate::search::pager::{batch_size, CursorStore, Page, Pager};

/// What collaborators talk to: owns the move cache and the cursor store.
/// Positions go in and come out by value; nothing here holds game state.
pub struct Engine {
    config: EngineConfig,
    cache: Arc<MoveCache>,
    cursors: CursorStore,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let cache = Arc::new(MoveCache::with_capacity(config.cache_entries));
        let cursors = CursorStore::new(config.cursor_ttl);
        Self { config, cache, cursors }
    }

    pub fn config(&self) -> &EngineConfig { &self.config }

    pub fn cache(&self) -> &Arc<MoveCache> { &self.cache }

    pub fn cursors(&self) -> &CursorStore { &self.cursors }

    pub fn new_position(&self) -> Position { Position::startpos() }

    pub fn params(&self, depth: u32, mode: Mode) -> SearchParams {
        SearchParams { depth, mode, self_check: self.config.self_check }
    }

    /// Lazy lookahead sharing the engine's cache.
    pub fn lookahead(&self, position: &Position, depth: u32, mode: Mode) -> Lookahead<Arc<MoveCache>> {
        Lookahead::new(self.cache.clone(), position, self.params(depth, mode))
    }

    /// One batch of lookahead lines. Pass the previous page's cursor to
    /// continue; a `None` cursor in the result means nothing is left.
    pub fn slice_lookahead(&self, position: &Position, cursor: Option<&str>, depth: u32, mode: Mode) -> Result<Page, ChessError> {
        let params = self.params(depth, mode);
        let batch = batch_size(mode, depth, self.config.line_budget, self.config.pruned_batch);
        self.cursors.slice(position, cursor, params, || {
            debug!("starting {mode:?} lookahead at depth {depth}, batches of {batch}");
            Pager::new(Lookahead::new(self.cache.clone(), position, params), batch)
        })
    }

    /// Validates a grid proposed from outside and returns the position it
    /// leads to. On error `position` is exactly as it was.
    pub fn apply_external_move(&self, position: &Position, proposed: &Grid) -> Result<Position, ChessError> {
        validate::update(self.cache.as_ref(), position, proposed)
    }

    pub fn is_terminal(&self, position: &Position) -> bool { position.is_terminal() }

    pub fn legal_moves(&self, position: &Position) -> Vec<PieceMove> { legal_plies(self.cache.as_ref(), position) }

    pub fn render(&self, position: &Position, view: View) -> String { position.render(view) }
}

impl Default for Engine {
    fn default() -> Self { Self::new(EngineConfig::default()) }
}
