use log::{debug, info};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::iter::Peekable;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::board::Position;
use crate::error::ChessError;
use crate::search::lookahead::{Line, Mode, SearchParams};

/// Lines per batch: exhaustive batches shrink as lines get longer.
pub fn batch_size(mode: Mode, depth: u32, line_budget: usize, pruned_batch: usize) -> usize {
    match mode {
        Mode::Exhaustive => (line_budget / depth.max(1) as usize).max(1),
        Mode::Pruned => pruned_batch.max(1),
    }
}

/// Resumable batch reader over a line iterator. A batch never mixes lines
/// that start with different root moves.
pub struct Pager {
    lines: Peekable<Box<dyn Iterator<Item = Line> + Send>>,
    batch: usize,
}

impl Pager {
    pub fn new<I: Iterator<Item = Line> + Send + 'static>(lines: I, batch: usize) -> Self {
        let boxed: Box<dyn Iterator<Item = Line> + Send> = Box::new(lines);
        Self { lines: boxed.peekable(), batch: batch.max(1) }
    }

    pub fn next_batch(&mut self) -> Vec<Line> {
        let mut out: Vec<Line> = Vec::with_capacity(self.batch.min(1024));
        while out.len() < self.batch {
            let group = out.first().and_then(|l| l.first().copied());
            match self.lines.next_if(|l| group.is_none() || l.first() == group.as_ref()) {
                Some(line) => out.push(line),
                None => break,
            }
        }
        out
    }

    pub fn is_exhausted(&mut self) -> bool { self.lines.peek().is_none() }
}

/// One batch of lines plus the token for the next one (`None` once done).
/// Serialises as `{"cursor": ..., "boards": [[grid, ...], ...]}` with every
/// grid facing the root's side to move.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub cursor: Option<String>,
    #[serde(rename = "boards", serialize_with = "serialize_views")]
    pub lines: Vec<Line>,
}

fn serialize_views<S: Serializer>(lines: &Vec<Line>, s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(lines.iter().map(Line::views))
}

struct Parked {
    pager: Pager,
    root: Position,
    params: SearchParams,
    touched: Instant,
}

/// Suspended enumerations keyed by opaque token. Each token resumes once;
/// resuming hands out a fresh token for whatever is left.
pub struct CursorStore {
    parked: Mutex<HashMap<String, Parked>>,
    ttl: Duration,
}

impl CursorStore {
    pub fn new(ttl: Duration) -> Self { Self { parked: Mutex::new(HashMap::new()), ttl } }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Parked>> {
        self.parked.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn len(&self) -> usize { self.lock().len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Drops cursors idle for longer than the store's ttl.
    pub fn evict_expired(&self) -> usize {
        let ttl = self.ttl;
        let mut parked = self.lock();
        let before = parked.len();
        parked.retain(|_, p| p.touched.elapsed() <= ttl);
        let evicted = before - parked.len();
        if evicted > 0 { info!("evicted {evicted} idle lookahead cursors"); }
        evicted
    }

    fn take(&self, token: &str, root: &Position, params: SearchParams) -> Result<Pager, ChessError> {
        let mut parked = self.lock();
        match parked.get(token) {
            Some(p) if p.root == *root && p.params == params => {}
            _ => return Err(ChessError::UnknownCursor(token.to_string())),
        }
        parked.remove(token).map(|p| p.pager).ok_or_else(|| ChessError::UnknownCursor(token.to_string()))
    }

    fn park(&self, pager: Pager, root: &Position, params: SearchParams) -> String {
        let token = format!("{:032x}", rand::random::<u128>());
        self.lock().insert(token.clone(), Parked { pager, root: *root, params, touched: Instant::now() });
        token
    }

    /// Next batch for `cursor`, or the first batch of a new enumeration built
    /// by `start` when `cursor` is `None`. The store lock is not held while
    /// lines are generated.
    pub fn slice<F>(&self, root: &Position, cursor: Option<&str>, params: SearchParams, start: F) -> Result<Page, ChessError>
    where
        F: FnOnce() -> Pager,
    {
        self.evict_expired();
        let mut pager = match cursor {
            Some(token) => {
                debug!("resuming lookahead cursor {token}");
                self.take(token, root, params)?
            }
            None => start(),
        };
        let lines = pager.next_batch();
        if pager.is_exhausted() {
            debug!("lookahead exhausted after {} lines in last batch", lines.len());
            return Ok(Page { cursor: None, lines });
        }
        let token = self.park(pager, root, params);
        debug!("parked lookahead cursor {token} (depth {}, {:?})", params.depth, params.mode);
        Ok(Page { cursor: Some(token), lines })
    }
}

impl Default for CursorStore {
    fn default() -> Self { Self::new(Duration::from_secs(300)) }
}
