use log::trace;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::board::{Grid, Move, Square};
use crate::rules::legality::{valid_moves, MoveSource};
use crate::search::zobrist;

#[derive(Clone, Debug)]
pub struct Entry {
    pub key: u64,
    pub grid: Grid,
    pub from: Square,
    pub moves: Arc<[Move]>,
    pub stamp: u64,
}

const DEFAULT_WAYS: usize = 4;

#[derive(Default, Clone)]
struct Slot(Option<Entry>);

#[derive(Default)]
struct Bucket {
    slots: [Slot; DEFAULT_WAYS],
}

/// Fixed-capacity memo of per-square move sets, least recently used entry
/// evicted within a bucket. Keys compare the whole grid, so a hash
/// collision is a miss, never a wrong answer.
#[derive(Default)]
pub struct MoveCache {
    buckets: Vec<Mutex<Bucket>>,
    clock: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MoveCache {
    pub fn new() -> Self {
        let mut c = Self::default();
        c.set_capacity_entries(4096);
        c
    }

    pub fn with_capacity(entries: usize) -> Self {
        let mut c = Self::default();
        c.set_capacity_entries(entries);
        c
    }

    pub fn set_capacity_entries(&mut self, cap: usize) {
        let entries = cap.max(DEFAULT_WAYS);
        let buckets = (entries + DEFAULT_WAYS - 1) / DEFAULT_WAYS;
        self.buckets.clear();
        self.buckets.resize_with(buckets, || Mutex::new(Bucket::default()));
    }

    pub fn capacity(&self) -> usize { self.buckets.len() * DEFAULT_WAYS }

    fn bucket_index(&self, key: u64) -> usize {
        let mixed = key ^ (key >> 32);
        (mixed as usize) % self.buckets.len().max(1)
    }

    fn tick(&self) -> u64 { self.clock.fetch_add(1, Ordering::Relaxed) }

    pub fn get(&self, grid: &Grid, from: Square) -> Option<Arc<[Move]>> {
        if self.buckets.is_empty() { return None; }
        let key = zobrist::compute_at(grid, from);
        let mut g = self.buckets[self.bucket_index(key)].lock().unwrap_or_else(|e| e.into_inner());
        let stamp = self.tick();
        for slot in g.slots.iter_mut() {
            if let Some(e) = slot.0.as_mut() {
                if e.key == key && e.from == from && e.grid == *grid {
                    e.stamp = stamp;
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(e.moves.clone());
                }
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub fn put(&self, grid: &Grid, from: Square, moves: Arc<[Move]>) {
        if self.buckets.is_empty() { return; }
        let key = zobrist::compute_at(grid, from);
        let e = Entry { key, grid: *grid, from, moves, stamp: self.tick() };
        let mut g = self.buckets[self.bucket_index(key)].lock().unwrap_or_else(|e| e.into_inner());
        // Same key: refresh in place
        for slot in g.slots.iter_mut() {
            if let Some(cur) = &slot.0 {
                if cur.key == e.key && cur.from == e.from && cur.grid == e.grid { slot.0 = Some(e); return; }
            }
        }
        // Empty slot first
        for slot in g.slots.iter_mut() { if slot.0.is_none() { slot.0 = Some(e); return; } }
        // Replace least recently used
        let mut victim = 0usize;
        let mut oldest = u64::MAX;
        for (i, slot) in g.slots.iter().enumerate() {
            if let Some(cur) = &slot.0 {
                if cur.stamp < oldest { oldest = cur.stamp; victim = i; }
            }
        }
        g.slots[victim].0 = Some(e);
    }

    pub fn len(&self) -> usize {
        self.buckets
            .iter()
            .map(|b| b.lock().unwrap_or_else(|e| e.into_inner()).slots.iter().filter(|s| s.0.is_some()).count())
            .sum()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn clear(&self) {
        for b in &self.buckets { *b.lock().unwrap_or_else(|e| e.into_inner()) = Bucket::default(); }
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) { (self.hits.load(Ordering::Relaxed), self.misses.load(Ordering::Relaxed)) }
}

impl MoveSource for MoveCache {
    fn valid_moves(&self, grid: &Grid, from: Square) -> Arc<[Move]> {
        if let Some(moves) = self.get(grid, from) { return moves; }
        trace!("move cache miss at {from}");
        let moves: Arc<[Move]> = valid_moves(grid, from).into();
        self.put(grid, from, moves.clone());
        moves
    }
}
