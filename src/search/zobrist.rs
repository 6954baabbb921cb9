use crate::board::{Grid, Square, SIZE};
use std::sync::OnceLock;

// Every raw cell value fits in five bits.
const CELL_VALUES: usize = 32;
const SQUARES: usize = SIZE * SIZE;

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

static TABLE: OnceLock<[u64; CELL_VALUES * SQUARES]> = OnceLock::new();
static ORIGIN: OnceLock<[u64; SQUARES]> = OnceLock::new();

fn init_table() -> &'static [u64; CELL_VALUES * SQUARES] {
    TABLE.get_or_init(|| {
        let mut t = [0u64; CELL_VALUES * SQUARES];
        let mut seed = 0xF00D_F00D_DEAD_BEEF;
        for v in &mut t {
            seed = splitmix64(seed);
            *v = seed;
        }
        t
    })
}

fn init_origin() -> &'static [u64; SQUARES] {
    ORIGIN.get_or_init(|| {
        let mut t = [0u64; SQUARES];
        let mut seed = 0xABCDEF1234567890;
        for v in &mut t {
            seed = splitmix64(seed);
            *v = seed;
        }
        t
    })
}

/// Hash of a grid. Empty squares contribute nothing.
pub fn compute(grid: &Grid) -> u64 {
    let table = init_table();
    grid.cells()
        .filter(|(_, c)| !c.is_empty())
        .fold(0u64, |key, (sq, c)| key ^ table[c.raw() as usize * SQUARES + sq.index()])
}

/// Hash of a grid plus the square a move set is generated for.
pub fn compute_at(grid: &Grid, from: Square) -> u64 {
    compute(grid) ^ init_origin()[from.index()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    fn sq(x: u8, y: u8) -> Square { Square::new(x, y).unwrap() }

    #[test]
    fn distinguishes_orientation_and_origin() {
        let g = Position::startpos().grid;
        assert_eq!(compute(&g), compute(&g));
        assert_ne!(compute(&g), compute(&g.swapped()));
        assert_ne!(compute_at(&g, sq(1, 7)), compute_at(&g, sq(6, 7)));
        assert_eq!(compute(&Grid::default()), 0);
    }
}
