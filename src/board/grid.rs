use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::board::cell::{Cell, Kind};
use crate::error::ChessError;

pub const SIZE: usize = 8;

/// Column `x` and row `y`; row 0 is the far rank of the side to move.
/// Always on the board: every constructor checks bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub(crate) x: u8,
    pub(crate) y: u8,
}

impl Square {
    pub fn new(x: u8, y: u8) -> Result<Square, ChessError> {
        if (x as usize) < SIZE && (y as usize) < SIZE {
            Ok(Square { x, y })
        } else {
            Err(ChessError::OutOfBounds { x: x.min(i8::MAX as u8) as i8, y: y.min(i8::MAX as u8) as i8 })
        }
    }

    pub fn at(x: i8, y: i8) -> Result<Square, ChessError> {
        if (0..SIZE as i8).contains(&x) && (0..SIZE as i8).contains(&y) {
            Ok(Square { x: x as u8, y: y as u8 })
        } else {
            Err(ChessError::OutOfBounds { x, y })
        }
    }

    pub fn x(self) -> u8 { self.x }

    pub fn y(self) -> u8 { self.y }

    /// Destination of `mv` from here. Positive `dy` advances toward row 0.
    pub fn offset(self, mv: Move) -> Result<Square, ChessError> {
        // widened so no offset can overflow
        let narrow = |v: i16| v.clamp(i8::MIN as i16, i8::MAX as i16) as i8;
        Square::at(narrow(self.x as i16 + mv.dx as i16), narrow(self.y as i16 - mv.dy as i16))
    }

    /// The same physical square after the board is turned around.
    pub fn mirrored(self) -> Square {
        Square { x: (SIZE - 1) as u8 - self.x, y: (SIZE - 1) as u8 - self.y }
    }

    pub fn index(self) -> usize { self.y as usize * SIZE + self.x as usize }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..SIZE as u8).flat_map(|y| (0..SIZE as u8).map(move |x| Square { x, y }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "({}, {})", self.x, self.y) }
}

/// Offset relative to a piece, in the mover's orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub dx: i8,
    pub dy: i8,
}

impl Move {
    pub const fn new(dx: i8, dy: i8) -> Move { Move { dx, dy } }

    /// Unit step along the move and the number of steps it takes.
    pub fn unit(self) -> (Move, i8) {
        let steps = self.dx.saturating_abs().max(self.dy.saturating_abs());
        (Move { dx: self.dx.signum(), dy: self.dy.signum() }, steps)
    }

    pub fn scaled(self, k: i8) -> Move { Move { dx: self.dx * k, dy: self.dy * k } }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "<{:+}, {:+}>", self.dx, self.dy) }
}

/// One changed square between two grids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mutation {
    pub square: Square,
    pub before: Cell,
    pub after: Cell,
}

/// The 8x8 board, turn-relative.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Grid([[Cell; SIZE]; SIZE]);

impl Grid {
    pub const fn from_cells(rows: [[Cell; SIZE]; SIZE]) -> Grid { Grid(rows) }

    pub fn from_rows(rows: &[[u8; SIZE]; SIZE]) -> Result<Grid, ChessError> {
        let mut out = [[Cell::EMPTY; SIZE]; SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                out[y][x] = Cell::from_raw(v)?;
            }
        }
        Ok(Grid(out))
    }

    pub fn rows(&self) -> [[u8; SIZE]; SIZE] {
        let mut out = [[0u8; SIZE]; SIZE];
        for sq in Square::all() { out[sq.y as usize][sq.x as usize] = self.get(sq).raw(); }
        out
    }

    pub fn get(&self, sq: Square) -> Cell { self.0[sq.y as usize][sq.x as usize] }

    /// Copy with one square replaced.
    pub fn with(mut self, sq: Square, cell: Cell) -> Grid {
        self.0[sq.y as usize][sq.x as usize] = cell;
        self
    }

    /// Turn the board around for the other side: rows and columns reversed,
    /// ownership bit toggled on every occupied square.
    pub fn swapped(&self) -> Grid {
        let mut out = Grid::default();
        for sq in Square::all() {
            let m = sq.mirrored();
            out.0[m.y as usize][m.x as usize] = self.get(sq).flipped();
        }
        out
    }

    pub fn cells(&self) -> impl Iterator<Item = (Square, Cell)> + '_ {
        Square::all().map(move |sq| (sq, self.get(sq)))
    }

    /// Pieces of the side to move, row-major.
    pub fn active_pieces(&self) -> impl Iterator<Item = (Square, Cell)> + '_ {
        self.cells().filter(|(_, c)| c.is_active())
    }

    pub fn contains(&self, kind: Kind, active: bool) -> bool {
        self.cells().any(|(_, c)| c.is(kind, active))
    }

    pub fn has_kings(&self) -> bool {
        self.contains(Kind::King, true) && self.contains(Kind::King, false)
    }

    pub fn diff(&self, other: &Grid) -> Vec<Mutation> {
        Square::all()
            .filter_map(|sq| {
                let (before, after) = (self.get(sq), other.get(sq));
                (before != after).then_some(Mutation { square: sq, before, after })
            })
            .collect()
    }

    /// Parses the wire form: eight hex strings, two digits per cell.
    pub fn from_hex_rows<S: AsRef<str>>(rows: &[S]) -> Result<Grid, ChessError> {
        if rows.len() != SIZE {
            return Err(ChessError::InvalidGrid(format!("expected {SIZE} rows, got {}", rows.len())));
        }
        let mut raw = [[0u8; SIZE]; SIZE];
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != SIZE * 2 || !row.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ChessError::InvalidGrid(format!("row {y} is not {} hex digits", SIZE * 2)));
            }
            for x in 0..SIZE {
                raw[y][x] = u8::from_str_radix(&row[x * 2..x * 2 + 2], 16)
                    .map_err(|e| ChessError::InvalidGrid(format!("row {y}: {e}")))?;
            }
        }
        Grid::from_rows(&raw)
    }

    pub fn to_hex_rows(&self) -> [String; SIZE] {
        let rows = self.rows();
        std::array::from_fn(|y| rows[y].iter().map(|v| format!("{v:02x}")).collect())
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_hex_rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Grid, D::Error> {
        let rows = Vec::<String>::deserialize(deserializer)?;
        Grid::from_hex_rows(&rows).map_err(D::Error::custom)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_hex_rows()).finish()
    }
}

/// Glyph-per-cell view, as stored (side to move at the bottom).
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..SIZE as u8 {
            if y > 0 { writeln!(f)?; }
            for x in 0..SIZE as u8 {
                let glyph = self.get(Square { x, y }).glyph()
                    .unwrap_or(if (x + y) % 2 == 0 { '▪' } else { '▫' });
                write!(f, "{glyph}")?;
            }
        }
        Ok(())
    }
}
