use crate::error::ChessError;

/// Bit 0: the piece belongs to the side to move.
pub const ACTIVE: u8 = 0x01;
/// Bits 1-3: piece kind.
pub const KIND_MASK: u8 = 0x0E;
/// Bit 4: the piece has not moved yet.
pub const UNMOVED: u8 = 0x10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Kind {
    None = 0,
    Bishop = 1,
    King = 2,
    Knight = 3,
    Pawn = 4,
    Queen = 5,
    Rook = 6,
}

impl Kind {
    /// Kinds a pawn may promote to, in the order lookahead emits them.
    pub const PROMOTIONS: [Kind; 4] = [Kind::Bishop, Kind::Knight, Kind::Queen, Kind::Rook];

    pub fn from_index(i: u8) -> Option<Kind> {
        match i {
            0 => Some(Kind::None),
            1 => Some(Kind::Bishop),
            2 => Some(Kind::King),
            3 => Some(Kind::Knight),
            4 => Some(Kind::Pawn),
            5 => Some(Kind::Queen),
            6 => Some(Kind::Rook),
            _ => None,
        }
    }

    /// Encoded value of the kind, already shifted into bits 1-3.
    pub fn bits(self) -> u8 { (self as u8) << 1 }

    pub fn is_slider(self) -> bool { matches!(self, Kind::Bishop | Kind::Queen | Kind::Rook) }

    pub fn can_promote_to(self) -> bool { Kind::PROMOTIONS.contains(&self) }
}

/// One square of the board, bit-packed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Cell = Cell(0);

    pub const fn new(kind: Kind, active: bool, unmoved: bool) -> Cell {
        if matches!(kind, Kind::None) { return Cell(0); }
        let mut v = (kind as u8) << 1;
        if active { v |= ACTIVE; }
        if unmoved { v |= UNMOVED; }
        Cell(v)
    }

    pub fn from_raw(v: u8) -> Result<Cell, ChessError> {
        if v & !(ACTIVE | KIND_MASK | UNMOVED) != 0 { return Err(ChessError::InvalidCell(v)); }
        let kind = Kind::from_index((v & KIND_MASK) >> 1).ok_or(ChessError::InvalidCell(v))?;
        // Flags on an empty square are meaningless and would break equality.
        if kind == Kind::None && v != 0 { return Err(ChessError::InvalidCell(v)); }
        Ok(Cell(v))
    }

    pub fn raw(self) -> u8 { self.0 }

    pub fn kind(self) -> Kind {
        // from_raw and new never admit kind 7
        Kind::from_index((self.0 & KIND_MASK) >> 1).unwrap_or(Kind::None)
    }

    pub fn is_empty(self) -> bool { self.0 & KIND_MASK == 0 }

    /// Owned by the side to move.
    pub fn is_active(self) -> bool { !self.is_empty() && self.0 & ACTIVE != 0 }

    /// Owned by the side waiting.
    pub fn is_inactive(self) -> bool { !self.is_empty() && self.0 & ACTIVE == 0 }

    pub fn is_unmoved(self) -> bool { self.0 & UNMOVED != 0 }

    /// Same piece seen from the other side of the table.
    pub fn flipped(self) -> Cell {
        if self.is_empty() { Cell::EMPTY } else { Cell(self.0 ^ ACTIVE) }
    }

    /// Clears the unmoved flag.
    pub fn moved(self) -> Cell { Cell(self.0 & !UNMOVED) }

    pub fn is(self, kind: Kind, active: bool) -> bool {
        self.kind() == kind && !self.is_empty() && self.is_active() == active
    }

    pub fn glyph(self) -> Option<char> {
        const GLYPHS: [char; 14] = ['⌛', '‼', '♝', '♗', '♚', '♔', '♞', '♘', '♟', '♙', '♛', '♕', '♜', '♖'];
        if self.is_empty() { None } else { GLYPHS.get((self.0 & 0x0F) as usize).copied() }
    }
}
