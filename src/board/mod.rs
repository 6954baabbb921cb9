pub mod cell;
pub mod grid;
pub mod position;

pub use cell::{Cell, Kind};
pub use grid::{Grid, Move, Mutation, Square, SIZE};
pub use position::{Color, Position, View, PAWNLESS_LIMIT};
