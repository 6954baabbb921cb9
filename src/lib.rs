// Turn-relative chess rules engine with paginated lookahead
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod perft;
pub mod rules;
pub mod search;

pub use board::{Cell, Grid, Kind, Move, Position, Square, View};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::ChessError;
pub use search::{Line, Mode, Page, SearchParams, SelfCheck};
