pub mod cache;
pub mod lookahead;
pub mod pager;
pub mod zobrist;

pub use cache::MoveCache;
pub use lookahead::{children, enumerate_exhaustive, enumerate_pruned, Line, Lookahead, Mode, SearchParams, SelfCheck};
pub use pager::{batch_size, CursorStore, Page, Pager};
