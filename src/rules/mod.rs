pub mod legality;
pub mod movegen;
pub mod offsets;
pub mod transition;
pub mod validate;

pub use legality::{exposes_king, king_capturable, legal_plies, plies, valid_moves, MoveSource, Uncached};
pub use movegen::{candidates, is_on_board, PieceMove};
pub use offsets::candidate_offsets;
pub use transition::apply;
pub use validate::update;
