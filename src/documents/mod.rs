mod game_detail;
mod game_search;

pub use game_detail::*;
pub use game_search::*;
