mod hltb;

pub use hltb::*;
