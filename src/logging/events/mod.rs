mod hltb_events;

pub use hltb_events::*;
