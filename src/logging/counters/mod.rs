mod counters;
mod hltb_counters;

pub use hltb_counters::HltbCounters;
