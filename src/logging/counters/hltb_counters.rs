use crate::{api::ApiKey, Status};

use super::counters::*;

pub struct HltbCounters;

impl HltbCounters {
    pub fn stale_key(key: &ApiKey) {
        counter("hltb_stale_key", &format!("HLTB stale API key: '{key}'"))
    }

    pub fn key_discovery_fail(status: &Status) {
        error_counter(
            "hltb_key_discovery_fail",
            "HLTB API key discovery failed",
            status,
        )
    }
}
