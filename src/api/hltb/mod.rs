mod backend;
mod docs;
mod extract;
mod hltb_scrape;
mod key;
mod service;

#[cfg(test)]
mod testing;

pub use backend::{ReqwestTransport, Transport};
pub use docs::{SearchRequest, PAGE_SIZE};
pub use extract::{extract_detail, extract_search_result, format_duration};
pub use hltb_scrape::{extract_game_record, extract_markup};
pub use key::{app_script_urls, discover_key, extract_key, ApiKey, KeyCache};
pub use service::{HowLongToBeat, HLTB_ORIGIN};
