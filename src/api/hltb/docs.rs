use serde::{Deserialize, Serialize};

use super::ApiKey;

/// Body of the search POST. Only the query, page and key vary between
/// requests, the rest mirrors what the site's own search box sends.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub search_type: String,
    pub search_terms: Vec<String>,
    pub search_page: u64,
    pub size: u64,
    pub search_options: SearchOptions,
    pub use_cache: bool,
}

impl SearchRequest {
    pub fn new(query: &str, page: u64, key: &ApiKey) -> Self {
        SearchRequest {
            search_type: "games".to_owned(),
            search_terms: query.split_whitespace().map(|t| t.to_owned()).collect(),
            search_page: page,
            size: PAGE_SIZE,
            search_options: SearchOptions {
                games: GameOptions {
                    user_id: 0,
                    platform: String::default(),
                    sort_category: "popular".to_owned(),
                    range_category: "main".to_owned(),
                    range_time: RangeTime { min: 0, max: 0 },
                    gameplay: Gameplay::default(),
                    range_year: RangeYear::default(),
                    modifier: String::default(),
                },
                users: UserOptions {
                    sort_category: "postcount".to_owned(),
                    id: key.as_str().to_owned(),
                },
                lists: ListOptions {
                    sort_category: "follows".to_owned(),
                },
                filter: String::default(),
                sort: 0,
                randomizer: 0,
            },
            use_cache: true,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct SearchOptions {
    pub games: GameOptions,
    pub users: UserOptions,
    pub lists: ListOptions,
    pub filter: String,
    pub sort: u64,
    pub randomizer: u64,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GameOptions {
    pub user_id: u64,
    pub platform: String,
    pub sort_category: String,
    pub range_category: String,
    pub range_time: RangeTime,
    pub gameplay: Gameplay,
    pub range_year: RangeYear,
    pub modifier: String,
}

#[derive(Serialize, Debug)]
pub struct RangeTime {
    pub min: u64,
    pub max: u64,
}

#[derive(Serialize, Default, Debug)]
pub struct Gameplay {
    pub perspective: String,
    pub flow: String,
    pub genre: String,
    pub difficulty: String,
}

#[derive(Serialize, Default, Debug)]
pub struct RangeYear {
    pub min: String,
    pub max: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserOptions {
    pub sort_category: String,
    pub id: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
    pub sort_category: String,
}

/// Search response. Entries are kept as raw JSON and projected by the
/// extractor so that one odd entry cannot fail the whole page.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub count: u64,
    pub page_total: u64,
    pub data: Vec<serde_json::Value>,
}

pub const PAGE_SIZE: u64 = 20;
