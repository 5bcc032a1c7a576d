use serde::{Deserialize, Serialize};

/// A single game entry as listed by a HowLongToBeat search.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub struct GameSearchResult {
    #[serde(rename = "ID")]
    pub id: u64,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Platforms")]
    #[serde(default)]
    pub platforms: Vec<String>,

    #[serde(rename = "Summary")]
    #[serde(default)]
    pub summary: TimeSummary,
}

/// Time-to-beat per completion category, formatted the way the site displays
/// them (e.g. "51 Hours", "51½ Hours", "45 Mins", "--").
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub struct TimeSummary {
    #[serde(rename = "Main Story")]
    #[serde(default)]
    pub main_story: String,

    #[serde(rename = "Main + Extras")]
    #[serde(default)]
    pub main_extras: String,

    #[serde(rename = "Completionist")]
    #[serde(default)]
    pub completionist: String,

    #[serde(rename = "All Styles")]
    #[serde(default)]
    pub all_styles: String,
}

#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub struct Pagination {
    #[serde(rename = "Total Results")]
    pub total_results: u64,

    #[serde(rename = "Current Page")]
    pub current_page: u64,

    #[serde(rename = "Last Page")]
    pub last_page: u64,
}

#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub struct SearchResults {
    #[serde(rename = "Results")]
    pub results: Vec<GameSearchResult>,

    #[serde(rename = "Pagination")]
    pub pagination: Pagination,
}

impl SearchResults {
    pub fn is_last_page(&self) -> bool {
        self.pagination.current_page >= self.pagination.last_page
    }
}
