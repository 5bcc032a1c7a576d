use serde::{Deserialize, Serialize};
use valuable::Valuable;

use crate::{
    api::ApiKey,
    documents::{GameDetail, SearchResults},
    log_event,
    logging::LogEvent,
    Status,
};

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
pub struct KeyDiscoveryEvent {
    origin: String,
    result: Response,
}

impl KeyDiscoveryEvent {
    pub fn discover(origin: &str, response: &Result<ApiKey, Status>) {
        log_event!(LogEvent::KeyDiscovery(KeyDiscoveryEvent {
            origin: origin.to_owned(),
            result: match response {
                Ok(key) => Response::Success(key.to_string()),
                Err(status) => Response::Error(status.to_string()),
            },
        }))
    }
}

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
pub struct SearchEvent {
    query: String,
    page: u64,
    result: SearchResponse,
}

impl SearchEvent {
    pub fn search(query: &str, page: u64, response: &Result<SearchResults, Status>) {
        log_event!(LogEvent::Search(SearchEvent {
            query: query.to_owned(),
            page,
            result: match response {
                Ok(resp) => SearchResponse::Success {
                    results: resp.results.len(),
                    total: resp.pagination.total_results,
                },
                Err(status) => SearchResponse::Error(status.to_string()),
            },
        }))
    }
}

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
pub struct DetailEvent {
    id: u64,
    result: Response,
}

impl DetailEvent {
    pub fn get(id: u64, response: &Result<GameDetail, Status>) {
        log_event!(LogEvent::Detail(DetailEvent {
            id,
            result: match response {
                Ok(game) => Response::Success(game.game.title.clone()),
                Err(status) => Response::Error(status.to_string()),
            },
        }))
    }
}

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
enum Response {
    Success(String),
    Error(String),
}

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
enum SearchResponse {
    Success { results: usize, total: u64 },
    Error(String),
}
