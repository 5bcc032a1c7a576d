//! Projection of HowLongToBeat game records (search entries and the record
//! embedded in detail pages) into the crate's documents.
//!
//! Every field has a source key and a default. Missing or oddly typed fields
//! fall back to the default instead of failing the record.

use itertools::Itertools;
use serde_json::Value;

use crate::documents::{GameDetail, GameSearchResult, Statistics, TimeSummary};

/// Projects a search entry into a `GameSearchResult`.
pub fn extract_search_result(record: &Value) -> GameSearchResult {
    let title = match string_field(record, "game_name") {
        name if name.is_empty() => string_field(record, "game_alias"),
        name => name,
    };

    GameSearchResult {
        id: u64_field(record, "game_id"),
        title,
        platforms: list_field(record, "profile_platform"),
        summary: TimeSummary {
            main_story: format_duration(u64_field(record, "comp_main")),
            main_extras: format_duration(u64_field(record, "comp_plus")),
            completionist: format_duration(u64_field(record, "comp_100")),
            all_styles: format_duration(u64_field(record, "comp_all")),
        },
    }
}

/// Projects the game record of a detail page into a `GameDetail`. Tables that
/// are only rendered as HTML are left empty. Image urls point at `origin`.
pub fn extract_detail(record: &Value, origin: &str) -> GameDetail {
    let image = match string_field(record, "game_image") {
        file if file.is_empty() => file,
        file => format!("{}{GAME_IMAGES_PATH}{file}", origin.trim_end_matches('/')),
    };

    GameDetail {
        game: extract_search_result(record),
        image,
        description: string_field(record, "profile_summary"),
        developer: string_field(record, "profile_dev"),
        publisher: string_field(record, "profile_pub"),
        last_update: String::default(),
        genres: list_field(record, "profile_genre").into_iter().join(", "),
        statistics: Statistics {
            playing: string_field(record, "count_playing"),
            backlogs: string_field(record, "count_backlog"),
            replays: string_field(record, "count_replay"),
            retired: string_field(record, "count_retired"),
            rating: match string_field(record, "review_score") {
                score if score.is_empty() => score,
                score => format!("{score}%"),
            },
            beat: string_field(record, "count_comp"),
        },
        ..Default::default()
    }
}

/// Formats a duration in seconds the way the site's summary cards do.
pub fn format_duration(seconds: u64) -> String {
    if seconds == 0 {
        return "--".to_owned();
    }
    let minutes = ((seconds as f64) / 60.0).round().max(1.0) as u64;
    if minutes < 60 {
        return format!("{minutes} Mins");
    }

    let hours = seconds as f64 / 3600.0;
    let whole = hours.floor() as u64;
    match hours - whole as f64 {
        fraction if fraction >= 0.75 => format!("{} Hours", whole + 1),
        fraction if fraction >= 0.25 => format!("{whole}½ Hours"),
        _ => format!("{whole} Hours"),
    }
}

fn string_field(record: &Value, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(value)) => value.trim().to_owned(),
        Some(Value::Number(value)) => value.to_string(),
        _ => String::default(),
    }
}

fn u64_field(record: &Value, key: &str) -> u64 {
    match record.get(key) {
        Some(Value::Number(value)) => value
            .as_u64()
            .or_else(|| value.as_f64().map(|v| v.max(0.0) as u64))
            .unwrap_or_default(),
        Some(Value::String(value)) => value.trim().parse().unwrap_or_default(),
        _ => 0,
    }
}

fn list_field(record: &Value, key: &str) -> Vec<String> {
    string_field(record, key)
        .split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| item.to_owned())
        .collect()
}

const GAME_IMAGES_PATH: &str = "/games/";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ORIGIN: &str = "https://howlongtobeat.com";

    fn witcher_entry() -> Value {
        json!({
            "game_id": 10270,
            "game_name": "The Witcher 3: Wild Hunt",
            "game_alias": "",
            "game_image": "10270_The_Witcher_3_Wild_Hunt.jpg",
            "comp_main": 183600,
            "comp_plus": 370800,
            "comp_100": 622800,
            "comp_all": 363600,
            "profile_platform": "Nintendo Switch, PC, PlayStation 4, Xbox One",
            "profile_dev": "CD Projekt RED",
            "profile_pub": "CD Projekt, Warner Bros. Interactive Entertainment",
            "profile_genre": "Third-Person, Action, Open World, Role-Playing",
            "review_score": 95,
            "count_playing": 3312,
        })
    }

    #[test]
    fn extract_search_entry() {
        let result = extract_search_result(&witcher_entry());

        assert_eq!(result.id, 10270);
        assert_eq!(result.title, "The Witcher 3: Wild Hunt");
        assert_eq!(
            result.platforms,
            vec!["Nintendo Switch", "PC", "PlayStation 4", "Xbox One"]
        );
        assert_eq!(
            result.summary,
            TimeSummary {
                main_story: "51 Hours".to_owned(),
                main_extras: "103 Hours".to_owned(),
                completionist: "173 Hours".to_owned(),
                all_styles: "101 Hours".to_owned(),
            }
        );
    }

    #[test]
    fn extract_is_idempotent() {
        let entry = witcher_entry();
        assert_eq!(extract_search_result(&entry), extract_search_result(&entry));
        assert_eq!(extract_detail(&entry, ORIGIN), extract_detail(&entry, ORIGIN));
    }

    #[test]
    fn extract_empty_record_uses_defaults() {
        let result = extract_search_result(&json!({}));

        assert_eq!(result.id, 0);
        assert_eq!(result.title, "");
        assert!(result.platforms.is_empty());
        assert_eq!(result.summary.main_story, "--");
    }

    #[test]
    fn extract_tolerates_mistyped_fields() {
        let result = extract_search_result(&json!({
            "game_id": "42",
            "game_name": null,
            "game_alias": "Alias",
            "comp_main": "not a number",
            "profile_platform": ["PC"],
        }));

        assert_eq!(result.id, 42);
        assert_eq!(result.title, "Alias");
        assert_eq!(result.summary.main_story, "--");
        assert!(result.platforms.is_empty());
    }

    #[test]
    fn extract_detail_fields() {
        let detail = extract_detail(&witcher_entry(), ORIGIN);

        assert_eq!(detail.game.id, 10270);
        assert_eq!(
            detail.image,
            "https://howlongtobeat.com/games/10270_The_Witcher_3_Wild_Hunt.jpg"
        );
        assert_eq!(detail.developer, "CD Projekt RED");
        assert_eq!(
            detail.genres,
            "Third-Person, Action, Open World, Role-Playing"
        );
        assert_eq!(detail.statistics.rating, "95%");
        assert_eq!(detail.statistics.playing, "3312");
        assert_eq!(detail.statistics.beat, "");
        assert!(detail.single_player.is_empty());
    }

    #[test]
    fn extract_detail_image_follows_origin() {
        let detail = extract_detail(&witcher_entry(), "http://localhost:8080/");
        assert_eq!(
            detail.image,
            "http://localhost:8080/games/10270_The_Witcher_3_Wild_Hunt.jpg"
        );
    }

    #[test]
    fn format_durations() {
        assert_eq!(format_duration(0), "--");
        assert_eq!(format_duration(20), "1 Mins");
        assert_eq!(format_duration(45 * 60), "45 Mins");
        assert_eq!(format_duration(3569), "59 Mins");
        assert_eq!(format_duration(3570), "1 Hours");
        assert_eq!(format_duration(3599), "1 Hours");
        assert_eq!(format_duration(3600), "1 Hours");
        assert_eq!(format_duration(51 * 3600 + 600), "51 Hours");
        assert_eq!(format_duration(51 * 3600 + 1800), "51½ Hours");
        assert_eq!(format_duration(51 * 3600 + 2800), "52 Hours");
    }
}
