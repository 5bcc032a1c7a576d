//! Scraping of the rendered game detail page.
//!
//! Class names on the site are CSS-module hashes (`GameSummary_large__TIGhL`),
//! so sections are matched on the stable prefix of the class only.

use std::collections::{BTreeMap, HashMap};

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use crate::{
    documents::{MarkupFields, PlatformTimes, PlayStyleTimes, SpeedrunTimes, Statistics},
    Status,
};

/// Returns the game record embedded in the page's `__NEXT_DATA__` state.
pub fn extract_game_record(document: &Html) -> Result<Value, Status> {
    let script = document
        .select(&NEXT_DATA)
        .next()
        .ok_or_else(|| Status::malformed_response("detail page has no __NEXT_DATA__ script"))?;

    let state: Value = serde_json::from_str(&script.text().collect::<String>())?;
    match state.pointer(GAME_RECORD_POINTER) {
        Some(record) if record.is_object() => Ok(record.clone()),
        _ => Err(Status::malformed_response(format!(
            "__NEXT_DATA__ has no game record at '{GAME_RECORD_POINTER}'"
        ))),
    }
}

/// Extracts the fields that are only available as rendered HTML. Sections
/// missing from the page come back as `None`.
pub fn extract_markup(document: &Html) -> MarkupFields {
    let mut fields = MarkupFields {
        image: document
            .select(&IMAGE)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(|src| src.trim().to_owned())
            .filter(|src| !src.is_empty()),
        description: document
            .select(&DESCRIPTION)
            .next()
            .and_then(|div| description_text(&element_text(&div))),
        statistics: extract_statistics(document),
        ..Default::default()
    };

    // Without a `GameSummary_large` block, the first unlabeled profile entry
    // holds the description.
    for info in document.select(&PROFILE_INFO) {
        let text = element_text(&info);
        let labeled = match split_label(&text) {
            Some(("Developer" | "Developers", value)) => Some((&mut fields.developer, value)),
            Some(("Publisher" | "Publishers", value)) => Some((&mut fields.publisher, value)),
            Some(("Genre" | "Genres", value)) => Some((&mut fields.genres, value)),
            Some(("Updated", value)) => Some((&mut fields.last_update, value)),
            Some((label, _)) if IGNORED_LABELS.contains(&label) => continue,
            _ => None,
        };

        match labeled {
            Some((slot, value)) => {
                if slot.is_none() && !value.is_empty() {
                    *slot = Some(value.to_owned());
                }
            }
            None => {
                if fields.description.is_none() {
                    fields.description = description_text(&text);
                }
            }
        }
    }

    for table in document.select(&TIME_TABLE) {
        let Some((name, rows)) = read_table(&table) else {
            continue;
        };

        match name.to_lowercase() {
            name if name.starts_with("single-player") => {
                fields.single_player = Some(
                    rows.into_iter()
                        .map(|(key, row)| {
                            let times = PlayStyleTimes {
                                polled: cell(&row, "Polled"),
                                average: cell(&row, "Average"),
                                median: cell(&row, "Median"),
                                rushed: cell(&row, "Rushed"),
                                leisure: cell(&row, "Leisure"),
                            };
                            (key, times)
                        })
                        .collect(),
                )
            }
            name if name.starts_with("speedrun") => {
                fields.speedrun = Some(
                    rows.into_iter()
                        .map(|(key, row)| {
                            let times = SpeedrunTimes {
                                polled: cell(&row, "Polled"),
                                average: cell(&row, "Average"),
                                median: cell(&row, "Median"),
                                fastest: cell(&row, "Fastest"),
                                slowest: cell(&row, "Slowest"),
                            };
                            (key, times)
                        })
                        .collect(),
                )
            }
            name if name.starts_with("platform") => {
                fields.platform = Some(
                    rows.into_iter()
                        .map(|(key, row)| {
                            let times = PlatformTimes {
                                polled: cell(&row, "Polled"),
                                main: cell(&row, "Main"),
                                main_extras: cell(&row, "Main +"),
                                completionist: cell(&row, "100%"),
                                fastest: cell(&row, "Fastest"),
                                longest: cell(&row, "Longest"),
                            };
                            (key, times)
                        })
                        .collect(),
                )
            }
            _ => {}
        }
    }

    fields
}

/// Reads the "<value> <Label>" items of the profile details list.
fn extract_statistics(document: &Html) -> Option<Statistics> {
    let mut statistics = Statistics::default();

    for item in document.select(&PROFILE_DETAILS) {
        let text = element_text(&item);
        let Some((value, label)) = text.split_once(' ') else {
            continue;
        };

        let slot = match label.trim().to_lowercase().as_str() {
            "playing" => &mut statistics.playing,
            "backlogs" => &mut statistics.backlogs,
            "replays" => &mut statistics.replays,
            "retired" => &mut statistics.retired,
            "rating" => &mut statistics.rating,
            "beat" => &mut statistics.beat,
            _ => continue,
        };
        *slot = value.to_owned();
    }

    match statistics.is_empty() {
        true => None,
        false => Some(statistics),
    }
}

/// Returns the table name (first header cell) and its rows keyed by their
/// first cell, each row mapping column header to cell text.
fn read_table(table: &ElementRef) -> Option<(String, BTreeMap<String, HashMap<String, String>>)> {
    let headers: Vec<String> = table
        .select(&HEADER_CELL)
        .map(|cell| element_text(&cell))
        .collect();
    let name = headers.first()?.clone();

    let rows: BTreeMap<String, HashMap<String, String>> = table
        .select(&BODY_ROW)
        .filter_map(|row| {
            let cells: Vec<String> = row.select(&CELL).map(|cell| element_text(&cell)).collect();
            let (key, values) = cells.split_first()?;
            if key.is_empty() {
                return None;
            }

            let columns: HashMap<String, String> = headers
                .iter()
                .skip(1)
                .cloned()
                .zip(values.iter().cloned())
                .collect();
            Some((key.clone(), columns))
        })
        .collect();

    Some((name, rows))
}

fn cell(row: &HashMap<String, String>, header: &str) -> String {
    row.get(header).cloned().unwrap_or_default()
}

fn description_text(text: &str) -> Option<String> {
    Some(text.trim_end_matches(READ_MORE).trim_end().to_owned()).filter(|text| !text.is_empty())
}

/// Splits "Label: value" into its parts.
fn split_label(text: &str) -> Option<(&str, &str)> {
    let (label, value) = text.split_once(':')?;
    Some((label.trim(), value.trim()))
}

/// Text content of an element with whitespace collapsed.
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(|text| text.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

lazy_static! {
    static ref NEXT_DATA: Selector = Selector::parse("script#__NEXT_DATA__").unwrap();
    static ref IMAGE: Selector = Selector::parse(r#"[class*="GameHeader_game_image"] img"#).unwrap();
    static ref DESCRIPTION: Selector = Selector::parse(r#"[class*="GameSummary_large"]"#).unwrap();
    static ref PROFILE_INFO: Selector =
        Selector::parse(r#"[class*="GameSummary_profile_info"]"#).unwrap();
    static ref PROFILE_DETAILS: Selector =
        Selector::parse(r#"[class*="GameSummary_profile_details"] li"#).unwrap();
    static ref TIME_TABLE: Selector =
        Selector::parse(r#"table[class*="GameTimeTable_game_main_table"]"#).unwrap();
    static ref HEADER_CELL: Selector = Selector::parse("thead th, thead td").unwrap();
    static ref BODY_ROW: Selector = Selector::parse("tbody tr").unwrap();
    static ref CELL: Selector = Selector::parse("td").unwrap();
}

const GAME_RECORD_POINTER: &str = "/props/pageProps/game/data/game/0";
const READ_MORE: &str = "...Read More";
/// Profile labels that carry no markup field.
const IGNORED_LABELS: &[&str] = &["Platform", "Platforms", "NA", "EU", "JP", "Release"];

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{body}</body></html>"))
    }

    #[test]
    fn missing_sections_are_none() {
        let fields = extract_markup(&page("<div>nothing here</div>"));
        assert_eq!(fields, MarkupFields::default());
    }

    #[test]
    fn labeled_profile_fields() {
        let fields = extract_markup(&page(
            r#"<div class="GameSummary_profile_info__HZFQu GameSummary_large__TIGhL">
                 A long description. ...Read More
               </div>
               <div class="GameSummary_profile_info__HZFQu"><strong>Developers:</strong> Studio A, Studio B</div>
               <div class="GameSummary_profile_info__HZFQu"><strong>Publisher:</strong> Pub</div>
               <div class="GameSummary_profile_info__HZFQu"><strong>Genre:</strong> Puzzle</div>
               <div class="GameSummary_profile_info__HZFQu"><strong>Updated:</strong> 2 Hours Ago</div>"#,
        ));

        assert_eq!(fields.description.as_deref(), Some("A long description."));
        assert_eq!(fields.developer.as_deref(), Some("Studio A, Studio B"));
        assert_eq!(fields.publisher.as_deref(), Some("Pub"));
        assert_eq!(fields.genres.as_deref(), Some("Puzzle"));
        assert_eq!(fields.last_update.as_deref(), Some("2 Hours Ago"));
    }

    #[test]
    fn description_from_first_unlabeled_profile_info() {
        let fields = extract_markup(&page(
            r#"<div class="GameSummary_profile_info__X"><strong>Platforms:</strong> PC</div>
               <div class="GameSummary_profile_info__X">Sequel to Game: The First. ...Read More</div>
               <div class="GameSummary_profile_info__X"><strong>Developer:</strong> Dev</div>
               <div class="GameSummary_profile_info__X">A second paragraph.</div>"#,
        ));

        assert_eq!(
            fields.description.as_deref(),
            Some("Sequel to Game: The First.")
        );
        assert_eq!(fields.developer.as_deref(), Some("Dev"));
    }

    #[test]
    fn large_summary_wins_over_unlabeled_profile_info() {
        let fields = extract_markup(&page(
            r#"<div class="GameSummary_profile_info__X">Short blurb.</div>
               <div class="GameSummary_profile_info__X GameSummary_large__Y">Full description.</div>"#,
        ));

        assert_eq!(fields.description.as_deref(), Some("Full description."));
    }

    #[test]
    fn statistics_with_unknown_items() {
        let fields = extract_markup(&page(
            r#"<ul class="GameSummary_profile_details__oQJmM">
                 <li>12 Playing</li><li>80% Rating</li><li>7 Followers</li>
               </ul>"#,
        ));

        let statistics = fields.statistics.unwrap();
        assert_eq!(statistics.playing, "12");
        assert_eq!(statistics.rating, "80%");
        assert_eq!(statistics.beat, "");
    }

    #[test]
    fn page_without_speedrun_table() {
        let fields = extract_markup(&page(
            r#"<table class="GameTimeTable_game_main_table__7uN3H">
                 <thead><tr><td>Single-Player</td><td>Polled</td><td>Average</td>
                   <td>Median</td><td>Rushed</td><td>Leisure</td></tr></thead>
                 <tbody><tr><td>Main Story</td><td>12</td><td>5h</td><td>5h</td>
                   <td>4h</td><td>6h</td></tr></tbody>
               </table>"#,
        ));

        assert_eq!(fields.speedrun, None);
        assert_eq!(fields.platform, None);
        assert_eq!(
            fields.single_player.unwrap()["Main Story"],
            PlayStyleTimes {
                polled: "12".to_owned(),
                average: "5h".to_owned(),
                median: "5h".to_owned(),
                rushed: "4h".to_owned(),
                leisure: "6h".to_owned(),
            }
        );
    }

    #[test]
    fn table_cells_read_by_header() {
        let fields = extract_markup(&page(
            r#"<table class="GameTimeTable_game_main_table__7uN3H">
                 <thead><tr><th>Speedruns</th><th>Fastest</th><th>Polled</th></tr></thead>
                 <tbody><tr><td>Any%</td><td>1h</td><td>3</td></tr></tbody>
               </table>"#,
        ));

        let speedrun = fields.speedrun.unwrap();
        assert_eq!(speedrun["Any%"].fastest, "1h");
        assert_eq!(speedrun["Any%"].polled, "3");
        assert_eq!(speedrun["Any%"].slowest, "");
    }

    #[test]
    fn game_record_from_next_data() {
        let document = page(
            r#"<script id="__NEXT_DATA__" type="application/json">
                 {"props":{"pageProps":{"game":{"data":{"game":[{"game_id":1}]}}}}}
               </script>"#,
        );

        assert_eq!(
            extract_game_record(&document).unwrap()["game_id"],
            Value::from(1)
        );
    }

    #[test]
    fn game_record_missing_script() {
        assert!(matches!(
            extract_game_record(&page("<div></div>")),
            Err(Status::MalformedResponse(_))
        ));
    }

    #[test]
    fn game_record_missing_game() {
        let document = page(
            r#"<script id="__NEXT_DATA__">{"props":{"pageProps":{"game":{"data":{"game":[]}}}}}</script>"#,
        );

        assert!(matches!(
            extract_game_record(&document),
            Err(Status::MalformedResponse(_))
        ));
    }
}
