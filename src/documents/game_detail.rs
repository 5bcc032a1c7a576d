use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::GameSearchResult;

/// Full record of a game's detail page.
///
/// Values are kept as the site formats them ("52h 01m", "3300", "95%"), callers
/// that need numbers parse them on their side.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub struct GameDetail {
    #[serde(flatten)]
    pub game: GameSearchResult,

    #[serde(rename = "Image")]
    #[serde(default)]
    pub image: String,

    #[serde(rename = "Description")]
    #[serde(default)]
    pub description: String,

    #[serde(rename = "Developer")]
    #[serde(default)]
    pub developer: String,

    #[serde(rename = "Publisher")]
    #[serde(default)]
    pub publisher: String,

    #[serde(rename = "Last Update")]
    #[serde(default)]
    pub last_update: String,

    #[serde(rename = "Genres")]
    #[serde(default)]
    pub genres: String,

    #[serde(rename = "Statistics")]
    #[serde(default)]
    pub statistics: Statistics,

    #[serde(rename = "Single-Player")]
    #[serde(default)]
    pub single_player: BTreeMap<String, PlayStyleTimes>,

    #[serde(rename = "Speedrun")]
    #[serde(default)]
    pub speedrun: BTreeMap<String, SpeedrunTimes>,

    #[serde(rename = "Platform")]
    #[serde(default)]
    pub platform: BTreeMap<String, PlatformTimes>,
}

impl GameDetail {
    /// Overlays fields scraped from the rendered page on top of `self`.
    /// Scraped values win whenever the page had them.
    pub fn merge(&mut self, markup: MarkupFields) {
        fn overlay(field: &mut String, value: Option<String>) {
            if let Some(value) = value {
                *field = value;
            }
        }

        overlay(&mut self.image, markup.image);
        overlay(&mut self.description, markup.description);
        overlay(&mut self.developer, markup.developer);
        overlay(&mut self.publisher, markup.publisher);
        overlay(&mut self.last_update, markup.last_update);
        overlay(&mut self.genres, markup.genres);

        if let Some(statistics) = markup.statistics {
            self.statistics = statistics;
        }
        if let Some(single_player) = markup.single_player {
            self.single_player = single_player;
        }
        if let Some(speedrun) = markup.speedrun {
            self.speedrun = speedrun;
        }
        if let Some(platform) = markup.platform {
            self.platform = platform;
        }
    }
}

#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub struct Statistics {
    #[serde(rename = "Playing")]
    #[serde(default)]
    pub playing: String,

    #[serde(rename = "Backlogs")]
    #[serde(default)]
    pub backlogs: String,

    #[serde(rename = "Replays")]
    #[serde(default)]
    pub replays: String,

    #[serde(rename = "Retired")]
    #[serde(default)]
    pub retired: String,

    #[serde(rename = "Rating")]
    #[serde(default)]
    pub rating: String,

    #[serde(rename = "Beat")]
    #[serde(default)]
    pub beat: String,
}

impl Statistics {
    pub fn is_empty(&self) -> bool {
        self.playing.is_empty()
            && self.backlogs.is_empty()
            && self.replays.is_empty()
            && self.retired.is_empty()
            && self.rating.is_empty()
            && self.beat.is_empty()
    }
}

/// Row of the Single-Player table.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub struct PlayStyleTimes {
    #[serde(rename = "Polled")]
    #[serde(default)]
    pub polled: String,

    #[serde(rename = "Average")]
    #[serde(default)]
    pub average: String,

    #[serde(rename = "Median")]
    #[serde(default)]
    pub median: String,

    #[serde(rename = "Rushed")]
    #[serde(default)]
    pub rushed: String,

    #[serde(rename = "Leisure")]
    #[serde(default)]
    pub leisure: String,
}

/// Row of the Speedrun table.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub struct SpeedrunTimes {
    #[serde(rename = "Polled")]
    #[serde(default)]
    pub polled: String,

    #[serde(rename = "Average")]
    #[serde(default)]
    pub average: String,

    #[serde(rename = "Median")]
    #[serde(default)]
    pub median: String,

    #[serde(rename = "Fastest")]
    #[serde(default)]
    pub fastest: String,

    #[serde(rename = "Slowest")]
    #[serde(default)]
    pub slowest: String,
}

/// Row of the Platform table.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub struct PlatformTimes {
    #[serde(rename = "Polled")]
    #[serde(default)]
    pub polled: String,

    #[serde(rename = "Main")]
    #[serde(default)]
    pub main: String,

    #[serde(rename = "Main +")]
    #[serde(default)]
    pub main_extras: String,

    #[serde(rename = "100%")]
    #[serde(default)]
    pub completionist: String,

    #[serde(rename = "Fastest")]
    #[serde(default)]
    pub fastest: String,

    #[serde(rename = "Longest")]
    #[serde(default)]
    pub longest: String,
}

/// Fields that only the rendered detail page carries. `None` means the page
/// had no such section.
#[derive(Default, Clone, PartialEq, Debug)]
pub struct MarkupFields {
    pub image: Option<String>,
    pub description: Option<String>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub last_update: Option<String>,
    pub genres: Option<String>,
    pub statistics: Option<Statistics>,
    pub single_player: Option<BTreeMap<String, PlayStyleTimes>>,
    pub speedrun: Option<BTreeMap<String, SpeedrunTimes>>,
    pub platform: Option<BTreeMap<String, PlatformTimes>>,
}
