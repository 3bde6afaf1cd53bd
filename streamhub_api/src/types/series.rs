//! Series listing and detail types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::de::{map_or_empty_array, number_as_string, optional_number_as_string};

/// A series entry from `/series/list`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Series {
    #[serde(rename = "_id", deserialize_with = "number_as_string")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// Cover art URL.
    #[serde(default)]
    pub cover: Option<String>,

    #[serde(default)]
    pub plot: Option<String>,

    #[serde(default, deserialize_with = "optional_number_as_string")]
    pub rating: Option<String>,

    #[serde(default, deserialize_with = "optional_number_as_string")]
    pub year: Option<String>,
}

/// Response of `/series/detail`: series metadata plus episodes grouped by season.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeriesDetail {
    pub info: SeriesInfo,

    /// Episodes keyed by season number as sent by the backend.
    #[serde(default, deserialize_with = "map_or_empty_array")]
    pub episodes: BTreeMap<String, Vec<Episode>>,
}

impl SeriesDetail {
    /// Seasons in numeric order. Keys that are not numbers sort last.
    pub fn seasons(&self) -> Vec<(&str, &[Episode])> {
        let mut seasons: Vec<(&str, &[Episode])> = self
            .episodes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
            .collect();
        seasons.sort_by_key(|(k, _)| (k.parse::<u64>().unwrap_or(u64::MAX), k.to_string()));
        seasons
    }

    /// Total number of episodes across all seasons.
    pub fn episode_count(&self) -> usize {
        self.episodes.values().map(Vec::len).sum()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeriesInfo {
    #[serde(default)]
    pub title: String,

    #[serde(default, deserialize_with = "optional_number_as_string")]
    pub year: Option<String>,

    #[serde(default)]
    pub cover: Option<String>,

    #[serde(default)]
    pub plot: Option<String>,

    #[serde(default)]
    pub cast: Option<String>,

    #[serde(default)]
    pub director: Option<String>,

    #[serde(default)]
    pub genre: Option<String>,

    #[serde(default, deserialize_with = "optional_number_as_string")]
    pub rating: Option<String>,
}

/// A playable episode. `container_extension` is required to resolve its link.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Episode {
    #[serde(deserialize_with = "number_as_string")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub container_extension: String,

    #[serde(default, deserialize_with = "optional_number_as_string")]
    pub episode_num: Option<String>,

    #[serde(default, deserialize_with = "optional_number_as_string")]
    pub season: Option<String>,

    #[serde(default)]
    pub info: EpisodeInfo,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EpisodeInfo {
    #[serde(default)]
    pub duration: Option<String>,
}
