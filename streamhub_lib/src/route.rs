//! Typed route table for the front-end's URL paths.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use streamhub_api::types::Episode;
use streamhub_api::Domain;

use crate::error::StreamhubError;
use crate::playback::PlaybackTarget;

/// Characters left unescaped in a path parameter, as browsers' `encodeURIComponent` does.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A view and its path parameters. Parameters are opaque strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Movies,
    Series,
    SeriesDetail {
        id: String,
    },
    MoviePlayer {
        id: String,
    },
    EpisodePlayer {
        episode_id: String,
        container_extension: String,
        title: String,
        episode_num: String,
        season: String,
    },
    LiveTv,
    LiveTvPlayer {
        stream_id: String,
        stream_name: String,
    },
}

impl Route {
    /// Matches a path such as `/series/42/detail`. Query strings and
    /// fragments are ignored, as is a trailing slash.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
            .collect();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["movies"] => Route::Movies,
            ["series"] => Route::Series,
            ["series", id, "detail"] => Route::SeriesDetail { id: id.to_string() },
            ["play", id] => Route::MoviePlayer { id: id.to_string() },
            ["episode-player", episode_id, container_extension, title, episode_num, season] => {
                Route::EpisodePlayer {
                    episode_id: episode_id.to_string(),
                    container_extension: container_extension.to_string(),
                    title: title.to_string(),
                    episode_num: episode_num.to_string(),
                    season: season.to_string(),
                }
            }
            ["live-tv"] => Route::LiveTv,
            ["live-tv", stream_id, stream_name] => Route::LiveTvPlayer {
                stream_id: stream_id.to_string(),
                stream_name: stream_name.to_string(),
            },
            _ => return None,
        };
        Some(route)
    }

    /// The player route for an episode of a series detail page.
    pub fn episode_player(episode: &Episode) -> Route {
        Route::EpisodePlayer {
            episode_id: episode.id.clone(),
            container_extension: episode.container_extension.clone(),
            title: episode.title.clone(),
            episode_num: episode.episode_num.clone().unwrap_or_default(),
            season: episode.season.clone().unwrap_or_default(),
        }
    }

    /// Renders the route back into a path, percent-encoding parameters.
    pub fn path(&self) -> String {
        let segments: Vec<&str> = match self {
            Route::Home => vec![],
            Route::Movies => vec!["movies"],
            Route::Series => vec!["series"],
            Route::SeriesDetail { id } => vec!["series", id.as_str(), "detail"],
            Route::MoviePlayer { id } => vec!["play", id.as_str()],
            Route::EpisodePlayer {
                episode_id,
                container_extension,
                title,
                episode_num,
                season,
            } => vec![
                "episode-player",
                episode_id.as_str(),
                container_extension.as_str(),
                title.as_str(),
                episode_num.as_str(),
                season.as_str(),
            ],
            Route::LiveTv => vec!["live-tv"],
            Route::LiveTvPlayer {
                stream_id,
                stream_name,
            } => vec!["live-tv", stream_id.as_str(), stream_name.as_str()],
        };
        let mut path = String::new();
        for segment in segments {
            path.push('/');
            path.extend(utf8_percent_encode(segment, COMPONENT));
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }

    /// The catalog browsed by a listing route.
    pub fn listing_domain(&self) -> Option<Domain> {
        match self {
            Route::Movies => Some(Domain::Movies),
            Route::Series => Some(Domain::Series),
            Route::LiveTv => Some(Domain::LiveTv),
            _ => None,
        }
    }

    /// What a player route needs resolved before playback can start.
    pub fn playback_target(&self) -> Option<PlaybackTarget> {
        match self {
            Route::MoviePlayer { id } => Some(PlaybackTarget::Movie { id: id.clone() }),
            Route::EpisodePlayer {
                episode_id,
                container_extension,
                ..
            } => Some(PlaybackTarget::Episode {
                episode_id: episode_id.clone(),
                container_extension: container_extension.clone(),
            }),
            Route::LiveTvPlayer { stream_id, .. } => Some(PlaybackTarget::LiveStream {
                stream_id: stream_id.clone(),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for Route {
    type Err = StreamhubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s).ok_or_else(|| StreamhubError::InvalidInput(format!("unknown route: {}", s)))
    }
}
