use serde::{Deserialize, Serialize};

use super::de::{number_as_string, optional_number_as_string};

/// A video-on-demand entry from `/movies/list`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id", deserialize_with = "number_as_string")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// Poster URL.
    #[serde(default)]
    pub stream_icon: Option<String>,

    #[serde(default, deserialize_with = "optional_number_as_string")]
    pub rating: Option<String>,
}
