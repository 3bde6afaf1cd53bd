use serde::{Deserialize, Serialize};

use super::de::number_as_string;

/// A live channel from `/live-tv/list`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiveStream {
    #[serde(deserialize_with = "number_as_string")]
    pub stream_id: String,

    #[serde(default)]
    pub name: String,

    /// Channel logo URL.
    #[serde(default)]
    pub stream_icon: Option<String>,
}
