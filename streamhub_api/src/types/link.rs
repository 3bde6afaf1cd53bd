use serde::{Deserialize, Serialize};

/// Body of every link-resolution endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    /// Directly playable media URL.
    pub link: String,
}
