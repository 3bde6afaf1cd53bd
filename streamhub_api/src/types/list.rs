//! Listing envelope and category types shared by all domains.

use serde::{Deserialize, Serialize};

use super::de::optional_number_as_string;

/// Backend identifier for a category. Opaque; passed through as-is.
pub type CategoryId = String;

/// One page of a catalog listing.
///
/// The backend names the item array after the domain (`movies`, `series`,
/// `liveTVStreams`); all spellings deserialize into `items`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(
        alias = "movies",
        alias = "series",
        alias = "liveTVStreams",
        alias = "data"
    )]
    pub items: Vec<T>,

    /// Total number of items across all pages for this query.
    pub total: u64,

    /// Highlighted item for the listing header, if the backend picked one.
    pub featured: Option<T>,
}

/// A category chip. `id == None` is the synthetic "All" entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(
        rename(deserialize = "category_id"),
        alias = "id",
        default,
        deserialize_with = "optional_number_as_string"
    )]
    pub id: Option<CategoryId>,

    #[serde(rename(deserialize = "category_name"), alias = "name")]
    pub name: String,
}

impl Category {
    /// The "no filter" entry shown first in every category list.
    pub fn all() -> Self {
        Self {
            id: None,
            name: "All".to_string(),
        }
    }
}
