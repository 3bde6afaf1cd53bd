//! Catalog domains served by the backend.

use std::str::FromStr;

/// One of the three browsable catalogs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Video on demand.
    Movies,
    /// Episodic content.
    Series,
    /// Live channels.
    LiveTv,
}

impl Domain {
    /// Path segment used by the listing and link endpoints.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Domain::Movies => "movies",
            Domain::Series => "series",
            Domain::LiveTv => "live-tv",
        }
    }

    /// Value of the `action` parameter on `/categories`.
    pub fn category_action(&self) -> &'static str {
        match self {
            Domain::Movies => "get_vod_categories",
            Domain::Series => "get_series_categories",
            Domain::LiveTv => "get_live_categories",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

impl FromStr for Domain {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movies" | "movie" | "vod" => Ok(Domain::Movies),
            "series" => Ok(Domain::Series),
            "live" | "live-tv" | "livetv" => Ok(Domain::LiveTv),
            _ => Err(()),
        }
    }
}
