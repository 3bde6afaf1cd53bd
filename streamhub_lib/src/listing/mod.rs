//! Incremental list loading for catalog views: debounced search, category
//! filtering and scroll-driven pagination over one accumulated item list.

mod controller;
mod state;

pub use self::controller::{with_all_category, ListingController, ListingSnapshot, ListingStatus};
pub use self::state::{Applied, FetchTicket, ListingState};
