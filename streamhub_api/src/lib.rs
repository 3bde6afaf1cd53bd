mod client;
mod domain;
mod errors;
mod query;
pub mod types;
pub use self::client::Client;
pub use self::domain::Domain;
pub use self::errors::Error;
pub use self::query::{ListQuery, Query, QueryCommon};
