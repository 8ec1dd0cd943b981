//! Page-shaped HTTP access for paginated list endpoints.
//!
//! Provides the wire types ([`types::PageRequest`], [`types::PageResponse`]),
//! URL query builders, and a thin [`Client`] that fetches exactly one page.

mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{parse_page, Client};
pub use self::errors::Error;
pub use self::query::{PageQuery, Query, QueryCommon, SortDirection};
