//! Client for the HowLongToBeat website: API key discovery, game search and
//! detail page scraping.

pub mod api;
pub mod documents;
pub mod logging;

mod status;
pub use status::Status;

mod tracing;
pub use crate::tracing::Tracing;
