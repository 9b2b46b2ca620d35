//! # Backend API
//!
//! The data-fetching side of Kodex: the `ContentFetcher` contract the
//! navigation core consumes, its HTTP implementation, and the wire types.
//! Nothing in here knows about the TUI or the state machine.

mod client;
mod fetcher;
mod types;

pub use client::HttpFetcher;
pub use fetcher::{ContentFetcher, FetchError};
pub use types::{Law, NormContent, NormSummary};
