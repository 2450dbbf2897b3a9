//! Remote fetcher adapters.

mod http;
mod stub;

pub use http::{HttpFetcher, HttpSettings};
pub use stub::StaticFetcher;
