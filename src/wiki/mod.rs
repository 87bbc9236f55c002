//! Read-only access to the Wikipedia REST API: keyword search and page HTML, per language edition.

pub mod client;
mod lang;
pub mod types;

pub use client::{SourceError, WikiClient, WikiSource};
pub use lang::Lang;
pub use types::{ArticlePage, SearchHit};
