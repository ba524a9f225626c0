//! Client for the ReliefWeb API
//!
//! Builds search queries (projection, full-text search, filter trees, sort,
//! pagination, facets), sends them once and wraps the answer in a
//! [`Results`] envelope that never fails on missing data.
//!
//! ```no_run
//! use rwapi_client::{Client, Direction, Facet, Filter, Operator};
//!
//! # async fn run() -> rwapi_client::Result<()> {
//! let client = Client::with_defaults()?.appname("example.com");
//!
//! let results = client
//!     .reports()
//!     .fields(&["title", "date.created"], &[])
//!     .search("earthquake")
//!     .filter(
//!         Filter::new()
//!             .condition("country.iso3", "npl")
//!             .condition("country.iso3", "ind")
//!             .operator(Operator::Or),
//!     )
//!     .facets(Facet::with("sources", "source.shortname", Some(5)))
//!     .sort("date.created", Direction::Desc)
//!     .limit(10)
//!     .execute()
//!     .await;
//!
//! if !results.error() {
//!     println!("{} of {} reports", results.count(), results.total());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
mod encode;
pub mod error;
pub mod facet;
pub mod filter;
#[cfg(test)]
mod mock;
pub mod query;
pub mod results;

pub use client::{Client, Resource};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use facet::{Facet, FacetSpec};
pub use filter::{Condition, Filter, FilterNode, FilterValue, Group, Operator, Range, Scalar};
pub use query::{Direction, FieldSelection, Query, QueryPayload, SearchQuery};
pub use results::Results;

/// Re-export the transport layer
pub use rwapi_http;
