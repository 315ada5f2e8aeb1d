//! Adapters for the external data providers
//!
//! Four upstream services feed a report:
//! - **Product details**: the published version numbers every channel is derived from
//! - **Issue tracker**: bug counts, answered by the size of the returned bug list
//! - **Telemetry**: a daily adoption snapshot keyed by date and then by version
//! - **Crash reports**: crash counts, answered by the search result's `total`
//!
//! Every adapter performs exactly one GET per query with no retry, and any transport,
//! status or decoding failure is returned as an error naming the provider. The
//! [`Providers`] type bundles the shared HTTP client, the configured [`Endpoints`] and the
//! issue-tracker credential.

mod bugzilla;
mod crash_stats;
mod endpoints;
mod http;
mod product_details;
mod providers;
mod telemetry;

pub use endpoints::Endpoints;
pub use http::HttpClient;
pub use providers::Providers;
pub use telemetry::{AdiDay, AdiSnapshot, adoption_keys, channel_adoption};
