//! # DMM Affiliate API Client
//!
//! A typed async client for the DMM affiliate web service (v3).
//!
//! ## Features
//!
//! - **Signed Requests**: `api_id` / `affiliate_id` are injected into every call
//! - **Retries**: 429, 5xx and transport failures are retried with exponential backoff
//! - **Deadlines**: each request is cancelled when the configured timeout expires
//! - **Envelope Unwrapping**: the `result` payload is returned, typed as requested
//! - **Lazy Pagination**: list endpoints can be consumed as one record stream
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dmm_affiliate::api::{ItemListParams, Site};
//! use dmm_affiliate::{ClientConfig, DmmClient, Result};
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = DmmClient::new(ClientConfig::from_env()?)?;
//!
//!     // One page
//!     let page = client
//!         .item_list(&ItemListParams::new(Site::Fanza).keyword("summer").hits(10))
//!         .await?;
//!     println!("{} matches", page.total_count);
//!
//!     // Every record, fetched 100 at a time as the stream is consumed
//!     let mut items = client.items(ItemListParams::new(Site::Fanza).floor("videoa"));
//!     while let Some(item) = items.try_next().await? {
//!         println!("{}", item.title);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  DmmClient: item_list / floor_list / *_search / item_by_id   │
//! │             items() / actresses() / genres() ... (streams)   │
//! └──────────────┬───────────────────────────────┬───────────────┘
//!                │                               │
//! ┌──────────────┴──────────────┐ ┌──────────────┴───────────────┐
//! │ HttpClient (request exec.)  │ │ paginate (offset/hits loop)  │
//! │ query + credentials         │ │ cursor from first_position   │
//! │ timeout, retry, backoff     │ │ total from first page        │
//! │ {"result": ...} unwrapping  │ │ errors tagged with offset    │
//! └─────────────────────────────┘ └──────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// Request executor with retry and timeouts
pub mod http;

/// Lazy pagination over offset/hits list endpoints
pub mod pagination;

/// Endpoint parameter and response types
pub mod api;

/// Typed client facade
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::DmmClient;
pub use config::{ClientConfig, ClientConfigBuilder, ClientSettings};
pub use error::{Error, Result};
pub use http::HttpClient;
pub use pagination::{RecordStream, PAGE_SIZE};
pub use types::{ParamValue, QueryParams};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
