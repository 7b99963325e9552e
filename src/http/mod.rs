//! HTTP module
//!
//! Provides the request executor every endpoint call goes through.
//!
//! # Features
//!
//! - **Credential Injection**: `api_id` / `affiliate_id` always come from the config
//! - **Deadlines**: each attempt is cancelled once the configured timeout expires
//! - **Automatic Retries**: 429, 5xx and transport failures, with exponential backoff
//! - **Envelope Unwrapping**: responses are `{"result": ...}`, the payload is returned

mod client;
mod envelope;

pub use client::{backoff_delay, HttpClient};
pub use envelope::{error_message, unwrap_envelope};
