//! HTTP client module with status classification and optional retry.

mod client;
mod retry;

pub use client::HttpClient;
pub use retry::{NonRetryableError, RETRY_DELAY_MS, check_status, classify_status};
