//! HTTP client module
//!
//! The single request dispatcher used by every Knack operation.
//!
//! # Features
//!
//! - **One attempt per call**: no retries; failures surface to the caller
//! - **Knack headers**: application id, API key and session token
//! - **Typed decoding**: JSON bodies decode into the caller's result type
//! - **Optional throttling**: token bucket rate limiter using governor

mod client;
mod rate_limit;

pub use client::{HttpClient, RequestBody, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
