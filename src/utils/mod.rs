//! Utility functions and helpers for ftcbot.
//!
//! This module provides cross-cutting concerns like structured logging,
//! secret redaction, and retry logic with backoff.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and log sanitization.
//! - `retry`: Retry loop that respects upstream `Retry-After` hints.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
pub mod retry;
