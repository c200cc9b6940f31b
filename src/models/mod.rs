//! Data models for the upstream sources.
//!
//! - `scout`: FTCScout REST API records (primary source).
//! - `toa`: The Orange Alliance records (secondary source).
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod scout;
pub mod toa;
