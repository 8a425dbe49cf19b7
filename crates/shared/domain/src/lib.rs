//! # Domain Models
//!
//! This crate contains pure configuration and registry types with minimal dependencies
//! (`serde`, `chrono-tz`). Keep it lean: no I/O, networking, or heavy logic.

pub mod config;
pub mod constants;
pub mod registry;
