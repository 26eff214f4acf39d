//! Core types and trait definitions for the Fettle nutrition and fitness log.
//!
//! This crate is deliberately free of database and async-runtime
//! dependencies. All other crates depend on it; it depends on little more
//! than `chrono`.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod client;
pub mod date;
pub mod error;
pub mod exercise;
pub mod nutrition;
pub mod session;
pub mod store;
pub mod summary;
pub mod week;
pub mod workout;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
