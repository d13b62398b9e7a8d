//! Core types and read-only queries for the Campus student-information
//! system.
//!
//! A [`Store`] is built once from a [`Dataset`] and never mutated. Resolvers,
//! metrics and listings are pure functions over it. This crate has no
//! terminal or I/O dependencies beyond reading a dataset file.

pub mod entity;
pub mod error;
pub mod integrity;
pub mod listing;
pub mod metrics;
pub mod query;
pub mod session;
pub mod store;

mod resolve;
mod seed;

pub use error::{Error, Result};
pub use integrity::Strictness;
pub use store::{Dataset, Store};

#[cfg(test)]
mod tests;
