//! Data layer for DNS Sentinel.
//!
//! Responsible for reading and writing the CSV query log, grouping records
//! into per-client accumulators, reducing features into the corpus summary,
//! running the top-level analysis pipeline and generating synthetic logs.

pub mod analysis;
pub mod extractor;
pub mod generator;
pub mod reader;
pub mod summary;
pub mod writer;

pub use sentinel_core as core;
