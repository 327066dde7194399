//! Core domain logic for DNS Sentinel.
//!
//! Holds the record and feature types, the entropy and subdomain heuristics,
//! per-client feature computation, distribution helpers, the error taxonomy
//! and the CLI settings shared by the other crates.

pub mod domain;
pub mod entropy;
pub mod error;
pub mod features;
pub mod models;
pub mod settings;
pub mod stats;
