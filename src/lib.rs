#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for cassandra-table-metrics
//!
//! Reads the per-table storage-engine metrics a Cassandra node exposes over JMX, through a
//! Jolokia agent, and prints them as `InfluxDB` line protocol so a Telegraf `exec` input can
//! pick them up.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line parsing, logging setup, and the fetch/transform/print run
//! - [`config`]: The resolved, immutable run configuration
//! - [`jolokia`]: The Jolokia HTTP client and response document model
//! - [`line_protocol`]: Flattening of bean attributes into output lines
//! - [`misc`]: Small host-environment helpers

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod config;
pub mod jolokia;
pub mod line_protocol;
pub mod misc;

pub use crate::commands::{Host, run};
