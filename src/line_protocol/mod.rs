//! Flattening of Jolokia beans into `InfluxDB` line protocol
//!
//! Each Cassandra table metric bean becomes at most one line:
//!
//! ```text
//! <check>,host=<hostname>,keyspace=<ks>,metric=<name>,cf=<table> <field>=<value>,... <timestamp ns>
//! ```
//!
//! The [`Transformer`] decides which beans survive (skip list, zero suppression) and types each
//! attribute: integers get an `i` suffix, floats are printed with six decimals, strings are
//! quoted, and nulls, arrays and anything else are dropped. [`emit`] writes the resulting
//! [`OutputLine`]s.

mod line;
mod transform;

pub use line::{OutputLine, emit};
pub use transform::Transformer;

use crate::Result;
use chrono::DateTime;
use ohno::app_err;

/// Log target for bean filtering
const LOG_TARGET: &str = " transform";

/// Convert a Jolokia timestamp (seconds since the epoch) to line-protocol nanoseconds.
pub fn timestamp_nanos(seconds: i64) -> Result<i64> {
    DateTime::from_timestamp(seconds, 0)
        .and_then(|t| t.timestamp_nanos_opt())
        .ok_or_else(|| app_err!("timestamp {seconds} cannot be expressed in nanoseconds"))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_nanos() {
        assert_eq!(timestamp_nanos(0).unwrap(), 0);
        assert_eq!(timestamp_nanos(1_500_000_000).unwrap(), 1_500_000_000_000_000_000);
    }

    #[test]
    fn test_timestamp_nanos_out_of_range() {
        assert!(timestamp_nanos(i64::MAX / 1000).is_err());
    }
}
