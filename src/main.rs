//! A Telegraf input that reports metrics for every Cassandra keyspace and table.
//!
//! `cassandra-table-metrics` asks the Jolokia agent attached to a Cassandra JVM for every
//! `org.apache.cassandra.metrics:type=ColumnFamily` bean in one request and prints one
//! `InfluxDB` line-protocol record per bean on standard output.
//!
//! # Usage
//!
//! ```bash
//! cassandra-table-metrics --jolokia http://localhost:1778/jolokia --skip-zeros
//! ```
//!
//! Typical Telegraf configuration:
//!
//! ```toml
//! [[inputs.exec]]
//!   commands = ["/usr/local/bin/cassandra-table-metrics --skip-zeros"]
//!   data_format = "influx"
//! ```
//!
//! Diagnostics go to syslog unless `--stderr` is given. `--debug` reports every bean that is
//! skipped and why.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use cassandra_table_metrics::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Host that talks to the real process streams.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main(flavor = "current_thread")]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args_os()).await
}
