//! Command-line interface and orchestration
//!
//! [`run`] is the whole program: it parses the command line, installs the logger, resolves the
//! [`Config`](crate::config::Config) and then performs exactly one collection:
//!
//! 1. Read every `ColumnFamily` bean from the Jolokia agent
//! 2. Decode and validate the response document
//! 3. Transform each bean into a line-protocol record
//! 4. Write the records to the [`Host`] output
//!
//! Every failure is fatal. It is logged to the configured sink (stderr or syslog) and returned
//! so the process exits with a non-zero status.

mod host;
mod logging;
mod run;
#[cfg(unix)]
mod syslog;

pub use host::Host;
pub use run::run;
