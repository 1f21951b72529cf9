//! Access to a Jolokia agent
//!
//! Jolokia bridges JMX to HTTP/JSON. A `read` request with a wildcard object name returns every
//! matching bean in a single document, keyed by the full object name:
//!
//! ```json
//! {
//!   "request": { "mbean": "org.apache.cassandra.metrics:type=ColumnFamily,keyspace=*,scope=*,name=*", "type": "read" },
//!   "status": 200,
//!   "timestamp": 1500000000,
//!   "value": {
//!     "org.apache.cassandra.metrics:type=ColumnFamily,keyspace=ks1,scope=tbl1,name=ReadLatency": {
//!       "Count": 42,
//!       "OneMinuteRate": 0.0
//!     }
//!   }
//! }
//! ```
//!
//! [`Client`] performs the request and [`ResponseDocument`] decodes and validates the result.

mod client;
mod response;

pub use client::{COLUMN_FAMILY_PATTERN, Client};
pub use response::{AttributeMap, AttributeValue, RequestInfo, ResponseDocument};

/// Log target for the Jolokia client
const LOG_TARGET: &str = "   jolokia";
