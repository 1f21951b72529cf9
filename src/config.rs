//! Resolved run configuration.

use core::time::Duration;
use url::Url;

/// Jolokia endpoint used when none is given on the command line.
pub const DEFAULT_JOLOKIA_URL: &str = "http://localhost:1778/jolokia";

/// Metric names that are noisy or meaningless per table and are skipped unless overridden.
pub const DEFAULT_SKIP_METRICS: &[&str] = &[
    "CasCommitLatency",
    "CasCommitTotalLatency",
    "CasPrepareLatency",
    "CasPrepareTotalLatency",
    "CasProposeLatency",
    "CasProposeTotalLatency",
    "ColUpdateTimeDeltaHistogram",
    "CompressionMetadataOffHeapMemoryUsed",
    "CompressionRatio",
    "RowCacheHit",
    "RowCacheHitOutOfRange",
    "RowCacheMiss",
    "SpeculativeRetries",
];

/// Everything a single collection run needs to know, fixed before any network activity.
#[derive(Debug, Clone)]
pub struct Config {
    /// Measurement name, the first component of every output line.
    pub check_name: String,

    /// Base URL of the Jolokia agent, e.g. `http://localhost:1778/jolokia`.
    pub jolokia_url: Url,

    /// Log skip decisions and attribute filtering.
    pub debug: bool,

    /// Log to stderr instead of the system log.
    pub stderr: bool,

    /// Drop beans whose numeric attributes are all zero.
    pub skip_zeros: bool,

    /// Metric names (the `name=` segment of a bean key) never reported.
    pub skip_metrics: Vec<String>,

    /// Total request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Config {
    /// A configuration with the stock defaults for the given check name.
    #[cfg(test)]
    #[must_use]
    pub fn with_defaults(check_name: impl Into<String>) -> Self {
        Self {
            check_name: check_name.into(),
            jolokia_url: Url::parse(DEFAULT_JOLOKIA_URL).unwrap(),
            debug: false,
            stderr: false,
            skip_zeros: false,
            skip_metrics: DEFAULT_SKIP_METRICS.iter().map(ToString::to_string).collect(),
            timeout: None,
        }
    }
}
