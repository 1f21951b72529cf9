use super::LOG_TARGET;
use crate::Result;
use bytes::Bytes;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use reqwest::StatusCode;
use url::Url;

/// Object name pattern matching every per-table metric bean.
pub const COLUMN_FAMILY_PATTERN: &str = "org.apache.cassandra.metrics:type=ColumnFamily,keyspace=*,scope=*,name=*";

/// Build the `read` URL for an object name pattern relative to the agent's base URL.
///
/// The pattern is appended verbatim; Jolokia expects the object name unescaped in the path.
fn read_url(base: &Url, pattern: &str) -> Result<Url> {
    let raw = format!("{}/read/{pattern}", base.as_str().trim_end_matches('/'));
    Url::parse(&raw).into_app_err_with(|| format!("invalid Jolokia read URL '{raw}'"))
}

/// Minimal client for a Jolokia agent.
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// Create a client for the agent at `base_url`, with an optional total request timeout.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(concat!("cassandra-table-metrics/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build().into_app_err("unable to create HTTP client")?,
            base_url,
        })
    }

    /// Issue one `read` request for `pattern` and return the raw response body.
    ///
    /// Anything other than HTTP 200 is an error.
    pub async fn read(&self, pattern: &str) -> Result<Bytes> {
        let url = read_url(&self.base_url, pattern)?;
        log::debug!(target: LOG_TARGET, "GET {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .into_app_err_with(|| format!("could not reach Jolokia at {url}"))?;

        let status = response.status();
        if status != StatusCode::OK {
            bail!("{url} {status}");
        }

        let body = response
            .bytes()
            .await
            .into_app_err_with(|| format!("could not read response body from {url}"))?;

        log::debug!(target: LOG_TARGET, "received {} bytes", body.len());
        Ok(body)
    }
}
