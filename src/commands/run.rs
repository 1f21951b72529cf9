//! Command-line parsing and the single collection run

use super::logging::init_logging;
use crate::config::{Config, DEFAULT_JOLOKIA_URL, DEFAULT_SKIP_METRICS};
use crate::jolokia::{COLUMN_FAMILY_PATTERN, Client, ResponseDocument};
use crate::line_protocol::{Transformer, emit, timestamp_nanos};
use crate::misc::hostname;
use crate::{Host, Result};
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use core::time::Duration;
use ohno::{IntoAppError, app_err, bail};
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use url::Url;

/// Log target for the run
const LOG_TARGET: &str = "       run";

/// Check name used when the program name cannot be determined.
const FALLBACK_CHECK_NAME: &str = "cassandra-table-metrics";

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "cassandra-table-metrics", version, long_about = None)]
#[command(about = "A Telegraf input that gathers metrics for every Cassandra keyspace and table")]
#[command(styles = CLAP_STYLES)]
struct Args {
    /// Check name, the measurement of every line [default: program name]
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Base URL of the Jolokia agent running on the Cassandra JVM
    #[arg(long, value_name = "URL", env = "JOLOKIA_URL", default_value = DEFAULT_JOLOKIA_URL)]
    jolokia: String,

    /// Enable debug logs
    #[arg(long)]
    debug: bool,

    /// Log to stderr instead of syslog
    #[arg(long)]
    stderr: bool,

    /// Do not output metrics whose numeric values are all zero
    #[arg(long)]
    skip_zeros: bool,

    /// Comma-separated metric names to skip
    #[arg(long, value_name = "NAMES", value_delimiter = ',', default_values = DEFAULT_SKIP_METRICS)]
    skip: Vec<String>,

    /// Give up on the Jolokia request after this many seconds [default: no timeout]
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,
}

impl Args {
    fn into_config(self, program_name: String) -> Result<Config> {
        let jolokia_url = Url::parse(&self.jolokia).into_app_err_with(|| format!("invalid Jolokia URL '{}'", self.jolokia))?;
        if jolokia_url.cannot_be_a_base() {
            bail!("invalid Jolokia URL '{}': not a base URL", self.jolokia);
        }

        Ok(Config {
            check_name: self.name.unwrap_or(program_name),
            jolokia_url,
            debug: self.debug,
            stderr: self.stderr,
            skip_zeros: self.skip_zeros,
            skip_metrics: self.skip.into_iter().filter(|m| !m.is_empty()).collect(),
            timeout: self.timeout.map(Duration::from_secs),
        })
    }
}

/// Parse the command line, collect the metrics once and print them to the host's output.
///
/// `--help`, `--version` and usage errors are written to the host and reported through
/// [`Host::exit`]. Any failure during collection is logged and returned.
///
/// # Arguments
///
/// * `args` - The command-line arguments, starting with the program name
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    H: Host,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program_name = program_name(args.first());

    let args = match Args::try_parse_from(&args) {
        Ok(args) => args,
        Err(e) => {
            let code = e.exit_code();
            if e.use_stderr() {
                let _ = write!(host.error(), "{}", e.render());
                host.exit(code);
                return Err(app_err!("invalid command line"));
            }

            let _ = write!(host.output(), "{}", e.render());
            host.exit(code);
            return Ok(());
        }
    };

    init_logging(args.debug, args.stderr);

    let result = match args.into_config(program_name) {
        Ok(config) => collect(host, &config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = &result {
        log::error!(target: LOG_TARGET, "{e:#}");
    }

    result
}

/// Fetch, decode, transform and print, once.
async fn collect<H: Host>(host: &mut H, config: &Config) -> Result<()> {
    let hostname = hostname()?;
    let common_key = format!("{},host={hostname}", config.check_name);

    let client = Client::new(config.jolokia_url.clone(), config.timeout)?;
    let body = client.read(COLUMN_FAMILY_PATTERN).await?;
    let doc = ResponseDocument::decode(&body)?;

    log::debug!(target: LOG_TARGET, "Jolokia returned {} beans for {}", doc.value.len(), doc.request.mbean);

    let transformer = Transformer::new(config, common_key, timestamp_nanos(doc.timestamp)?);
    let written = emit(&mut host.output(), transformer.transform_all(&doc.value)).into_app_err("could not write metrics")?;

    log::debug!(target: LOG_TARGET, "Reported {written} of {} beans", doc.value.len());
    Ok(())
}

fn program_name(arg0: Option<&OsString>) -> String {
    arg0.and_then(|arg| Path::new(arg).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_CHECK_NAME.to_string())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    fn parse(args: &[&str]) -> Config {
        Args::try_parse_from(args).unwrap().into_config("check".to_string()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["cassandra-table-metrics"]);
        assert_eq!(config.check_name, "check");
        assert_eq!(config.jolokia_url.as_str(), DEFAULT_JOLOKIA_URL);
        assert!(!config.debug);
        assert!(!config.stderr);
        assert!(!config.skip_zeros);
        assert_eq!(config.skip_metrics, DEFAULT_SKIP_METRICS);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_all_flags() {
        let config = parse(&[
            "cassandra-table-metrics",
            "--name",
            "cassandra_tables",
            "--jolokia",
            "http://db1:8778/jolokia",
            "--debug",
            "--stderr",
            "--skip-zeros",
            "--skip",
            "ReadLatency,WriteLatency",
            "--skip",
            "LiveSSTableCount",
            "--timeout",
            "10",
        ]);

        assert_eq!(config.check_name, "cassandra_tables");
        assert_eq!(config.jolokia_url.as_str(), "http://db1:8778/jolokia");
        assert!(config.debug);
        assert!(config.stderr);
        assert!(config.skip_zeros);
        assert_eq!(config.skip_metrics, vec!["ReadLatency", "WriteLatency", "LiveSSTableCount"]);
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_empty_skip_list() {
        let config = parse(&["x", "--skip", ""]);
        assert!(config.skip_metrics.is_empty());
    }

    #[test]
    fn test_invalid_url() {
        let args = Args::try_parse_from(["x", "--jolokia", "not a url"]).unwrap();
        assert!(args.into_config("x".to_string()).is_err());

        let args = Args::try_parse_from(["x", "--jolokia", "mailto:ops@example.com"]).unwrap();
        assert!(args.into_config("x".to_string()).is_err());
    }

    #[test]
    fn test_program_name() {
        assert_eq!(program_name(Some(&OsString::from("/usr/local/bin/cassandra_check"))), "cassandra_check");
        assert_eq!(program_name(Some(&OsString::from("tables"))), "tables");
        assert_eq!(program_name(None), FALLBACK_CHECK_NAME);
    }

    #[tokio::test]
    async fn test_version_goes_to_output() {
        let mut host = TestHost::default();
        run(&mut host, ["cassandra-table-metrics", "--version"]).await.unwrap();

        assert_eq!(host.exit_code, Some(0));
        assert!(String::from_utf8_lossy(&host.output_buf).contains(env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test]
    async fn test_unknown_flag_goes_to_error() {
        let mut host = TestHost::default();
        let result = run(&mut host, ["cassandra-table-metrics", "--bogus"]).await;

        assert!(result.is_err());
        assert_eq!(host.exit_code, Some(2));
        assert!(host.output_buf.is_empty());
        assert!(String::from_utf8_lossy(&host.error_buf).contains("--bogus"));
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_network() {
        let mut host = TestHost::default();
        let result = run(&mut host, ["cassandra-table-metrics", "--stderr", "--jolokia", "::"]).await;

        assert!(result.is_err());
        assert!(host.output_buf.is_empty());
        assert_eq!(host.exit_code, None);
    }
}
