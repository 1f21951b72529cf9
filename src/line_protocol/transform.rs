use super::{LOG_TARGET, OutputLine};
use crate::config::Config;
use crate::jolokia::{AttributeMap, AttributeValue};

/// Domain prefix stripped from every bean key before matching and tagging.
const METRICS_DOMAIN_PREFIX: &str = "org.apache.cassandra.metrics:";

/// Turns Jolokia beans into output lines according to the skip list and zero policy.
#[derive(Debug, Clone)]
pub struct Transformer {
    common_key: String,
    timestamp_nanos: i64,
    skip_patterns: Vec<String>,
    skip_zeros: bool,
}

/// Formatted fields for one bean along with the counts the zero policy looks at.
#[derive(Debug, Default, PartialEq, Eq)]
struct Fields {
    values: Vec<String>,
    numeric: usize,
    zeros: usize,
}

impl Fields {
    const fn all_zero(&self) -> bool {
        self.numeric > 0 && self.zeros == self.numeric
    }
}

impl Transformer {
    /// Create a transformer for one run.
    ///
    /// `common_key` is the `<check>,host=<hostname>` prefix of every line and `timestamp_nanos`
    /// the sample time stamped on every line.
    #[must_use]
    pub fn new(config: &Config, common_key: impl Into<String>, timestamp_nanos: i64) -> Self {
        Self {
            common_key: common_key.into(),
            timestamp_nanos,
            skip_patterns: config.skip_metrics.iter().map(|m| format!(",name={m},")).collect(),
            skip_zeros: config.skip_zeros,
        }
    }

    /// Transform every bean, yielding a line for each one that survives filtering.
    pub fn transform_all<'a, I>(&'a self, beans: I) -> impl Iterator<Item = OutputLine> + 'a
    where
        I: IntoIterator<Item = (&'a String, &'a AttributeMap)> + 'a,
    {
        beans.into_iter().filter_map(|(key, attrs)| self.transform(key, attrs))
    }

    /// Transform a single bean. Returns `None` when the bean is skipped or has nothing to report.
    #[must_use]
    pub fn transform(&self, bean_key: &str, attrs: &AttributeMap) -> Option<OutputLine> {
        let key = bean_key.replacen(METRICS_DOMAIN_PREFIX, "", 1);

        if self.is_skipped(&key) {
            return None;
        }

        let fields = format_fields(&key, attrs);

        if self.skip_zeros && fields.all_zero() {
            log::debug!(
                target: LOG_TARGET,
                "Skipping `{key}` because it has {} zero values of {} numeric values",
                fields.zeros,
                fields.numeric
            );
            return None;
        }

        if fields.values.is_empty() {
            log::debug!(target: LOG_TARGET, "Nothing to report for `{key}`");
            return None;
        }

        Some(OutputLine {
            common_key: self.common_key.clone(),
            tags: extract_tags(&key),
            fields: fields.values,
            timestamp_nanos: self.timestamp_nanos,
        })
    }

    /// Whether the stripped key contains `,name=<M>,` for a metric `<M>` on the skip list.
    ///
    /// Only a comma-delimited `name=` segment matches, so `Foo` never matches `name=FooBar`, and a
    /// `name=` segment at either end of the key is never matched.
    fn is_skipped(&self, key: &str) -> bool {
        match self.skip_patterns.iter().find(|pattern| key.contains(pattern.as_str())) {
            Some(pattern) => {
                log::debug!(target: LOG_TARGET, "Skipping `{key}` because it matches `{pattern}`");
                true
            }
            None => false,
        }
    }
}

/// Map the recognized key segments to tags, always in `keyspace`, `metric`, `cf` order.
fn extract_tags(key: &str) -> Vec<String> {
    let mut keyspace = None;
    let mut metric = None;
    let mut cf = None;

    for (name, value) in key.split(',').filter_map(|segment| segment.split_once('=')) {
        let slot = match name {
            "keyspace" => &mut keyspace,
            "name" => &mut metric,
            "scope" => &mut cf,
            _ => continue,
        };
        let _ = slot.get_or_insert(value);
    }

    [("keyspace", keyspace), ("metric", metric), ("cf", cf)]
        .into_iter()
        .filter_map(|(tag, value)| value.map(|v| format!("{tag}={v}")))
        .collect()
}

fn format_fields(key: &str, attrs: &AttributeMap) -> Fields {
    let mut fields = Fields::default();

    for (name, value) in attrs {
        match value {
            AttributeValue::Integer(i) => {
                fields.values.push(format!("{name}={i}i"));
                fields.numeric += 1;
                if *i == 0 {
                    fields.zeros += 1;
                }
            }
            AttributeValue::Float(f) => {
                fields.values.push(format!("{name}={f:.6}"));
                fields.numeric += 1;
                if *f == 0.0 {
                    fields.zeros += 1;
                }
            }
            AttributeValue::Text(s) => fields.values.push(format!("{name}=\"{s}\"")),
            AttributeValue::Null => {
                log::debug!(target: LOG_TARGET, "Dropping `{name}` of `{key}`: null");
            }
            AttributeValue::Sequence(_) => {
                log::debug!(target: LOG_TARGET, "Dropping `{name}` of `{key}`: array value");
            }
            AttributeValue::Unrecognized(v) => {
                log::debug!(target: LOG_TARGET, "Dropping `{name}` of `{key}`: unsupported value {v}");
            }
        }
    }

    fields
}
