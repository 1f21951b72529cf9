use core::fmt::{Display, Formatter, Result as FmtResult};
use std::io::Write;

/// One line-protocol record, derived from a single bean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    /// `<check>,host=<hostname>`, shared by every line of a run.
    pub common_key: String,

    /// `keyspace=`, `metric=` and `cf=` tags, in that order, for those present.
    pub tags: Vec<String>,

    /// `name=value` pairs with line-protocol typing already applied.
    pub fields: Vec<String>,

    pub timestamp_nanos: i64,
}

impl Display for OutputLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.common_key)?;
        for tag in &self.tags {
            write!(f, ",{tag}")?;
        }
        write!(f, " {} {}", self.fields.join(","), self.timestamp_nanos)
    }
}

/// Write each line followed by a newline, returning how many lines were written.
pub fn emit(out: &mut impl Write, lines: impl IntoIterator<Item = OutputLine>) -> std::io::Result<usize> {
    let mut count = 0;
    for line in lines {
        writeln!(out, "{line}")?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn line(tags: &[&str], fields: &[&str]) -> OutputLine {
        OutputLine {
            common_key: "cassandra,host=node1".to_string(),
            tags: tags.iter().map(ToString::to_string).collect(),
            fields: fields.iter().map(ToString::to_string).collect(),
            timestamp_nanos: 1_500_000_000_000_000_000,
        }
    }

    #[test]
    fn test_display() {
        let l = line(&["keyspace=ks1", "metric=ReadLatency", "cf=tbl1"], &["Count=42i", "Unit=\"ms\""]);
        assert_eq!(
            l.to_string(),
            "cassandra,host=node1,keyspace=ks1,metric=ReadLatency,cf=tbl1 Count=42i,Unit=\"ms\" 1500000000000000000"
        );
    }

    #[test]
    fn test_display_without_tags() {
        let l = line(&[], &["Value=1.000000"]);
        assert_eq!(l.to_string(), "cassandra,host=node1 Value=1.000000 1500000000000000000");
    }

    #[test]
    fn test_emit() {
        let mut buf = Vec::new();
        let count = emit(&mut buf, [line(&["metric=A"], &["Count=1i"]), line(&["metric=B"], &["Count=2i"])]).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "cassandra,host=node1,metric=A Count=1i 1500000000000000000\ncassandra,host=node1,metric=B Count=2i 1500000000000000000\n"
        );
    }
}
