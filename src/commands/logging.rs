use env_logger::{Builder, Target};

/// Install the process-wide logger.
///
/// Logs go to stderr when `to_stderr` is set and to the system log otherwise. `debug` lowers the
/// level to `debug` and adds the log target to every record. `RUST_LOG` overrides the level.
pub fn init_logging(debug: bool, to_stderr: bool) {
    // A logger may already be installed when running more than once in a process (tests).
    let _ = builder(debug).target(log_target(to_stderr)).try_init();
}

fn builder(debug: bool) -> Builder {
    let level = if debug { "debug" } else { "info" };
    let mut builder = Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", level));
    let _ = builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(debug);
    builder
}

fn log_target(to_stderr: bool) -> Target {
    if to_stderr { Target::Stderr } else { system_log() }
}

#[cfg(unix)]
fn system_log() -> Target {
    Target::Pipe(Box::new(super::syslog::SyslogWriter::open()))
}

#[cfg(not(unix))]
fn system_log() -> Target {
    Target::Stderr
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use log::{Level, Log, Record};
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn render(debug: bool) -> String {
        let captured = Captured::default();
        let logger = builder(debug).target(Target::Pipe(Box::new(captured.clone()))).build();

        logger.log(
            &Record::builder()
                .level(Level::Error)
                .target("   jolokia")
                .args(format_args!("agent unreachable"))
                .build(),
        );
        logger.flush();

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_stderr_target() {
        assert!(matches!(log_target(true), Target::Stderr));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_log_target_by_default() {
        assert!(matches!(log_target(false), Target::Pipe(_)));
    }

    #[test]
    fn test_target_shown_only_in_debug() {
        let plain = render(false);
        assert!(plain.contains("agent unreachable"), "unexpected record: {plain}");
        assert!(!plain.contains("jolokia"), "unexpected record: {plain}");

        let debug = render(true);
        assert!(debug.contains("agent unreachable"), "unexpected record: {debug}");
        assert!(debug.contains("jolokia"), "unexpected record: {debug}");
    }
}
