//! Log sink that forwards formatted records to the system log.

use std::ffi::CString;
use std::io::{Result as IoResult, Write};

/// Forwards each complete line written to it to `syslog(3)` as a `LOG_DAEMON` notice.
///
/// The identity is the program name, with the PID attached to every message.
#[derive(Debug)]
pub struct SyslogWriter {
    pending: Vec<u8>,
    sink: fn(&[u8]),
}

impl SyslogWriter {
    #[must_use]
    pub fn open() -> Self {
        // SAFETY: a null ident makes the C library use the program name; the option and
        // facility are plain flags.
        unsafe { libc::openlog(core::ptr::null(), libc::LOG_PID, libc::LOG_DAEMON) };
        Self::with_sink(send_to_syslog)
    }

    const fn with_sink(sink: fn(&[u8])) -> Self {
        Self { pending: Vec::new(), sink }
    }

    fn forward(&self, line: &[u8]) {
        if !line.is_empty() {
            (self.sink)(line);
        }
    }
}

fn send_to_syslog(line: &[u8]) {
    let line: Vec<u8> = line.iter().copied().filter(|&b| b != 0).collect();
    let Ok(message) = CString::new(line) else {
        return;
    };

    // SAFETY: both pointers are NUL-terminated C strings that outlive the call, and the
    // format consumes exactly the one `%s` argument supplied.
    unsafe { libc::syslog(libc::LOG_NOTICE, c"%s".as_ptr(), message.as_ptr()) };
}

impl Write for SyslogWriter {
    fn write(&mut self, buf: &[u8]) -> IoResult<usize> {
        self.pending.extend_from_slice(buf);
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.forward(line.strip_suffix(b"\n").unwrap_or(&line));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        if !self.pending.is_empty() {
            let line = core::mem::take(&mut self.pending);
            self.forward(&line);
        }
        Ok(())
    }
}

impl Drop for SyslogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
