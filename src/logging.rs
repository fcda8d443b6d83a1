//! Log output through the host's debug log
//!
//! The simulator owns the log file, so events are formatted by
//! `tracing-subscriber` and handed to the host one NUL-terminated line at a
//! time. The level filter comes from `TRIMHAT_LOG` (default `info`).

use std::ffi::{CStr, CString};
use std::io;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "TRIMHAT_LOG";

/// Prefix on every line, so our output can be found in the host's log
pub const LOG_PREFIX: &str = "trimhat: ";

/// Install the global subscriber writing through `sink`
///
/// Returns `false` if a subscriber was already installed (plugin reloaded
/// without the library being unloaded); the existing one keeps working.
pub fn init<F>(sink: F) -> bool
where
    F: Fn(&CStr) + Clone + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(HostLog::new(sink))
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init()
        .is_ok()
}

/// [`MakeWriter`] producing [`HostLogWriter`]s over a shared sink
#[derive(Debug, Clone)]
pub struct HostLog<F> {
    sink: F,
}

impl<F> HostLog<F>
where
    F: Fn(&CStr) + Clone,
{
    pub fn new(sink: F) -> Self {
        Self { sink }
    }
}

impl<'a, F> MakeWriter<'a> for HostLog<F>
where
    F: Fn(&CStr) + Clone + 'a,
{
    type Writer = HostLogWriter<F>;

    fn make_writer(&'a self) -> Self::Writer {
        HostLogWriter {
            sink: self.sink.clone(),
            pending: Vec::new(),
        }
    }
}

/// Buffers formatted output and emits it line by line
///
/// Interior NUL bytes are dropped since the host expects C strings.
#[derive(Debug)]
pub struct HostLogWriter<F>
where
    F: Fn(&CStr),
{
    sink: F,
    pending: Vec<u8>,
}

impl<F> HostLogWriter<F>
where
    F: Fn(&CStr),
{
    fn emit(&mut self, line: &[u8]) {
        let mut out = Vec::with_capacity(LOG_PREFIX.len() + line.len() + 1);
        out.extend_from_slice(LOG_PREFIX.as_bytes());
        out.extend(line.iter().copied().filter(|&b| b != 0));
        out.push(b'\n');
        // No NULs left, so this cannot fail
        if let Ok(text) = CString::new(out) {
            (self.sink)(&text);
        }
    }

    fn emit_complete_lines(&mut self) {
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let rest = self.pending.split_off(pos + 1);
            let mut line = std::mem::replace(&mut self.pending, rest);
            line.pop();
            self.emit(&line);
        }
    }
}

impl<F> io::Write for HostLogWriter<F>
where
    F: Fn(&CStr),
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.emit_complete_lines();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let line = std::mem::take(&mut self.pending);
            self.emit(&line);
        }
        Ok(())
    }
}

impl<F> Drop for HostLogWriter<F>
where
    F: Fn(&CStr),
{
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}
