//! Diagnostics sinks.
//!
//! Logs always go to stderr; stdout carries the protocol. With `DEBUG` on, a
//! plain-text copy is appended to a log file in the working directory. The
//! file sink is buffered, so the [`Diagnostics`] handle must be flushed before
//! the process exits, including on termination signals.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Settings;
use crate::core::constants::DEBUG_LOG_FILE;

/// Buffered debug log file shared between the subscriber and the handle.
#[derive(Clone)]
struct FileSink(Arc<Mutex<BufWriter<File>>>);

impl FileSink {
    fn lock(&self) -> MutexGuard<'_, BufWriter<File>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct SinkWriter<'a>(MutexGuard<'a, BufWriter<File>>);

impl Write for SinkWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<'a> MakeWriter<'a> for FileSink {
    type Writer = SinkWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter(self.lock())
    }
}

/// Handle to the process-wide log sinks.
#[derive(Clone, Default)]
pub struct Diagnostics {
    file: Option<FileSink>,
}

impl Diagnostics {
    /// Install the global subscriber described by `settings`.
    ///
    /// A debug log file that cannot be opened is reported on stderr and
    /// skipped.
    pub fn init(settings: &Settings) -> Self {
        let (file, file_error) = if settings.debug {
            match open_sink(Path::new(DEBUG_LOG_FILE)) {
                Ok(file) => (Some(file), None),
                Err(e) => (None, Some(e)),
            }
        } else {
            (None, None)
        };

        let filter = settings
            .filter
            .as_deref()
            .and_then(|directive| EnvFilter::try_new(directive).ok())
            .unwrap_or_else(|| {
                EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), settings.level))
            });

        let ansi = !settings.no_color && atty::is(atty::Stream::Stderr);
        let stderr_layer = fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_ansi(ansi);
        let file_layer = file.clone().map(|sink| {
            fmt::layer()
                .with_writer(sink)
                .with_target(false)
                .with_ansi(false)
        });

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(file_layer)
            .try_init();

        if let Some(e) = file_error {
            warn!(path = DEBUG_LOG_FILE, error = %e, "debug log file unavailable");
        }
        if let Some(level) = &settings.ignored_level {
            warn!(level = %level, "ignoring unknown LOG_LEVEL");
        }

        Self { file }
    }

    /// Flush buffered sinks.
    pub fn flush(&self) {
        if let Some(file) = &self.file {
            let _ = file.lock().flush();
        }
        let _ = io::stderr().flush();
    }
}

impl Drop for Diagnostics {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Open `path` for appending and write a session header.
fn open_sink(path: &Path) -> io::Result<FileSink> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);

    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    writeln!(writer, "{}", "-".repeat(timestamp.len() + 2))?;
    writeln!(writer, "[{}]", timestamp)?;

    Ok(FileSink(Arc::new(Mutex::new(writer))))
}
