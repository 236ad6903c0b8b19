use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use web_sys::console;

/// Route engine logs to the browser console, one call per event.
pub(crate) fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_writer(Console)
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init();
}

struct Console;

/// Buffers one formatted event and hands it to `console.*` on drop.
struct ConsoleLine {
    level: Level,
    buf: Vec<u8>,
}

impl io::Write for ConsoleLine {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let text = text.trim_end();
        if text.is_empty() {
            return;
        }
        match self.level {
            Level::ERROR => console::error_1(&text.into()),
            Level::WARN => console::warn_1(&text.into()),
            Level::INFO => console::info_1(&text.into()),
            _ => console::debug_1(&text.into()),
        }
    }
}

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine { level: Level::INFO, buf: Vec::new() }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleLine { level: *meta.level(), buf: Vec::new() }
    }
}
