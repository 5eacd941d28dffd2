use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::config::BoardConfig;

/// Installs a `tracing` subscriber that prints to the browser console.
/// Calling it again after a subscriber is set is a no-op.
pub fn init(config: &BoardConfig) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    // No timestamps: there is no system clock on wasm32-unknown-unknown.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_ansi(false)
                .with_target(false)
                .with_writer(ConsoleMakeWriter),
        )
        .try_init();
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { error: false }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            error: routes_to_error(meta.level()),
        }
    }
}

fn routes_to_error(level: &Level) -> bool {
    *level <= Level::WARN
}

pub struct ConsoleWriter {
    error: bool,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let line = String::from_utf8_lossy(buf);
        let line = line.trim_end();
        if self.error {
            web_sys::console::error_1(&line.into());
        } else {
            web_sys::console::log_1(&line.into());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
