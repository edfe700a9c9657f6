use std::io;

use lag_core::DiagnosticSink;

/// Writes every latency message to the log file.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&mut self, message: &str) -> io::Result<()> {
        tracing::info!("{message}");
        Ok(())
    }
}
