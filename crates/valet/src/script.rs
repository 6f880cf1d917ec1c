//! Batch execution of command scripts.

use std::io::{BufRead, Write};

use valet_kernel::ErrorClass;

use crate::dispatcher::Response;
use crate::error::Result;

/// Counts collected while running a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    /// Lines read; always equal to lines written.
    pub lines: usize,
    pub succeeded: usize,
    pub rejected: usize,
    pub failed: usize,
    pub faulted: usize,
}

impl ScriptSummary {
    pub(crate) fn record(&mut self, response: &Response) {
        self.lines += 1;
        match response.error {
            None => self.succeeded += 1,
            Some(ErrorClass::Rejected) => self.rejected += 1,
            Some(ErrorClass::Domain) => self.failed += 1,
            Some(ErrorClass::System) => self.faulted += 1,
        }
    }
}

/// Feeds every line of `reader` through `respond`, writing one response line
/// per input line to `writer`.
///
/// Only I/O errors stop the run; command failures become response lines.
pub(crate) fn run<R, W, F>(mut reader: R, mut writer: W, mut respond: F) -> Result<ScriptSummary>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Response,
{
    let mut summary = ScriptSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Bytes that are not UTF-8 become U+FFFD; the line still gets a response.
        let text = String::from_utf8_lossy(&buf);
        let line = text.strip_suffix('\n').unwrap_or(&text);
        let line = line.strip_suffix('\r').unwrap_or(line);

        let response = respond(line);
        writeln!(writer, "{}", response.text)?;
        summary.record(&response);
    }

    writer.flush()?;

    tracing::info!(
        lines = summary.lines,
        succeeded = summary.succeeded,
        rejected = summary.rejected,
        failed = summary.failed,
        faulted = summary.faulted,
        "script finished"
    );

    Ok(summary)
}
