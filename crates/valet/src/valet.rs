//! Main entry point for the Valet SDK.
//!
//! The `Valet` struct is a cheaply cloneable handle to one parking lot. All
//! clones share the same lot, guarded by a single mutex, so a park
//! (allocate + issue) or a leave (release + remove) is never observed half
//! done, even when handles are used from several threads.

use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use valet_kernel::{Outcome, TicketStatus};
use valet_types::Capacity;

use crate::dispatcher::{Dispatcher, Response};
use crate::error::{Result, ValetError};
use crate::script::{self, ScriptSummary};

/// Handle to a parking lot interpreter.
///
/// # Example
///
/// ```
/// use valet::Valet;
///
/// let valet = Valet::new();
/// let input = "create_parking_lot 2\npark KA-01-HH-1234 21\nleave 1\n";
/// let mut output = Vec::new();
///
/// let summary = valet.run_script(input.as_bytes(), &mut output)?;
///
/// assert_eq!(summary.lines, 3);
/// assert_eq!(String::from_utf8(output).unwrap().lines().count(), 3);
/// # Ok::<(), valet::ValetError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Valet {
    inner: Arc<Mutex<Dispatcher>>,
}

impl Valet {
    /// Creates a handle to a new, unsized lot.
    ///
    /// Every call creates an independent lot; clone the handle to share one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one command line, returning the typed result.
    pub fn dispatch(&self, line: &str) -> Result<Outcome> {
        let mut dispatcher = self.lock()?;
        Ok(dispatcher.dispatch(line)?)
    }

    /// Runs one command line, returning the rendered response.
    ///
    /// Never fails: a poisoned lock is reported as a system error response.
    pub fn respond(&self, line: &str) -> Response {
        match self.lock() {
            Ok(mut dispatcher) => dispatcher.respond(line),
            Err(err) => {
                tracing::error!(error = %err, line, "cannot dispatch command");
                Response::system_error()
            }
        }
    }

    /// Runs one command line, returning only the response text.
    pub fn execute(&self, line: &str) -> String {
        self.respond(line).text
    }

    /// Runs every line of `reader`, writing one response line per input line.
    pub fn run_script(&self, reader: impl BufRead, writer: impl Write) -> Result<ScriptSummary> {
        script::run(reader, writer, |line| self.respond(line))
    }

    /// Returns the lot size, or `None` before `create_parking_lot`.
    pub fn capacity(&self) -> Result<Option<Capacity>> {
        Ok(self.lock()?.lot().capacity())
    }

    /// Returns the active tickets in ascending slot order.
    pub fn status(&self) -> Result<Vec<TicketStatus>> {
        Ok(self.lock()?.lot().status())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Dispatcher>> {
        self.inner
            .lock()
            .map_err(|_| ValetError::internal("lock poisoned"))
    }
}
