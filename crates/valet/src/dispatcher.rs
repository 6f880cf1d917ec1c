//! Line dispatch: one command line in, one response line out.
//!
//! The dispatcher is the boundary where typed kernel results become text.
//! Failures never escape it as errors; they are folded into a response line
//! according to their [`ErrorClass`].

use valet_kernel::{Command, ErrorClass, KernelError, Lot, Outcome, apply};

/// Response for lines that are not usable commands.
pub const REJECTED: &str = "Not a valid Command";

/// Response for internal faults. Details go to the log, not the caller.
pub const SYSTEM_ERROR: &str = "Unknown system issue";

/// A rendered response line plus how it came about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    /// `None` when the command succeeded.
    pub error: Option<ErrorClass>,
}

impl Response {
    pub fn success(outcome: &Outcome) -> Self {
        Self {
            text: outcome.to_string(),
            error: None,
        }
    }

    pub fn failure(err: &KernelError) -> Self {
        let class = err.class();
        let text = match class {
            ErrorClass::Rejected => REJECTED.to_string(),
            ErrorClass::Domain => err.to_string(),
            ErrorClass::System => SYSTEM_ERROR.to_string(),
        };
        Self {
            text,
            error: Some(class),
        }
    }

    /// Response for a fault that happened outside the kernel.
    pub fn system_error() -> Self {
        Self {
            text: SYSTEM_ERROR.to_string(),
            error: Some(ErrorClass::System),
        }
    }
}

/// Owns one lot and runs command lines against it.
///
/// States: uninitialized until a `create_parking_lot` succeeds, ready
/// afterwards. There is no terminal state.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    lot: Lot,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and applies one line, returning the typed result.
    pub fn dispatch(&mut self, line: &str) -> Result<Outcome, KernelError> {
        let cmd = Command::parse(line)?;
        let kind = cmd.kind();
        let result = apply(&mut self.lot, cmd);

        if let Ok(Outcome::LotCreated { capacity }) = &result {
            tracing::info!(%capacity, "parking lot created");
        }
        tracing::debug!(command = %kind, ok = result.is_ok(), "command applied");

        result
    }

    /// Parses and applies one line, rendering the result as a response.
    pub fn respond(&mut self, line: &str) -> Response {
        match self.dispatch(line) {
            Ok(outcome) => Response::success(&outcome),
            Err(err) => {
                match err.class() {
                    ErrorClass::System => {
                        tracing::error!(error = %err, line, "internal fault while applying command");
                    }
                    class => tracing::debug!(?class, error = %err, line, "command failed"),
                }
                Response::failure(&err)
            }
        }
    }

    /// Parses and applies one line, returning only the response text.
    pub fn execute(&mut self, line: &str) -> String {
        self.respond(line).text
    }

    pub fn lot(&self) -> &Lot {
        &self.lot
    }
}
