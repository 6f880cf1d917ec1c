//! # Valet
//!
//! A text-command interpreter that simulates a parking lot.
//!
//! Each input line is one command; each command produces exactly one output
//! line, whether it succeeded, was rejected, or hit an internal fault.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                          Valet                           │
//! │  ┌─────────┐   ┌───────────┐   ┌──────────┐   ┌───────┐  │
//! │  │  Line   │ → │  Command  │ → │  Kernel  │ → │ Reply │  │
//! │  │ (text)  │   │ (parse)   │   │ (apply)  │   │ (text)│  │
//! │  └─────────┘   └───────────┘   └──────────┘   └───────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use valet::Valet;
//!
//! let valet = Valet::new();
//! assert_eq!(valet.execute("create_parking_lot 6"), "Created parking of 6 slots");
//! assert_eq!(
//!     valet.execute("park KA-01-HH-1234 21"),
//!     "Car with vehicle registration number \"KA-01-HH-1234\" has been parked at slot number 1"
//! );
//! assert_eq!(valet.execute("slot_number_for_car_with_number KA-01-HH-1234"), "1");
//! assert_eq!(valet.execute("fly_away"), "Not a valid Command");
//! ```
//!
//! # Modules
//!
//! - **SDK Layer**: [`Valet`] - shared, lock-guarded lot handle
//! - **Dispatch**: [`Dispatcher`], [`Response`] - one line in, one line out
//! - **Scripts**: [`ScriptSummary`] - batch execution over readers/writers

mod dispatcher;
mod error;
mod script;
mod valet;

// SDK Layer - Main API
pub use dispatcher::{Dispatcher, REJECTED, Response, SYSTEM_ERROR};
pub use error::{Result, ValetError};
pub use script::ScriptSummary;
pub use valet::Valet;

// Re-export kernel types
pub use valet_kernel::{
    Command, CommandKind, ErrorClass, KernelError, Lot, Malformed, Outcome, TicketStatus,
};

// Re-export core types from valet-types
pub use valet_types::{Capacity, DriverAge, Registration, SlotNumber, Vehicle};
