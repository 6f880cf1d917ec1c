//! # valet-kernel: Functional core of `Valet`
//!
//! The kernel is the pure, deterministic heart of the parking lot. It receives
//! parsed commands and mutates the lot, producing an [`Outcome`] for the
//! caller to render.
//!
//! ## Key Principles
//!
//! - **No IO**: The kernel never touches files, terminals, or the network
//! - **No globals**: Every lot is an explicitly owned [`Lot`] value
//! - **Deterministic**: The same command sequence always yields the same
//!   outcomes (lowest free slot wins)
//! - **Atomic pairs**: allocate+issue and release+remove either both happen
//!   or neither does
//!
//! ## Architecture
//!
//! - [`allocator`]: Fixed-size slot table (`SlotAllocator`)
//! - [`registry`]: Slot → vehicle tickets (`TicketRegistry`)
//! - [`state`]: The lot, owning one allocator and one registry
//! - [`command`]: Line parsing into typed [`Command`]s
//! - [`outcome`]: Successful results and their textual rendering
//! - [`kernel`]: The `apply` function that ties it all together
//!
//! ## Example
//!
//! ```
//! use valet_kernel::{Command, Lot, apply};
//!
//! let mut lot = Lot::new();
//! apply(&mut lot, Command::parse("create_parking_lot 6")?)?;
//!
//! let outcome = apply(&mut lot, Command::parse("park KA-01-HH-1234 21")?)?;
//! assert_eq!(
//!     outcome.to_string(),
//!     "Car with vehicle registration number \"KA-01-HH-1234\" has been parked at slot number 1"
//! );
//! # Ok::<(), valet_kernel::KernelError>(())
//! ```

pub mod allocator;
pub mod command;
pub mod kernel;
pub mod outcome;
pub mod registry;
pub mod state;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use allocator::{MAX_CAPACITY, SlotAllocator, SlotStatus};
pub use command::{Command, CommandKind, Malformed};
pub use kernel::{ErrorClass, KernelError, apply};
pub use outcome::Outcome;
pub use registry::TicketRegistry;
pub use state::{Lot, TicketStatus};
