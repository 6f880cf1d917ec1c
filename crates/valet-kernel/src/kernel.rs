//! The kernel - pure functional core of `Valet`.
//!
//! The kernel applies commands to a [`Lot`] and reports an [`Outcome`].
//! It is completely pure: no IO, no clocks, no randomness. Every
//! precondition is checked before the lot is touched, so a failed command
//! leaves the lot exactly as it was.
//!
//! # Example
//!
//! ```
//! use valet_kernel::{Command, KernelError, Lot, apply};
//!
//! let mut lot = Lot::new();
//! assert_eq!(
//!     apply(&mut lot, Command::leave(1)),
//!     Err(KernelError::Uninitialized)
//! );
//!
//! apply(&mut lot, Command::create_parking_lot(1))?;
//! apply(&mut lot, Command::park("KA-01-HH-1234", 21))?;
//! assert_eq!(
//!     apply(&mut lot, Command::park("KA-01-HH-9999", 21)),
//!     Err(KernelError::LotFull)
//! );
//! # Ok::<(), KernelError>(())
//! ```

use valet_types::{Capacity, Registration, SlotNumber};

use crate::allocator::MAX_CAPACITY;
use crate::command::{Command, Malformed};
use crate::outcome::Outcome;
use crate::state::Lot;

/// Applies a command to the lot, returning what happened.
pub fn apply(lot: &mut Lot, cmd: Command) -> Result<Outcome, KernelError> {
    match cmd {
        Command::CreateParkingLot { capacity } => {
            lot.allocator_mut().initialize(capacity)?;

            // Postcondition: lot is sized exactly as requested
            debug_assert_eq!(lot.capacity(), Some(capacity));

            Ok(Outcome::LotCreated { capacity })
        }

        Command::Park { vehicle } => {
            // Precondition: lot has been sized
            lot.require_ready()?;

            // Precondition: vehicle identity is complete
            if !vehicle.driver_age().is_positive() {
                return Err(KernelError::InvalidAge(i64::from(
                    vehicle.driver_age().as_u32(),
                )));
            }

            // Precondition: registration not already parked. Checked before
            // allocating so a duplicate never consumes a slot.
            if lot
                .registry()
                .contains_registration(vehicle.registration().as_str())
            {
                return Err(KernelError::DuplicateRegistration(
                    vehicle.registration().clone(),
                ));
            }

            let slot = lot.allocator_mut().allocate()?;
            let registration = vehicle.registration().clone();

            if let Err(err) = lot.registry_mut().issue(slot, vehicle) {
                lot.allocator_mut().release(slot).map_err(|rollback| {
                    KernelError::Invariant(format!(
                        "could not roll back slot {slot} after failed issue: {rollback}"
                    ))
                })?;
                return Err(KernelError::Invariant(format!(
                    "slot {slot} allocated but ticket refused: {err}"
                )));
            }

            // Postcondition: slot occupied and ticketed to this vehicle
            debug_assert!(lot.allocator().is_occupied(slot));
            debug_assert_eq!(
                lot.registry().find_slot_by_registration(registration.as_str()),
                Ok(slot)
            );

            Ok(Outcome::Parked { slot, registration })
        }

        Command::Leave { slot } => {
            // Precondition: lot has been sized
            lot.require_ready()?;

            // Precondition: a ticket references the slot
            let vehicle = lot.registry_mut().remove(slot)?;

            if let Err(err) = lot.allocator_mut().release(slot) {
                // Ticketed but not releasable: put the ticket back so the
                // lot is left as it was, then report the fault.
                lot.registry_mut().issue(slot, vehicle).map_err(|rollback| {
                    KernelError::Invariant(format!(
                        "could not restore ticket at slot {slot}: {rollback}"
                    ))
                })?;
                return Err(KernelError::Invariant(format!(
                    "slot {slot} is ticketed but cannot be released: {err}"
                )));
            }

            // Postcondition: slot free and no longer ticketed
            debug_assert!(!lot.allocator().is_occupied(slot));
            debug_assert!(!lot.registry().has_ticket(slot));

            Ok(Outcome::Left { slot, vehicle })
        }

        Command::RegistrationsForDriverAge { age } => {
            lot.require_ready()?;
            let registrations = lot.registry().registrations_for_age(age)?;
            Ok(Outcome::Registrations(registrations))
        }

        Command::SlotsForDriverAge { age } => {
            lot.require_ready()?;
            let slots = lot.registry().slots_for_age(age)?;
            Ok(Outcome::Slots(slots))
        }

        Command::SlotForRegistration { registration } => {
            lot.require_ready()?;
            let slot = lot
                .registry()
                .find_slot_by_registration(registration.as_str())?;
            Ok(Outcome::Slot(slot))
        }
    }
}

/// Coarse classification of a [`KernelError`], deciding how it is shown
/// to the person who typed the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The line was not a usable command: unknown word, wrong shape, or
    /// issued before the lot exists.
    Rejected,
    /// A well-formed command that the lot refused.
    Domain,
    /// Internal fault; details are for logs only.
    System,
}

/// Errors that can occur when parsing or applying commands.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    // Lot lifecycle errors
    #[error("{}", invalid_capacity_message(.0))]
    InvalidCapacity(i64),

    #[error("Parking lot already created with {0} slots")]
    AlreadyInitialized(Capacity),

    #[error("parking lot has not been created")]
    Uninitialized,

    // Slot errors
    #[error("Sorry, parking lot is full")]
    LotFull,

    #[error("Slot number {0} is invalid")]
    InvalidSlot(SlotNumber),

    #[error("Slot number {0} is already empty")]
    AlreadyFree(SlotNumber),

    // Ticket errors
    #[error("Car with vehicle registration number \"{0}\" is already parked")]
    DuplicateRegistration(Registration),

    #[error("Car is not present at slot number {0}")]
    NoTicketAtSlot(SlotNumber),

    #[error("Not found")]
    NotFound(Registration),

    #[error("Driver age must be at least 1, got {0}")]
    InvalidAge(i64),

    // Input errors
    #[error("malformed command: {0}")]
    MalformedCommand(#[from] Malformed),

    // General errors
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl KernelError {
    pub fn class(&self) -> ErrorClass {
        match self {
            KernelError::MalformedCommand(_) | KernelError::Uninitialized => ErrorClass::Rejected,
            KernelError::Invariant(_) => ErrorClass::System,
            KernelError::InvalidCapacity(_)
            | KernelError::AlreadyInitialized(_)
            | KernelError::LotFull
            | KernelError::InvalidSlot(_)
            | KernelError::AlreadyFree(_)
            | KernelError::DuplicateRegistration(_)
            | KernelError::NoTicketAtSlot(_)
            | KernelError::NotFound(_)
            | KernelError::InvalidAge(_) => ErrorClass::Domain,
        }
    }
}

fn invalid_capacity_message(requested: &i64) -> String {
    if *requested < 1 {
        "Number of slots cannot be less than 1".to_string()
    } else {
        format!("Number of slots cannot be more than {MAX_CAPACITY}")
    }
}
