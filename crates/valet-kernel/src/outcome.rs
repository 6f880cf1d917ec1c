//! Outcomes produced by the kernel.
//!
//! An outcome describes what a successful command did. Its `Display`
//! implementation is the exact line written back to the caller.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use valet_types::{Capacity, Registration, SlotNumber, Vehicle};

/// Rendered when a registration query matches no vehicle.
pub const NO_REGISTRATIONS: &str = "null";

/// The result of a successfully applied command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The lot was sized.
    LotCreated { capacity: Capacity },

    /// A vehicle was ticketed to a slot.
    Parked {
        slot: SlotNumber,
        registration: Registration,
    },

    /// A slot was vacated; carries the vehicle that left.
    Left { slot: SlotNumber, vehicle: Vehicle },

    /// Registrations matching an age query, in slot order.
    Registrations(Vec<Registration>),

    /// Slots matching an age query, in ascending order.
    Slots(Vec<SlotNumber>),

    /// The slot holding a looked-up registration.
    Slot(SlotNumber),
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::LotCreated { capacity } => write!(f, "Created parking of {capacity} slots"),
            Outcome::Parked { slot, registration } => write!(
                f,
                "Car with vehicle registration number \"{registration}\" has been parked at slot number {slot}"
            ),
            Outcome::Left { slot, vehicle } => write!(
                f,
                "Slot number {slot} vacated, the car with vehicle registration number \"{}\" left the space, the driver of the car was of age {}",
                vehicle.registration(),
                vehicle.driver_age()
            ),
            // An empty registration list prints `null`, while an empty slot
            // list prints nothing.
            Outcome::Registrations(registrations) if registrations.is_empty() => {
                f.write_str(NO_REGISTRATIONS)
            }
            Outcome::Registrations(registrations) => write_joined(f, registrations),
            Outcome::Slots(slots) => write_joined(f, slots),
            Outcome::Slot(slot) => write!(f, "{slot}"),
        }
    }
}

fn write_joined<T: Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use valet_types::DriverAge;

    use super::*;

    #[test]
    fn leave_message_reports_vehicle_and_age() {
        let outcome = Outcome::Left {
            slot: SlotNumber::new(2),
            vehicle: Vehicle::new("PB-01-HH-1234", DriverAge::new(21)),
        };
        assert_eq!(
            outcome.to_string(),
            "Slot number 2 vacated, the car with vehicle registration number \"PB-01-HH-1234\" left the space, the driver of the car was of age 21"
        );
    }

    #[test]
    fn empty_queries_render_differently() {
        assert_eq!(Outcome::Registrations(vec![]).to_string(), "null");
        assert_eq!(Outcome::Slots(vec![]).to_string(), "");
    }

    #[test]
    fn lists_are_comma_joined() {
        let registrations = Outcome::Registrations(vec![
            Registration::new("KA-01-HH-1234"),
            Registration::new("PB-01-HH-1234"),
        ]);
        assert_eq!(registrations.to_string(), "KA-01-HH-1234, PB-01-HH-1234");

        let slots = Outcome::Slots(vec![SlotNumber::new(1), SlotNumber::new(4)]);
        assert_eq!(slots.to_string(), "1, 4");
    }
}
