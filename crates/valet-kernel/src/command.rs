//! Commands accepted by the kernel, and the line parser that produces them.
//!
//! Parsing is a three-stage pipeline, each stage returning a typed error:
//! tokenize, resolve the command kind, then check the argument shape and
//! convert arguments into value types. Nothing here touches lot state, so a
//! line that fails to parse can never leave a partial mutation behind.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use valet_types::{Capacity, DriverAge, Registration, SlotNumber, Vehicle};

use crate::kernel::KernelError;

/// Optional keyword accepted between registration and age in `park`.
pub const DRIVER_AGE_KEYWORD: &str = "driver_age";

/// The fixed set of command words understood by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    CreateParkingLot,
    Park,
    Leave,
    RegistrationsForDriverAge,
    SlotsForDriverAge,
    SlotForRegistration,
}

impl CommandKind {
    pub const ALL: [CommandKind; 6] = [
        CommandKind::CreateParkingLot,
        CommandKind::Park,
        CommandKind::Leave,
        CommandKind::RegistrationsForDriverAge,
        CommandKind::SlotsForDriverAge,
        CommandKind::SlotForRegistration,
    ];

    /// The command word as it appears on an input line.
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::CreateParkingLot => "create_parking_lot",
            CommandKind::Park => "park",
            CommandKind::Leave => "leave",
            CommandKind::RegistrationsForDriverAge => {
                "vehicle_registration_number_for_driver_of_age"
            }
            CommandKind::SlotsForDriverAge => "slot_numbers_for_driver_of_age",
            CommandKind::SlotForRegistration => "slot_number_for_car_with_number",
        }
    }

    /// Resolves a command word. Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Human-readable argument shape, used in help text and error messages.
    pub fn usage(self) -> &'static str {
        match self {
            CommandKind::CreateParkingLot => "create_parking_lot <capacity>",
            CommandKind::Park => "park <registration> [driver_age] <age>",
            CommandKind::Leave => "leave <slot>",
            CommandKind::RegistrationsForDriverAge => {
                "vehicle_registration_number_for_driver_of_age <age>"
            }
            CommandKind::SlotsForDriverAge => "slot_numbers_for_driver_of_age <age>",
            CommandKind::SlotForRegistration => "slot_number_for_car_with_number <registration>",
        }
    }
}

impl Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a line could not be turned into a [`Command`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    #[error("empty command line")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("usage: {}, got {} argument(s)", .kind.usage(), .actual)]
    ArgumentCount { kind: CommandKind, actual: usize },

    #[error("expected '{expected}', found '{found}'")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },

    #[error("{field} '{value}' is not a valid number")]
    NotANumber { field: &'static str, value: String },
}

/// A validated command, ready for [`crate::kernel::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Size the lot. Only the first one succeeds.
    CreateParkingLot { capacity: Capacity },

    /// Park a vehicle in the lowest free slot.
    Park { vehicle: Vehicle },

    /// Vacate a slot.
    Leave { slot: SlotNumber },

    /// List registrations whose driver has the given age.
    RegistrationsForDriverAge { age: DriverAge },

    /// List slots whose driver has the given age.
    SlotsForDriverAge { age: DriverAge },

    /// Find the slot holding a registration.
    SlotForRegistration { registration: Registration },
}

impl Command {
    pub fn create_parking_lot(capacity: u32) -> Self {
        Self::CreateParkingLot {
            capacity: Capacity::new(capacity),
        }
    }

    pub fn park(registration: impl Into<Registration>, driver_age: u32) -> Self {
        Self::Park {
            vehicle: Vehicle::new(registration, DriverAge::new(driver_age)),
        }
    }

    pub fn leave(slot: u32) -> Self {
        Self::Leave {
            slot: SlotNumber::new(slot),
        }
    }

    pub fn registrations_for_driver_of_age(age: u32) -> Self {
        Self::RegistrationsForDriverAge {
            age: DriverAge::new(age),
        }
    }

    pub fn slots_for_driver_of_age(age: u32) -> Self {
        Self::SlotsForDriverAge {
            age: DriverAge::new(age),
        }
    }

    pub fn slot_for_registration(registration: impl Into<Registration>) -> Self {
        Self::SlotForRegistration {
            registration: registration.into(),
        }
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::CreateParkingLot { .. } => CommandKind::CreateParkingLot,
            Command::Park { .. } => CommandKind::Park,
            Command::Leave { .. } => CommandKind::Leave,
            Command::RegistrationsForDriverAge { .. } => CommandKind::RegistrationsForDriverAge,
            Command::SlotsForDriverAge { .. } => CommandKind::SlotsForDriverAge,
            Command::SlotForRegistration { .. } => CommandKind::SlotForRegistration,
        }
    }

    /// Parses one input line into a command.
    ///
    /// Tokens are separated by ASCII whitespace. Numeric fields that are
    /// well-formed but out of domain (capacity or age below 1) are reported
    /// with their domain error rather than as malformed input.
    pub fn parse(line: &str) -> Result<Self, KernelError> {
        let mut tokens = line.split_ascii_whitespace();

        let word = tokens.next().ok_or(Malformed::Empty)?;
        let kind = CommandKind::from_name(word)
            .ok_or_else(|| Malformed::UnknownCommand(word.to_string()))?;

        let args: Vec<&str> = tokens.collect();
        Self::from_args(kind, &args)
    }

    fn from_args(kind: CommandKind, args: &[&str]) -> Result<Self, KernelError> {
        match (kind, args) {
            (CommandKind::CreateParkingLot, [capacity]) => Ok(Self::CreateParkingLot {
                capacity: parse_capacity(capacity)?,
            }),
            (CommandKind::Park, [registration, age]) => Ok(Self::Park {
                vehicle: Vehicle::new(*registration, parse_age(age)?),
            }),
            (CommandKind::Park, [registration, keyword, age]) => {
                if *keyword != DRIVER_AGE_KEYWORD {
                    return Err(Malformed::UnexpectedToken {
                        expected: DRIVER_AGE_KEYWORD,
                        found: (*keyword).to_string(),
                    }
                    .into());
                }
                Ok(Self::Park {
                    vehicle: Vehicle::new(*registration, parse_age(age)?),
                })
            }
            (CommandKind::Leave, [slot]) => Ok(Self::Leave {
                slot: parse_slot(slot)?,
            }),
            (CommandKind::RegistrationsForDriverAge, [age]) => {
                Ok(Self::RegistrationsForDriverAge {
                    age: parse_age(age)?,
                })
            }
            (CommandKind::SlotsForDriverAge, [age]) => Ok(Self::SlotsForDriverAge {
                age: parse_age(age)?,
            }),
            (CommandKind::SlotForRegistration, [registration]) => Ok(Self::SlotForRegistration {
                registration: Registration::new(*registration),
            }),
            _ => Err(Malformed::ArgumentCount {
                kind,
                actual: args.len(),
            }
            .into()),
        }
    }
}

fn parse_number(field: &'static str, token: &str) -> Result<i64, Malformed> {
    token.parse::<i64>().map_err(|_| Malformed::NotANumber {
        field,
        value: token.to_string(),
    })
}

fn parse_capacity(token: &str) -> Result<Capacity, KernelError> {
    let value = parse_number("capacity", token)?;
    if value < 1 {
        return Err(KernelError::InvalidCapacity(value));
    }
    u32::try_from(value)
        .map(Capacity::new)
        .map_err(|_| KernelError::InvalidCapacity(value))
}

fn parse_age(token: &str) -> Result<DriverAge, KernelError> {
    let value = parse_number("driver age", token)?;
    if value < 1 {
        return Err(KernelError::InvalidAge(value));
    }
    u32::try_from(value).map(DriverAge::new).map_err(|_| {
        Malformed::NotANumber {
            field: "driver age",
            value: token.to_string(),
        }
        .into()
    })
}

fn parse_slot(token: &str) -> Result<SlotNumber, Malformed> {
    token
        .parse::<u32>()
        .map(SlotNumber::new)
        .map_err(|_| Malformed::NotANumber {
            field: "slot number",
            value: token.to_string(),
        })
}
