//! # valet-types: Core types for `Valet`
//!
//! This crate contains the value objects shared across the `Valet` system:
//! - Slot addressing ([`SlotNumber`], [`Capacity`])
//! - Vehicle identity ([`Registration`], [`DriverAge`], [`Vehicle`])
//!
//! Every type here is a plain value. Validation that depends on lot state
//! (range checks, uniqueness) lives in `valet-kernel`.

use std::borrow::Borrow;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

// ============================================================================
// Slot Addressing - All Copy (cheap 4-byte values)
// ============================================================================

/// Number of an addressable parking position.
///
/// Slot numbers are one-based: a lot of capacity `n` owns slots `1..=n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotNumber(u32);

impl SlotNumber {
    pub const FIRST: SlotNumber = SlotNumber(1);

    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// Returns the slot number as a `u32`.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns the zero-based position of this slot, or `None` for slot 0.
    pub fn index(&self) -> Option<usize> {
        self.0.checked_sub(1).map(|i| i as usize)
    }

    /// Builds a slot number from a zero-based position.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }
}

impl Display for SlotNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SlotNumber {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<SlotNumber> for u32 {
    fn from(slot: SlotNumber) -> Self {
        slot.0
    }
}

/// Number of slots in a lot.
///
/// A capacity of zero is representable so that it can be reported back in
/// errors; the allocator refuses to size a lot with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Capacity(u32);

impl Capacity {
    pub fn new(slots: u32) -> Self {
        Self(slots)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl Display for Capacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Capacity {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

// ============================================================================
// Vehicle Identity
// ============================================================================

/// Age of the driver of a parked vehicle, in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DriverAge(u32);

impl DriverAge {
    pub fn new(years: u32) -> Self {
        Self(years)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Ages are positive; zero is kept representable for error reporting.
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl Display for DriverAge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DriverAge {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Vehicle registration number, e.g. `KA-01-HH-1234`.
///
/// Compared byte-for-byte: `ka-01` and `KA-01` are different vehicles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Registration(String);

impl Registration {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for Registration {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Registration {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Registration {
    fn from(number: String) -> Self {
        Self(number)
    }
}

impl From<&str> for Registration {
    fn from(number: &str) -> Self {
        Self(number.to_string())
    }
}

impl From<Registration> for String {
    fn from(value: Registration) -> Self {
        value.0
    }
}

/// A vehicle as recorded on a ticket. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vehicle {
    registration: Registration,
    driver_age: DriverAge,
}

impl Vehicle {
    pub fn new(registration: impl Into<Registration>, driver_age: DriverAge) -> Self {
        Self {
            registration: registration.into(),
            driver_age,
        }
    }

    pub fn registration(&self) -> &Registration {
        &self.registration
    }

    pub fn driver_age(&self) -> DriverAge {
        self.driver_age
    }
}

#[cfg(test)]
mod tests;
