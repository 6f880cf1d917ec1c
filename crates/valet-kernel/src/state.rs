//! Lot state.
//!
//! A [`Lot`] owns exactly one [`SlotAllocator`] and one [`TicketRegistry`].
//! External code mutates it only through [`crate::kernel::apply`], which
//! keeps the two halves consistent: a slot is occupied iff a ticket
//! references it.

use serde::{Deserialize, Serialize};
use valet_types::{Capacity, DriverAge, Registration, SlotNumber};

use crate::allocator::SlotAllocator;
use crate::kernel::KernelError;
use crate::registry::TicketRegistry;

/// One row of the lot status view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketStatus {
    pub slot: SlotNumber,
    pub registration: Registration,
    pub driver_age: DriverAge,
}

/// The kernel's in-memory state for a single parking lot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Lot {
    allocator: SlotAllocator,
    registry: TicketRegistry,
}

impl Lot {
    /// Creates an unsized lot. Every command except `create_parking_lot`
    /// fails until it is sized.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lot size, or `None` while uninitialized.
    pub fn capacity(&self) -> Option<Capacity> {
        self.allocator.capacity()
    }

    pub fn is_ready(&self) -> bool {
        self.allocator.is_initialized()
    }

    pub fn allocator(&self) -> &SlotAllocator {
        &self.allocator
    }

    pub fn registry(&self) -> &TicketRegistry {
        &self.registry
    }

    /// Active tickets as status rows, in ascending slot order.
    pub fn status(&self) -> Vec<TicketStatus> {
        self.registry
            .iter()
            .map(|(slot, vehicle)| TicketStatus {
                slot,
                registration: vehicle.registration().clone(),
                driver_age: vehicle.driver_age(),
            })
            .collect()
    }

    /// Verifies that allocator and registry agree slot for slot.
    ///
    /// Returns [`KernelError::Invariant`] naming the first slot where they
    /// disagree.
    pub fn check_consistency(&self) -> Result<(), KernelError> {
        let occupied = self.allocator.occupied_count();
        if occupied != self.registry.len() {
            return Err(KernelError::Invariant(format!(
                "{occupied} occupied slots but {} tickets",
                self.registry.len()
            )));
        }

        for (slot, _) in self.registry.iter() {
            if !self.allocator.is_occupied(slot) {
                return Err(KernelError::Invariant(format!(
                    "slot {slot} is ticketed but not occupied"
                )));
            }
        }

        Ok(())
    }

    /// Fails with [`KernelError::Uninitialized`] until the lot is sized.
    pub(crate) fn require_ready(&self) -> Result<Capacity, KernelError> {
        self.capacity().ok_or(KernelError::Uninitialized)
    }

    pub(crate) fn allocator_mut(&mut self) -> &mut SlotAllocator {
        &mut self.allocator
    }

    pub(crate) fn registry_mut(&mut self) -> &mut TicketRegistry {
        &mut self.registry
    }
}
