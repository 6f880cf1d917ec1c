//! Slot allocation.
//!
//! The allocator owns the fixed-size slot table of a lot. It knows nothing
//! about vehicles; pairing a slot with a vehicle is the registry's job and
//! keeping the two in step is the kernel's.

use serde::{Deserialize, Serialize};
use valet_types::{Capacity, SlotNumber};

use crate::kernel::KernelError;

/// Largest lot the allocator will size.
pub const MAX_CAPACITY: u32 = 1_000_000;

/// Occupancy of a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotStatus {
    Free,
    Occupied,
}

/// Fixed-size table of slots, sized exactly once.
///
/// Before [`initialize`](Self::initialize) the table does not exist and every
/// allocation request fails with [`KernelError::Uninitialized`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotAllocator {
    /// Index `i` holds the status of slot `i + 1`.
    slots: Option<Vec<SlotStatus>>,
}

impl SlotAllocator {
    /// Creates an allocator with no slots yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sizes the lot. Can only succeed once.
    pub fn initialize(&mut self, capacity: Capacity) -> Result<(), KernelError> {
        // Precondition: never sized before
        if let Some(existing) = self.capacity() {
            return Err(KernelError::AlreadyInitialized(existing));
        }

        // Precondition: at least one slot, and a table we can afford to hold
        if capacity.as_u32() == 0 || capacity.as_u32() > MAX_CAPACITY {
            return Err(KernelError::InvalidCapacity(i64::from(capacity.as_u32())));
        }

        self.slots = Some(vec![SlotStatus::Free; capacity.as_usize()]);

        // Postcondition: every slot starts free
        debug_assert_eq!(self.free_count(), capacity.as_usize());
        Ok(())
    }

    /// Occupies the lowest-numbered free slot and returns its number.
    pub fn allocate(&mut self) -> Result<SlotNumber, KernelError> {
        let slots = self.slots.as_mut().ok_or(KernelError::Uninitialized)?;

        let index = slots
            .iter()
            .position(|status| *status == SlotStatus::Free)
            .ok_or(KernelError::LotFull)?;
        slots[index] = SlotStatus::Occupied;

        Ok(SlotNumber::from_index(index))
    }

    /// Marks an occupied slot free again.
    pub fn release(&mut self, slot: SlotNumber) -> Result<(), KernelError> {
        let slots = self.slots.as_mut().ok_or(KernelError::Uninitialized)?;

        let status = slot
            .index()
            .and_then(|index| slots.get_mut(index))
            .ok_or(KernelError::InvalidSlot(slot))?;

        match status {
            SlotStatus::Free => Err(KernelError::AlreadyFree(slot)),
            SlotStatus::Occupied => {
                *status = SlotStatus::Free;
                Ok(())
            }
        }
    }

    /// Returns the lot size, or `None` before initialization.
    pub fn capacity(&self) -> Option<Capacity> {
        self.slots
            .as_ref()
            .map(|slots| Capacity::new(slots.len() as u32))
    }

    /// Returns true once the lot has been sized.
    pub fn is_initialized(&self) -> bool {
        self.slots.is_some()
    }

    /// Returns the status of a slot, or `None` if it is out of range.
    pub fn status(&self, slot: SlotNumber) -> Option<SlotStatus> {
        let slots = self.slots.as_ref()?;
        slot.index().and_then(|index| slots.get(index)).copied()
    }

    pub fn is_occupied(&self, slot: SlotNumber) -> bool {
        self.status(slot) == Some(SlotStatus::Occupied)
    }

    pub fn free_count(&self) -> usize {
        self.count(SlotStatus::Free)
    }

    pub fn occupied_count(&self) -> usize {
        self.count(SlotStatus::Occupied)
    }

    /// Iterates over occupied slot numbers in ascending order.
    pub fn occupied_slots(&self) -> impl Iterator<Item = SlotNumber> + '_ {
        self.slots
            .iter()
            .flatten()
            .enumerate()
            .filter(|(_, status)| **status == SlotStatus::Occupied)
            .map(|(index, _)| SlotNumber::from_index(index))
    }

    fn count(&self, wanted: SlotStatus) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|status| **status == wanted)
            .count()
    }
}
