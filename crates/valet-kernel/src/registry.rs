//! Ticket bookkeeping.
//!
//! The registry maps occupied slots to the vehicles parked in them and keeps
//! registration numbers unique across active tickets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use valet_types::{DriverAge, Registration, SlotNumber, Vehicle};

use crate::kernel::KernelError;

/// Active tickets, keyed by slot.
///
/// Iteration is always in ascending slot order, which makes every query
/// result reproducible for an unchanged registry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TicketRegistry {
    tickets: BTreeMap<SlotNumber, Vehicle>,
    /// Secondary index; always the exact inverse of `tickets`.
    registration_index: BTreeMap<Registration, SlotNumber>,
}

impl TicketRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `vehicle` now occupies `slot`.
    pub fn issue(&mut self, slot: SlotNumber, vehicle: Vehicle) -> Result<(), KernelError> {
        // Precondition: registration not already parked
        if self.contains_registration(vehicle.registration().as_str()) {
            return Err(KernelError::DuplicateRegistration(
                vehicle.registration().clone(),
            ));
        }

        // Precondition: one ticket per slot. The allocator hands out each
        // slot once, so reaching this means the two have diverged.
        if let Some(existing) = self.tickets.get(&slot) {
            return Err(KernelError::Invariant(format!(
                "slot {slot} already ticketed to {}",
                existing.registration()
            )));
        }

        self.registration_index
            .insert(vehicle.registration().clone(), slot);
        self.tickets.insert(slot, vehicle);

        debug_assert_eq!(self.tickets.len(), self.registration_index.len());
        Ok(())
    }

    /// Removes the ticket at `slot`, returning the vehicle that held it.
    pub fn remove(&mut self, slot: SlotNumber) -> Result<Vehicle, KernelError> {
        let vehicle = self
            .tickets
            .remove(&slot)
            .ok_or(KernelError::NoTicketAtSlot(slot))?;
        self.registration_index.remove(vehicle.registration());

        debug_assert_eq!(self.tickets.len(), self.registration_index.len());
        Ok(vehicle)
    }

    pub fn contains_registration(&self, registration: &str) -> bool {
        self.registration_index.contains_key(registration)
    }

    /// Returns the slot holding the vehicle with this registration.
    pub fn find_slot_by_registration(&self, registration: &str) -> Result<SlotNumber, KernelError> {
        self.registration_index
            .get(registration)
            .copied()
            .ok_or_else(|| KernelError::NotFound(Registration::new(registration)))
    }

    /// Registrations of every vehicle whose driver has the given age.
    pub fn registrations_for_age(&self, age: DriverAge) -> Result<Vec<Registration>, KernelError> {
        Ok(self
            .with_driver_age(age)?
            .map(|(_, vehicle)| vehicle.registration().clone())
            .collect())
    }

    /// Slots of every vehicle whose driver has the given age.
    pub fn slots_for_age(&self, age: DriverAge) -> Result<Vec<SlotNumber>, KernelError> {
        Ok(self.with_driver_age(age)?.map(|(slot, _)| slot).collect())
    }

    pub fn vehicle_at(&self, slot: SlotNumber) -> Result<&Vehicle, KernelError> {
        self.tickets
            .get(&slot)
            .ok_or(KernelError::NoTicketAtSlot(slot))
    }

    pub fn registration_at(&self, slot: SlotNumber) -> Result<&Registration, KernelError> {
        self.vehicle_at(slot).map(Vehicle::registration)
    }

    pub fn age_at(&self, slot: SlotNumber) -> Result<DriverAge, KernelError> {
        self.vehicle_at(slot).map(Vehicle::driver_age)
    }

    pub fn has_ticket(&self, slot: SlotNumber) -> bool {
        self.tickets.contains_key(&slot)
    }

    /// Returns the number of active tickets.
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Iterates over active tickets in ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotNumber, &Vehicle)> {
        self.tickets.iter().map(|(slot, vehicle)| (*slot, vehicle))
    }

    fn with_driver_age(
        &self,
        age: DriverAge,
    ) -> Result<impl Iterator<Item = (SlotNumber, &Vehicle)>, KernelError> {
        if !age.is_positive() {
            return Err(KernelError::InvalidAge(i64::from(age.as_u32())));
        }
        Ok(self
            .iter()
            .filter(move |(_, vehicle)| vehicle.driver_age() == age))
    }
}
