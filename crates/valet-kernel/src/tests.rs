//! Unit tests for valet-kernel
//!
//! The kernel is pure (no IO), making it ideal for unit testing.
//! Every code path can be tested without mocks.

use valet_types::{Capacity, DriverAge, Registration, SlotNumber, Vehicle};

use crate::command::Command;
use crate::kernel::{ErrorClass, KernelError, apply};
use crate::outcome::Outcome;
use crate::state::{Lot, TicketStatus};

// ============================================================================
// Test Helpers
// ============================================================================

fn lot_with_capacity(capacity: u32) -> Lot {
    let mut lot = Lot::new();
    apply(&mut lot, Command::create_parking_lot(capacity)).expect("failed to create test lot");
    lot
}

fn park(lot: &mut Lot, registration: &str, age: u32) -> Result<SlotNumber, KernelError> {
    match apply(lot, Command::park(registration, age))? {
        Outcome::Parked { slot, .. } => Ok(slot),
        other => panic!("park produced {other:?}"),
    }
}

fn run(lot: &mut Lot, line: &str) -> Result<Outcome, KernelError> {
    apply(lot, Command::parse(line)?)
}

// ============================================================================
// Lot Lifecycle Tests
// ============================================================================

#[test]
fn create_parking_lot_on_new_lot_succeeds() {
    let mut lot = Lot::new();
    let outcome = apply(&mut lot, Command::create_parking_lot(6)).expect("create should succeed");

    assert_eq!(
        outcome,
        Outcome::LotCreated {
            capacity: Capacity::new(6)
        }
    );
    assert_eq!(outcome.to_string(), "Created parking of 6 slots");
    assert_eq!(lot.capacity(), Some(Capacity::new(6)));
    assert_eq!(lot.allocator().free_count(), 6);
}

#[test]
fn second_create_is_rejected_and_lot_is_untouched() {
    let mut lot = lot_with_capacity(2);
    park(&mut lot, "KA-01-HH-1234", 21).expect("park should succeed");
    let before = lot.clone();

    let result = apply(&mut lot, Command::create_parking_lot(10));

    assert_eq!(
        result,
        Err(KernelError::AlreadyInitialized(Capacity::new(2)))
    );
    assert_eq!(lot, before);
}

#[test]
fn every_operation_before_create_is_uninitialized() {
    let commands = [
        Command::park("KA-01-HH-1234", 21),
        Command::leave(1),
        Command::registrations_for_driver_of_age(21),
        Command::slots_for_driver_of_age(21),
        Command::slot_for_registration("KA-01-HH-1234"),
    ];

    for cmd in commands {
        let mut lot = Lot::new();
        let err = apply(&mut lot, cmd).expect_err("lot is not sized");
        assert_eq!(err, KernelError::Uninitialized);
        assert_eq!(err.class(), ErrorClass::Rejected);
        assert_eq!(lot, Lot::new());
    }
}

#[test]
fn zero_capacity_leaves_lot_uninitialized() {
    let mut lot = Lot::new();
    assert_eq!(
        apply(&mut lot, Command::create_parking_lot(0)),
        Err(KernelError::InvalidCapacity(0))
    );
    assert!(!lot.is_ready());

    // A later valid create still works
    apply(&mut lot, Command::create_parking_lot(3)).expect("create should succeed");
    assert!(lot.is_ready());
}

// ============================================================================
// Park Tests
// ============================================================================

#[test]
fn exactly_capacity_parks_succeed() {
    let mut lot = lot_with_capacity(3);

    for (i, registration) in ["A-1", "A-2", "A-3"].iter().enumerate() {
        let slot = park(&mut lot, registration, 30).expect("space available");
        assert_eq!(slot, SlotNumber::from_index(i));
    }

    assert_eq!(park(&mut lot, "A-4", 30), Err(KernelError::LotFull));
    assert_eq!(lot.registry().len(), 3);
    lot.check_consistency().expect("lot should be consistent");
}

#[test]
fn duplicate_registration_is_rejected_regardless_of_age() {
    let mut lot = lot_with_capacity(3);
    park(&mut lot, "KA-01-HH-1234", 21).expect("first park");

    let result = apply(&mut lot, Command::park("KA-01-HH-1234", 65));

    assert_eq!(
        result,
        Err(KernelError::DuplicateRegistration(Registration::new(
            "KA-01-HH-1234"
        )))
    );
    // The duplicate must not consume a slot
    assert_eq!(lot.allocator().occupied_count(), 1);
    assert_eq!(park(&mut lot, "KA-01-HH-9999", 21), Ok(SlotNumber::new(2)));
}

#[test]
fn duplicate_check_wins_over_full_lot() {
    let mut lot = lot_with_capacity(1);
    park(&mut lot, "KA-01-HH-1234", 21).expect("first park");

    assert!(matches!(
        park(&mut lot, "KA-01-HH-1234", 21),
        Err(KernelError::DuplicateRegistration(_))
    ));
    assert_eq!(park(&mut lot, "KA-01-HH-9999", 21), Err(KernelError::LotFull));
}

#[test]
fn park_with_zero_age_is_invalid() {
    let mut lot = lot_with_capacity(1);
    assert_eq!(park(&mut lot, "KA-01-HH-1234", 0), Err(KernelError::InvalidAge(0)));
    assert!(lot.registry().is_empty());
}

// ============================================================================
// Leave Tests
// ============================================================================

#[test]
fn leave_reports_vehicle_and_frees_slot() {
    let mut lot = lot_with_capacity(2);
    park(&mut lot, "KA-01-HH-1234", 21).expect("park");

    let outcome = apply(&mut lot, Command::leave(1)).expect("leave should succeed");

    assert_eq!(
        outcome,
        Outcome::Left {
            slot: SlotNumber::new(1),
            vehicle: Vehicle::new("KA-01-HH-1234", DriverAge::new(21)),
        }
    );
    assert!(!lot.allocator().is_occupied(SlotNumber::new(1)));
    lot.check_consistency().expect("lot should be consistent");
}

#[test]
fn leave_empty_or_out_of_range_slot_has_no_ticket() {
    let mut lot = lot_with_capacity(2);

    for slot in [0, 2, 99] {
        assert_eq!(
            apply(&mut lot, Command::leave(slot)),
            Err(KernelError::NoTicketAtSlot(SlotNumber::new(slot)))
        );
    }
}

#[test]
fn leave_then_park_reuses_lowest_free_slot_only() {
    let mut lot = lot_with_capacity(4);
    for registration in ["A-1", "A-2", "A-3"] {
        park(&mut lot, registration, 30).expect("space available");
    }

    apply(&mut lot, Command::leave(2)).expect("leave 2");
    assert_eq!(park(&mut lot, "B-1", 30), Ok(SlotNumber::new(2)));

    // Slot 4 was never used; it is now the lowest free one
    assert_eq!(park(&mut lot, "B-2", 30), Ok(SlotNumber::new(4)));
}

#[test]
fn leave_detects_ticket_on_free_slot_and_restores_it() {
    let mut lot = lot_with_capacity(2);
    park(&mut lot, "KA-01-HH-1234", 21).expect("park");

    // Corrupt the lot: free the slot behind the registry's back
    lot.allocator_mut()
        .release(SlotNumber::new(1))
        .expect("release");
    assert!(lot.check_consistency().is_err());

    let err = apply(&mut lot, Command::leave(1)).expect_err("torn state");

    assert!(matches!(err, KernelError::Invariant(_)));
    assert_eq!(err.class(), ErrorClass::System);
    // The ticket is put back rather than silently dropped
    assert!(lot.registry().has_ticket(SlotNumber::new(1)));
}

// ============================================================================
// Query Tests
// ============================================================================

#[test]
fn slot_lookup_round_trip() {
    let mut lot = lot_with_capacity(3);
    park(&mut lot, "A-1", 30).expect("park");
    let slot = park(&mut lot, "KA-01-HH-1234", 21).expect("park");

    assert_eq!(
        apply(&mut lot, Command::slot_for_registration("KA-01-HH-1234")),
        Ok(Outcome::Slot(slot))
    );

    apply(&mut lot, Command::leave(slot.as_u32())).expect("leave");

    assert_eq!(
        apply(&mut lot, Command::slot_for_registration("KA-01-HH-1234")),
        Err(KernelError::NotFound(Registration::new("KA-01-HH-1234")))
    );
}

#[test]
fn age_queries_are_idempotent_while_state_is_unchanged() {
    let mut lot = lot_with_capacity(5);
    park(&mut lot, "A-1", 21).expect("park");
    park(&mut lot, "A-2", 40).expect("park");
    park(&mut lot, "A-3", 21).expect("park");

    let first = run(&mut lot, "vehicle_registration_number_for_driver_of_age 21");
    let second = run(&mut lot, "vehicle_registration_number_for_driver_of_age 21");
    assert_eq!(first, second);
    assert_eq!(first.expect("query").to_string(), "A-1, A-3");

    let slots = run(&mut lot, "slot_numbers_for_driver_of_age 21").expect("query");
    assert_eq!(slots.to_string(), "1, 3");
}

#[test]
fn age_queries_with_no_match() {
    let mut lot = lot_with_capacity(2);
    park(&mut lot, "A-1", 21).expect("park");

    let registrations =
        run(&mut lot, "vehicle_registration_number_for_driver_of_age 50").expect("query");
    assert_eq!(registrations.to_string(), "null");

    let slots = run(&mut lot, "slot_numbers_for_driver_of_age 50").expect("query");
    assert_eq!(slots.to_string(), "");
}

#[test]
fn status_lists_tickets_in_slot_order() {
    let mut lot = lot_with_capacity(3);
    park(&mut lot, "A-1", 21).expect("park");
    park(&mut lot, "A-2", 40).expect("park");
    park(&mut lot, "A-3", 33).expect("park");
    apply(&mut lot, Command::leave(2)).expect("leave");

    assert_eq!(
        lot.status(),
        vec![
            TicketStatus {
                slot: SlotNumber::new(1),
                registration: Registration::new("A-1"),
                driver_age: DriverAge::new(21),
            },
            TicketStatus {
                slot: SlotNumber::new(3),
                registration: Registration::new("A-3"),
                driver_age: DriverAge::new(33),
            },
        ]
    );
}

// ============================================================================
// End-to-End Scenario
// ============================================================================

#[test]
fn reference_scenario_produces_expected_lines() {
    let script = [
        ("create_parking_lot 6", "Created parking of 6 slots"),
        (
            "park KA-01-HH-1234 25",
            "Car with vehicle registration number \"KA-01-HH-1234\" has been parked at slot number 1",
        ),
        (
            "park KA-01-HH-9999 25",
            "Car with vehicle registration number \"KA-01-HH-9999\" has been parked at slot number 2",
        ),
        (
            "leave 1",
            "Slot number 1 vacated, the car with vehicle registration number \"KA-01-HH-1234\" left the space, the driver of the car was of age 25",
        ),
        (
            "park KA-01-BB-0001 30",
            "Car with vehicle registration number \"KA-01-BB-0001\" has been parked at slot number 1",
        ),
        ("slot_numbers_for_driver_of_age 25", "2"),
    ];

    let mut lot = Lot::new();
    for (line, expected) in script {
        let outcome = run(&mut lot, line).unwrap_or_else(|e| panic!("{line}: {e}"));
        assert_eq!(outcome.to_string(), expected, "line: {line}");
    }
    lot.check_consistency().expect("lot should be consistent");
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod proptests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone)]
    enum Op {
        Park(u8, u32),
        Leave(u32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..12, 1u32..5).prop_map(|(plate, age)| Op::Park(plate, age)),
            (0u32..10).prop_map(Op::Leave),
        ]
    }

    proptest! {
        /// Compares the kernel against a simple model: the set of occupied
        /// slots plus the set of parked plates.
        #[test]
        fn allocation_matches_lowest_free_model(
            capacity in 1u32..8,
            ops in prop::collection::vec(op(), 1..60),
        ) {
            let mut lot = lot_with_capacity(capacity);
            let mut occupied: BTreeSet<u32> = BTreeSet::new();
            let mut parked: Vec<(u32, String)> = Vec::new();

            for op in ops {
                match op {
                    Op::Park(plate, age) => {
                        let registration = format!("PLATE-{plate}");
                        let result = park(&mut lot, &registration, age);

                        if parked.iter().any(|(_, r)| *r == registration) {
                            prop_assert!(
                                matches!(result, Err(KernelError::DuplicateRegistration(_))),
                                "expected duplicate rejection, got {:?}",
                                result
                            );
                        } else if let Some(lowest) =
                            (1..=capacity).find(|s| !occupied.contains(s))
                        {
                            prop_assert_eq!(result, Ok(SlotNumber::new(lowest)));
                            occupied.insert(lowest);
                            parked.push((lowest, registration));
                        } else {
                            prop_assert_eq!(result, Err(KernelError::LotFull));
                        }
                    }
                    Op::Leave(slot) => {
                        let result = apply(&mut lot, Command::leave(slot));
                        if occupied.remove(&slot) {
                            prop_assert!(result.is_ok());
                            parked.retain(|(s, _)| *s != slot);
                        } else {
                            prop_assert_eq!(
                                result,
                                Err(KernelError::NoTicketAtSlot(SlotNumber::new(slot)))
                            );
                        }
                    }
                }

                prop_assert!(lot.check_consistency().is_ok());
            }
        }

        /// Applying the same command sequence twice yields identical lots.
        #[test]
        fn replay_determinism(ops in prop::collection::vec(op(), 1..40)) {
            let mut first = lot_with_capacity(5);
            let mut second = lot_with_capacity(5);

            for op in ops {
                let cmd = match op {
                    Op::Park(plate, age) => Command::park(format!("PLATE-{plate}"), age),
                    Op::Leave(slot) => Command::leave(slot),
                };
                let a = apply(&mut first, cmd.clone());
                let b = apply(&mut second, cmd);
                prop_assert_eq!(a, b);
            }

            prop_assert_eq!(first, second);
        }

        /// Parsing never panics, and a line that fails to parse never
        /// changes the lot.
        #[test]
        fn arbitrary_lines_never_panic(line in "\\PC{0,40}") {
            let mut lot = lot_with_capacity(2);
            let before = lot.clone();

            if let Err(err) = Command::parse(&line) {
                prop_assert_ne!(err.class(), ErrorClass::System);
                prop_assert_eq!(lot, before);
            } else {
                let _ = run(&mut lot, &line);
                prop_assert!(lot.check_consistency().is_ok());
            }
        }
    }
}
