use std::collections::BTreeMap;

use proptest::prelude::*;
use test_case::test_case;

use super::*;

#[test_case(0, None; "slot zero has no index")]
#[test_case(1, Some(0); "first slot")]
#[test_case(42, Some(41); "interior slot")]
fn slot_index_is_zero_based(number: u32, expected: Option<usize>) {
    assert_eq!(SlotNumber::new(number).index(), expected);
}

#[test]
fn registration_comparison_is_case_sensitive() {
    assert_ne!(Registration::new("ka-01-hh-1234"), Registration::new("KA-01-HH-1234"));
}

#[test]
fn registration_keyed_maps_can_be_queried_by_str() {
    let mut index = BTreeMap::new();
    index.insert(Registration::new("KA-01-HH-1234"), SlotNumber::new(1));

    assert_eq!(index.get("KA-01-HH-1234"), Some(&SlotNumber::new(1)));
    assert_eq!(index.get("KA-01-HH-9999"), None);
}

#[test]
fn driver_age_zero_is_not_positive() {
    assert!(!DriverAge::new(0).is_positive());
    assert!(DriverAge::new(18).is_positive());
}

#[test]
fn vehicle_serializes_with_plain_fields() {
    let vehicle = Vehicle::new("KA-01-HH-1234", DriverAge::new(21));
    let json = serde_json::to_string(&vehicle).expect("vehicle should serialize");
    assert_eq!(json, r#"{"registration":"KA-01-HH-1234","driver_age":21}"#);
}

proptest! {
    #[test]
    fn slot_index_round_trips(index in 0usize..100_000) {
        let slot = SlotNumber::from_index(index);
        prop_assert_eq!(slot.index(), Some(index));
    }
}
