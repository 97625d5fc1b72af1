//! Time-slot tallies over consultation records.

use std::collections::BTreeMap;

use serde_json::Value;

/// Count records per distinct `preferred_time`.
///
/// Accepts a bare array or an object wrapping the array under `data`. Records
/// without a string `preferred_time` are skipped.
pub fn tally_time_slots(records: &Value) -> BTreeMap<String, u64> {
    let list = match records {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };

    let mut slots = BTreeMap::new();
    for slot in list
        .iter()
        .filter_map(|record| record.get("preferred_time").and_then(Value::as_str))
    {
        *slots.entry(slot.to_string()).or_insert(0) += 1;
    }
    slots
}
