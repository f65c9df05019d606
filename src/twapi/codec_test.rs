use chrono::NaiveDate;

use super::codec::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_date_round_trips_as_json_and_text() {
    let value = Date(date(2025, 12, 31));

    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(json, "\"2025-12-31\"");
    let back: Date = serde_json::from_str(&json).unwrap();
    assert_eq!(back, value);

    assert_eq!(value.to_string(), "2025-12-31");
    assert_eq!("2025-12-31".parse::<Date>().unwrap(), value);
}

#[test]
fn test_time_round_trips() {
    let value: Time = "09:30:00".parse().unwrap();
    assert_eq!(value.to_string(), "09:30:00");

    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(json, "\"09:30:00\"");
    let back: Time = serde_json::from_str(&json).unwrap();
    assert_eq!(back, value);
}

#[test]
fn test_legacy_date_uses_compact_form() {
    let value = LegacyDate(date(2025, 12, 31));
    assert_eq!(value.to_string(), "20251231");
    assert_eq!(serde_json::to_string(&value).unwrap(), "\"20251231\"");

    let back: LegacyDate = serde_json::from_str("\"20251231\"").unwrap();
    assert_eq!(back, value);
}

#[test]
fn test_legacy_date_rejects_dashed_form() {
    assert!("2025-12-31".parse::<LegacyDate>().is_err());
    assert!(serde_json::from_str::<LegacyDate>("\"2025-12-31\"").is_err());
}

#[test]
fn test_legacy_number_serializes_as_string() {
    let value = LegacyNumber(42);
    assert_eq!(serde_json::to_string(&value).unwrap(), "\"42\"");
}

#[test]
fn test_legacy_number_decodes_both_forms() {
    let from_string: LegacyNumber = serde_json::from_str("\"42\"").unwrap();
    let from_number: LegacyNumber = serde_json::from_str("42").unwrap();
    assert_eq!(from_string, LegacyNumber(42));
    assert_eq!(from_number, LegacyNumber(42));
}

#[test]
fn test_legacy_numeric_list_round_trips() {
    let value = LegacyNumericList(vec![1, 2, 3]);
    assert_eq!(serde_json::to_string(&value).unwrap(), "\"1,2,3\"");

    let back: LegacyNumericList = serde_json::from_str("\"1,2,3\"").unwrap();
    assert_eq!(back, value);
}

#[test]
fn test_legacy_numeric_list_tolerates_empty_tokens() {
    let value: LegacyNumericList = "1,,2".parse().unwrap();
    assert_eq!(value, LegacyNumericList(vec![1, 2]));

    let empty: LegacyNumericList = "".parse().unwrap();
    assert_eq!(empty, LegacyNumericList(vec![]));
    assert_eq!(empty.to_string(), "");
}

#[test]
fn test_optional_datetime_accepts_iso_empty_and_null() {
    let set: OptionalDateTime = serde_json::from_str("\"2025-06-01T10:00:00Z\"").unwrap();
    assert!(set.0.is_some());
    assert_eq!(set.to_string(), "2025-06-01T10:00:00Z");

    let empty: OptionalDateTime = serde_json::from_str("\"\"").unwrap();
    assert_eq!(empty, OptionalDateTime(None));

    let null: OptionalDateTime = serde_json::from_str("null").unwrap();
    assert_eq!(null, OptionalDateTime(None));
}

#[test]
fn test_optional_datetime_emits_iso_form() {
    let value: OptionalDateTime = "2025-06-01T10:00:00Z".parse().unwrap();
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        "\"2025-06-01T10:00:00Z\""
    );

    let round: OptionalDateTime = serde_json::from_str("\"2025-06-01T10:00:00Z\"").unwrap();
    assert_eq!(round, value);
}

#[test]
fn test_money_is_fixed_point_hundredths() {
    let value = Money::set(12);
    assert_eq!(value.hundredths(), 1200);
    assert_eq!(value.value(), 12);
}

#[test]
fn test_date_works_as_json_map_key() {
    use std::collections::BTreeMap;

    let mut map = BTreeMap::new();
    map.insert(Date(date(2025, 1, 2)), 7i64);

    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, "{\"2025-01-02\":7}");

    let back: BTreeMap<Date, i64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, map);
}
