// SPDX-License-Identifier: Apache-2.0

use chrono::{TimeZone, Utc};
use phonebook_model::PhoneRecord;

#[test]
fn phone_record_serializes_create_date_as_rfc3339_utc() {
    let rec = PhoneRecord {
        id: 7,
        country_code: Some(256),
        country_name: "Uganda".to_string(),
        number: "(256) 775069443".to_string(),
        cust_id: None,
        phone_valid: true,
        create_date: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("ts"),
    };
    let json = serde_json::to_value(&rec).expect("serialize");
    assert_eq!(json["create_date"], "2024-05-01T12:00:00Z");
    assert_eq!(json["country_code"], 256);
    assert!(json.get("cust_id").is_none());
}

#[test]
fn phone_record_with_unknown_country_serializes_null_code() {
    let rec = PhoneRecord {
        id: 1,
        country_code: None,
        country_name: "Atlantis".to_string(),
        number: "123".to_string(),
        cust_id: Some("c-1".to_string()),
        phone_valid: false,
        create_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("ts"),
    };
    let json = serde_json::to_value(&rec).expect("serialize");
    assert!(json["country_code"].is_null());
    assert_eq!(json["cust_id"], "c-1");
}
