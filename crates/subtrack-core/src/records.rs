//! Subscription list normalization
//!
//! The subscription API has drifted over time (`price` vs `cost`,
//! `billing_date` vs `billingDate` vs `nextPayment`, nested category objects).
//! Records are normalized once here into [`SubscriptionRecord`] so the engine
//! never branches on field-name variants.
//!
//! Normalization never fails on a single record: unparsable dates become `None`
//! and non-numeric prices become 0. Only a document that is not JSON, or whose
//! top level is not a list of records, is an error.

use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{sanitize_price, SubscriptionRecord, SubscriptionStatus};

const ID_FIELDS: &[&str] = &["id", "_id"];
const NAME_FIELDS: &[&str] = &["name", "serviceName", "service_name"];
const PRICE_FIELDS: &[&str] = &["price", "cost", "amount"];
const BILLING_FIELDS: &[&str] = &["billingDate", "billing_date", "nextPayment", "next_payment"];
const CREATED_FIELDS: &[&str] = &["createdAt", "created_at"];
const LIST_FIELDS: &[&str] = &["subscriptions", "data"];

/// Load and normalize a subscription list from a JSON file
pub fn load_records(path: &Path) -> Result<Vec<SubscriptionRecord>> {
    let content = fs::read_to_string(path)?;
    parse_records(&content)
}

/// Parse and normalize a subscription list document
pub fn parse_records(content: &str) -> Result<Vec<SubscriptionRecord>> {
    let value: Value = serde_json::from_str(content)?;
    normalize_document(&value)
}

/// Normalize a parsed document: either a list of records or an object
/// wrapping one under `subscriptions` or `data`
pub fn normalize_document(value: &Value) -> Result<Vec<SubscriptionRecord>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => LIST_FIELDS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .ok_or_else(|| {
                warn!("Subscription document has no list field");
                Error::InvalidData(format!(
                    "expected a list of subscriptions or an object with one of: {}",
                    LIST_FIELDS.join(", ")
                ))
            })?,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(Error::InvalidData(format!(
                "expected a list of subscriptions, got {}",
                type_name(other)
            )))
        }
    };

    Ok(items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Object(map) => Some(normalize_record(map, index + 1)),
            other => {
                debug!(
                    "Skipping subscription entry {} ({})",
                    index + 1,
                    type_name(other)
                );
                None
            }
        })
        .collect())
}

/// Normalize one raw record. `position` is its 1-based index in the list and
/// stands in for a missing id.
pub fn normalize_record(map: &Map<String, Value>, position: usize) -> SubscriptionRecord {
    let id = first_present(map, ID_FIELDS)
        .and_then(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| position.to_string());

    let name = first_present(map, NAME_FIELDS)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let description = map
        .get("description")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let price = PRICE_FIELDS
        .iter()
        .filter_map(|key| map.get(*key))
        .map(parse_amount)
        .find(|amount| *amount != 0.0)
        .unwrap_or(0.0);

    let billing_date = first_present(map, BILLING_FIELDS).and_then(|v| {
        let parsed = parse_timestamp_value(v);
        if parsed.is_none() {
            debug!("Record {}: unparsable billing date {}", id, v);
        }
        parsed
    });

    // An absent creation date defaults to the billing date; a malformed one
    // stays unknown so the record is left out of past months.
    let created_at = match first_present(map, CREATED_FIELDS) {
        None => billing_date,
        Some(v) => {
            let parsed = parse_timestamp_value(v);
            if parsed.is_none() {
                debug!("Record {}: unparsable creation date {}", id, v);
            }
            parsed
        }
    };

    let status = map
        .get("status")
        .and_then(Value::as_str)
        .and_then(|s| match s.parse::<SubscriptionStatus>() {
            Ok(status) => Some(status),
            Err(e) => {
                debug!("Record {}: {}; treating as active", id, e);
                None
            }
        })
        .unwrap_or_default();

    let category = map.get("category").and_then(|v| match v {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("name").and_then(Value::as_str).map(str::to_string),
        _ => None,
    });

    SubscriptionRecord {
        id,
        name,
        description,
        price,
        billing_date,
        created_at,
        status,
        category: category.filter(|c| !c.trim().is_empty()),
    }
}

/// Parse a timestamp string in any of the formats the API has emitted
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_timestamp_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp(s),
        // Epoch milliseconds, as produced by JSON.stringify(Date.getTime())
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}

fn parse_amount(value: &Value) -> f64 {
    let amount = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    sanitize_price(amount)
}

fn first_present<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|v| !v.is_null())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};
    use serde_json::json;

    fn normalize(value: Value) -> SubscriptionRecord {
        match value {
            Value::Object(map) => normalize_record(&map, 1),
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-10"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-10T00:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-10T03:00:00+03:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-10T00:00:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-10 00:00:00"), Some(expected));
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("2024-13-45"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_price_variants() {
        assert_eq!(normalize(json!({"name": "A", "price": 15.99})).price, 15.99);
        assert_eq!(normalize(json!({"name": "A", "cost": 9.5})).price, 9.5);
        assert_eq!(normalize(json!({"name": "A", "price": "12.50"})).price, 12.5);
        // Zero price falls through to cost, like `price || cost`
        assert_eq!(
            normalize(json!({"name": "A", "price": 0, "cost": 7})).price,
            7.0
        );
        assert_eq!(normalize(json!({"name": "A", "price": "abc"})).price, 0.0);
        assert_eq!(normalize(json!({"name": "A", "price": -3})).price, 0.0);
        assert_eq!(normalize(json!({"name": "A"})).price, 0.0);
    }

    #[test]
    fn test_billing_date_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        for key in ["billingDate", "billing_date", "nextPayment", "next_payment"] {
            let mut map = Map::new();
            map.insert("name".to_string(), json!("Netflix"));
            map.insert(key.to_string(), json!("2024-03-10"));
            let record = normalize_record(&map, 1);
            assert_eq!(record.billing_date, Some(expected), "key {}", key);
        }
    }

    #[test]
    fn test_created_at_defaults_to_billing_date() {
        let record = normalize(json!({"name": "A", "price": 1, "billing_date": "2024-03-10"}));
        assert_eq!(record.created_at, record.billing_date);
        assert!(record.created_at.is_some());
    }

    #[test]
    fn test_malformed_created_at_is_unknown() {
        let record = normalize(json!({
            "name": "A",
            "billing_date": "2024-03-10",
            "created_at": "yesterday-ish"
        }));
        assert!(record.billing_date.is_some());
        assert!(record.created_at.is_none());
    }

    #[test]
    fn test_malformed_billing_date() {
        let record = normalize(json!({"name": "A", "billingDate": "soon"}));
        assert!(record.billing_date.is_none());
        assert!(record.created_at.is_none());
    }

    #[test]
    fn test_epoch_millis_date() {
        let record = normalize(json!({"name": "A", "billingDate": 1710028800000i64}));
        let date = record.billing_date.unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 10));
    }

    #[test]
    fn test_status_and_category() {
        let record = normalize(json!({
            "id": 42,
            "name": "Gym",
            "status": "paused",
            "category": {"id": "c1", "name": "Health"}
        }));
        assert_eq!(record.id, "42");
        assert_eq!(record.status, SubscriptionStatus::Paused);
        assert_eq!(record.category.as_deref(), Some("Health"));

        let record = normalize(json!({"name": "Gym", "status": "weird", "category": ""}));
        assert_eq!(record.status, SubscriptionStatus::Active);
        assert!(record.category.is_none());
    }

    #[test]
    fn test_missing_id_uses_position() {
        let records = parse_records(r#"[{"name": "A"}, {"name": "B"}]"#).unwrap();
        assert_eq!(records[0].id, "1");
        assert_eq!(records[1].id, "2");
    }

    #[test]
    fn test_document_shapes() {
        assert_eq!(parse_records("[]").unwrap().len(), 0);
        assert_eq!(parse_records("null").unwrap().len(), 0);
        assert_eq!(
            parse_records(r#"{"subscriptions": [{"name": "A"}]}"#)
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            parse_records(r#"{"data": [{"name": "A"}, 5]}"#).unwrap().len(),
            1
        );
        assert!(matches!(
            parse_records(r#"{"items": []}"#),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(parse_records("42"), Err(Error::InvalidData(_))));
        assert!(matches!(parse_records("{not json"), Err(Error::Json(_))));
    }
}
