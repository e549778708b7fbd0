//! Schema validator: the single gate between untyped candidates and `CatalogItem`.
//!
//! Rules:
//! - `descriptor.name`: string, non-empty after trimming (stored trimmed).
//! - `descriptor.symbol`: opaque string, defaults to [`DEFAULT_SYMBOL`].
//! - `price.value`: non-negative finite number; numeric strings are coerced.
//! - `price.currency`: exactly three ASCII letters (upper-cased), defaults to [`DEFAULT_CURRENCY`].
//! - `quantity.available.count`: non-negative integer; numeric strings are coerced.
//! - `quantity.unit`: non-empty string, defaults to [`DEFAULT_UNIT`].
//! - `tags.*`: optional strings; missing or blank tags stay absent.
//!
//! All violations are collected, not just the first one. Validating the wire form of
//! an already-valid item yields the same item.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use crate::item::{Available, CatalogItem, Descriptor, Price, Quantity, Tags};

pub const DEFAULT_CURRENCY: &str = "INR";
pub const DEFAULT_UNIT: &str = "kg";
pub const DEFAULT_SYMBOL: &str = "produce";

/// A single field-level schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path into the wire shape (e.g. `price.value`).
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Every violation found in one candidate (never empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("catalog validation failed: {}", join(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }

    /// True if any violation concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check and normalize a candidate catalog object.
pub fn validate(candidate: &JsonValue) -> Result<CatalogItem, ValidationErrors> {
    let mut errors = Vec::new();

    let Some(root) = candidate.as_object() else {
        return Err(ValidationErrors(vec![ValidationError::new("$", "must be an object")]));
    };

    let descriptor = section(root, "descriptor", &mut errors);
    let price = section(root, "price", &mut errors);
    let quantity = section(root, "quantity", &mut errors);
    let tags = section(root, "tags", &mut errors);
    let available = quantity.and_then(|q| section(q, "available", &mut errors));

    let name = required_text(descriptor.and_then(|d| d.get("name")), "descriptor.name", &mut errors);
    let symbol = defaulted_text(
        descriptor.and_then(|d| d.get("symbol")),
        "descriptor.symbol",
        DEFAULT_SYMBOL,
        false,
        &mut errors,
    );

    let value = price_value(price.and_then(|p| p.get("value")), &mut errors);
    let currency = currency(price.and_then(|p| p.get("currency")), &mut errors);

    let count = count(available.and_then(|a| a.get("count")), &mut errors);
    let unit = defaulted_text(
        quantity.and_then(|q| q.get("unit")),
        "quantity.unit",
        DEFAULT_UNIT,
        true,
        &mut errors,
    );

    let tags = Tags {
        grade: optional_tag(tags.and_then(|t| t.get("grade")), "tags.grade", &mut errors),
        perishability: optional_tag(
            tags.and_then(|t| t.get("perishability")),
            "tags.perishability",
            &mut errors,
        ),
        logistics_provider: optional_tag(
            tags.and_then(|t| t.get("logistics_provider")),
            "tags.logistics_provider",
            &mut errors,
        ),
    };

    match (name, symbol, value, currency, count, unit) {
        (Some(name), Some(symbol), Some(value), Some(currency), Some(count), Some(unit))
            if errors.is_empty() =>
        {
            Ok(CatalogItem::from_parts(
                Descriptor { name, symbol },
                Price { value, currency },
                Quantity {
                    available: Available { count },
                    unit,
                },
                tags,
            ))
        }
        _ => Err(ValidationErrors(errors)),
    }
}

/// Nested object lookup. Absent/null sections read as empty; wrong types are errors.
fn section<'a>(
    parent: &'a Map<String, JsonValue>,
    key: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<&'a Map<String, JsonValue>> {
    match parent.get(key) {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::Object(map)) => Some(map),
        Some(_) => {
            let field = if key == "available" { "quantity.available" } else { key };
            errors.push(ValidationError::new(field, "must be an object"));
            None
        }
    }
}

fn is_missing(value: Option<&JsonValue>) -> bool {
    matches!(value, None | Some(JsonValue::Null))
}

fn required_text(value: Option<&JsonValue>, field: &str, errors: &mut Vec<ValidationError>) -> Option<String> {
    match value {
        _ if is_missing(value) => {
            errors.push(ValidationError::new(field, "is required"));
            None
        }
        Some(JsonValue::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(JsonValue::String(_)) => {
            errors.push(ValidationError::new(field, "must not be empty"));
            None
        }
        _ => {
            errors.push(ValidationError::new(field, "must be a string"));
            None
        }
    }
}

fn defaulted_text(
    value: Option<&JsonValue>,
    field: &str,
    default: &str,
    reject_blank: bool,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    match value {
        _ if is_missing(value) => Some(default.to_string()),
        Some(JsonValue::String(s)) if s.trim().is_empty() && reject_blank => {
            errors.push(ValidationError::new(field, "must not be empty"));
            None
        }
        Some(JsonValue::String(s)) if s.trim().is_empty() => Some(default.to_string()),
        Some(JsonValue::String(s)) => Some(s.trim().to_string()),
        _ => {
            errors.push(ValidationError::new(field, "must be a string"));
            None
        }
    }
}

fn optional_tag(value: Option<&JsonValue>, field: &str, errors: &mut Vec<ValidationError>) -> Option<String> {
    match value {
        _ if is_missing(value) => None,
        Some(JsonValue::String(s)) if s.trim().is_empty() => None,
        Some(JsonValue::String(s)) => Some(s.trim().to_string()),
        _ => {
            errors.push(ValidationError::new(field, "must be a string"));
            None
        }
    }
}

fn price_value(value: Option<&JsonValue>, errors: &mut Vec<ValidationError>) -> Option<f64> {
    const FIELD: &str = "price.value";

    let parsed = match value {
        _ if is_missing(value) => {
            errors.push(ValidationError::new(FIELD, "is required"));
            return None;
        }
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if !v.is_finite() => {
            errors.push(ValidationError::new(FIELD, "must be a finite number"));
            None
        }
        Some(v) if v < 0.0 => {
            errors.push(ValidationError::new(FIELD, "must be >= 0"));
            None
        }
        // Normalizes -0.0 so the wire form is stable.
        Some(v) => Some(v + 0.0),
        None => {
            errors.push(ValidationError::new(FIELD, "must be a number"));
            None
        }
    }
}

fn currency(value: Option<&JsonValue>, errors: &mut Vec<ValidationError>) -> Option<String> {
    const FIELD: &str = "price.currency";

    match value {
        _ if is_missing(value) => Some(DEFAULT_CURRENCY.to_string()),
        Some(JsonValue::String(s)) => {
            let code = s.trim();
            if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
                Some(code.to_ascii_uppercase())
            } else {
                errors.push(ValidationError::new(FIELD, "must be exactly 3 letters"));
                None
            }
        }
        _ => {
            errors.push(ValidationError::new(FIELD, "must be a string"));
            None
        }
    }
}

fn count(value: Option<&JsonValue>, errors: &mut Vec<ValidationError>) -> Option<u64> {
    const FIELD: &str = "quantity.available.count";

    let number = match value {
        _ if is_missing(value) => {
            errors.push(ValidationError::new(FIELD, "is required"));
            return None;
        }
        Some(JsonValue::Number(n)) => Some(n.clone()),
        Some(JsonValue::String(s)) => s.trim().parse::<serde_json::Number>().ok(),
        _ => None,
    };

    let Some(number) = number else {
        errors.push(ValidationError::new(FIELD, "must be an integer"));
        return None;
    };

    if let Some(n) = number.as_u64() {
        return Some(n);
    }
    if number.as_i64().is_some() {
        errors.push(ValidationError::new(FIELD, "must be >= 0"));
        return None;
    }

    match number.as_f64() {
        Some(f) if f < 0.0 => {
            errors.push(ValidationError::new(FIELD, "must be >= 0"));
            None
        }
        Some(f) if f.fract() == 0.0 && f <= u64::MAX as f64 => Some(f as u64),
        _ => {
            errors.push(ValidationError::new(FIELD, "must be an integer"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> JsonValue {
        json!({
            "descriptor": { "name": "Tomato", "symbol": "tomato" },
            "price": { "value": 18, "currency": "INR" },
            "quantity": { "available": { "count": 200 }, "unit": "kg" },
            "tags": { "grade": "B", "perishability": "high" }
        })
    }

    fn with(path: &[&str], value: JsonValue) -> JsonValue {
        let mut v = base();
        let mut cursor = &mut v;
        for key in &path[..path.len() - 1] {
            cursor = cursor.get_mut(*key).unwrap();
        }
        cursor
            .as_object_mut()
            .unwrap()
            .insert(path[path.len() - 1].to_string(), value);
        v
    }

    fn without(path: &[&str]) -> JsonValue {
        let mut v = base();
        let mut cursor = &mut v;
        for key in &path[..path.len() - 1] {
            cursor = cursor.get_mut(*key).unwrap();
        }
        cursor.as_object_mut().unwrap().remove(path[path.len() - 1]);
        v
    }

    #[test]
    fn accepts_well_formed_candidate() {
        let item = validate(&base()).unwrap();
        assert_eq!(item.name(), "Tomato");
        assert_eq!(item.price().value, 18.0);
        assert_eq!(item.price().currency, "INR");
        assert_eq!(item.quantity().available.count, 200);
        assert_eq!(item.tags().grade.as_deref(), Some("B"));
        assert_eq!(item.tags().logistics_provider, None);
    }

    #[test]
    fn rejects_negative_price() {
        let err = validate(&with(&["price", "value"], json!(-3.5))).unwrap_err();
        assert!(err.has_field("price.value"));
    }

    #[test]
    fn rejects_non_numeric_price() {
        let err = validate(&with(&["price", "value"], json!("forty"))).unwrap_err();
        assert!(err.has_field("price.value"));
        let err = validate(&with(&["price", "value"], json!(true))).unwrap_err();
        assert!(err.has_field("price.value"));
    }

    #[test]
    fn coerces_numeric_string_price() {
        let item = validate(&with(&["price", "value"], json!(" 40.25 "))).unwrap();
        assert_eq!(item.price().value, 40.25);
    }

    #[test]
    fn requires_price_value() {
        let err = validate(&without(&["price", "value"])).unwrap_err();
        assert!(err.has_field("price.value"));
    }

    #[test]
    fn defaults_missing_currency_and_uppercases() {
        let item = validate(&without(&["price", "currency"])).unwrap();
        assert_eq!(item.price().currency, DEFAULT_CURRENCY);

        let item = validate(&with(&["price", "currency"], json!("usd"))).unwrap();
        assert_eq!(item.price().currency, "USD");
    }

    #[test]
    fn rejects_currency_that_is_not_three_letters() {
        for bad in [json!("RUPEES"), json!("R1"), json!("12A"), json!(356)] {
            let err = validate(&with(&["price", "currency"], bad)).unwrap_err();
            assert!(err.has_field("price.currency"));
        }
    }

    #[test]
    fn rejects_negative_or_fractional_count() {
        let err = validate(&with(&["quantity", "available", "count"], json!(-1))).unwrap_err();
        assert!(err.has_field("quantity.available.count"));
        let err = validate(&with(&["quantity", "available", "count"], json!(2.5))).unwrap_err();
        assert!(err.has_field("quantity.available.count"));
        let err = validate(&with(&["quantity", "available", "count"], json!("lots"))).unwrap_err();
        assert!(err.has_field("quantity.available.count"));
    }

    #[test]
    fn coerces_integral_count_forms() {
        let item = validate(&with(&["quantity", "available", "count"], json!("75"))).unwrap();
        assert_eq!(item.quantity().available.count, 75);
        let item = validate(&with(&["quantity", "available", "count"], json!(12.0))).unwrap();
        assert_eq!(item.quantity().available.count, 12);
    }

    #[test]
    fn defaults_missing_unit_but_rejects_blank_unit() {
        let item = validate(&without(&["quantity", "unit"])).unwrap();
        assert_eq!(item.quantity().unit, DEFAULT_UNIT);

        let err = validate(&with(&["quantity", "unit"], json!("  "))).unwrap_err();
        assert!(err.has_field("quantity.unit"));
    }

    #[test]
    fn rejects_blank_name() {
        let err = validate(&with(&["descriptor", "name"], json!("   "))).unwrap_err();
        assert!(err.has_field("descriptor.name"));
        let err = validate(&without(&["descriptor", "name"])).unwrap_err();
        assert!(err.has_field("descriptor.name"));
    }

    #[test]
    fn trims_name() {
        let item = validate(&with(&["descriptor", "name"], json!("  Basmati Rice "))).unwrap();
        assert_eq!(item.name(), "Basmati Rice");
    }

    #[test]
    fn missing_tags_stay_absent() {
        let item = validate(&without(&["tags"])).unwrap();
        assert_eq!(item.tags(), &Tags::default());
        assert_eq!(item.to_value()["tags"], json!({}));
    }

    #[test]
    fn non_string_tag_is_rejected() {
        let err = validate(&with(&["tags", "grade"], json!(1))).unwrap_err();
        assert!(err.has_field("tags.grade"));
    }

    #[test]
    fn collects_all_violations() {
        let candidate = json!({
            "descriptor": { "name": "" },
            "price": { "value": -1, "currency": "rupee" },
            "quantity": { "available": { "count": -4 }, "unit": "" }
        });
        let err = validate(&candidate).unwrap_err();
        for field in [
            "descriptor.name",
            "price.value",
            "price.currency",
            "quantity.available.count",
            "quantity.unit",
        ] {
            assert!(err.has_field(field), "missing violation for {field}: {err}");
        }
    }

    #[test]
    fn non_object_candidate_is_rejected() {
        let err = validate(&json!("onion 40 rupees")).unwrap_err();
        assert!(err.has_field("$"));
        let err = validate(&with(&["price"], json!(40))).unwrap_err();
        assert!(err.has_field("price"));
    }

    #[test]
    fn validating_valid_item_is_a_no_op() {
        let first = validate(&with(&["price", "value"], json!("12.5"))).unwrap();
        let second = validate(&first.to_value()).unwrap();
        assert_eq!(first, second);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn price_value() -> impl Strategy<Value = JsonValue> {
            prop_oneof![
                (-100.0f64..10_000.0).prop_map(|v| json!(v)),
                (0u32..10_000).prop_map(|v| json!(v.to_string())),
                Just(json!("n/a")),
                Just(JsonValue::Null),
            ]
        }

        fn count_value() -> impl Strategy<Value = JsonValue> {
            prop_oneof![
                (-50i64..5_000).prop_map(|v| json!(v)),
                (0u32..5_000).prop_map(|v| json!(format!(" {v} "))),
                (0u32..100).prop_map(|v| json!(v as f64 + 0.5)),
                Just(JsonValue::Null),
            ]
        }

        fn text() -> impl Strategy<Value = JsonValue> {
            prop_oneof![
                "[ a-zA-Z]{0,12}".prop_map(|s| json!(s)),
                Just(JsonValue::Null),
                Just(json!(7)),
            ]
        }

        fn currency() -> impl Strategy<Value = JsonValue> {
            prop_oneof![
                "[a-zA-Z]{3}".prop_map(|s| json!(s)),
                "[a-zA-Z0-9]{0,5}".prop_map(|s| json!(s)),
                Just(JsonValue::Null),
            ]
        }

        fn candidate() -> impl Strategy<Value = JsonValue> {
            (text(), text(), price_value(), currency(), count_value(), text(), text(), text())
                .prop_map(|(name, symbol, value, currency, count, unit, grade, perish)| {
                    json!({
                        "descriptor": { "name": name, "symbol": symbol },
                        "price": { "value": value, "currency": currency },
                        "quantity": { "available": { "count": count }, "unit": unit },
                        "tags": { "grade": grade, "perishability": perish }
                    })
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: validate(validate(x)) == validate(x).
            #[test]
            fn validation_is_idempotent(candidate in candidate()) {
                if let Ok(item) = validate(&candidate) {
                    let again = validate(&item.to_value());
                    prop_assert_eq!(again, Ok(item));
                }
            }

            /// Property: anything accepted satisfies the structural rules.
            #[test]
            fn accepted_items_respect_rules(candidate in candidate()) {
                if let Ok(item) = validate(&candidate) {
                    prop_assert!(!item.name().trim().is_empty());
                    prop_assert!(item.price().value >= 0.0);
                    prop_assert_eq!(item.price().currency.len(), 3);
                    prop_assert!(item.price().currency.chars().all(|c| c.is_ascii_uppercase()));
                    prop_assert!(!item.quantity().unit.trim().is_empty());
                }
            }
        }
    }
}
