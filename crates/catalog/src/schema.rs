//! JSON schema describing the catalog wire shape.
//!
//! Sent alongside every completion request so the generative capability is
//! constrained to emit a `CatalogItem`-shaped object. The validator is still the
//! authority; this schema only makes conforming output more likely.

use serde_json::{json, Value as JsonValue};

pub fn catalog_json_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "descriptor": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Canonical English commodity name" },
                    "symbol": { "type": "string", "description": "Short lowercase icon key for the commodity" }
                },
                "required": ["name"]
            },
            "price": {
                "type": "object",
                "properties": {
                    "value": { "type": "number", "description": "Price per unit, >= 0" },
                    "currency": { "type": "string", "description": "3-letter currency code" }
                },
                "required": ["value"]
            },
            "quantity": {
                "type": "object",
                "properties": {
                    "available": {
                        "type": "object",
                        "properties": {
                            "count": { "type": "integer", "description": "Units available, >= 0" }
                        },
                        "required": ["count"]
                    },
                    "unit": { "type": "string", "description": "Unit of measure (kg, quintal, ton, ...)" }
                },
                "required": ["available"]
            },
            "tags": {
                "type": "object",
                "properties": {
                    "grade": { "type": "string" },
                    "perishability": { "type": "string" },
                    "logistics_provider": { "type": "string" }
                }
            }
        },
        "required": ["descriptor", "price", "quantity"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_requires_core_sections() {
        let schema = catalog_json_schema();
        let required = schema["required"].as_array().unwrap();
        for key in ["descriptor", "price", "quantity"] {
            assert!(required.iter().any(|v| v == key));
        }
        assert_eq!(
            schema["properties"]["quantity"]["properties"]["available"]["properties"]["count"]["type"],
            "integer"
        );
    }
}
