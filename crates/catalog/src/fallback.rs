//! Fixed catalog entry substituted when translation is unavailable or exhausted.

use crate::item::{Available, CatalogItem, Descriptor, Price, Quantity, Tags};

/// The static fallback entry.
///
/// Always the same value; callers compare against it to detect degraded output.
pub fn fallback_catalog() -> CatalogItem {
    CatalogItem::from_parts(
        Descriptor {
            name: "Fresh Farm Produce".to_string(),
            symbol: "produce".to_string(),
        },
        Price {
            value: 40.0,
            currency: "INR".to_string(),
        },
        Quantity {
            available: Available { count: 100 },
            unit: "kg".to_string(),
        },
        Tags {
            grade: Some("A".to_string()),
            perishability: Some("medium".to_string()),
            logistics_provider: None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;

    #[test]
    fn fallback_passes_the_validator_unchanged() {
        let fallback = fallback_catalog();
        assert_eq!(validate(&fallback.to_value()).unwrap(), fallback);
    }

    #[test]
    fn fallback_is_stable() {
        assert_eq!(
            serde_json::to_string(&fallback_catalog()).unwrap(),
            serde_json::to_string(&fallback_catalog()).unwrap()
        );
    }
}
