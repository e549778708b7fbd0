use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::validate::{validate, ValidationErrors};

/// Catalog lifecycle as seen by the persistence layer.
///
/// A freshly translated entry is saved as `Draft`; the broadcast action flips it
/// to `Broadcasted`. Entries are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatalogStatus {
    Draft,
    Broadcasted,
}

impl CatalogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogStatus::Draft => "DRAFT",
            CatalogStatus::Broadcasted => "BROADCASTED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub name: String,
    /// Opaque reference to a visual asset.
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub value: f64,
    /// ISO-4217 style three letter code, upper-cased.
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Available {
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    pub available: Available,
    pub unit: String,
}

/// Optional descriptive tags. Absent tags stay absent on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perishability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logistics_provider: Option<String>,
}

/// The canonical, schema-valid product offer.
///
/// There is no public constructor: a `CatalogItem` only comes out of
/// [`validate`] (directly, or through `Deserialize`, which routes through it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "JsonValue")]
pub struct CatalogItem {
    descriptor: Descriptor,
    price: Price,
    quantity: Quantity,
    tags: Tags,
}

impl CatalogItem {
    /// Assemble an item from already-normalized parts.
    ///
    /// Only the validator and the fallback entry (which is covered by a test that
    /// re-validates it) may call this.
    pub(crate) fn from_parts(descriptor: Descriptor, price: Price, quantity: Quantity, tags: Tags) -> Self {
        Self {
            descriptor,
            price,
            quantity,
            tags,
        }
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn price(&self) -> &Price {
        &self.price
    }

    pub fn quantity(&self) -> &Quantity {
        &self.quantity
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Wire representation (the shape the validator accepts).
    pub fn to_value(&self) -> JsonValue {
        serde_json::json!({
            "descriptor": {
                "name": self.descriptor.name,
                "symbol": self.descriptor.symbol,
            },
            "price": {
                "value": self.price.value,
                "currency": self.price.currency,
            },
            "quantity": {
                "available": { "count": self.quantity.available.count },
                "unit": self.quantity.unit,
            },
            "tags": self.tags,
        })
    }
}

impl TryFrom<JsonValue> for CatalogItem {
    type Error = ValidationErrors;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        validate(&value)
    }
}
