use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use mandi_ai::TranslationOutcome;
use mandi_infra::{CatalogRecord, SimulationState};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    /// Vernacular offer text as spoken/typed by the seller.
    pub text: String,
}

/// Save a draft either from an already structured catalog or from raw text
/// (translated first). Exactly one of the two must be present.
#[derive(Debug, Deserialize)]
pub struct CreateCatalogRequest {
    pub catalog: Option<JsonValue>,
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    pub catalog_id: Option<String>,
}

// -------------------------
// Response mapping
// -------------------------

pub fn outcome_json(outcome: &TranslationOutcome) -> JsonValue {
    json!({
        "catalog": outcome.item,
        "source": outcome.source,
    })
}

pub fn catalog_record_json(record: &CatalogRecord) -> JsonValue {
    json!({
        "id": record.id.to_string(),
        "status": record.status,
        "catalog": record.item,
        "created_at": record.created_at,
        "updated_at": record.updated_at,
    })
}

pub fn broadcast_json(record: &CatalogRecord, simulation: Option<SimulationState>) -> JsonValue {
    json!({
        "catalog": catalog_record_json(record),
        "simulation": simulation,
    })
}
