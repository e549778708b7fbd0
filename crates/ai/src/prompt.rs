//! Prompt construction for catalog translation.

use mandi_catalog::{catalog_json_schema, DEFAULT_CURRENCY, DEFAULT_UNIT};

use crate::client::CompletionRequest;
use crate::lexicon::{LexicalHints, COMMODITIES, GRADE_KEYWORDS, REGIONS, UNIT_WORDS};

const SYSTEM: &str = "You convert spoken offers from farmers (often Hindi, Marathi, Tamil or \
Hinglish, transcribed from voice) into a product catalog entry. Respond with a single JSON \
object that follows the provided schema and nothing else. Use canonical English commodity \
names. Prices are per unit. Never invent a price or quantity that the text does not state; \
leave such fields out instead.";

/// Build the completion request for one raw voice transcript.
pub fn build_request(voice_text: &str, hints: &LexicalHints) -> CompletionRequest {
    CompletionRequest {
        system: system_prompt(),
        prompt: user_prompt(voice_text, hints),
        target_schema: catalog_json_schema(),
    }
}

fn system_prompt() -> String {
    let mut units: Vec<&str> = UNIT_WORDS.iter().map(|(_, canonical)| *canonical).collect();
    units.dedup();
    let mut grades: Vec<&str> = GRADE_KEYWORDS.iter().map(|(_, grade)| *grade).collect();
    grades.sort_unstable();
    grades.dedup();

    format!(
        "{SYSTEM}\nAllowed units: {}. Default unit: {DEFAULT_UNIT}. Default currency: {DEFAULT_CURRENCY}.\n\
         Grade vocabulary: {}.\nKnown source regions: {}.",
        units.join(", "),
        grades.join(", "),
        REGIONS.join(", "),
    )
}

fn user_prompt(voice_text: &str, hints: &LexicalHints) -> String {
    let mut lines = vec![format!("Offer text: \"{}\"", voice_text.trim())];

    if let (Some(commodity), Some(word)) = (hints.commodity, hints.commodity_word.as_deref()) {
        lines.push(format!(
            "Glossary: \"{word}\" means {} (icon key \"{}\", perishability {}).",
            commodity.canonical, commodity.symbol, commodity.perishability
        ));
    } else {
        let sample = COMMODITIES
            .iter()
            .take(8)
            .map(|c| format!("{} = {}", c.synonyms.first().copied().unwrap_or(c.canonical), c.canonical))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Glossary examples: {sample}."));
    }
    if let Some((count, unit)) = hints.quantity {
        lines.push(format!("Detected quantity: {count} {unit}."));
    }
    if let Some(price) = hints.price {
        lines.push(format!("Detected price: {price} {}.", hints.currency.unwrap_or(DEFAULT_CURRENCY)));
    }
    if let Some(grade) = hints.grade {
        lines.push(format!("Detected grade: {grade}."));
    }
    if let Some(region) = hints.region.as_deref() {
        lines.push(format!("Source region: {region}."));
    }

    lines.join("\n")
}
