//! Lexical mapper: static vernacular vocabulary and a deterministic text scan.
//!
//! Tables are built once on first use and never mutated afterwards. They serve
//! two purposes:
//! - prompt enrichment (canonical names, grade/region vocabulary), and
//! - recovering fields the completion left out (see [`LexicalHints::fill_missing`]).

use std::collections::HashMap;
use std::sync::LazyLock;

use serde_json::{Map, Value as JsonValue};

/// A commodity with its canonical English name and vernacular synonyms.
#[derive(Debug, PartialEq, Eq)]
pub struct Commodity {
    pub canonical: &'static str,
    /// Icon key used for `descriptor.symbol`.
    pub symbol: &'static str,
    pub perishability: &'static str,
    pub synonyms: &'static [&'static str],
}

pub static COMMODITIES: &[Commodity] = &[
    Commodity { canonical: "Onion", symbol: "onion", perishability: "medium", synonyms: &["pyaz", "pyaaz", "pyaj", "kanda", "kaanda", "vengayam", "प्याज", "कांदा"] },
    Commodity { canonical: "Potato", symbol: "potato", perishability: "medium", synonyms: &["aloo", "alu", "batata", "urulaikizhangu", "आलू", "बटाटा"] },
    Commodity { canonical: "Tomato", symbol: "tomato", perishability: "high", synonyms: &["tamatar", "tamaatar", "thakkali", "टमाटर"] },
    Commodity { canonical: "Wheat", symbol: "wheat", perishability: "low", synonyms: &["gehun", "gehu", "gahu", "godhuma", "गेहूं", "गेहूँ", "गहू"] },
    Commodity { canonical: "Rice", symbol: "rice", perishability: "low", synonyms: &["chawal", "chaawal", "arisi", "chaval", "चावल", "तांदूळ"] },
    Commodity { canonical: "Paddy", symbol: "rice", perishability: "low", synonyms: &["dhan", "dhaan", "nellu", "धान"] },
    Commodity { canonical: "Maize", symbol: "maize", perishability: "low", synonyms: &["makka", "makki", "bhutta", "corn", "मक्का"] },
    Commodity { canonical: "Cotton", symbol: "cotton", perishability: "low", synonyms: &["kapas", "kapaas", "rui", "कपास"] },
    Commodity { canonical: "Mustard", symbol: "mustard", perishability: "low", synonyms: &["sarson", "sarso", "rai", "सरसों"] },
    Commodity { canonical: "Chickpea", symbol: "pulses", perishability: "low", synonyms: &["chana", "channa", "harbhara", "चना"] },
    Commodity { canonical: "Pigeon Pea", symbol: "pulses", perishability: "low", synonyms: &["arhar", "toor", "tur", "tuvar", "अरहर", "तूर"] },
    Commodity { canonical: "Green Gram", symbol: "pulses", perishability: "low", synonyms: &["moong", "mung", "मूंग"] },
    Commodity { canonical: "Soybean", symbol: "soybean", perishability: "low", synonyms: &["soyabean", "soya", "सोयाबीन"] },
    Commodity { canonical: "Turmeric", symbol: "spice", perishability: "low", synonyms: &["haldi", "halad", "manjal", "हल्दी"] },
    Commodity { canonical: "Chilli", symbol: "chilli", perishability: "medium", synonyms: &["mirch", "mirchi", "milagai", "मिर्च", "मिरची"] },
    Commodity { canonical: "Ginger", symbol: "spice", perishability: "medium", synonyms: &["adrak", "allam", "अदरक"] },
    Commodity { canonical: "Garlic", symbol: "garlic", perishability: "medium", synonyms: &["lahsun", "lehsun", "lasun", "poondu", "लहसुन"] },
    Commodity { canonical: "Sugarcane", symbol: "sugarcane", perishability: "medium", synonyms: &["ganna", "oos", "ganne", "गन्ना"] },
    Commodity { canonical: "Pearl Millet", symbol: "millet", perishability: "low", synonyms: &["bajra", "bajri", "kambu", "बाजरा"] },
    Commodity { canonical: "Sorghum", symbol: "millet", perishability: "low", synonyms: &["jowar", "jwari", "cholam", "ज्वार"] },
    Commodity { canonical: "Banana", symbol: "banana", perishability: "high", synonyms: &["kela", "kele", "vazhai", "केला"] },
    Commodity { canonical: "Mango", symbol: "mango", perishability: "high", synonyms: &["aam", "amba", "mambazham", "आम"] },
    Commodity { canonical: "Apple", symbol: "apple", perishability: "medium", synonyms: &["seb", "sev", "सेब"] },
    Commodity { canonical: "Grapes", symbol: "grapes", perishability: "high", synonyms: &["angoor", "angur", "draksh", "अंगूर"] },
    Commodity { canonical: "Cauliflower", symbol: "vegetable", perishability: "high", synonyms: &["gobhi", "phool gobhi", "phoolgobhi", "गोभी"] },
    Commodity { canonical: "Brinjal", symbol: "vegetable", perishability: "high", synonyms: &["baingan", "vangi", "kathirikai", "बैंगन"] },
    Commodity { canonical: "Milk", symbol: "milk", perishability: "high", synonyms: &["doodh", "dudh", "paal", "दूध"] },
];

/// Unit words (vernacular and abbreviated) mapped to a canonical unit.
pub static UNIT_WORDS: &[(&str, &str)] = &[
    ("kg", "kg"),
    ("kgs", "kg"),
    ("kilo", "kg"),
    ("kilos", "kg"),
    ("kilogram", "kg"),
    ("kilograms", "kg"),
    ("किलो", "kg"),
    ("quintal", "quintal"),
    ("quintals", "quintal"),
    ("qtl", "quintal"),
    ("kwintal", "quintal"),
    ("kuntal", "quintal"),
    ("क्विंटल", "quintal"),
    ("ton", "ton"),
    ("tons", "ton"),
    ("tonne", "ton"),
    ("tonnes", "ton"),
    ("टन", "ton"),
    ("crate", "crate"),
    ("crates", "crate"),
    ("peti", "crate"),
    ("bag", "bag"),
    ("bags", "bag"),
    ("bori", "bag"),
    ("boriya", "bag"),
    ("dozen", "dozen"),
    ("darjan", "dozen"),
    ("litre", "litre"),
    ("liter", "litre"),
    ("litres", "litre"),
    ("ltr", "litre"),
    ("piece", "piece"),
    ("pieces", "piece"),
    ("nag", "piece"),
];

/// Grade keywords (single or two-word phrases) mapped to a canonical grade.
pub static GRADE_KEYWORDS: &[(&str, &str)] = &[
    ("grade a", "A"),
    ("a grade", "A"),
    ("first quality", "A"),
    ("premium", "A"),
    ("export quality", "Export"),
    ("export", "Export"),
    ("grade b", "B"),
    ("b grade", "B"),
    ("second quality", "B"),
    ("average", "B"),
    ("faq", "FAQ"),
    ("grade c", "C"),
    ("c grade", "C"),
    ("organic", "Organic"),
    ("jaivik", "Organic"),
];

/// Known source regions (mandis / growing districts).
pub static REGIONS: &[&str] = &[
    "nashik", "lasalgaon", "pune", "nagpur", "jalgaon", "ratnagiri", "indore", "ujjain", "ludhiana",
    "karnal", "azadpur", "guntur", "kolar", "bengaluru", "bangalore", "hubli", "shimla", "kota",
    "rajkot", "unjha", "erode", "vashi", "agra", "kanpur",
];

static CURRENCY_WORDS: &[&str] = &["rs", "rupees", "rupee", "rupaye", "rupaiya", "rupay", "inr", "₹", "रुपये", "रुपया"];

static SYNONYM_INDEX: LazyLock<HashMap<String, &'static Commodity>> = LazyLock::new(|| {
    let mut index = HashMap::new();
    for commodity in COMMODITIES {
        index.insert(commodity.canonical.to_lowercase(), commodity);
        for synonym in commodity.synonyms {
            index.insert(synonym.to_lowercase(), commodity);
        }
    }
    index
});

static UNIT_INDEX: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| UNIT_WORDS.iter().copied().collect());

/// Canonical commodity for a vernacular (or canonical) word, case-insensitive.
pub fn canonical_commodity(word: &str) -> Option<&'static Commodity> {
    SYNONYM_INDEX.get(&word.trim().to_lowercase()).copied()
}

/// Canonical unit for a unit word, case-insensitive.
pub fn canonical_unit(word: &str) -> Option<&'static str> {
    UNIT_INDEX.get(word.trim().to_lowercase().as_str()).copied()
}

pub fn is_currency_word(word: &str) -> bool {
    CURRENCY_WORDS.contains(&word.trim().to_lowercase().as_str())
}

pub fn is_known_region(word: &str) -> bool {
    REGIONS.contains(&word.trim().to_lowercase().as_str())
}

/// Everything a lexical scan could recover from raw text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexicalHints {
    pub commodity: Option<&'static Commodity>,
    /// The word in the input that matched `commodity`.
    pub commodity_word: Option<String>,
    pub grade: Option<&'static str>,
    pub region: Option<String>,
    pub quantity: Option<(u64, &'static str)>,
    pub price: Option<f64>,
    pub currency: Option<&'static str>,
}

impl LexicalHints {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Insert recovered values into a raw completion result, only where the
    /// corresponding field is absent (or null).
    ///
    /// Present values are never touched, even if invalid: the validator decides.
    pub fn fill_missing(&self, candidate: &mut JsonValue) {
        let Some(root) = candidate.as_object_mut() else {
            return;
        };

        if let Some(commodity) = self.commodity {
            insert_if_absent(root, &["descriptor", "name"], commodity.canonical.into());
            insert_if_absent(root, &["descriptor", "symbol"], commodity.symbol.into());
            insert_if_absent(root, &["tags", "perishability"], commodity.perishability.into());
        }
        if let Some(price) = self.price {
            insert_if_absent(root, &["price", "value"], price.into());
        }
        if let Some(currency) = self.currency {
            insert_if_absent(root, &["price", "currency"], currency.into());
        }
        if let Some((count, unit)) = self.quantity {
            insert_if_absent(root, &["quantity", "available", "count"], count.into());
            insert_if_absent(root, &["quantity", "unit"], unit.into());
        }
        if let Some(grade) = self.grade {
            insert_if_absent(root, &["tags", "grade"], grade.into());
        }
    }
}

fn insert_if_absent(root: &mut Map<String, JsonValue>, path: &[&str], value: JsonValue) {
    let Some((leaf, parents)) = path.split_last() else {
        return;
    };

    let mut cursor = root;
    for key in parents {
        let slot = cursor
            .entry(key.to_string())
            .or_insert_with(|| JsonValue::Object(Map::new()));
        if slot.is_null() {
            *slot = JsonValue::Object(Map::new());
        }
        match slot {
            JsonValue::Object(map) => cursor = map,
            // Wrong type: leave it for the validator to report.
            _ => return,
        }
    }

    match cursor.get(*leaf) {
        None | Some(JsonValue::Null) => {
            cursor.insert(leaf.to_string(), value);
        }
        Some(_) => {}
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Word(String),
}

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !c.is_ascii_punctuation() && !c.is_ascii_digit() && c != '₹'
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len()
                && (chars[i].is_ascii_digit()
                    || chars[i] == ','
                    || (chars[i] == '.' && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())))
            {
                i += 1;
            }
            let literal: String = chars[start..i].iter().filter(|c| **c != ',').collect();
            if let Ok(n) = literal.parse::<f64>() {
                tokens.push(Token::Number(n));
            }
        } else if c == '₹' {
            tokens.push(Token::Word("₹".to_string()));
            i += 1;
        } else if is_word_char(c) {
            let start = i;
            while i < chars.len() && is_word_char(chars[i]) {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            tokens.push(Token::Word(word.to_lowercase()));
        } else {
            i += 1;
        }
    }

    tokens
}

/// Scan raw vernacular text for catalog fields.
///
/// - commodity: first word (or two-word phrase) found in the synonym table
/// - price: a number directly after a currency word/symbol, or directly before one
/// - quantity: a number immediately preceding a known unit word (and not a price)
/// - grade / region: keyword lookup
pub fn scan(text: &str) -> LexicalHints {
    let tokens = tokenize(text);
    let mut hints = LexicalHints::default();
    let mut price_index = None;

    let word_at = |i: usize| match tokens.get(i) {
        Some(Token::Word(w)) => Some(w.as_str()),
        _ => None,
    };

    for i in 0..tokens.len() {
        let Token::Number(n) = tokens[i] else {
            continue;
        };
        let before = i.checked_sub(1).and_then(word_at);
        let after = word_at(i + 1);
        if before.is_some_and(is_currency_word) || after.is_some_and(is_currency_word) {
            hints.price = Some(n);
            hints.currency = Some("INR");
            price_index = Some(i);
            break;
        }
    }

    for i in 0..tokens.len() {
        if Some(i) == price_index {
            continue;
        }
        let Token::Number(n) = tokens[i] else {
            continue;
        };
        // 2^64 and above would saturate on conversion.
        if n < 0.0 || n.fract() != 0.0 || n >= u64::MAX as f64 {
            continue;
        }
        if let Some(unit) = word_at(i + 1).and_then(canonical_unit) {
            hints.quantity = Some((n as u64, unit));
            break;
        }
    }

    let words: Vec<&str> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::Word(w) => Some(w.as_str()),
            Token::Number(_) => None,
        })
        .collect();

    for (i, word) in words.iter().enumerate() {
        let pair = words.get(i + 1).map(|next| format!("{word} {next}"));

        if hints.commodity.is_none() {
            if let Some((matched, commodity)) = pair
                .as_deref()
                .and_then(|p| canonical_commodity(p).map(|c| (p.to_string(), c)))
                .or_else(|| canonical_commodity(word).map(|c| (word.to_string(), c)))
            {
                hints.commodity = Some(commodity);
                hints.commodity_word = Some(matched);
            }
        }

        if hints.grade.is_none() {
            hints.grade = pair
                .as_deref()
                .and_then(grade_for)
                .or_else(|| grade_for(word));
        }

        if hints.region.is_none() && is_known_region(word) {
            hints.region = Some(title_case(word));
        }
    }

    hints
}

fn grade_for(phrase: &str) -> Option<&'static str> {
    GRADE_KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == phrase)
        .map(|(_, grade)| *grade)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_vernacular_synonyms_many_to_one() {
        assert_eq!(canonical_commodity("pyaz").map(|c| c.canonical), Some("Onion"));
        assert_eq!(canonical_commodity("Kanda").map(|c| c.canonical), Some("Onion"));
        assert_eq!(canonical_commodity("प्याज").map(|c| c.canonical), Some("Onion"));
        assert_eq!(canonical_commodity("onion").map(|c| c.canonical), Some("Onion"));
        assert!(canonical_commodity("spaceship").is_none());
    }

    #[test]
    fn every_synonym_is_unique_across_commodities() {
        let mut seen = HashMap::new();
        for c in COMMODITIES {
            for s in c.synonyms {
                if let Some(prev) = seen.insert(s.to_lowercase(), c.canonical) {
                    panic!("synonym {s} used by both {prev} and {}", c.canonical);
                }
            }
        }
    }

    #[test]
    fn scans_hinglish_offer() {
        let hints = scan("Mere paas 500 kilo pyaz hai, Nashik ka, A grade, 22 rupaye kilo");
        assert_eq!(hints.commodity.map(|c| c.canonical), Some("Onion"));
        assert_eq!(hints.commodity_word.as_deref(), Some("pyaz"));
        assert_eq!(hints.quantity, Some((500, "kg")));
        assert_eq!(hints.price, Some(22.0));
        assert_eq!(hints.currency, Some("INR"));
        assert_eq!(hints.grade, Some("A"));
        assert_eq!(hints.region.as_deref(), Some("Nashik"));
    }

    #[test]
    fn price_with_rupee_symbol_is_not_taken_as_quantity() {
        let hints = scan("tamatar ₹18 kg, 40 crate available");
        assert_eq!(hints.price, Some(18.0));
        assert_eq!(hints.quantity, Some((40, "crate")));
    }

    #[test]
    fn number_must_immediately_precede_unit() {
        let hints = scan("gehun 20 bahut saare quintal");
        assert_eq!(hints.quantity, None);
        let hints = scan("gehun 1,200 qtl");
        assert_eq!(hints.quantity, Some((1200, "quintal")));
    }

    #[test]
    fn two_word_phrases_match() {
        let hints = scan("phool gobhi export quality");
        assert_eq!(hints.commodity.map(|c| c.canonical), Some("Cauliflower"));
        assert_eq!(hints.grade, Some("Export"));
    }

    #[test]
    fn empty_text_yields_no_hints() {
        assert!(scan("").is_empty());
        assert!(scan("hello there").is_empty());
    }

    #[test]
    fn oversized_quantity_is_skipped_not_clamped() {
        let hints = scan("99999999999999999999 kg pyaz");
        assert_eq!(hints.quantity, None);

        let hints = scan("99999999999999999999 kg aur 40 quintal gehun");
        assert_eq!(hints.quantity, Some((40, "quintal")));
    }

    #[test]
    fn fill_missing_only_inserts_absent_fields() {
        let hints = scan("500 kilo pyaz 22 rupaye");
        let mut candidate = json!({
            "descriptor": { "name": "Red Onion" },
            "price": { "value": -5 },
            "quantity": null
        });
        hints.fill_missing(&mut candidate);

        assert_eq!(candidate["descriptor"]["name"], json!("Red Onion"));
        assert_eq!(candidate["descriptor"]["symbol"], json!("onion"));
        // Present-but-invalid values are left for the validator.
        assert_eq!(candidate["price"]["value"], json!(-5));
        assert_eq!(candidate["price"]["currency"], json!("INR"));
        assert_eq!(candidate["quantity"]["available"]["count"], json!(500));
        assert_eq!(candidate["quantity"]["unit"], json!("kg"));
        assert_eq!(candidate["tags"]["perishability"], json!("medium"));
    }

    #[test]
    fn fill_missing_leaves_wrongly_typed_sections_alone() {
        let hints = scan("500 kilo pyaz");
        let mut candidate = json!({ "quantity": "lots" });
        hints.fill_missing(&mut candidate);
        assert_eq!(candidate["quantity"], json!("lots"));

        let mut not_object = json!([1, 2]);
        hints.fill_missing(&mut not_object);
        assert_eq!(not_object, json!([1, 2]));
    }
}
