//! Core types for the travel kiosk recommendation system
//! this crate contains shared data structures used across all components.
pub mod format;

use serde::{Deserialize, Serialize};

// TRAVEL LOG //

/// One historical travel log row, as ingested from the log dataset.
/// trip_id is NOT unique - several rows may share the same trip grouping key.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelLog {
    pub trip_id: String,

    /// Destination place, matched case-sensitively against the query region
    pub place: String,

    /// Trip duration in days. Free-form source text, rendered verbatim.
    #[serde(default)]
    pub days: String,

    /// Companion relationship descriptor(s), multi-value normalized
    #[serde(default)]
    pub companion_relation: String,

    /// Companion age group descriptor(s), multi-value normalized
    #[serde(default)]
    pub companion_age_group: String,

    #[serde(default)]
    pub gender: String,

    #[serde(default)]
    pub age: String,

    pub product_id: String,

    /// None when the source score is absent or unparseable.
    /// The aggregator counts None as 0.0 - that is policy, not an accident.
    #[serde(default)]
    pub satisfaction_score: Option<f64>,

    #[serde(default)]
    pub category: String,
}

// PRODUCT CATALOG //

/// Product metadata, one row per product_id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub region: String,
    pub product_name: String,
    #[serde(default)]
    pub place_type: String,
    #[serde(default)]
    pub category: String,
}

/// One price row. Many per product, grouped by option_name at query time.
/// price_text is free-form (currency/unit embedded), never parsed to a number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceOption {
    pub product_id: String,
    pub option_name: String,
    #[serde(default)]
    pub option_name_en: String,
    #[serde(default)]
    pub age_type: String,
    #[serde(default)]
    pub price_text: String,
}

// RECOMMENDATION QUERY (what the kiosk sends)

/// User travel intent, constructed per request and never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationQuery {
    pub region: String,
    pub categories: Vec<String>,
    pub gender: String,
    pub age: String,
    pub days: u32,
    pub companion_relations: Vec<String>,
    pub companion_age_groups: Vec<String>,
}

// RANKED OUTPUT (what the pipeline assembles)

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceEntry {
    pub age_type: String,
    pub price_text: String,
}

/// Price rows for one option name, in original fetch order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOption {
    pub product_id: String,
    pub option_name: String,
    pub prices: Vec<PriceEntry>,
}

/// A recommended product with its grouped price options.
/// options preserve first-seen option_name order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedProduct {
    pub product_id: String,
    pub region: String,
    pub product_name: String,
    pub place_type: String,
    pub category: String,
    pub options: Vec<ProductOption>,
}

// MULTI-VALUE NORMALIZATION //

/// Clean up a comma-separated multi-value string: trim each part and drop
/// duplicates while keeping first-seen order.
/// "형제/자매, 친인척, 친인척" -> "형제/자매, 친인척"
pub fn normalize_multi_value(text: &str) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for part in text.split(',') {
        let part = part.trim();
        if part.is_empty() || seen.contains(&part) {
            continue;
        }
        seen.push(part);
    }
    seen.join(", ")
}
