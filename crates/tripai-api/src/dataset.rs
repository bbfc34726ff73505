// Dataset loader - JSON row files into the in-memory store
//
// Expects three files in the data directory: log_table.json, products.json,
// prices.json. Loaded once at startup; rows are immutable afterward.
// Companion fields are multi-value normalized here and satisfaction is
// parsed leniently - junk text becomes None, which the aggregator counts
// as zero by policy.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;
use tripai_core::{PriceOption, Product, TravelLog, normalize_multi_value};
use tripai_recommend::MemoryStore;

// raw log row as it appears in the dataset file - satisfaction can be a
// number, a string, or missing entirely
#[derive(Deserialize)]
struct RawLogRow {
    trip_id: String,
    place: String,
    #[serde(default)]
    days: String,
    #[serde(default)]
    companion_relation: String,
    #[serde(default)]
    companion_age_group: String,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    age: String,
    product_id: String,
    #[serde(default)]
    satisfaction_score: Option<serde_json::Value>,
    #[serde(default)]
    category: String,
}

fn parse_satisfaction(value: &Option<serde_json::Value>) -> Option<f64> {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

impl From<RawLogRow> for TravelLog {
    fn from(row: RawLogRow) -> Self {
        let satisfaction_score = parse_satisfaction(&row.satisfaction_score);
        Self {
            trip_id: row.trip_id,
            place: row.place,
            days: row.days,
            companion_relation: normalize_multi_value(&row.companion_relation),
            companion_age_group: normalize_multi_value(&row.companion_age_group),
            gender: row.gender,
            age: row.age,
            product_id: row.product_id,
            satisfaction_score,
            category: row.category,
        }
    }
}

/// Load the three dataset files from `dir` into a MemoryStore
pub fn load_dir(dir: &Path) -> Result<MemoryStore, Box<dyn std::error::Error>> {
    let raw_logs: Vec<RawLogRow> = read_rows(&dir.join("log_table.json"))?;
    let products: Vec<Product> = read_rows(&dir.join("products.json"))?;
    let prices: Vec<PriceOption> = read_rows(&dir.join("prices.json"))?;

    if raw_logs.is_empty() {
        warn!(dir = %dir.display(), "Log dataset is empty - nothing to recommend from");
    }

    let logs: Vec<TravelLog> = raw_logs.into_iter().map(TravelLog::from).collect();
    Ok(MemoryStore::new(logs, products, prices))
}

fn read_rows<T: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<Vec<T>, Box<dyn std::error::Error>> {
    let bytes = fs::read(path)
        .map_err(|e| format!("cannot read dataset file {}: {}", path.display(), e))?;
    let rows = serde_json::from_slice(&bytes)
        .map_err(|e| format!("cannot parse dataset file {}: {}", path.display(), e))?;
    Ok(rows)
}
