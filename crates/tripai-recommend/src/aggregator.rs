// Satisfaction aggregator - per-product mean score over the matched logs
//
// Missing or unparseable satisfaction counts as 0.0 in the sum AND in the
// denominator. Sparse data penalizes a product's average; that is
// deliberate scoring policy, do not "fix" it here.

use std::collections::HashMap;
use tripai_core::TravelLog;

/// A product id with its mean satisfaction over the matched logs
#[derive(Debug, Clone, PartialEq)]
pub struct ProductScore {
    pub product_id: String,
    pub mean_score: f64,
}

/// Filter the matched logs to the requested region (case-sensitive exact
/// match), group by product_id in first-encounter order, and return the top
/// `limit` products by descending mean satisfaction. Ties keep
/// first-encounter order. An empty filtered set yields an empty vec -
/// "no recommendation", never an error.
pub fn rank_products(logs: &[TravelLog], region: &str, limit: usize) -> Vec<ProductScore> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, (f64, usize)> = HashMap::new();

    for log in logs.iter().filter(|l| l.place == region) {
        let score = log.satisfaction_score.unwrap_or(0.0);

        let entry = totals.entry(log.product_id.clone()).or_insert_with(|| {
            order.push(log.product_id.clone());
            (0.0, 0)
        });
        entry.0 += score;
        entry.1 += 1;
    }

    let mut ranked: Vec<ProductScore> = order
        .into_iter()
        .map(|product_id| {
            let (sum, count) = totals[&product_id];
            ProductScore {
                product_id,
                mean_score: sum / count as f64,
            }
        })
        .collect();

    // stable sort - equal means keep first-encounter order
    ranked.sort_by(|a, b| {
        b.mean_score
            .partial_cmp(&a.mean_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}
