use serde::Serialize;
use tripai_core::{PriceEntry, ProductOption, RankedProduct};
use tripai_recommend::Recommendation;

#[derive(Serialize)]
pub struct PriceOut {
    pub age_type: String,
    pub price_text: String,
}

#[derive(Serialize)]
pub struct OptionOut {
    pub product_id: String,
    pub option_name: String,
    pub prices: Vec<PriceOut>,
}

#[derive(Serialize)]
pub struct ProductOut {
    pub product_id: String,
    pub region: String,
    pub product_name: String,
    pub place_type: String,
    pub category: String,
    pub options: Vec<OptionOut>,
}

/// products + report, the full kiosk response
#[derive(Serialize)]
pub struct RecommendResponse {
    pub products: Vec<ProductOut>,
    pub report: Option<String>,
}

impl From<PriceEntry> for PriceOut {
    fn from(p: PriceEntry) -> Self {
        Self {
            age_type: p.age_type,
            price_text: p.price_text,
        }
    }
}

impl From<ProductOption> for OptionOut {
    fn from(o: ProductOption) -> Self {
        Self {
            product_id: o.product_id,
            option_name: o.option_name,
            prices: o.prices.into_iter().map(PriceOut::from).collect(),
        }
    }
}

impl From<RankedProduct> for ProductOut {
    fn from(p: RankedProduct) -> Self {
        Self {
            product_id: p.product_id,
            region: p.region,
            product_name: p.product_name,
            place_type: p.place_type,
            category: p.category,
            options: p.options.into_iter().map(OptionOut::from).collect(),
        }
    }
}

impl From<Recommendation> for RecommendResponse {
    fn from(r: Recommendation) -> Self {
        Self {
            products: r.products.into_iter().map(ProductOut::from).collect(),
            report: r.report,
        }
    }
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub log_count: usize,
    pub product_count: usize,
    pub price_count: usize,
    pub embedded_count: usize,
    pub dimension: usize,
    pub partial_coverage: bool,
    pub snapshot_built_at: String,
}
