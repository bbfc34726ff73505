// Storage query interface
//
// The relational layer is an external collaborator - the pipeline only sees
// typed rows through this trait. MemoryStore is the in-process backend the
// API wires up at startup; rows are immutable after load.

use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;
use tripai_core::{PriceOption, Product, TravelLog};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Product metadata plus all of its price rows, in storage order
#[derive(Debug, Clone)]
pub struct ProductWithPrices {
    pub product: Product,
    pub prices: Vec<PriceOption>,
}

// every storage backend implements this
#[async_trait]
pub trait TravelStore: Send + Sync {
    /// All travel log rows, in storage order
    async fn get_all_logs(&self) -> Result<Vec<TravelLog>, StoreError>;

    /// Rows whose trip_id is in the given set, in storage order.
    /// Duplicate trip_ids in storage come back verbatim.
    async fn get_logs_by_ids(&self, trip_ids: &[String]) -> Result<Vec<TravelLog>, StoreError>;

    /// Product + price rows for one product_id.
    /// A missing product is Ok(None), never an error.
    async fn get_product_with_prices(
        &self,
        product_id: &str,
    ) -> Result<Option<ProductWithPrices>, StoreError>;
}

/// In-memory store over the loaded dataset
pub struct MemoryStore {
    logs: Vec<TravelLog>,
    products: Vec<Product>,
    prices: Vec<PriceOption>,
}

impl MemoryStore {
    pub fn new(logs: Vec<TravelLog>, products: Vec<Product>, prices: Vec<PriceOption>) -> Self {
        Self {
            logs,
            products,
            prices,
        }
    }

    pub fn log_count(&self) -> usize {
        self.logs.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn price_count(&self) -> usize {
        self.prices.len()
    }
}

#[async_trait]
impl TravelStore for MemoryStore {
    async fn get_all_logs(&self) -> Result<Vec<TravelLog>, StoreError> {
        Ok(self.logs.clone())
    }

    async fn get_logs_by_ids(&self, trip_ids: &[String]) -> Result<Vec<TravelLog>, StoreError> {
        let wanted: HashSet<&str> = trip_ids.iter().map(|s| s.as_str()).collect();
        Ok(self
            .logs
            .iter()
            .filter(|log| wanted.contains(log.trip_id.as_str()))
            .cloned()
            .collect())
    }

    async fn get_product_with_prices(
        &self,
        product_id: &str,
    ) -> Result<Option<ProductWithPrices>, StoreError> {
        let Some(product) = self
            .products
            .iter()
            .find(|p| p.product_id == product_id)
            .cloned()
        else {
            return Ok(None);
        };

        let prices: Vec<PriceOption> = self
            .prices
            .iter()
            .filter(|p| p.product_id == product_id)
            .cloned()
            .collect();

        Ok(Some(ProductWithPrices { product, prices }))
    }
}
