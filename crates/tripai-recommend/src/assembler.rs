// Result assembler - ranked product ids into the nested output structure
//
// Product -> Option -> Price. Options are grouped by option_name in the
// order the name is first seen in the fetched price rows; the (age_type,
// price_text) pairs inside a group stay in original fetch order.

use crate::aggregator::ProductScore;
use crate::store::{StoreError, TravelStore};
use tripai_core::{PriceEntry, ProductOption, RankedProduct};

/// Fetch metadata + prices for each ranked product id and build the nested
/// result, in ranked order. A log can reference a product_id that is absent
/// from the product table - those ids are silently skipped, not errors.
pub async fn assemble(
    ranked: &[ProductScore],
    store: &dyn TravelStore,
) -> Result<Vec<RankedProduct>, StoreError> {
    let mut products = Vec::with_capacity(ranked.len());

    for score in ranked {
        let Some(pp) = store.get_product_with_prices(&score.product_id).await? else {
            // dangling reference - the log corpus knows a product the
            // catalog does not
            continue;
        };

        let mut options: Vec<ProductOption> = Vec::new();
        for row in &pp.prices {
            let price = PriceEntry {
                age_type: row.age_type.clone(),
                price_text: row.price_text.clone(),
            };

            match options.iter_mut().find(|o| o.option_name == row.option_name) {
                Some(option) => option.prices.push(price),
                None => options.push(ProductOption {
                    product_id: pp.product.product_id.clone(),
                    option_name: row.option_name.clone(),
                    prices: vec![price],
                }),
            }
        }

        products.push(RankedProduct {
            product_id: pp.product.product_id,
            region: pp.product.region,
            product_name: pp.product.product_name,
            place_type: pp.product.place_type,
            category: pp.product.category,
            options,
        });
    }

    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use tripai_core::{PriceOption, Product};

    fn product(id: &str, name: &str) -> Product {
        Product {
            product_id: id.to_string(),
            region: "서울".to_string(),
            product_name: name.to_string(),
            place_type: "투어".to_string(),
            category: "관광".to_string(),
        }
    }

    fn price(product_id: &str, option_name: &str, age_type: &str, text: &str) -> PriceOption {
        PriceOption {
            product_id: product_id.to_string(),
            option_name: option_name.to_string(),
            option_name_en: String::new(),
            age_type: age_type.to_string(),
            price_text: text.to_string(),
        }
    }

    fn score(product_id: &str) -> ProductScore {
        ProductScore {
            product_id: product_id.to_string(),
            mean_score: 4.0,
        }
    }

    #[tokio::test]
    async fn test_dangling_product_is_skipped() {
        let store = MemoryStore::new(vec![], vec![product("P1", "시티투어")], vec![]);

        let ranked = vec![score("P1"), score("P404"), score("P1")];
        let result = assemble(&ranked, &store).await.unwrap();

        // one shorter than input, order of the rest preserved
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].product_id, "P1");
        assert_eq!(result[1].product_id, "P1");
    }

    #[tokio::test]
    async fn test_option_grouping_first_seen_order() {
        let store = MemoryStore::new(
            vec![],
            vec![product("P1", "궁 투어")],
            vec![
                price("P1", "Adult", "성인", "10,000원"),
                price("P1", "Adult", "청소년", "8,000원"),
                price("P1", "Child", "어린이", "5,000원"),
            ],
        );

        let result = assemble(&[score("P1")], &store).await.unwrap();
        let options = &result[0].options;

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].option_name, "Adult");
        assert_eq!(options[1].option_name, "Child");

        // the two Adult prices stay in original fetch order
        assert_eq!(options[0].prices.len(), 2);
        assert_eq!(options[0].prices[0].price_text, "10,000원");
        assert_eq!(options[0].prices[1].price_text, "8,000원");
    }

    #[tokio::test]
    async fn test_products_emitted_in_ranked_order() {
        let store = MemoryStore::new(
            vec![],
            vec![product("P1", "하나"), product("P2", "둘")],
            vec![],
        );

        let result = assemble(&[score("P2"), score("P1")], &store).await.unwrap();
        assert_eq!(result[0].product_id, "P2");
        assert_eq!(result[1].product_id, "P1");
    }

    #[tokio::test]
    async fn test_product_without_prices_has_empty_options() {
        let store = MemoryStore::new(vec![], vec![product("P1", "무료 명소")], vec![]);

        let result = assemble(&[score("P1")], &store).await.unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].options.is_empty());
    }
}
