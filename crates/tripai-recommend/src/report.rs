// Report generation - the opaque summary shown next to the product list
//
// Wraps an LLM backend behind the LlmClient seam. Failure here is a
// transient upstream error the caller sees; nothing is swallowed.

use crate::llm_client::{LlmClient, LlmError};
use thiserror::Error;
use tripai_core::RankedProduct;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

pub struct ReportGenerator {
    client: Box<dyn LlmClient>,
}

impl ReportGenerator {
    pub fn new(client: Box<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub fn provider(&self) -> &str {
        self.client.provider()
    }

    /// Summarize the assembled products into a short kiosk-facing report
    pub async fn generate(&self, products: &[RankedProduct]) -> Result<String, ReportError> {
        let prompt = build_prompt(products);
        Ok(self.client.generate(&prompt).await?)
    }
}

fn build_prompt(products: &[RankedProduct]) -> String {
    let mut context = String::new();

    for (i, product) in products.iter().enumerate() {
        context.push_str(&format!(
            "{}. {} ({} / {} / {})\n",
            i + 1,
            product.product_name,
            product.region,
            product.place_type,
            product.category
        ));

        for option in &product.options {
            let prices: Vec<String> = option
                .prices
                .iter()
                .map(|p| format!("{} {}", p.age_type, p.price_text))
                .collect();
            context.push_str(&format!("   - {}: {}\n", option.option_name, prices.join(", ")));
        }
    }

    format!(
        "아래는 여행 키오스크가 사용자에게 추천하는 상품 목록이다.\n\n\
         {}\n\
         이 상품들을 소개하는 짧은 여행 추천 리포트를 한국어로 작성하라. \
         상품별 특징과 가격대를 자연스럽게 언급하고, 과장 없이 3~5문장으로 정리하라.",
        context
    )
}
