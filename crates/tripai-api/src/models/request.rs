use serde::Deserialize;
use tripai_core::RecommendationQuery;

/// Kiosk recommendation request payload
#[derive(Deserialize)]
pub struct RecommendRequest {
    pub region: String,
    pub categories: Vec<String>,
    pub gender: String,
    pub age: String,
    pub days: u32,
    pub companion_relations: Vec<String>,
    pub companion_age_groups: Vec<String>,
}

impl RecommendRequest {
    pub fn into_query(self) -> RecommendationQuery {
        RecommendationQuery {
            region: self.region,
            categories: self.categories,
            gender: self.gender,
            age: self.age,
            days: self.days,
            companion_relations: self.companion_relations,
            companion_age_groups: self.companion_age_groups,
        }
    }
}
