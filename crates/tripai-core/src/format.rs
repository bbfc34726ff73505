//! Sentence formatter - renders logs and queries into the fixed Korean
//! templates the embedding model was tuned against.
//!
//! Two templates: past tense for historical logs (with a satisfaction
//! clause), future/desire tense for user intent (without one). Both are
//! pure functions - same input, same sentence.

use crate::{RecommendationQuery, TravelLog};

/// Render a historical log as a past-tense sentence.
/// A missing satisfaction score renders as empty text, not an error.
pub fn historical_sentence(log: &TravelLog) -> String {
    let satisfaction = log
        .satisfaction_score
        .map(|s| s.to_string())
        .unwrap_or_default();

    format!(
        "여행자는 {} 지역으로 {}일동안 여행을 갔다. \
         함께 간 여행 동행자와는 {}관계이다. \
         동행자의 나이는 {}이다. \
         여행자의 성별은 {}이며, 나이는 {}대이다. \
         전반적으로 여행자의 만족도는 {}점이다. \
         여행자의 여행 테마는 {}이다.",
        log.place,
        log.days,
        log.companion_relation,
        log.companion_age_group,
        log.gender,
        log.age,
        satisfaction,
        log.category
    )
}

/// Render a user query as a future-tense intent sentence.
/// Multi-value fields are joined with ", " before templating.
pub fn intent_sentence(query: &RecommendationQuery) -> String {
    format!(
        "여행자는 {} 지역으로 {}일동안 여행을 갈 예정이다. \
         함께 갈 여행 동행자와는 {}관계이다. \
         동행자의 나이는 {}이다. \
         여행자의 성별은 {}이며, 나이는 {}대이다. \
         여행자가 원하는 여행 테마는 {}이다.",
        query.region,
        query.days,
        query.companion_relations.join(", "),
        query.companion_age_groups.join(", "),
        query.gender,
        query.age,
        query.categories.join(", ")
    )
}
