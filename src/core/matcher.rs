use chrono::NaiveDate;

use crate::core::{
    distance::{calculate_bounding_box, haversine_distance},
    filters::{is_eligible_candidate, within_search_area},
    matching::{score_compatibility_weighted, shared_temperament},
};
use crate::models::{DogProfile, ScoredMatch, ScoringWeights};

/// Result of the discovery process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredMatch>,
    pub total_candidates: usize,
}

/// Discovery orchestrator for the TinDog feed
///
/// # Pipeline Stages
/// 1. Eligibility filter (active, not self, not same owner, not excluded)
/// 2. Geospatial bounding box pre-filter
/// 3. Compatibility scoring
/// 4. Minimum-score cut, ranking, truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    search_radius_km: f64,
    min_score: u8,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, search_radius_km: f64, min_score: u8) -> Self {
        Self {
            weights,
            search_radius_km,
            min_score,
        }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
            search_radius_km: 50.0,
            min_score: 5,
        }
    }

    /// Rank candidate dogs for a subject dog.
    ///
    /// `as_of` is the reference date for age derivation; the caller passes
    /// "today" from its clock so the pipeline stays deterministic.
    pub fn find_matches(
        &self,
        subject: &DogProfile,
        candidates: Vec<DogProfile>,
        exclude_dog_ids: &[String],
        as_of: NaiveDate,
        limit: usize,
    ) -> MatchResult {
        let total_candidates = candidates.len();

        let bbox = subject
            .owner_location
            .as_ref()
            .map(|loc| calculate_bounding_box(loc, self.search_radius_km));

        let mut scored: Vec<ScoredMatch> = candidates
            .into_iter()
            // Stage 1: eligibility
            .filter(|candidate| is_eligible_candidate(subject, candidate, exclude_dog_ids))
            // Stage 2: geospatial pre-filter (skipped when the subject has no location)
            .filter(|candidate| match &bbox {
                Some(bbox) => within_search_area(candidate, bbox),
                None => true,
            })
            // Stages 3 & 4: scoring and cut
            .filter_map(|candidate| {
                let score =
                    score_compatibility_weighted(subject, &candidate, as_of, &self.weights);

                if score < self.min_score {
                    return None;
                }

                let distance_km = match (&subject.owner_location, &candidate.owner_location) {
                    (Some(a), Some(b)) => Some(haversine_distance(a, b)),
                    _ => None,
                };
                let shared = shared_temperament(subject, &candidate);

                Some(ScoredMatch {
                    dog_id: candidate.dog_id,
                    name: candidate.name,
                    size: candidate.size,
                    gender: candidate.gender,
                    compatibility_score: score,
                    shared_temperament: shared,
                    distance_km,
                })
            })
            .collect();

        // Sort by score (descending), then by distance (ascending, unknown last)
        scored.sort_by(|a, b| {
            b.compatibility_score
                .cmp(&a.compatibility_score)
                .then_with(|| {
                    let da = a.distance_km.unwrap_or(f64::MAX);
                    let db = b.distance_km.unwrap_or(f64::MAX);
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                })
        });

        scored.truncate(limit);

        MatchResult {
            matches: scored,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
