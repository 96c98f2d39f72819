use chrono::NaiveDate;

use crate::core::distance::haversine_distance;
use crate::models::{DogProfile, ScoringWeights};

/// Distance beyond which the geographic sub-score bottoms out
const GEO_FULL_PENALTY_KM: f64 = 50.0;

/// Compatibility score (0-100) for a pair of dogs, default weights.
///
/// `as_of` is the reference date for age derivation; callers pass "today"
/// from their clock so the function itself stays deterministic.
pub fn score_compatibility(a: &DogProfile, b: &DogProfile, as_of: NaiveDate) -> u8 {
    score_compatibility_weighted(a, b, as_of, &ScoringWeights::default())
}

/// Weighted compatibility score.
///
/// Each sub-score is normalized to [0, 1] and multiplied by its weight; the
/// default weights sum to 100. When either owner lacks coordinates the
/// distance term contributes 0 and its weight is deliberately not
/// redistributed, so the achievable maximum degrades to 85.
pub fn score_compatibility_weighted(
    a: &DogProfile,
    b: &DogProfile,
    as_of: NaiveDate,
    weights: &ScoringWeights,
) -> u8 {
    let size = size_score(a, b) * weights.size;
    let age = age_score(a.age_years(as_of), b.age_years(as_of)) * weights.age;
    let activity = activity_score(a, b) * weights.activity;
    let temperament = temperament_score(&a.temperament, &b.temperament) * weights.temperament;
    let geo = geo_score(a, b) * weights.distance;
    let gender = gender_score(a, b) * weights.gender;

    let total = size + age + activity + temperament + geo + gender;

    total.round().clamp(0.0, 100.0) as u8
}

/// Size proximity on the 5-bucket ordinal scale
#[inline]
fn size_score(a: &DogProfile, b: &DogProfile) -> f64 {
    let diff = (a.size.rank() as f64 - b.size.rank() as f64).abs();
    (1.0 - 0.2 * diff).max(0.0)
}

/// Age proximity in whole years
#[inline]
fn age_score(age_a: i32, age_b: i32) -> f64 {
    match (age_a - age_b).abs() {
        0..=2 => 1.0,
        3..=4 => 0.7,
        5..=6 => 0.4,
        _ => 0.1,
    }
}

/// Activity-level proximity on the 4-level ordinal scale
#[inline]
fn activity_score(a: &DogProfile, b: &DogProfile) -> f64 {
    let diff = (a.activity_level.rank() as f64 - b.activity_level.rank() as f64).abs();
    (1.0 - 0.25 * diff).max(0.0)
}

/// Jaccard overlap of temperament tag sets; neutral 0.5 when either is empty
#[inline]
fn temperament_score(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.5;
    }

    let intersection = a.iter().filter(|tag| b.contains(tag)).count();
    let union = a.len() + b.len() - intersection;

    intersection as f64 / union as f64
}

/// Geographic proximity, linear falloff to zero at 50 km.
/// Contributes 0 when either owner lacks coordinates.
#[inline]
fn geo_score(a: &DogProfile, b: &DogProfile) -> f64 {
    match (&a.owner_location, &b.owner_location) {
        (Some(loc_a), Some(loc_b)) => {
            let km = haversine_distance(loc_a, loc_b);
            (1.0 - km / GEO_FULL_PENALTY_KM).max(0.0)
        }
        _ => 0.0,
    }
}

/// Opposite genders pair best; same gender still scores 0.7
#[inline]
fn gender_score(a: &DogProfile, b: &DogProfile) -> f64 {
    if a.gender != b.gender {
        1.0
    } else {
        0.7
    }
}

/// Temperament tags present in both profiles, in `a`'s order
pub fn shared_temperament(a: &DogProfile, b: &DogProfile) -> Vec<String> {
    a.temperament
        .iter()
        .filter(|tag| b.temperament.contains(tag))
        .cloned()
        .collect()
}
