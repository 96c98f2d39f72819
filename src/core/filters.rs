use crate::core::distance::is_within_bounding_box;
use crate::models::{BoundingBox, DogProfile};

/// Check whether a candidate is eligible to appear in a dog's feed at all.
///
/// This is Stage 1 of the discovery pipeline: inactive profiles, the
/// subject itself, dogs of the same owner, and explicitly excluded dogs
/// (already liked/passed) never reach scoring.
#[inline]
pub fn is_eligible_candidate(
    subject: &DogProfile,
    candidate: &DogProfile,
    exclude_dog_ids: &[String],
) -> bool {
    if !candidate.is_active {
        return false;
    }

    if candidate.dog_id == subject.dog_id {
        return false;
    }

    if candidate.owner_id == subject.owner_id {
        return false;
    }

    if exclude_dog_ids.contains(&candidate.dog_id) {
        return false;
    }

    true
}

/// Geospatial pre-filter, Stage 2 of the pipeline.
///
/// Candidates without coordinates pass: missing geo data degrades the
/// score's distance term instead of excluding the dog.
#[inline]
pub fn within_search_area(candidate: &DogProfile, bbox: &BoundingBox) -> bool {
    match &candidate.owner_location {
        Some(location) => is_within_bounding_box(location, bbox),
        None => true,
    }
}
