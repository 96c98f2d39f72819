use crate::models::{BoundingBox, GeoPoint};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
#[inline]
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Calculate a bounding box around a center point
///
/// Much faster than Haversine for pre-filtering candidates.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
pub fn calculate_bounding_box(center: &GeoPoint, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / 111.0;
    let lon_delta = radius_km / (111.0 * center.latitude.to_radians().cos().abs());

    BoundingBox {
        min_lat: center.latitude - lat_delta,
        max_lat: center.latitude + lat_delta,
        min_lon: center.longitude - lon_delta,
        max_lon: center.longitude + lon_delta,
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(point: &GeoPoint, bbox: &BoundingBox) -> bool {
    point.latitude >= bbox.min_lat
        && point.latitude <= bbox.max_lat
        && point.longitude >= bbox.min_lon
        && point.longitude <= bbox.max_lon
}

#[cfg(test)]
mod tests {
    use super::*;

    const MILAN: GeoPoint = GeoPoint {
        latitude: 45.4642,
        longitude: 9.1900,
    };

    #[test]
    fn test_haversine_distance() {
        // Milan to Rome (approximately 477 km)
        let rome = GeoPoint {
            latitude: 41.9028,
            longitude: 12.4964,
        };

        let distance = haversine_distance(&MILAN, &rome);
        assert!(
            (distance - 477.0).abs() < 15.0,
            "Distance should be ~477km, got {}",
            distance
        );
    }

    #[test]
    fn test_haversine_distance_zero() {
        assert!(haversine_distance(&MILAN, &MILAN) < 0.01);
    }

    #[test]
    fn test_bounding_box() {
        let bbox = calculate_bounding_box(&MILAN, 10.0);

        assert!(bbox.min_lat < MILAN.latitude);
        assert!(bbox.max_lat > MILAN.latitude);
        assert!(bbox.min_lon < MILAN.longitude);
        assert!(bbox.max_lon > MILAN.longitude);

        // Check approximate size (20km / 111km per degree = ~0.18 degrees)
        let lat_span = bbox.max_lat - bbox.min_lat;
        assert!((lat_span - 0.18).abs() < 0.02, "Lat span should be ~0.18 degrees");
    }

    #[test]
    fn test_point_within_bbox() {
        let bbox = calculate_bounding_box(&MILAN, 10.0);

        // Center point should be within
        assert!(is_within_bounding_box(&MILAN, &bbox));

        // Close point should be within
        let close = GeoPoint {
            latitude: 45.47,
            longitude: 9.2,
        };
        assert!(is_within_bounding_box(&close, &bbox));

        // Far point should not be within
        let far = GeoPoint {
            latitude: 50.0,
            longitude: 4.0,
        };
        assert!(!is_within_bounding_box(&far, &bbox));
    }
}
