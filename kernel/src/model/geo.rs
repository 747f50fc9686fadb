use shared::error::{AppError, AppResult};

/// Kilometers per degree of latitude (and of longitude at the equator).
const KM_PER_DEGREE: f64 = 111.0;
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Query centers closer to the poles than this are rejected so the
/// longitude-delta division below never sees a near-zero cosine.
const MAX_QUERY_LATITUDE_DEG: f64 = 89.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> AppResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(AppError::InvalidGeoQuery(format!(
                "latitude must be within [-90, 90], got {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::InvalidGeoQuery(format!(
                "longitude must be within [-180, 180], got {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A proximity query: center plus radius in kilometers.
#[derive(Debug, Clone, Copy)]
pub struct GeoQuery {
    pub center: GeoPoint,
    pub radius_km: f64,
}

impl GeoQuery {
    pub fn new(latitude: f64, longitude: f64, radius_km: f64) -> AppResult<Self> {
        let center = GeoPoint::new(latitude, longitude)?;
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(AppError::InvalidGeoQuery(format!(
                "radius_km must be positive, got {radius_km}"
            )));
        }
        if center.latitude().abs() > MAX_QUERY_LATITUDE_DEG {
            return Err(AppError::InvalidGeoQuery(format!(
                "query center latitude must be within ±{MAX_QUERY_LATITUDE_DEG}°"
            )));
        }
        Ok(Self { center, radius_km })
    }
}

/// Axis-aligned box used as the index-friendly pre-filter. Membership in the
/// box does not imply membership in the radius; callers must still apply
/// [`haversine_km`] for the exact cut.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    pub fn around(query: &GeoQuery) -> Self {
        let lat = query.center.latitude();
        let lng = query.center.longitude();
        let lat_delta = query.radius_km / KM_PER_DEGREE;
        // Longitude degrees shrink with latitude. GeoQuery caps |lat| at 89°
        // so the cosine stays bounded away from zero; the clamp below keeps
        // wide radii inside the valid coordinate domain.
        let lng_delta =
            (query.radius_km / (KM_PER_DEGREE * lat.to_radians().cos())).min(180.0);

        Self {
            min_latitude: (lat - lat_delta).max(-90.0),
            max_latitude: (lat + lat_delta).min(90.0),
            min_longitude: (lng - lng_delta).max(-180.0),
            max_longitude: (lng + lng_delta).min(180.0),
        }
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&point.latitude())
            && (self.min_longitude..=self.max_longitude).contains(&point.longitude())
    }
}

/// Great-circle distance in kilometers. This is the one distance formula used
/// for both the radius cut and nearest-first ordering.
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = (b.latitude() - a.latitude()).to_radians();
    let d_lng = (b.longitude() - a.longitude()).to_radians();
    let lat_a = a.latitude().to_radians();
    let lat_b = b.latitude().to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(matches!(
            GeoPoint::new(91.0, 0.0),
            Err(AppError::InvalidGeoQuery(_))
        ));
        assert!(matches!(
            GeoPoint::new(0.0, -181.0),
            Err(AppError::InvalidGeoQuery(_))
        ));
        assert!(GeoPoint::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn rejects_degenerate_radius() {
        assert!(matches!(
            GeoQuery::new(37.7749, -122.4194, 0.0),
            Err(AppError::InvalidGeoQuery(_))
        ));
        assert!(matches!(
            GeoQuery::new(37.7749, -122.4194, -1.0),
            Err(AppError::InvalidGeoQuery(_))
        ));
    }

    #[test]
    fn rejects_near_pole_query_center() {
        assert!(matches!(
            GeoQuery::new(89.5, 0.0, 1.0),
            Err(AppError::InvalidGeoQuery(_))
        ));
        assert!(GeoQuery::new(89.0, 0.0, 1.0).is_ok());
    }

    #[test]
    fn bounding_box_contains_its_center() {
        let query = GeoQuery::new(37.7749, -122.4194, 0.5).unwrap();
        let bbox = BoundingBox::around(&query);
        assert!(bbox.contains(&query.center));
    }

    #[test]
    fn bounding_box_excludes_far_points() {
        let query = GeoQuery::new(37.7749, -122.4194, 1.0).unwrap();
        let bbox = BoundingBox::around(&query);
        // ~111 km north of the center, far outside a 1 km box.
        let far = GeoPoint::new(38.7749, -122.4194).unwrap();
        assert!(!bbox.contains(&far));
    }

    #[test]
    fn longitude_span_widens_with_latitude() {
        let equator = BoundingBox::around(&GeoQuery::new(0.0, 0.0, 10.0).unwrap());
        let north = BoundingBox::around(&GeoQuery::new(60.0, 0.0, 10.0).unwrap());
        let span = |b: &BoundingBox| b.max_longitude - b.min_longitude;
        assert!(span(&north) > span(&equator));
    }

    #[test]
    fn haversine_of_identical_points_is_zero() {
        let p = GeoPoint::new(37.7749, -122.4194).unwrap();
        assert_eq!(haversine_km(&p, &p), 0.0);
    }

    #[test]
    fn haversine_matches_known_distance() {
        // San Francisco to Los Angeles, roughly 559 km.
        let sf = GeoPoint::new(37.7749, -122.4194).unwrap();
        let la = GeoPoint::new(34.0522, -118.2437).unwrap();
        let d = haversine_km(&sf, &la);
        assert!((550.0..570.0).contains(&d), "got {d}");
    }
}
