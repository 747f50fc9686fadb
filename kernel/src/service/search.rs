use crate::model::{
    geo::{haversine_km, BoundingBox, GeoQuery},
    price::PriceRange,
    space::ParkingSpace,
};
use crate::repository::space::SpaceRepository;
use derive_new::new;
use shared::error::AppResult;
use std::sync::Arc;

#[derive(Debug)]
pub struct SpaceWithDistance {
    pub space: ParkingSpace,
    pub distance_km: f64,
}

/// Proximity search over published spaces.
///
/// The repository answers a cheap bounding-box range query; the exact cut
/// and the nearest-first ordering both use haversine so "within radius"
/// and "closest" never disagree.
#[derive(new)]
pub struct SearchService {
    spaces: Arc<dyn SpaceRepository>,
}

impl SearchService {
    pub async fn search(
        &self,
        query: GeoQuery,
        price: PriceRange,
    ) -> AppResult<Vec<SpaceWithDistance>> {
        let bbox = BoundingBox::around(&query);
        let candidates = self.spaces.find_published_in_box(&bbox).await?;

        let mut hits = Vec::with_capacity(candidates.len());
        for space in candidates {
            let location = space.location()?;
            let distance_km = haversine_km(&query.center, &location);
            if distance_km <= query.radius_km && price.accepts(space.price_per_hour) {
                hits.push(SpaceWithDistance { space, distance_km });
            }
        }
        hits.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        Ok(hits)
    }
}
