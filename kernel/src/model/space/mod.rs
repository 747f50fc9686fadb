pub mod event;

use crate::model::geo::GeoPoint;
use crate::model::id::{SpaceId, UserId};
use chrono::{DateTime, Utc};
use shared::error::AppResult;

#[derive(Debug, Clone)]
pub struct ParkingSpace {
    pub space_id: SpaceId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price_per_hour: f64,
    pub tags: Vec<String>,
    pub published: bool,
    pub requires_verification: bool,
    pub created_at: DateTime<Utc>,
}

impl ParkingSpace {
    pub fn location(&self) -> AppResult<GeoPoint> {
        GeoPoint::new(self.latitude, self.longitude)
    }
}
