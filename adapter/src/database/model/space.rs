use chrono::{DateTime, Utc};
use kernel::model::{
    id::{SpaceId, UserId},
    space::ParkingSpace,
};

#[derive(sqlx::FromRow)]
pub struct SpaceRow {
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

impl From<SpaceRow> for ParkingSpace {
    fn from(value: SpaceRow) -> Self {
        let SpaceRow {
            space_id,
            owner_id,
            title,
            description,
            latitude,
            longitude,
            price_per_hour,
            tags,
            published,
            requires_verification,
            created_at,
        } = value;
        ParkingSpace {
            space_id,
            owner_id,
            title,
            description,
            latitude,
            longitude,
            price_per_hour,
            tags,
            published,
            requires_verification,
            created_at,
        }
    }
}
