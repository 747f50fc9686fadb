use crate::model::id::{SpaceId, UserId};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateSpace {
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price_per_hour: f64,
    pub tags: Vec<String>,
    pub published: bool,
    pub requires_verification: bool,
}

/// Partial update: `None` fields keep their stored values.
#[derive(Debug, new)]
pub struct UpdateSpace {
    pub space_id: SpaceId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price_per_hour: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
    pub requires_verification: Option<bool>,
    pub requested_user: UserId,
}

#[derive(Debug, new)]
pub struct DeleteSpace {
    pub space_id: SpaceId,
    pub requested_user: UserId,
}
