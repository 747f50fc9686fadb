use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{SpaceId, UserId},
    space::{
        event::{CreateSpace, UpdateSpace},
        ParkingSpace,
    },
};
use kernel::service::search::SpaceWithDistance;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpaceRequest {
    #[garde(length(min = 1, max = 120))]
    pub title: String,
    #[garde(skip)]
    #[serde(default)]
    pub description: String,
    #[garde(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[garde(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[garde(range(min = 0.0))]
    pub price_per_hour: f64,
    #[garde(skip)]
    #[serde(default)]
    pub tags: Vec<String>,
    #[garde(skip)]
    #[serde(default = "default_published")]
    pub published: bool,
    #[garde(skip)]
    #[serde(default)]
    pub requires_verification: bool,
}

fn default_published() -> bool {
    true
}

impl From<CreateSpaceRequest> for CreateSpace {
    fn from(value: CreateSpaceRequest) -> Self {
        let CreateSpaceRequest {
            title,
            description,
            latitude,
            longitude,
            price_per_hour,
            tags,
            published,
            requires_verification,
        } = value;
        CreateSpace {
            title,
            description,
            latitude,
            longitude,
            price_per_hour,
            tags,
            published,
            requires_verification,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpaceRequest {
    #[garde(length(min = 1, max = 120))]
    pub title: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[garde(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[garde(range(min = 0.0))]
    pub price_per_hour: Option<f64>,
    #[garde(skip)]
    pub tags: Option<Vec<String>>,
    #[garde(skip)]
    pub published: Option<bool>,
    #[garde(skip)]
    pub requires_verification: Option<bool>,
}

#[derive(new)]
pub struct UpdateSpaceRequestWithIds(SpaceId, UserId, UpdateSpaceRequest);

impl From<UpdateSpaceRequestWithIds> for UpdateSpace {
    fn from(value: UpdateSpaceRequestWithIds) -> Self {
        let UpdateSpaceRequestWithIds(space_id, requested_user, req) = value;
        UpdateSpace {
            space_id,
            title: req.title,
            description: req.description,
            latitude: req.latitude,
            longitude: req.longitude,
            price_per_hour: req.price_per_hour,
            tags: req.tags,
            published: req.published,
            requires_verification: req.requires_verification,
            requested_user,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SpaceListQuery {
    #[garde(range(min = 1, max = 1000))]
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

#[derive(Debug, Deserialize, Validate)]
pub struct SearchSpacesQuery {
    #[garde(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[garde(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    /// Search radius in kilometers.
    #[garde(skip)]
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[garde(range(min = 0.0))]
    pub min_price: Option<f64>,
    #[garde(range(min = 0.0))]
    pub max_price: Option<f64>,
}

fn default_radius() -> f64 {
    1.0
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceResponse {
    pub id: SpaceId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price_per_hour: f64,
    pub tags: Vec<String>,
    pub published: bool,
    pub requires_verification: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ParkingSpace> for SpaceResponse {
    fn from(value: ParkingSpace) -> Self {
        let ParkingSpace {
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
        Self {
            id: space_id,
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

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchedSpaceResponse {
    pub distance_km: f64,
    #[serde(flatten)]
    pub space: SpaceResponse,
}

impl From<SpaceWithDistance> for SearchedSpaceResponse {
    fn from(value: SpaceWithDistance) -> Self {
        Self {
            distance_km: value.distance_km,
            space: value.space.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceCreatedResponse {
    pub id: SpaceId,
}
