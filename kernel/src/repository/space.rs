use crate::model::{
    geo::BoundingBox,
    id::{SpaceId, UserId},
    space::{
        event::{CreateSpace, DeleteSpace, UpdateSpace},
        ParkingSpace,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn create(&self, event: CreateSpace, owner_id: UserId) -> AppResult<SpaceId>;
    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<ParkingSpace>>;
    async fn find_published(&self, limit: i64) -> AppResult<Vec<ParkingSpace>>;
    /// Range query behind the bounding-box pre-filter; only published
    /// spaces are returned. Exact distance filtering is the caller's job.
    async fn find_published_in_box(&self, bbox: &BoundingBox) -> AppResult<Vec<ParkingSpace>>;
    async fn find_by_owner_id(&self, owner_id: UserId) -> AppResult<Vec<ParkingSpace>>;
    async fn update(&self, event: UpdateSpace) -> AppResult<()>;
    async fn delete(&self, event: DeleteSpace) -> AppResult<()>;
}
