use crate::model::{
    geo::GeoPoint,
    id::{SpaceId, UserId},
    space::{
        event::{CreateSpace, DeleteSpace, UpdateSpace},
        ParkingSpace,
    },
};
use crate::repository::{booking::BookingRepository, space::SpaceRepository};
use chrono::Utc;
use derive_new::new;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

#[derive(new)]
pub struct SpaceService {
    spaces: Arc<dyn SpaceRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl SpaceService {
    pub async fn register(&self, event: CreateSpace, owner_id: UserId) -> AppResult<SpaceId> {
        GeoPoint::new(event.latitude, event.longitude)?;
        validate_price(event.price_per_hour)?;
        self.spaces.create(event, owner_id).await
    }

    pub async fn find(&self, space_id: SpaceId) -> AppResult<ParkingSpace> {
        self.spaces
            .find_by_id(space_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("space ({space_id}) was not found")))
    }

    pub async fn list_published(&self, limit: i64) -> AppResult<Vec<ParkingSpace>> {
        self.spaces.find_published(limit).await
    }

    pub async fn list_owned(&self, owner_id: UserId) -> AppResult<Vec<ParkingSpace>> {
        self.spaces.find_by_owner_id(owner_id).await
    }

    /// Partial update; fields left `None` keep their stored values.
    pub async fn update(&self, event: UpdateSpace) -> AppResult<()> {
        let space = self.find(event.space_id).await?;
        if space.owner_id != event.requested_user {
            return Err(AppError::ForbiddenOperation(
                "only the owner can update this space".into(),
            ));
        }

        // The resulting coordinate pair must stay valid even when only one
        // axis is supplied.
        GeoPoint::new(
            event.latitude.unwrap_or(space.latitude),
            event.longitude.unwrap_or(space.longitude),
        )?;
        if let Some(price) = event.price_per_hour {
            validate_price(price)?;
        }

        self.spaces.update(event).await
    }

    /// Deletion is blocked while confirmed bookings ending in the future
    /// exist; renters keep what they reserved.
    pub async fn delete(&self, event: DeleteSpace) -> AppResult<()> {
        let space = self.find(event.space_id).await?;
        if space.owner_id != event.requested_user {
            return Err(AppError::ForbiddenOperation(
                "only the owner can delete this space".into(),
            ));
        }

        if self
            .bookings
            .has_confirmed_after(event.space_id, Utc::now())
            .await?
        {
            return Err(AppError::UnprocessableEntity(format!(
                "space ({}) still has confirmed upcoming bookings",
                event.space_id
            )));
        }

        self.spaces.delete(event).await
    }
}

fn validate_price(price_per_hour: f64) -> AppResult<()> {
    if !price_per_hour.is_finite() || price_per_hour < 0.0 {
        return Err(AppError::UnprocessableEntity(format!(
            "price_per_hour must be non-negative, got {price_per_hour}"
        )));
    }
    Ok(())
}
