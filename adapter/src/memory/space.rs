use async_trait::async_trait;
use chrono::Utc;
use kernel::model::{
    geo::BoundingBox,
    id::{SpaceId, UserId},
    space::{
        event::{CreateSpace, DeleteSpace, UpdateSpace},
        ParkingSpace,
    },
};
use kernel::repository::space::SpaceRepository;
use shared::error::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct InMemorySpaceRepository {
    spaces: RwLock<HashMap<SpaceId, ParkingSpace>>,
}

impl InMemorySpaceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SpaceRepository for InMemorySpaceRepository {
    async fn create(&self, event: CreateSpace, owner_id: UserId) -> AppResult<SpaceId> {
        let space_id = SpaceId::new();
        let space = ParkingSpace {
            space_id,
            owner_id,
            title: event.title,
            description: event.description,
            latitude: event.latitude,
            longitude: event.longitude,
            price_per_hour: event.price_per_hour,
            tags: event.tags,
            published: event.published,
            requires_verification: event.requires_verification,
            created_at: Utc::now(),
        };
        self.spaces
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(space_id, space);
        Ok(space_id)
    }

    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<ParkingSpace>> {
        let spaces = self.spaces.read().unwrap_or_else(|e| e.into_inner());
        Ok(spaces.get(&space_id).cloned())
    }

    async fn find_published(&self, limit: i64) -> AppResult<Vec<ParkingSpace>> {
        let spaces = self.spaces.read().unwrap_or_else(|e| e.into_inner());
        let mut published: Vec<ParkingSpace> =
            spaces.values().filter(|s| s.published).cloned().collect();
        published.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        published.truncate(limit.max(0) as usize);
        Ok(published)
    }

    async fn find_published_in_box(&self, bbox: &BoundingBox) -> AppResult<Vec<ParkingSpace>> {
        let spaces = self.spaces.read().unwrap_or_else(|e| e.into_inner());
        Ok(spaces
            .values()
            .filter(|s| {
                s.published
                    && (bbox.min_latitude..=bbox.max_latitude).contains(&s.latitude)
                    && (bbox.min_longitude..=bbox.max_longitude).contains(&s.longitude)
            })
            .cloned()
            .collect())
    }

    async fn find_by_owner_id(&self, owner_id: UserId) -> AppResult<Vec<ParkingSpace>> {
        let spaces = self.spaces.read().unwrap_or_else(|e| e.into_inner());
        let mut owned: Vec<ParkingSpace> = spaces
            .values()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn update(&self, event: UpdateSpace) -> AppResult<()> {
        let mut spaces = self.spaces.write().unwrap_or_else(|e| e.into_inner());
        let space = spaces.get_mut(&event.space_id).ok_or_else(|| {
            AppError::EntityNotFound(format!("space ({}) was not found", event.space_id))
        })?;

        if let Some(title) = event.title {
            space.title = title;
        }
        if let Some(description) = event.description {
            space.description = description;
        }
        if let Some(latitude) = event.latitude {
            space.latitude = latitude;
        }
        if let Some(longitude) = event.longitude {
            space.longitude = longitude;
        }
        if let Some(price_per_hour) = event.price_per_hour {
            space.price_per_hour = price_per_hour;
        }
        if let Some(tags) = event.tags {
            space.tags = tags;
        }
        if let Some(published) = event.published {
            space.published = published;
        }
        if let Some(requires_verification) = event.requires_verification {
            space.requires_verification = requires_verification;
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteSpace) -> AppResult<()> {
        let mut spaces = self.spaces.write().unwrap_or_else(|e| e.into_inner());
        spaces.remove(&event.space_id).ok_or_else(|| {
            AppError::EntityNotFound(format!("space ({}) was not found", event.space_id))
        })?;
        Ok(())
    }
}
