use crate::database::{model::space::SpaceRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
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

#[derive(new)]
pub struct SpaceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl SpaceRepository for SpaceRepositoryImpl {
    async fn create(&self, event: CreateSpace, owner_id: UserId) -> AppResult<SpaceId> {
        let space_id = SpaceId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO spaces
                (space_id, owner_id, title, description, latitude, longitude,
                 price_per_hour, tags, published, requires_verification)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(space_id)
        .bind(owner_id)
        .bind(event.title)
        .bind(event.description)
        .bind(event.latitude)
        .bind(event.longitude)
        .bind(event.price_per_hour)
        .bind(event.tags)
        .bind(event.published)
        .bind(event.requires_verification)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No space record has been created".into(),
            ));
        }

        Ok(space_id)
    }

    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<ParkingSpace>> {
        let row: Option<SpaceRow> = sqlx::query_as(
            r#"
                SELECT
                    space_id, owner_id, title, description, latitude, longitude,
                    price_per_hour, tags, published, requires_verification, created_at
                FROM spaces
                WHERE space_id = $1
            "#,
        )
        .bind(space_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(ParkingSpace::from))
    }

    async fn find_published(&self, limit: i64) -> AppResult<Vec<ParkingSpace>> {
        let rows: Vec<SpaceRow> = sqlx::query_as(
            r#"
                SELECT
                    space_id, owner_id, title, description, latitude, longitude,
                    price_per_hour, tags, published, requires_verification, created_at
                FROM spaces
                WHERE published = TRUE
                ORDER BY created_at DESC
                LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(ParkingSpace::from).collect())
    }

    async fn find_published_in_box(&self, bbox: &BoundingBox) -> AppResult<Vec<ParkingSpace>> {
        let rows: Vec<SpaceRow> = sqlx::query_as(
            r#"
                SELECT
                    space_id, owner_id, title, description, latitude, longitude,
                    price_per_hour, tags, published, requires_verification, created_at
                FROM spaces
                WHERE published = TRUE
                  AND latitude BETWEEN $1 AND $2
                  AND longitude BETWEEN $3 AND $4
            "#,
        )
        .bind(bbox.min_latitude)
        .bind(bbox.max_latitude)
        .bind(bbox.min_longitude)
        .bind(bbox.max_longitude)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(ParkingSpace::from).collect())
    }

    async fn find_by_owner_id(&self, owner_id: UserId) -> AppResult<Vec<ParkingSpace>> {
        let rows: Vec<SpaceRow> = sqlx::query_as(
            r#"
                SELECT
                    space_id, owner_id, title, description, latitude, longitude,
                    price_per_hour, tags, published, requires_verification, created_at
                FROM spaces
                WHERE owner_id = $1
                ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(ParkingSpace::from).collect())
    }

    async fn update(&self, event: UpdateSpace) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE spaces
                SET title = COALESCE($2, title),
                    description = COALESCE($3, description),
                    latitude = COALESCE($4, latitude),
                    longitude = COALESCE($5, longitude),
                    price_per_hour = COALESCE($6, price_per_hour),
                    tags = COALESCE($7, tags),
                    published = COALESCE($8, published),
                    requires_verification = COALESCE($9, requires_verification)
                WHERE space_id = $1
            "#,
        )
        .bind(event.space_id)
        .bind(event.title)
        .bind(event.description)
        .bind(event.latitude)
        .bind(event.longitude)
        .bind(event.price_per_hour)
        .bind(event.tags)
        .bind(event.published)
        .bind(event.requires_verification)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "space ({}) was not found",
                event.space_id
            )));
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteSpace) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM spaces WHERE space_id = $1")
            .bind(event.space_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "space ({}) was not found",
                event.space_id
            )));
        }

        Ok(())
    }
}
