use crate::database::{model::booking::BookingRow, ConnectionPool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::model::{
    booking::{
        event::{CancelBooking, CreateBooking},
        Booking, BookingStatus,
    },
    id::{BookingId, SpaceId, UserId},
    time_slot::TimeSlot,
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

// SQLSTATE for serialization_failure, raised when SERIALIZABLE aborts one
// of two racing transactions.
const SERIALIZATION_FAILURE: &str = "40001";

// Racing reservations that both pass the overlap check get aborted by the
// SERIALIZABLE machinery on insert or commit; that loser lost the race to
// a conflicting booking, so it reports a conflict, not an infra failure.
fn conflict_on_serialization(
    err: sqlx::Error,
    space_id: SpaceId,
    fallback: fn(sqlx::Error) -> AppError,
) -> AppError {
    let serialization_failure = err
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == SERIALIZATION_FAILURE)
        .unwrap_or(false);

    if serialization_failure {
        AppError::BookingConflict(format!(
            "space ({space_id}) is not available for this time"
        ))
    } else {
        fallback(err)
    }
}

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

impl BookingRepositoryImpl {
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}

// Overlap condition for half-open [start, end) intervals:
//   existing.start < new.end AND new.start < existing.end
// Bookings that merely share an endpoint (back-to-back) do not match.
const OVERLAP_QUERY: &str = r#"
    SELECT booking_id
    FROM bookings
    WHERE space_id = $1
      AND status = 'confirmed'
      AND start_time < $3
      AND $2 < end_time
    LIMIT 1
"#;

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn has_conflict(&self, space_id: SpaceId, slot: &TimeSlot) -> AppResult<bool> {
        let row = sqlx::query(OVERLAP_QUERY)
            .bind(space_id)
            .bind(slot.start())
            .bind(slot.end())
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        Ok(row.is_some())
    }

    async fn reserve(&self, event: CreateBooking) -> AppResult<Booking> {
        let mut tx = self.db.begin().await?;

        // The conflict check and the insert must be one critical section;
        // SERIALIZABLE makes two racing overlapping reservations fail one
        // of the transactions instead of double-booking.
        self.set_transaction_serializable(&mut tx).await?;

        let conflict = sqlx::query(OVERLAP_QUERY)
            .bind(event.space_id)
            .bind(event.slot.start())
            .bind(event.slot.end())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                conflict_on_serialization(e, event.space_id, AppError::SpecificOperationError)
            })?;

        if conflict.is_some() {
            return Err(AppError::BookingConflict(format!(
                "space ({}) is not available for this time",
                event.space_id
            )));
        }

        let booking = Booking {
            booking_id: BookingId::new(),
            space_id: event.space_id,
            rented_by: event.rented_by,
            start_time: event.slot.start(),
            end_time: event.slot.end(),
            total_price: event.total_price,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        };

        let res = sqlx::query(
            r#"
                INSERT INTO bookings
                (booking_id, space_id, rented_by, start_time, end_time,
                 total_price, status, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(booking.booking_id)
        .bind(booking.space_id)
        .bind(booking.rented_by)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(booking.total_price)
        .bind(booking.status.as_str())
        .bind(booking.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            conflict_on_serialization(e, event.space_id, AppError::SpecificOperationError)
        })?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been created".into(),
            ));
        }

        tx.commit()
            .await
            .map_err(|e| conflict_on_serialization(e, event.space_id, AppError::TransactionError))?;

        Ok(booking)
    }

    async fn release(&self, event: CancelBooking) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE bookings
                SET status = 'cancelled'
                WHERE booking_id = $1
                  AND status = 'confirmed'
            "#,
        )
        .bind(event.booking_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "booking ({}) has no confirmed reservation to release",
                event.booking_id
            )));
        }

        Ok(())
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let row: Option<BookingRow> = sqlx::query_as(
            r#"
                SELECT booking_id, space_id, rented_by, start_time, end_time,
                       total_price, status, created_at
                FROM bookings
                WHERE booking_id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Booking::try_from).transpose()
    }

    async fn find_by_space_id(&self, space_id: SpaceId) -> AppResult<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            r#"
                SELECT booking_id, space_id, rented_by, start_time, end_time,
                       total_price, status, created_at
                FROM bookings
                WHERE space_id = $1
                ORDER BY start_time
            "#,
        )
        .bind(space_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn find_by_renter_id(&self, renter_id: UserId) -> AppResult<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            r#"
                SELECT booking_id, space_id, rented_by, start_time, end_time,
                       total_price, status, created_at
                FROM bookings
                WHERE rented_by = $1
                ORDER BY start_time
            "#,
        )
        .bind(renter_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn has_confirmed_after(&self, space_id: SpaceId, at: DateTime<Utc>) -> AppResult<bool> {
        let row = sqlx::query(
            r#"
                SELECT booking_id
                FROM bookings
                WHERE space_id = $1
                  AND status = 'confirmed'
                  AND end_time > $2
                LIMIT 1
            "#,
        )
        .bind(space_id)
        .bind(at)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.is_some())
    }
}
