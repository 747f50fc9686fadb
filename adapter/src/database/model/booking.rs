use chrono::{DateTime, Utc};
use kernel::model::{
    booking::{Booking, BookingStatus},
    id::{BookingId, SpaceId, UserId},
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub space_id: SpaceId,
    pub rented_by: UserId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_price: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(value: BookingRow) -> Result<Self, Self::Error> {
        let BookingRow {
            booking_id,
            space_id,
            rented_by,
            start_time,
            end_time,
            total_price,
            status,
            created_at,
        } = value;
        Ok(Booking {
            booking_id,
            space_id,
            rented_by,
            start_time,
            end_time,
            total_price,
            status: BookingStatus::try_from(status.as_str())?,
            created_at,
        })
    }
}
