pub mod event;

use crate::model::id::{BookingId, SpaceId, UserId};
use chrono::{DateTime, Utc};
use shared::error::AppError;

#[derive(Debug, Clone)]
pub struct Booking {
    pub booking_id: BookingId,
    pub space_id: SpaceId,
    pub rented_by: UserId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Price snapshot taken at booking time; later rate changes do not
    /// retroactively reprice the booking.
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for BookingStatus {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(AppError::ConversionEntityError(format!(
                "unknown booking status: {other}"
            ))),
        }
    }
}
