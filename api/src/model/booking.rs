use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    booking::Booking,
    id::{BookingId, SpaceId, UserId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    // Interval ordering is enforced by the domain (TimeSlot), not here.
    #[garde(skip)]
    pub start_time: DateTime<Utc>,
    #[garde(skip)]
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AvailabilityQuery {
    #[garde(skip)]
    pub start: DateTime<Utc>,
    #[garde(skip)]
    pub end: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub available: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: BookingId,
    pub space_id: SpaceId,
    pub renter_id: UserId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_price: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            space_id,
            rented_by,
            start_time,
            end_time,
            total_price,
            status,
            created_at,
        } = value;
        Self {
            id: booking_id,
            space_id,
            renter_id: rented_by,
            start_time,
            end_time,
            total_price,
            status: status.as_str().to_string(),
            created_at,
        }
    }
}
