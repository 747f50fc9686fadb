use crate::model::id::{BookingId, SpaceId, UserId};
use crate::model::time_slot::TimeSlot;
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateBooking {
    pub space_id: SpaceId,
    pub rented_by: UserId,
    pub slot: TimeSlot,
    pub total_price: f64,
}

#[derive(Debug, new)]
pub struct CancelBooking {
    pub booking_id: BookingId,
    pub space_id: SpaceId,
    pub requested_user: UserId,
}
