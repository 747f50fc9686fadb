use crate::model::{
    booking::{
        event::{CancelBooking, CreateBooking},
        Booking,
    },
    id::{BookingId, SpaceId, UserId},
    time_slot::TimeSlot,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::AppResult;

/// Availability ledger for a space's confirmed bookings.
///
/// `reserve` is the single point requiring mutual exclusion: the conflict
/// check and the insert happen in one critical section per space
/// (SERIALIZABLE transaction in Postgres, per-space lock in memory), so of
/// two racing reservations for overlapping slots exactly one succeeds.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn has_conflict(&self, space_id: SpaceId, slot: &TimeSlot) -> AppResult<bool>;
    async fn reserve(&self, event: CreateBooking) -> AppResult<Booking>;
    async fn release(&self, event: CancelBooking) -> AppResult<()>;
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    async fn find_by_space_id(&self, space_id: SpaceId) -> AppResult<Vec<Booking>>;
    async fn find_by_renter_id(&self, renter_id: UserId) -> AppResult<Vec<Booking>>;
    /// True when a confirmed booking on the space ends after `at`. Used to
    /// block deletion of spaces with outstanding bookings.
    async fn has_confirmed_after(&self, space_id: SpaceId, at: DateTime<Utc>) -> AppResult<bool>;
}
