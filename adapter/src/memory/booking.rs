use async_trait::async_trait;
use chrono::{DateTime, Utc};
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
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<HashMap<BookingId, Booking>>,
    // One async mutex per space; `reserve` holds it across the conflict
    // check and the insert, mirroring the SERIALIZABLE transaction in the
    // Postgres implementation.
    space_locks: Mutex<HashMap<SpaceId, Arc<tokio::sync::Mutex<()>>>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, space_id: SpaceId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.space_locks.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(locks.entry(space_id).or_default())
    }

    fn scan_conflict(&self, space_id: SpaceId, slot: &TimeSlot) -> bool {
        let bookings = self.bookings.read().unwrap_or_else(|e| e.into_inner());
        bookings.values().any(|b| {
            b.space_id == space_id
                && b.status == BookingStatus::Confirmed
                && b.start_time < slot.end()
                && slot.start() < b.end_time
        })
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn has_conflict(&self, space_id: SpaceId, slot: &TimeSlot) -> AppResult<bool> {
        Ok(self.scan_conflict(space_id, slot))
    }

    async fn reserve(&self, event: CreateBooking) -> AppResult<Booking> {
        let lock = self.lock_for(event.space_id);
        let _guard = lock.lock().await;

        if self.scan_conflict(event.space_id, &event.slot) {
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

        self.bookings
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(booking.booking_id, booking.clone());

        Ok(booking)
    }

    async fn release(&self, event: CancelBooking) -> AppResult<()> {
        let mut bookings = self.bookings.write().unwrap_or_else(|e| e.into_inner());
        let booking = bookings
            .get_mut(&event.booking_id)
            .filter(|b| b.status == BookingStatus::Confirmed)
            .ok_or_else(|| {
                AppError::EntityNotFound(format!(
                    "booking ({}) has no confirmed reservation to release",
                    event.booking_id
                ))
            })?;
        booking.status = BookingStatus::Cancelled;
        Ok(())
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let bookings = self.bookings.read().unwrap_or_else(|e| e.into_inner());
        Ok(bookings.get(&booking_id).cloned())
    }

    async fn find_by_space_id(&self, space_id: SpaceId) -> AppResult<Vec<Booking>> {
        let bookings = self.bookings.read().unwrap_or_else(|e| e.into_inner());
        let mut found: Vec<Booking> = bookings
            .values()
            .filter(|b| b.space_id == space_id)
            .cloned()
            .collect();
        found.sort_by_key(|b| b.start_time);
        Ok(found)
    }

    async fn find_by_renter_id(&self, renter_id: UserId) -> AppResult<Vec<Booking>> {
        let bookings = self.bookings.read().unwrap_or_else(|e| e.into_inner());
        let mut found: Vec<Booking> = bookings
            .values()
            .filter(|b| b.rented_by == renter_id)
            .cloned()
            .collect();
        found.sort_by_key(|b| b.start_time);
        Ok(found)
    }

    async fn has_confirmed_after(&self, space_id: SpaceId, at: DateTime<Utc>) -> AppResult<bool> {
        let bookings = self.bookings.read().unwrap_or_else(|e| e.into_inner());
        Ok(bookings.values().any(|b| {
            b.space_id == space_id && b.status == BookingStatus::Confirmed && b.end_time > at
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, min, 0).unwrap()
    }

    fn slot(start: (u32, u32), end: (u32, u32)) -> TimeSlot {
        TimeSlot::new(at(start.0, start.1), at(end.0, end.1)).unwrap()
    }

    #[tokio::test]
    async fn reserve_rejects_overlapping_slot() {
        let repo = InMemoryBookingRepository::new();
        let space_id = SpaceId::new();
        let renter = UserId::new();

        repo.reserve(CreateBooking::new(space_id, renter, slot((9, 0), (10, 0)), 10.0))
            .await
            .unwrap();

        let res = repo
            .reserve(CreateBooking::new(
                space_id,
                renter,
                slot((9, 30), (10, 30)),
                10.0,
            ))
            .await;
        assert!(matches!(res, Err(AppError::BookingConflict(_))));
    }

    #[tokio::test]
    async fn back_to_back_slots_do_not_conflict() {
        let repo = InMemoryBookingRepository::new();
        let space_id = SpaceId::new();
        let renter = UserId::new();

        repo.reserve(CreateBooking::new(space_id, renter, slot((9, 0), (10, 0)), 10.0))
            .await
            .unwrap();
        repo.reserve(CreateBooking::new(space_id, renter, slot((10, 0), (11, 0)), 10.0))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn same_slot_on_other_space_is_fine() {
        let repo = InMemoryBookingRepository::new();
        let renter = UserId::new();

        repo.reserve(CreateBooking::new(
            SpaceId::new(),
            renter,
            slot((9, 0), (10, 0)),
            10.0,
        ))
        .await
        .unwrap();
        repo.reserve(CreateBooking::new(
            SpaceId::new(),
            renter,
            slot((9, 0), (10, 0)),
            10.0,
        ))
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn release_frees_the_interval_once() {
        let repo = InMemoryBookingRepository::new();
        let space_id = SpaceId::new();
        let renter = UserId::new();

        let booking = repo
            .reserve(CreateBooking::new(space_id, renter, slot((9, 0), (10, 0)), 10.0))
            .await
            .unwrap();

        repo.release(CancelBooking::new(booking.booking_id, space_id, renter))
            .await
            .unwrap();

        // The interval is free again.
        repo.reserve(CreateBooking::new(space_id, renter, slot((9, 0), (10, 0)), 10.0))
            .await
            .unwrap();

        // A second release of the same booking is an error, not a double free.
        let res = repo
            .release(CancelBooking::new(booking.booking_id, space_id, renter))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn racing_reservations_have_exactly_one_winner() {
        let repo = Arc::new(InMemoryBookingRepository::new());
        let space_id = SpaceId::new();

        for _ in 0..16 {
            let a = {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.reserve(CreateBooking::new(
                        space_id,
                        UserId::new(),
                        slot((9, 0), (10, 0)),
                        10.0,
                    ))
                    .await
                })
            };
            let b = {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.reserve(CreateBooking::new(
                        space_id,
                        UserId::new(),
                        slot((9, 30), (10, 30)),
                        10.0,
                    ))
                    .await
                })
            };

            let (a, b) = (a.await.unwrap(), b.await.unwrap());
            let winners = [&a, &b].iter().filter(|r| r.is_ok()).count();
            assert_eq!(winners, 1, "exactly one racing booking must win");
            for r in [a, b] {
                if let Err(e) = r {
                    assert!(matches!(e, AppError::BookingConflict(_)));
                }
            }

            // Free the winner so the next round races on a clean ledger.
            let confirmed = repo.find_by_space_id(space_id).await.unwrap();
            for booking in confirmed
                .iter()
                .filter(|b| b.status == BookingStatus::Confirmed)
            {
                repo.release(CancelBooking::new(
                    booking.booking_id,
                    space_id,
                    booking.rented_by,
                ))
                .await
                .unwrap();
            }
        }
    }
}
