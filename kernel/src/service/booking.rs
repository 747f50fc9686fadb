use crate::model::{
    booking::{
        event::{CancelBooking, CreateBooking},
        Booking, BookingStatus,
    },
    id::{BookingId, SpaceId, UserId},
    time_slot::TimeSlot,
};
use crate::repository::{
    account::AccountProvider, booking::BookingRepository, notifier::NotificationSink,
    space::SpaceRepository,
};
use chrono::{DateTime, Utc};
use derive_new::new;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

#[derive(new)]
pub struct BookingService {
    spaces: Arc<dyn SpaceRepository>,
    bookings: Arc<dyn BookingRepository>,
    accounts: Arc<dyn AccountProvider>,
    notifier: Arc<dyn NotificationSink>,
}

impl BookingService {
    /// Creates a confirmed booking, or fails with a typed error. Checks run
    /// in order: unknown space, unpublished space, verification gating,
    /// reversed interval, then the atomic conflict check.
    pub async fn create_booking(
        &self,
        space_id: SpaceId,
        renter_id: UserId,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> AppResult<Booking> {
        let space = self
            .spaces
            .find_by_id(space_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("space ({space_id}) was not found")))?;

        if !space.published {
            return Err(AppError::UnprocessableEntity(format!(
                "space ({space_id}) is not published"
            )));
        }

        if space.requires_verification && !self.accounts.is_verified(renter_id).await? {
            return Err(AppError::ForbiddenOperation(
                "this space only accepts verified renters".into(),
            ));
        }

        let slot = TimeSlot::new(start_time, end_time)?;

        // Price snapshot: the rate at booking time is what the renter pays.
        let total_price = slot.duration_hours() * space.price_per_hour;

        // The conflict check and the insert are one critical section inside
        // the repository; racing requests end up with exactly one winner.
        let booking = self
            .bookings
            .reserve(CreateBooking::new(space_id, renter_id, slot, total_price))
            .await?;

        // Best-effort side channel, decoupled from the booking itself and
        // from any ledger lock. A delivery failure is logged and dropped.
        let notifier = Arc::clone(&self.notifier);
        let booking_id = booking.booking_id;
        tokio::spawn(async move {
            let message = format!(
                "Your booking ({booking_id}) is confirmed. Don't forget to rate your stay!"
            );
            if let Err(e) = notifier.notify(renter_id, &message).await {
                tracing::warn!(
                    error.message = %e,
                    %booking_id,
                    "failed to deliver booking notification"
                );
            }
        });

        Ok(booking)
    }

    /// Cancels a confirmed booking. Only the renter may cancel; the record
    /// is kept for history and the interval is freed. A second cancel of
    /// the same booking fails with `EntityNotFound`.
    pub async fn cancel_booking(
        &self,
        booking_id: BookingId,
        requested_user: UserId,
    ) -> AppResult<()> {
        let booking = self.bookings.find_by_id(booking_id).await?.ok_or_else(|| {
            AppError::EntityNotFound(format!("booking ({booking_id}) was not found"))
        })?;

        if booking.rented_by != requested_user {
            return Err(AppError::ForbiddenOperation(
                "only the renter can cancel this booking".into(),
            ));
        }

        if booking.status == BookingStatus::Cancelled {
            return Err(AppError::EntityNotFound(format!(
                "booking ({booking_id}) is already cancelled"
            )));
        }

        self.bookings
            .release(CancelBooking::new(
                booking_id,
                booking.space_id,
                requested_user,
            ))
            .await
    }

    /// Booking list for a space, restricted to its owner.
    pub async fn list_bookings_for_space(
        &self,
        space_id: SpaceId,
        requested_user: UserId,
    ) -> AppResult<Vec<Booking>> {
        let space = self
            .spaces
            .find_by_id(space_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("space ({space_id}) was not found")))?;

        if space.owner_id != requested_user {
            return Err(AppError::ForbiddenOperation(
                "only the space owner can list its bookings".into(),
            ));
        }

        self.bookings.find_by_space_id(space_id).await
    }

    pub async fn list_bookings_for_renter(&self, renter_id: UserId) -> AppResult<Vec<Booking>> {
        self.bookings.find_by_renter_id(renter_id).await
    }

    /// Non-binding availability probe. A positive answer can be stale by
    /// the time the booking request lands; `create_booking` re-checks
    /// atomically.
    pub async fn check_availability(
        &self,
        space_id: SpaceId,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> AppResult<bool> {
        if self.spaces.find_by_id(space_id).await?.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "space ({space_id}) was not found"
            )));
        }
        let slot = TimeSlot::new(start_time, end_time)?;
        Ok(!self.bookings.has_conflict(space_id, &slot).await?)
    }
}
