use crate::{
    extractor::AuthorizedUser,
    model::booking::{
        AvailabilityQuery, AvailabilityResponse, BookingResponse, CreateBookingRequest,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::{BookingId, SpaceId};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn create_booking(
    user: AuthorizedUser,
    Path(space_id): Path<SpaceId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    req.validate(&())?;

    registry
        .booking_service()
        .create_booking(space_id, user.id(), req.start_time, req.end_time)
        .await
        .map(|booking| (StatusCode::CREATED, Json(booking.into())))
}

pub async fn check_availability(
    Path(space_id): Path<SpaceId>,
    Query(query): Query<AvailabilityQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AvailabilityResponse>> {
    query.validate(&())?;

    registry
        .booking_service()
        .check_availability(space_id, query.start, query.end)
        .await
        .map(|available| Json(AvailabilityResponse { available }))
}

pub async fn list_space_bookings(
    user: AuthorizedUser,
    Path(space_id): Path<SpaceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    registry
        .booking_service()
        .list_bookings_for_space(space_id, user.id())
        .await
        .map(|bookings| Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

pub async fn list_my_bookings(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    registry
        .booking_service()
        .list_bookings_for_renter(user.id())
        .await
        .map(|bookings| Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

pub async fn cancel_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .booking_service()
        .cancel_booking(booking_id, user.id())
        .await
        .map(|_| StatusCode::OK)
}
