use adapter::memory::{
    account::InMemoryAccountProvider, booking::InMemoryBookingRepository,
    notifier::RecordingNotifier, space::InMemorySpaceRepository,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use kernel::model::{
    booking::BookingStatus,
    geo::GeoQuery,
    id::{SpaceId, UserId},
    price::PriceRange,
    space::event::{CreateSpace, DeleteSpace, UpdateSpace},
};
use kernel::service::{booking::BookingService, search::SearchService, space::SpaceService};
use shared::error::AppError;
use std::sync::Arc;

struct TestApp {
    accounts: Arc<InMemoryAccountProvider>,
    notifier: Arc<RecordingNotifier>,
    space_service: SpaceService,
    booking_service: BookingService,
    search_service: SearchService,
}

fn test_app() -> TestApp {
    test_app_with_notifier(Arc::new(RecordingNotifier::new()))
}

fn test_app_with_notifier(notifier: Arc<RecordingNotifier>) -> TestApp {
    let spaces = Arc::new(InMemorySpaceRepository::new());
    let bookings = Arc::new(InMemoryBookingRepository::new());
    let accounts = Arc::new(InMemoryAccountProvider::new());

    TestApp {
        accounts: Arc::clone(&accounts),
        notifier: Arc::clone(&notifier),
        space_service: SpaceService::new(spaces.clone(), bookings.clone()),
        booking_service: BookingService::new(
            spaces.clone(),
            bookings.clone(),
            accounts,
            notifier,
        ),
        search_service: SearchService::new(spaces),
    }
}

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, hour, min, 0).unwrap()
}

fn sf_space() -> CreateSpace {
    CreateSpace::new(
        "Valencia St garage".into(),
        "Gated garage spot near 16th".into(),
        37.7749,
        -122.4194,
        10.0,
        vec!["covered".into()],
        true,
        false,
    )
}

async fn register_sf_space(app: &TestApp, owner: UserId) -> SpaceId {
    app.space_service.register(sf_space(), owner).await.unwrap()
}

#[tokio::test]
async fn booking_scenario_with_conflict_back_to_back_and_cancel() {
    let app = test_app();
    let owner = UserId::new();
    let renter = UserId::new();
    let space_id = register_sf_space(&app, owner).await;

    // A: 09:00-10:00 at 10.0/hr.
    let a = app
        .booking_service
        .create_booking(space_id, renter, at(9, 0), at(10, 0))
        .await
        .unwrap();
    assert_eq!(a.total_price, 10.0);
    assert_eq!(a.status, BookingStatus::Confirmed);

    // B overlaps A and must be rejected.
    let b = app
        .booking_service
        .create_booking(space_id, UserId::new(), at(9, 30), at(10, 30))
        .await;
    assert!(matches!(b, Err(AppError::BookingConflict(_))));

    // C starts exactly where A ends; back-to-back is allowed.
    app.booking_service
        .create_booking(space_id, UserId::new(), at(10, 0), at(11, 0))
        .await
        .unwrap();

    // Cancelling A frees its interval for D.
    app.booking_service
        .cancel_booking(a.booking_id, renter)
        .await
        .unwrap();
    let d = app
        .booking_service
        .create_booking(space_id, UserId::new(), at(9, 0), at(9, 30))
        .await
        .unwrap();
    assert_eq!(d.total_price, 5.0);
}

#[tokio::test]
async fn concurrent_overlapping_bookings_have_one_winner() {
    let app = Arc::new(test_app());
    let owner = UserId::new();
    let space_id = register_sf_space(&app, owner).await;

    let first = {
        let app = Arc::clone(&app);
        tokio::spawn(async move {
            app.booking_service
                .create_booking(space_id, UserId::new(), at(9, 0), at(10, 0))
                .await
        })
    };
    let second = {
        let app = Arc::clone(&app);
        tokio::spawn(async move {
            app.booking_service
                .create_booking(space_id, UserId::new(), at(9, 30), at(10, 30))
                .await
        })
    };

    let results = [first.await.unwrap(), second.await.unwrap()];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let conflict = results.iter().find(|r| r.is_err()).unwrap();
    assert!(matches!(conflict, Err(AppError::BookingConflict(_))));
}

#[tokio::test]
async fn verification_gate_blocks_until_verified() {
    let app = test_app();
    let owner = UserId::new();
    let renter = UserId::new();

    let mut gated = sf_space();
    gated.requires_verification = true;
    let space_id = app.space_service.register(gated, owner).await.unwrap();

    let res = app
        .booking_service
        .create_booking(space_id, renter, at(9, 0), at(10, 0))
        .await;
    assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));

    app.accounts.set_verified(renter, true);
    app.booking_service
        .create_booking(space_id, renter, at(9, 0), at(10, 0))
        .await
        .unwrap();
}

#[tokio::test]
async fn reversed_or_empty_interval_is_rejected() {
    let app = test_app();
    let owner = UserId::new();
    let space_id = register_sf_space(&app, owner).await;

    let reversed = app
        .booking_service
        .create_booking(space_id, UserId::new(), at(10, 0), at(9, 0))
        .await;
    assert!(matches!(reversed, Err(AppError::InvalidTimeRange(_))));

    let empty = app
        .booking_service
        .create_booking(space_id, UserId::new(), at(9, 0), at(9, 0))
        .await;
    assert!(matches!(empty, Err(AppError::InvalidTimeRange(_))));
}

#[tokio::test]
async fn booking_unknown_or_unpublished_space_fails() {
    let app = test_app();
    let owner = UserId::new();

    let missing = app
        .booking_service
        .create_booking(SpaceId::new(), UserId::new(), at(9, 0), at(10, 0))
        .await;
    assert!(matches!(missing, Err(AppError::EntityNotFound(_))));

    // The space lookup runs first; a bad interval on an unknown space is
    // still reported as not-found.
    let missing_and_reversed = app
        .booking_service
        .create_booking(SpaceId::new(), UserId::new(), at(10, 0), at(9, 0))
        .await;
    assert!(matches!(
        missing_and_reversed,
        Err(AppError::EntityNotFound(_))
    ));

    let mut hidden = sf_space();
    hidden.published = false;
    let space_id = app.space_service.register(hidden, owner).await.unwrap();
    let unpublished = app
        .booking_service
        .create_booking(space_id, UserId::new(), at(9, 0), at(10, 0))
        .await;
    assert!(matches!(unpublished, Err(AppError::UnprocessableEntity(_))));
}

#[tokio::test]
async fn cancel_is_renter_only_and_not_repeatable() {
    let app = test_app();
    let owner = UserId::new();
    let renter = UserId::new();
    let space_id = register_sf_space(&app, owner).await;

    let booking = app
        .booking_service
        .create_booking(space_id, renter, at(9, 0), at(10, 0))
        .await
        .unwrap();

    let stranger = app
        .booking_service
        .cancel_booking(booking.booking_id, UserId::new())
        .await;
    assert!(matches!(stranger, Err(AppError::ForbiddenOperation(_))));

    app.booking_service
        .cancel_booking(booking.booking_id, renter)
        .await
        .unwrap();

    let again = app
        .booking_service
        .cancel_booking(booking.booking_id, renter)
        .await;
    assert!(matches!(again, Err(AppError::EntityNotFound(_))));

    // The record is kept for history.
    let history = app
        .booking_service
        .list_bookings_for_space(space_id, owner)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn space_booking_list_is_owner_only() {
    let app = test_app();
    let owner = UserId::new();
    let space_id = register_sf_space(&app, owner).await;

    let res = app
        .booking_service
        .list_bookings_for_space(space_id, UserId::new())
        .await;
    assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));

    assert!(app
        .booking_service
        .list_bookings_for_space(space_id, owner)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn renter_sees_own_bookings() {
    let app = test_app();
    let owner = UserId::new();
    let renter = UserId::new();
    let space_id = register_sf_space(&app, owner).await;

    app.booking_service
        .create_booking(space_id, renter, at(9, 0), at(10, 0))
        .await
        .unwrap();
    app.booking_service
        .create_booking(space_id, UserId::new(), at(10, 0), at(11, 0))
        .await
        .unwrap();

    let mine = app
        .booking_service
        .list_bookings_for_renter(renter)
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].rented_by, renter);
}

#[tokio::test]
async fn availability_probe_reflects_the_ledger() {
    let app = test_app();
    let owner = UserId::new();
    let space_id = register_sf_space(&app, owner).await;

    assert!(app
        .booking_service
        .check_availability(space_id, at(9, 0), at(10, 0))
        .await
        .unwrap());

    app.booking_service
        .create_booking(space_id, UserId::new(), at(9, 0), at(10, 0))
        .await
        .unwrap();

    assert!(!app
        .booking_service
        .check_availability(space_id, at(9, 30), at(10, 30))
        .await
        .unwrap());
    assert!(app
        .booking_service
        .check_availability(space_id, at(10, 0), at(11, 0))
        .await
        .unwrap());

    let missing = app
        .booking_service
        .check_availability(SpaceId::new(), at(9, 0), at(10, 0))
        .await;
    assert!(matches!(missing, Err(AppError::EntityNotFound(_))));
}

#[tokio::test]
async fn search_applies_radius_price_and_ordering() {
    let app = test_app();
    let owner = UserId::new();

    let near = register_sf_space(&app, owner).await;

    // ~1.1 km north of the query center.
    let mut farther = sf_space();
    farther.title = "Fell St lot".into();
    farther.latitude = 37.7849;
    let farther_id = app.space_service.register(farther, owner).await.unwrap();

    let mut pricey = sf_space();
    pricey.price_per_hour = 50.0;
    app.space_service.register(pricey, owner).await.unwrap();

    let mut hidden = sf_space();
    hidden.published = false;
    app.space_service.register(hidden, owner).await.unwrap();

    let query = GeoQuery::new(37.7749, -122.4194, 2.0).unwrap();
    let hits = app
        .search_service
        .search(query, PriceRange::new(None, Some(15.0)))
        .await
        .unwrap();

    let ids: Vec<SpaceId> = hits.iter().map(|h| h.space.space_id).collect();
    assert_eq!(ids, vec![near, farther_id], "nearest-first, filtered");
    assert!(hits[0].distance_km < hits[1].distance_km);

    // The same space disappears when the query center moves well outside
    // the bounding box.
    let far_query = GeoQuery::new(37.7749 + 1.0, -122.4194, 2.0).unwrap();
    let far_hits = app
        .search_service
        .search(far_query, PriceRange::default())
        .await
        .unwrap();
    assert!(far_hits.is_empty());
}

#[tokio::test]
async fn delete_is_blocked_while_confirmed_future_bookings_exist() {
    let app = test_app();
    let owner = UserId::new();
    let renter = UserId::new();
    let space_id = register_sf_space(&app, owner).await;

    let start = Utc::now() + Duration::days(1);
    let booking = app
        .booking_service
        .create_booking(space_id, renter, start, start + Duration::hours(2))
        .await
        .unwrap();

    let stranger = app
        .space_service
        .delete(DeleteSpace::new(space_id, UserId::new()))
        .await;
    assert!(matches!(stranger, Err(AppError::ForbiddenOperation(_))));

    let blocked = app
        .space_service
        .delete(DeleteSpace::new(space_id, owner))
        .await;
    assert!(matches!(blocked, Err(AppError::UnprocessableEntity(_))));

    app.booking_service
        .cancel_booking(booking.booking_id, renter)
        .await
        .unwrap();
    app.space_service
        .delete(DeleteSpace::new(space_id, owner))
        .await
        .unwrap();

    let gone = app.space_service.find(space_id).await;
    assert!(matches!(gone, Err(AppError::EntityNotFound(_))));
}

#[tokio::test]
async fn update_is_owner_only_and_partial() {
    let app = test_app();
    let owner = UserId::new();
    let space_id = register_sf_space(&app, owner).await;

    let stranger_update = UpdateSpace::new(
        space_id,
        None,
        None,
        None,
        None,
        Some(12.0),
        None,
        None,
        None,
        UserId::new(),
    );
    assert!(matches!(
        app.space_service.update(stranger_update).await,
        Err(AppError::ForbiddenOperation(_))
    ));

    let update = UpdateSpace::new(
        space_id,
        None,
        None,
        None,
        None,
        Some(12.0),
        None,
        Some(false),
        None,
        owner,
    );
    app.space_service.update(update).await.unwrap();

    let space = app.space_service.find(space_id).await.unwrap();
    assert_eq!(space.price_per_hour, 12.0);
    assert!(!space.published);
    assert_eq!(space.title, "Valencia St garage");
}

#[tokio::test]
async fn booking_notification_is_best_effort() {
    // Happy path: the renter gets a "rate your stay" nudge.
    let app = test_app();
    let owner = UserId::new();
    let renter = UserId::new();
    let space_id = register_sf_space(&app, owner).await;

    app.booking_service
        .create_booking(space_id, renter, at(9, 0), at(10, 0))
        .await
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    let sent = app.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, renter);
    assert!(sent[0].1.contains("rate your stay"));

    // A broken sink must never fail the booking.
    let failing = test_app_with_notifier(Arc::new(RecordingNotifier::failing()));
    let owner = UserId::new();
    let space_id = register_sf_space(&failing, owner).await;
    failing
        .booking_service
        .create_booking(space_id, UserId::new(), at(9, 0), at(10, 0))
        .await
        .unwrap();
}
