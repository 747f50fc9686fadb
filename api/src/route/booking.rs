use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{cancel_booking, list_my_bookings};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let bookings_routers = Router::new()
        .route("/mine", get(list_my_bookings))
        .route("/:booking_id/cancel", put(cancel_booking));

    Router::new().nest("/bookings", bookings_routers)
}
