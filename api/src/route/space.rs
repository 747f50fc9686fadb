use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{check_availability, create_booking, list_space_bookings};
use crate::handler::space::{
    delete_space, register_space, search_spaces, show_my_spaces, show_space, show_space_list,
    update_space,
};

pub fn build_space_routers() -> Router<AppRegistry> {
    let spaces_routers = Router::new()
        .route("/", post(register_space))
        .route("/", get(show_space_list))
        .route("/search", get(search_spaces))
        .route("/mine", get(show_my_spaces))
        .route("/:space_id", get(show_space))
        .route("/:space_id", put(update_space))
        .route("/:space_id", delete(delete_space))
        .route("/:space_id/availability", get(check_availability))
        .route("/:space_id/bookings", post(create_booking))
        .route("/:space_id/bookings", get(list_space_bookings));

    Router::new().nest("/spaces", spaces_routers)
}
