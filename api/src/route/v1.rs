use super::{booking::build_booking_routers, space::build_space_routers};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_space_routers())
        .merge(build_booking_routers());
    Router::new().nest("/api/v1", router)
}
