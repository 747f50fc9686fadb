use crate::{
    extractor::AuthorizedUser,
    model::space::{
        CreateSpaceRequest, SearchSpacesQuery, SearchedSpaceResponse, SpaceCreatedResponse,
        SpaceListQuery, SpaceResponse, UpdateSpaceRequest, UpdateSpaceRequestWithIds,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    geo::GeoQuery,
    id::SpaceId,
    price::PriceRange,
    space::event::DeleteSpace,
};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn register_space(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateSpaceRequest>,
) -> AppResult<(StatusCode, Json<SpaceCreatedResponse>)> {
    req.validate(&())?;

    registry
        .space_service()
        .register(req.into(), user.id())
        .await
        .map(|id| (StatusCode::CREATED, Json(SpaceCreatedResponse { id })))
}

pub async fn show_space_list(
    Query(query): Query<SpaceListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<SpaceResponse>>> {
    query.validate(&())?;

    registry
        .space_service()
        .list_published(query.limit)
        .await
        .map(|spaces| Json(spaces.into_iter().map(SpaceResponse::from).collect()))
}

pub async fn search_spaces(
    Query(query): Query<SearchSpacesQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<SearchedSpaceResponse>>> {
    query.validate(&())?;

    let geo_query = GeoQuery::new(query.lat, query.lng, query.radius)?;
    let price = PriceRange::new(query.min_price, query.max_price);

    registry
        .search_service()
        .search(geo_query, price)
        .await
        .map(|hits| Json(hits.into_iter().map(SearchedSpaceResponse::from).collect()))
}

pub async fn show_my_spaces(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<SpaceResponse>>> {
    registry
        .space_service()
        .list_owned(user.id())
        .await
        .map(|spaces| Json(spaces.into_iter().map(SpaceResponse::from).collect()))
}

pub async fn show_space(
    Path(space_id): Path<SpaceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SpaceResponse>> {
    registry
        .space_service()
        .find(space_id)
        .await
        .map(|space| Json(space.into()))
}

pub async fn update_space(
    user: AuthorizedUser,
    Path(space_id): Path<SpaceId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateSpaceRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let update_space = UpdateSpaceRequestWithIds::new(space_id, user.id(), req);
    registry
        .space_service()
        .update(update_space.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_space(
    user: AuthorizedUser,
    Path(space_id): Path<SpaceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let delete_space = DeleteSpace {
        space_id,
        requested_user: user.id(),
    };
    registry
        .space_service()
        .delete(delete_space)
        .await
        .map(|_| StatusCode::OK)
}
