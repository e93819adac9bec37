use axum::{
    Json, Router,
    extract::State,
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::wishes::{AddWishRequest, SetWishQuantityRequest, WishList, WishRemoval},
    error::AppResult,
    middleware::{
        auth::AuthMember,
        extract::{AppJson, AppPath},
    },
    models::Wish,
    response::ApiResponse,
    services::wishlist_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_wish_list).post(add_wish))
        .route(
            "/{product_id}",
            put(set_wish_quantity).delete(remove_wish),
        )
}

#[utoipa::path(
    get,
    path = "/api/wishlist",
    responses(
        (status = 200, description = "Wishlist of the current member", body = ApiResponse<WishList>),
        (status = 400, description = "Member not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn get_wish_list(
    State(state): State<AppState>,
    member: AuthMember,
) -> AppResult<Json<ApiResponse<WishList>>> {
    let resp = wishlist_service::get_wish_list(&state, &member).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/wishlist",
    request_body = AddWishRequest,
    responses(
        (status = 200, description = "Added, or quantity incremented", body = ApiResponse<Wish>),
        (status = 400, description = "Member or product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn add_wish(
    State(state): State<AppState>,
    member: AuthMember,
    AppJson(payload): AppJson<AddWishRequest>,
) -> AppResult<Json<ApiResponse<Wish>>> {
    let resp = wishlist_service::add_wishes(&state, &member, payload.product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/wishlist/{product_id}",
    params(
        ("product_id" = Uuid, Path, description = "Product ID")
    ),
    request_body = SetWishQuantityRequest,
    responses(
        (status = 200, description = "Quantity set", body = ApiResponse<Wish>),
        (status = 400, description = "No such item in wishlist")
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn set_wish_quantity(
    State(state): State<AppState>,
    member: AuthMember,
    AppPath(product_id): AppPath<Uuid>,
    AppJson(payload): AppJson<SetWishQuantityRequest>,
) -> AppResult<Json<ApiResponse<Wish>>> {
    let resp =
        wishlist_service::set_wish_list_number(&state, &member, product_id, payload.quantity)
            .await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/wishlist/{product_id}",
    params(
        ("product_id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Removed (or nothing to remove)", body = ApiResponse<WishRemoval>),
        (status = 400, description = "Member not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn remove_wish(
    State(state): State<AppState>,
    member: AuthMember,
    AppPath(product_id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<WishRemoval>>> {
    let resp = wishlist_service::remove_wish_list_product(&state, &member, product_id).await?;
    Ok(Json(resp))
}
