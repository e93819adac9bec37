use sea_orm::{DbErr, TransactionTrait};
use uuid::Uuid;

use crate::{
    audit,
    dto::products::{ProductList, ProductPayload},
    error::{AppError, AppResult, is_constraint_violation},
    middleware::auth::AuthMember,
    models::Product,
    repository::{self, products::NewProduct},
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    state::AppState,
    validator::{self, no_such_product},
};

const INVALID_PRODUCT_VALUE: &str =
    "invalid product value; check the field descriptions and try again";

fn map_store_error(err: DbErr) -> AppError {
    if is_constraint_violation(&err) {
        AppError::BadRequest(INVALID_PRODUCT_VALUE.to_string())
    } else {
        AppError::Database(err)
    }
}

pub async fn get_product_list(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, _) = query.pagination().normalize();
    let request = query.page_request();

    let (rows, total) = repository::products::find_page(&state.orm, request).await?;
    tracing::debug!(page, limit, total, "listed products");

    let items = rows.into_iter().map(Product::from).collect();
    let meta = Meta::new(page, limit, total as i64);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = repository::products::find_by_id(&state.orm, id)
        .await?
        .ok_or_else(|| no_such_product(id))?;
    Ok(ApiResponse::success("Product", product.into(), None))
}

pub async fn add_product(
    state: &AppState,
    actor: &AuthMember,
    payload: ProductPayload,
) -> AppResult<ApiResponse<Product>> {
    payload.validate()?;

    let txn = state.orm.begin().await?;
    let actor = validator::validate_member(&txn, actor).await?;
    let product = repository::products::insert(
        &txn,
        NewProduct {
            name: payload.name.trim().to_string(),
            price: payload.price,
            image_url: payload.image_url.trim().to_string(),
        },
    )
    .await
    .map_err(map_store_error)?;
    txn.commit().await.map_err(map_store_error)?;

    tracing::info!(product_id = %product.id, "product created");
    audit::record(
        &state.orm,
        Some(actor.id),
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        product.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    actor: &AuthMember,
    id: Uuid,
    payload: ProductPayload,
) -> AppResult<ApiResponse<Product>> {
    if payload.id != Some(id) {
        return Err(AppError::InvalidId(format!(
            "path id {id} does not match the payload id"
        )));
    }

    let txn = state.orm.begin().await?;
    let actor = validator::validate_member(&txn, actor).await?;
    let existing = repository::products::find_by_id(&txn, id)
        .await?
        .ok_or_else(|| no_such_product(id))?;

    payload.validate()?;

    let product = repository::products::change(
        &txn,
        existing,
        payload.name.trim().to_string(),
        payload.price,
        payload.image_url.trim().to_string(),
    )
    .await
    .map_err(map_store_error)?;
    txn.commit().await.map_err(map_store_error)?;

    tracing::info!(product_id = %product.id, "product updated");
    audit::record(
        &state.orm,
        Some(actor.id),
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        product.into(),
        Some(Meta::empty()),
    ))
}

/// Deletes the product's wishes, then the product, in one transaction.
pub async fn delete_product(
    state: &AppState,
    actor: &AuthMember,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;
    let actor = validator::validate_member(&txn, actor).await?;
    let removed_wishes = repository::wishes::delete_by_product(&txn, id).await?;
    let deleted = repository::products::delete_by_id(&txn, id).await?;

    if deleted == 0 {
        return Err(no_such_product(id));
    }
    txn.commit().await?;

    tracing::info!(product_id = %id, removed_wishes, "product deleted");
    audit::record(
        &state.orm,
        Some(actor.id),
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id, "removed_wishes": removed_wishes }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "removed_wishes": removed_wishes }),
        Some(Meta::empty()),
    ))
}
