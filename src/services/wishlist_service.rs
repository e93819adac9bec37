use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::{
    audit,
    dto::wishes::{WishList, WishListItem, WishRemoval},
    error::{AppError, AppResult},
    middleware::auth::AuthMember,
    models::{Product, Wish},
    repository,
    response::{ApiResponse, Meta},
    state::AppState,
    validator::{self, ProductRef, ResolvedParameters},
};

pub async fn get_wish_list(
    state: &AppState,
    member: &AuthMember,
) -> AppResult<ApiResponse<WishList>> {
    let txn = state.orm.begin().await?;
    let member = validator::validate_member(&txn, member).await?;
    let rows = repository::wishes::find_by_member_with_products(&txn, member.id).await?;
    txn.commit().await?;

    let items: Vec<WishListItem> = rows
        .into_iter()
        .map(|(wish, product)| WishListItem {
            id: wish.id,
            product_id: wish.product_id,
            product: product.map(Product::from),
            quantity: wish.quantity,
        })
        .collect();

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "OK",
        WishList { items },
        Some(Meta {
            total: Some(total),
            ..Meta::empty()
        }),
    ))
}

/// ABSENT becomes quantity 1; PRESENT(n) becomes n + 1.
pub async fn add_wishes(
    state: &AppState,
    member: &AuthMember,
    product_id: Uuid,
) -> AppResult<ApiResponse<Wish>> {
    let txn = state.orm.begin().await?;
    let ResolvedParameters { member, product } =
        validator::validate_parameter(&txn, member, product_id).await?;

    let wish = repository::wishes::add_or_increment(&txn, member.id, product.id).await?;
    txn.commit().await?;

    tracing::info!(
        member_id = %member.id,
        product_id = %product.id,
        quantity = wish.quantity,
        "wish added"
    );
    audit::record(
        &state.orm,
        Some(member.id),
        "wish_add",
        "wishes",
        serde_json::json!({ "product_id": product.id, "quantity": wish.quantity }),
    )
    .await;

    Ok(ApiResponse::success(
        "Added to wishlist",
        wish.into(),
        Some(Meta::empty()),
    ))
}

/// Deletes the pair's wish. A product that no longer exists is still removed
/// from the wishlist by its raw id; deleting nothing is not an error.
pub async fn remove_wish_list_product(
    state: &AppState,
    member: &AuthMember,
    product_id: Uuid,
) -> AppResult<ApiResponse<WishRemoval>> {
    let txn = state.orm.begin().await?;
    let (member, product) = validator::resolve_for_removal(&txn, member, product_id).await?;

    let orphaned = match &product {
        ProductRef::Live(_) => false,
        ProductRef::Orphaned(id) => {
            tracing::warn!(
                member_id = %member.id,
                product_id = %id,
                "removing wish for a product that no longer exists"
            );
            true
        }
    };

    let removed =
        repository::wishes::delete_by_member_and_product(&txn, member.id, product.id()).await?;
    txn.commit().await?;

    if removed > 0 {
        audit::record(
            &state.orm,
            Some(member.id),
            "wish_remove",
            "wishes",
            serde_json::json!({ "product_id": product.id(), "orphaned": orphaned }),
        )
        .await;
    }

    Ok(ApiResponse::success(
        "Removed from wishlist",
        WishRemoval {
            product_id: product.id(),
            removed: removed > 0,
            orphaned,
        },
        Some(Meta::empty()),
    ))
}

/// Overwrites the quantity of an existing wish.
pub async fn set_wish_list_number(
    state: &AppState,
    member: &AuthMember,
    product_id: Uuid,
    quantity: i32,
) -> AppResult<ApiResponse<Wish>> {
    if quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }

    let txn = state.orm.begin().await?;
    let ResolvedParameters { member, product } =
        validator::validate_parameter(&txn, member, product_id).await?;

    let existing = repository::wishes::find_by_member_and_product(&txn, member.id, product.id)
        .await?
        .ok_or_else(|| AppError::BadRequest("no such item in wishlist".to_string()))?;

    let wish = repository::wishes::change_quantity(&txn, existing, quantity).await?;
    txn.commit().await?;

    tracing::info!(
        member_id = %member.id,
        product_id = %product.id,
        quantity,
        "wish quantity set"
    );
    audit::record(
        &state.orm,
        Some(member.id),
        "wish_set_quantity",
        "wishes",
        serde_json::json!({ "product_id": product.id, "quantity": quantity }),
    )
    .await;

    Ok(ApiResponse::success("Updated", wish.into(), Some(Meta::empty())))
}
