//! Resolves a member token and a product reference into persisted rows.

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::{
    entity::{members, products},
    error::{AppError, AppResult},
    middleware::auth::AuthMember,
    repository,
};

/// Both halves of a wishlist call, resolved.
#[derive(Debug, Clone)]
pub struct ResolvedParameters {
    pub member: members::Model,
    pub product: products::Model,
}

/// Product side of a removal: either the live row or the bare id of a
/// product that has already been deleted.
#[derive(Debug, Clone)]
pub enum ProductRef {
    Live(products::Model),
    Orphaned(Uuid),
}

impl ProductRef {
    pub fn id(&self) -> Uuid {
        match self {
            ProductRef::Live(product) => product.id,
            ProductRef::Orphaned(id) => *id,
        }
    }
}

pub async fn validate_member<C: ConnectionTrait>(
    conn: &C,
    token: &AuthMember,
) -> AppResult<members::Model> {
    repository::members::find_by_email(conn, &token.email)
        .await?
        .ok_or_else(|| AppError::UserNotFound(format!("no member with email {}", token.email)))
}

async fn validate_product<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
) -> AppResult<products::Model> {
    repository::products::find_by_id(conn, product_id)
        .await?
        .ok_or_else(|| no_such_product(product_id))
}

/// Member first, then product; the first failure is returned.
pub async fn validate_parameter<C: ConnectionTrait>(
    conn: &C,
    token: &AuthMember,
    product_id: Uuid,
) -> AppResult<ResolvedParameters> {
    let member = validate_member(conn, token).await?;
    let product = validate_product(conn, product_id).await?;
    Ok(ResolvedParameters { member, product })
}

/// Like [`validate_parameter`], but a missing product yields
/// [`ProductRef::Orphaned`] instead of an error.
pub async fn resolve_for_removal<C: ConnectionTrait>(
    conn: &C,
    token: &AuthMember,
    product_id: Uuid,
) -> AppResult<(members::Model, ProductRef)> {
    match validate_parameter(conn, token, product_id).await {
        Ok(ResolvedParameters { member, product }) => Ok((member, ProductRef::Live(product))),
        Err(AppError::NoSuchProductId(_)) => {
            let member = validate_member(conn, token).await?;
            Ok((member, ProductRef::Orphaned(product_id)))
        }
        Err(err) => Err(err),
    }
}

pub fn no_such_product(id: Uuid) -> AppError {
    AppError::NoSuchProductId(format!("product {id} does not exist"))
}
