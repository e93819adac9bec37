#![allow(dead_code)]

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;
use wishlist_api::{
    db::{create_orm_conn, run_migrations},
    dto::products::ProductPayload,
    entity::wishes,
    middleware::auth::{ADMIN_ROLE, AuthMember, MEMBER_ROLE},
    models::Product,
    repository::{self, members::NewMember},
    services::product_service,
    state::AppState,
};

pub const TEST_SECRET: &str = "test-secret";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const IMAGE_URL: &str = "https://cdn.example.com/products/coffee.jpg";

/// Fresh in-memory database with the full schema applied.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm, TEST_SECRET, 1))
}

pub async fn create_member_with_role(
    state: &AppState,
    email: &str,
    role: &str,
) -> anyhow::Result<AuthMember> {
    repository::members::insert(
        &state.orm,
        NewMember {
            email: email.to_string(),
            password_hash: "dummy".into(),
            name: "Tester".into(),
            role: role.to_string(),
        },
    )
    .await?;

    Ok(AuthMember {
        email: email.to_string(),
        role: role.to_string(),
    })
}

pub async fn create_member(state: &AppState, email: &str) -> anyhow::Result<AuthMember> {
    create_member_with_role(state, email, MEMBER_ROLE).await
}

/// The shared admin account, created on first use.
pub async fn admin(state: &AppState) -> anyhow::Result<AuthMember> {
    if repository::members::find_by_email(&state.orm, ADMIN_EMAIL)
        .await?
        .is_none()
    {
        create_member_with_role(state, ADMIN_EMAIL, ADMIN_ROLE).await?;
    }
    Ok(AuthMember {
        email: ADMIN_EMAIL.to_string(),
        role: ADMIN_ROLE.to_string(),
    })
}

pub fn payload(name: &str, price: i64) -> ProductPayload {
    ProductPayload {
        id: None,
        name: name.to_string(),
        price,
        image_url: IMAGE_URL.to_string(),
    }
}

pub async fn create_product(state: &AppState, name: &str, price: i64) -> anyhow::Result<Product> {
    let admin = admin(state).await?;
    let resp = product_service::add_product(state, &admin, payload(name, price)).await?;
    Ok(resp.data.expect("created product"))
}

pub async fn wishes_for_product(
    state: &AppState,
    product_id: Uuid,
) -> anyhow::Result<Vec<wishes::Model>> {
    Ok(wishes::Entity::find()
        .filter(wishes::Column::ProductId.eq(product_id))
        .all(&state.orm)
        .await?)
}
