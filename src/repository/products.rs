use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};
use uuid::Uuid;

use crate::entity::products::{ActiveModel, Column, Entity as Products, Model};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    Name,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub offset: u64,
    pub sort: SortKey,
    pub ascending: bool,
}

pub struct NewProduct {
    pub name: String,
    pub price: i64,
    pub image_url: String,
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Products::find_by_id(id).one(conn).await
}

/// Returns one page plus the total row count.
pub async fn find_page<C: ConnectionTrait>(
    conn: &C,
    request: PageRequest,
) -> Result<(Vec<Model>, u64), DbErr> {
    let sort_col = match request.sort {
        SortKey::CreatedAt => Column::CreatedAt,
        SortKey::Name => Column::Name,
        SortKey::Price => Column::Price,
    };

    let finder = if request.ascending {
        Products::find().order_by_asc(sort_col)
    } else {
        Products::find().order_by_desc(sort_col)
    };
    // Tie-break so pages stay stable.
    let finder = finder.order_by_asc(Column::Id);

    let total = finder.clone().count(conn).await?;
    let items = finder
        .limit(request.limit)
        .offset(request.offset)
        .all(conn)
        .await?;
    Ok((items, total))
}

pub async fn insert<C: ConnectionTrait>(conn: &C, product: NewProduct) -> Result<Model, DbErr> {
    let now = Utc::now().fixed_offset();
    ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(product.name),
        price: Set(product.price),
        image_url: Set(product.image_url),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

/// Replaces name, price and image in place; id and relations are untouched.
pub async fn change<C: ConnectionTrait>(
    conn: &C,
    existing: Model,
    name: String,
    price: i64,
    image_url: String,
) -> Result<Model, DbErr> {
    let mut active: ActiveModel = existing.into();
    active.name = Set(name);
    active.price = Set(price);
    active.image_url = Set(image_url);
    active.updated_at = Set(Utc::now().fixed_offset());
    active.update(conn).await
}

/// Returns the number of deleted rows.
pub async fn delete_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<u64, DbErr> {
    let result = Products::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected)
}
