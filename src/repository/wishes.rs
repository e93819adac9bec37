use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use crate::entity::{
    products,
    wishes::{ActiveModel, Column, Entity as Wishes, Model},
};

pub async fn find_by_member_and_product<C: ConnectionTrait>(
    conn: &C,
    member_id: Uuid,
    product_id: Uuid,
) -> Result<Option<Model>, DbErr> {
    Wishes::find()
        .filter(Column::MemberId.eq(member_id))
        .filter(Column::ProductId.eq(product_id))
        .one(conn)
        .await
}

/// A member's wishes joined with their products; the product is `None` for
/// rows whose product has been deleted.
pub async fn find_by_member_with_products<C: ConnectionTrait>(
    conn: &C,
    member_id: Uuid,
) -> Result<Vec<(Model, Option<products::Model>)>, DbErr> {
    Wishes::find()
        .filter(Column::MemberId.eq(member_id))
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .find_also_related(products::Entity)
        .all(conn)
        .await
}

/// Inserts the pair at quantity 1, or bumps the existing row by one.
///
/// The unique (member_id, product_id) index turns a concurrent insert of the
/// same pair into an increment instead of a duplicate row.
pub async fn add_or_increment<C: ConnectionTrait>(
    conn: &C,
    member_id: Uuid,
    product_id: Uuid,
) -> Result<Model, DbErr> {
    let now = Utc::now().fixed_offset();
    let wish = ActiveModel {
        id: Set(Uuid::new_v4()),
        member_id: Set(member_id),
        product_id: Set(product_id),
        quantity: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };

    Wishes::insert(wish)
        .on_conflict(
            OnConflict::columns([Column::MemberId, Column::ProductId])
                .value(Column::Quantity, Expr::col((Wishes, Column::Quantity)).add(1))
                .update_column(Column::UpdatedAt)
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    find_by_member_and_product(conn, member_id, product_id)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("wish {member_id}/{product_id}")))
}

pub async fn change_quantity<C: ConnectionTrait>(
    conn: &C,
    existing: Model,
    quantity: i32,
) -> Result<Model, DbErr> {
    let mut active: ActiveModel = existing.into();
    active.quantity = Set(quantity);
    active.updated_at = Set(Utc::now().fixed_offset());
    active.update(conn).await
}

/// Returns the number of deleted rows; zero is not an error.
pub async fn delete_by_member_and_product<C: ConnectionTrait>(
    conn: &C,
    member_id: Uuid,
    product_id: Uuid,
) -> Result<u64, DbErr> {
    let result = Wishes::delete_many()
        .filter(Column::MemberId.eq(member_id))
        .filter(Column::ProductId.eq(product_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_by_product<C: ConnectionTrait>(conn: &C, product_id: Uuid) -> Result<u64, DbErr> {
    let result = Wishes::delete_many()
        .filter(Column::ProductId.eq(product_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
