use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::members::{ActiveModel, Column, Entity as Members, Model};

pub struct NewMember {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
}

pub async fn find_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<Model>, DbErr> {
    Members::find()
        .filter(Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn insert<C: ConnectionTrait>(conn: &C, member: NewMember) -> Result<Model, DbErr> {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(member.email),
        password_hash: Set(member.password_hash),
        name: Set(member.name),
        role: Set(member.role),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(conn)
    .await
}
