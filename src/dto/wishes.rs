use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Product;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddWishRequest {
    pub product_id: Uuid,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SetWishQuantityRequest {
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishListItem {
    pub id: Uuid,
    pub product_id: Uuid,
    /// Absent when the product row no longer exists.
    pub product: Option<Product>,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishList {
    pub items: Vec<WishListItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishRemoval {
    pub product_id: Uuid,
    pub removed: bool,
    pub orphaned: bool,
}
