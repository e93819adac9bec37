use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::Product,
};

pub const NAME_MAX_CHARS: usize = 15;
const RESERVED_BRAND: &str = "카카오";

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{N} ()\[\]+\-&/_]+$").expect("product name pattern is valid")
});

/// Product payload shared by create and update. `id` is ignored on create.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ProductPayload {
    pub id: Option<Uuid>,
    pub name: String,
    pub price: i64,
    pub image_url: String,
}

impl ProductPayload {
    /// Field-level checks run before the store is touched.
    pub fn validate(&self) -> AppResult<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("product name must not be blank".into()));
        }
        if name.chars().count() > NAME_MAX_CHARS {
            return Err(AppError::BadRequest(format!(
                "product name must be at most {NAME_MAX_CHARS} characters"
            )));
        }
        if !NAME_PATTERN.is_match(name) {
            return Err(AppError::BadRequest(
                "product name may only contain letters, digits, spaces and ( ) [ ] + - & / _"
                    .into(),
            ));
        }
        if name.contains(RESERVED_BRAND) {
            return Err(AppError::BadRequest(format!(
                "product names containing '{RESERVED_BRAND}' need MD approval"
            )));
        }
        if self.price <= 0 {
            return Err(AppError::BadRequest("price must be a positive number".into()));
        }
        let well_formed = Url::parse(self.image_url.trim())
            .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
            .unwrap_or(false);
        if !well_formed {
            return Err(AppError::BadRequest(
                "image_url must be an absolute http(s) URL".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
