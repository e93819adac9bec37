use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        products::{ProductList, ProductPayload},
        wishes::{AddWishRequest, SetWishQuantityRequest, WishList, WishListItem, WishRemoval},
    },
    models::{Member, Product, Wish},
    response::{ApiResponse, Meta},
    routes::{auth, health, params, products, wishlist},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        wishlist::get_wish_list,
        wishlist::add_wish,
        wishlist::set_wish_quantity,
        wishlist::remove_wish
    ),
    components(
        schemas(
            Member,
            Product,
            Wish,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            ProductPayload,
            ProductList,
            AddWishRequest,
            SetWishQuantityRequest,
            WishList,
            WishListItem,
            WishRemoval,
            params::Pagination,
            params::ProductSortBy,
            params::SortOrder,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<WishList>,
            ApiResponse<Wish>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Member registration and login"),
        (name = "Products", description = "Product catalogue"),
        (name = "Wishlist", description = "Wishlist of the signed-in member"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_wishlist_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/wishlist"));
        assert!(doc.paths.paths.contains_key("/api/wishlist/{product_id}"));
        assert!(doc.paths.paths.contains_key("/api/products/{id}"));
    }
}
