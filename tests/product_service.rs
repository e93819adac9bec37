mod common;

use common::{admin, create_member, create_product, payload, setup_state};
use wishlist_api::{
    error::AppError,
    repository,
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    services::{product_service, wishlist_service},
};

#[tokio::test]
async fn added_product_appears_in_listing_with_same_fields() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let created = create_product(&state, "Americano", 4500).await?;

    let page = product_service::get_product_list(&state, ProductQuery::default()).await?;
    let items = page.data.unwrap().items;
    assert_eq!(items.len(), 1);
    let listed = &items[0];
    assert_eq!(listed.id, created.id);
    assert_eq!(listed.name, "Americano");
    assert_eq!(listed.price, 4500);
    assert_eq!(listed.image_url, common::IMAGE_URL);
    assert_eq!(page.meta.unwrap().total, Some(1));
    Ok(())
}

#[tokio::test]
async fn duplicate_name_becomes_bad_request() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;
    create_product(&state, "Americano", 4500).await?;

    let err = product_service::add_product(&state, &admin, payload("Americano", 5000))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn invalid_payload_is_rejected_before_persisting() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;

    let err = product_service::add_product(&state, &admin, payload("Americano", 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let page = product_service::get_product_list(&state, ProductQuery::default()).await?;
    assert!(page.data.unwrap().items.is_empty());
    Ok(())
}

#[tokio::test]
async fn update_with_mismatched_id_fails_without_mutation() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;
    let product = create_product(&state, "Americano", 4500).await?;

    let mut body = payload("Latte", 5000);
    body.id = Some(uuid::Uuid::new_v4());
    let err = product_service::update_product(&state, &admin, product.id, body)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidId(_)));
    assert!(err.is_bad_request());

    let unchanged = product_service::get_product(&state, product.id)
        .await?
        .data
        .unwrap();
    assert_eq!(unchanged.name, "Americano");
    assert_eq!(unchanged.price, 4500);
    Ok(())
}

#[tokio::test]
async fn update_of_missing_product_is_no_such_product() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;
    let id = uuid::Uuid::new_v4();

    let mut body = payload("Latte", 5000);
    body.id = Some(id);
    let err = product_service::update_product(&state, &admin, id, body)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NoSuchProductId(_)));
    Ok(())
}

#[tokio::test]
async fn update_changes_fields_in_place_and_keeps_wishes() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;
    let member = create_member(&state, "kim@example.com").await?;
    let product = create_product(&state, "Americano", 4500).await?;
    wishlist_service::add_wishes(&state, &member, product.id).await?;

    let mut body = payload("Iced Americano", 5000);
    body.id = Some(product.id);
    body.image_url = "https://cdn.example.com/products/iced.jpg".into();
    let updated = product_service::update_product(&state, &admin, product.id, body)
        .await?
        .data
        .unwrap();

    assert_eq!(updated.id, product.id);
    assert_eq!(updated.name, "Iced Americano");
    assert_eq!(updated.price, 5000);
    assert_eq!(updated.image_url, "https://cdn.example.com/products/iced.jpg");
    assert_eq!(updated.created_at, product.created_at);

    let wishes = common::wishes_for_product(&state, product.id).await?;
    assert_eq!(wishes.len(), 1);
    Ok(())
}

#[tokio::test]
async fn update_with_invalid_value_is_bad_request() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;
    let product = create_product(&state, "Americano", 4500).await?;

    let mut body = payload("카카오 커피", 4500);
    body.id = Some(product.id);
    let err = product_service::update_product(&state, &admin, product.id, body)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}

#[tokio::test]
async fn delete_removes_dependent_wishes_then_product() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;
    let kim = create_member(&state, "kim@example.com").await?;
    let lee = create_member(&state, "lee@example.com").await?;
    let product = create_product(&state, "Americano", 4500).await?;
    let other = create_product(&state, "Latte", 5000).await?;
    wishlist_service::add_wishes(&state, &kim, product.id).await?;
    wishlist_service::add_wishes(&state, &lee, product.id).await?;
    wishlist_service::add_wishes(&state, &kim, other.id).await?;

    let resp = product_service::delete_product(&state, &admin, product.id).await?;
    assert_eq!(resp.data.unwrap()["removed_wishes"], 2);

    let page = product_service::get_product_list(&state, ProductQuery::default()).await?;
    let ids: Vec<_> = page.data.unwrap().items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![other.id]);

    assert!(common::wishes_for_product(&state, product.id)
        .await?
        .is_empty());
    assert_eq!(
        common::wishes_for_product(&state, other.id)
            .await?
            .len(),
        1
    );
    Ok(())
}

#[tokio::test]
async fn delete_of_missing_product_is_no_such_product() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state).await?;

    let err = product_service::delete_product(&state, &admin, uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NoSuchProductId(_)));
    Ok(())
}

#[tokio::test]
async fn store_rejects_deleting_a_product_that_still_has_wishes() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let member = create_member(&state, "kim@example.com").await?;
    let product = create_product(&state, "Americano", 4500).await?;
    wishlist_service::add_wishes(&state, &member, product.id).await?;

    let err = repository::products::delete_by_id(&state.orm, product.id)
        .await
        .unwrap_err();
    assert!(wishlist_api::error::is_constraint_violation(&err), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn listing_pages_and_sorts() -> anyhow::Result<()> {
    let state = setup_state().await?;
    create_product(&state, "Americano", 4500).await?;
    create_product(&state, "Latte", 5000).await?;
    create_product(&state, "Cake", 28000).await?;

    let query = ProductQuery {
        page: Some(1),
        per_page: Some(2),
        sort_by: Some(ProductSortBy::Price),
        sort_order: Some(SortOrder::Desc),
    };
    let resp = product_service::get_product_list(&state, query).await?;
    let names: Vec<_> = resp
        .data
        .unwrap()
        .items
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Cake", "Latte"]);

    let meta = resp.meta.unwrap();
    assert_eq!(meta.total, Some(3));
    assert_eq!(meta.total_pages, Some(2));

    let query = ProductQuery {
        page: Some(2),
        per_page: Some(2),
        sort_by: Some(ProductSortBy::Name),
        sort_order: None,
    };
    let resp = product_service::get_product_list(&state, query).await?;
    let names: Vec<_> = resp
        .data
        .unwrap()
        .items
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Latte"]);
    Ok(())
}

#[tokio::test]
async fn get_product_reports_missing_id() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let err = product_service::get_product(&state, uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NoSuchProductId(_)));
    Ok(())
}
