use product::{
    abstract_trait::product::repository::ProductStoreTrait,
    di::DependenciesInject,
    domain::requests::{
        product::{CreateProductRequest, FindAllProducts, PriceRange, UpdateProductRequest},
        sort::{SortField, SortSpec},
    },
    repository::InMemoryProductStore,
};
use prometheus_client::registry::Registry;
use shared::errors::ServiceError;
use std::sync::Arc;

const USER: i32 = 1;
const CATEGORY: i32 = 10;

struct Harness {
    store: InMemoryProductStore,
    services: DependenciesInject,
}

async fn harness() -> Harness {
    let store = InMemoryProductStore::with_reference_data([CATEGORY], [USER]).await;
    let mut registry = Registry::default();
    let services = DependenciesInject::from_store(Arc::new(store.clone()), &mut registry);

    Harness { store, services }
}

fn create_request(name: &str, price: i64) -> CreateProductRequest {
    CreateProductRequest {
        name: name.to_string(),
        display_name: format!("{name} display"),
        description: Some(format!("{name} description")),
        price,
        stock: 5,
        category_id: CATEGORY,
        user_id: USER,
    }
}

impl Harness {
    async fn insert(&self, name: &str, price: i64) -> i32 {
        let res = self
            .services
            .product_command
            .insert(&create_request(name, price))
            .await
            .unwrap();
        assert!(res.is_success, "{:?}", res.exception_message);
        res.entity.unwrap().id
    }

    async fn listed_ids(&self) -> Vec<i32> {
        self.services
            .product_query
            .get_sorted(&SortSpec::ascending(SortField::Id))
            .await
            .unwrap()
            .list
            .iter()
            .map(|p| p.id)
            .collect()
    }
}

#[tokio::test]
async fn insert_then_get_by_id_round_trips_every_field() {
    let h = harness().await;

    let created = h
        .services
        .product_command
        .insert(&create_request("kettle", 3_499))
        .await
        .unwrap();
    assert!(created.is_success);
    assert_eq!(created.total_count, 0);

    let view = created.entity.unwrap();
    assert!(view.id > 0);
    assert!(view.is_active);
    assert!(!view.is_deleted);
    assert!(view.created_at.is_some());
    assert!(view.updated_at.is_none());

    let fetched = h.services.product_query.get_by_id(view.id).await.unwrap();
    assert!(fetched.is_success);
    assert_eq!(fetched.entity, Some(view));
}

#[tokio::test]
async fn identical_inserts_create_distinct_products() {
    let h = harness().await;

    let first = h.insert("twin", 100).await;
    let second = h.insert("twin", 100).await;

    assert_ne!(first, second);
    assert_eq!(h.listed_ids().await, vec![first, second]);
}

#[tokio::test]
async fn insert_checks_user_before_category() {
    let h = harness().await;

    let mut req = create_request("orphan", 100);
    req.user_id = 404;
    req.category_id = 405;

    let res = h.services.product_command.insert(&req).await.unwrap();
    assert!(!res.is_success);
    assert!(res.entity.is_none());
    assert_eq!(
        res.exception_message.as_deref(),
        Some("User with id:404 is not found")
    );

    req.user_id = USER;
    let res = h.services.product_command.insert(&req).await.unwrap();
    assert!(!res.is_success);
    assert_eq!(
        res.exception_message.as_deref(),
        Some("Category with id:405 is not found")
    );

    assert!(h.listed_ids().await.is_empty());
}

#[tokio::test]
async fn insert_with_invalid_payload_is_a_validation_error() {
    let h = harness().await;

    let mut req = create_request("broken", -1);
    req.display_name.clear();

    match h.services.product_command.insert(&req).await {
        Err(ServiceError::Validation(messages)) => {
            assert_eq!(messages.len(), 2);
            assert!(messages[0].starts_with("display_name:"));
            assert!(messages[1].starts_with("price:"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn listings_only_return_active_non_deleted_products() {
    let h = harness().await;

    let kept = h.insert("kept", 10).await;
    let deleted = h.insert("deleted", 20).await;
    let deactivated = h.insert("deactivated", 30).await;

    assert!(h.services.product_command.delete(deleted).await.unwrap().is_success);

    // An inactive row that was never deleted.
    let mut hidden = h.store.snapshot(deactivated).await.unwrap();
    hidden.is_active = false;
    {
        let mut uow = h.store.begin().await.unwrap();
        uow.save(&hidden).await.unwrap();
        uow.commit().await.unwrap();
    }

    assert_eq!(h.listed_ids().await, vec![kept]);

    let page = h
        .services
        .product_query
        .get(&FindAllProducts::default())
        .await
        .unwrap();
    assert_eq!(page.list.len(), 1);
    assert_eq!(page.total_count, 1);

    let filtered = h
        .services
        .product_query
        .get_filtered(&PriceRange::new(0, 100))
        .await
        .unwrap();
    assert_eq!(filtered.list.len(), 1);

    for id in [deleted, deactivated] {
        let res = h.services.product_query.get_by_id(id).await.unwrap();
        assert!(!res.is_success);
        assert_eq!(
            res.exception_message,
            Some(format!("Product with id:{id} is not found"))
        );
    }
}

#[tokio::test]
async fn delete_succeeds_once_then_reports_not_found() {
    let h = harness().await;
    let id = h.insert("lamp", 1_000).await;

    let first = h.services.product_command.delete(id).await.unwrap();
    assert!(first.is_success);
    let view = first.entity.unwrap();
    assert!(view.is_deleted);
    assert!(!view.is_active);

    let second = h.services.product_command.delete(id).await.unwrap();
    assert!(!second.is_success);
    assert_eq!(
        second.exception_message,
        Some(format!("Product with id:{id} is not found"))
    );

    let missing = h.services.product_command.delete(9_999).await.unwrap();
    assert!(!missing.is_success);
}

#[tokio::test]
async fn update_applies_only_non_default_fields() {
    let h = harness().await;
    let id = h.insert("chair", 5_000).await;

    let req = UpdateProductRequest {
        name: Some(String::new()),
        price: 7_500,
        category_id: CATEGORY,
        user_id: USER,
        ..Default::default()
    };
    let res = h.services.product_command.update(&req, id).await.unwrap();
    assert!(res.is_success);

    // the payload is echoed, not the merged row
    let echoed = res.entity.unwrap();
    assert_eq!(echoed.name.as_deref(), Some(""));
    assert_eq!(echoed.stock, 0);

    let stored = h.store.snapshot(id).await.unwrap();
    assert_eq!(stored.name, "chair");
    assert_eq!(stored.price, 7_500);
    assert_eq!(stored.stock, 5);
    assert!(stored.updated_at.is_some());

    let zero_price = UpdateProductRequest {
        price: 0,
        stock: 9,
        category_id: CATEGORY,
        user_id: USER,
        ..Default::default()
    };
    assert!(
        h.services
            .product_command
            .update(&zero_price, id)
            .await
            .unwrap()
            .is_success
    );

    let stored = h.store.snapshot(id).await.unwrap();
    assert_eq!(stored.price, 7_500);
    assert_eq!(stored.stock, 9);
}

#[tokio::test]
async fn update_reports_missing_product_user_and_category() {
    let h = harness().await;
    let id = h.insert("desk", 8_000).await;

    let valid = UpdateProductRequest {
        category_id: CATEGORY,
        user_id: USER,
        ..Default::default()
    };

    let res = h.services.product_command.update(&valid, 777).await.unwrap();
    assert_eq!(
        res.exception_message.as_deref(),
        Some("Product with id:777 is not found")
    );

    let bad_user = UpdateProductRequest {
        user_id: 55,
        category_id: 66,
        ..Default::default()
    };
    let res = h.services.product_command.update(&bad_user, id).await.unwrap();
    assert_eq!(
        res.exception_message.as_deref(),
        Some("User with id:55 is not found")
    );

    // zero means "keep" for the stored value but still fails the existence check
    let zero_category = UpdateProductRequest {
        user_id: USER,
        ..Default::default()
    };
    let res = h
        .services
        .product_command
        .update(&zero_category, id)
        .await
        .unwrap();
    assert!(!res.is_success);
    assert_eq!(
        res.exception_message.as_deref(),
        Some("Category with id:0 is not found")
    );

    assert!(h.store.snapshot(id).await.unwrap().updated_at.is_none());
}

#[tokio::test]
async fn update_checks_the_user_but_keeps_the_owner() {
    let h = harness().await;
    let other_user = USER + 1;
    h.store.add_user(other_user).await;

    let id = h.insert("sofa", 40_000).await;

    let req = UpdateProductRequest {
        stock: 2,
        category_id: CATEGORY,
        user_id: other_user,
        ..Default::default()
    };
    let res = h.services.product_command.update(&req, id).await.unwrap();
    assert!(res.is_success);
    assert_eq!(res.entity.unwrap().user_id, other_user);

    let stored = h.store.snapshot(id).await.unwrap();
    assert_eq!(stored.user_id, USER);
    assert_eq!(stored.stock, 2);

    let fetched = h.services.product_query.get_by_id(id).await.unwrap();
    assert_eq!(fetched.entity.unwrap().user_id, USER);
}

#[tokio::test]
async fn deleted_products_can_still_be_updated() {
    let h = harness().await;
    let id = h.insert("stool", 2_000).await;
    h.services.product_command.delete(id).await.unwrap();

    let req = UpdateProductRequest {
        name: Some("restored stool".into()),
        category_id: CATEGORY,
        user_id: USER,
        ..Default::default()
    };
    assert!(h.services.product_command.update(&req, id).await.unwrap().is_success);

    let stored = h.store.snapshot(id).await.unwrap();
    assert_eq!(stored.name, "restored stool");
    assert!(stored.is_deleted);
}

#[tokio::test]
async fn second_page_sorted_by_price_holds_ranks_eleven_to_twenty() {
    let h = harness().await;

    // prices inserted out of order: 25, 24, ..., 1 (times 100)
    for rank in (1..=25).rev() {
        h.insert(&format!("item-{rank}"), rank * 100).await;
    }

    let res = h
        .services
        .product_query
        .get_pages_sorted(
            &FindAllProducts::new(2, 10),
            &"price".parse::<SortSpec>().unwrap(),
        )
        .await
        .unwrap();

    assert!(res.is_success);
    assert_eq!(res.total_count, 25);

    let prices: Vec<i64> = res.list.iter().map(|p| p.price).collect();
    let expected: Vec<i64> = (11..=20).map(|rank| rank * 100).collect();
    assert_eq!(prices, expected);
}

#[tokio::test]
async fn get_pages_in_id_order_and_clamps_bounds() {
    let h = harness().await;
    let mut ids = Vec::new();
    for i in 0..30 {
        ids.push(h.insert(&format!("p{i}"), 50).await);
    }

    let first = h
        .services
        .product_query
        .get(&FindAllProducts::new(1, 10))
        .await
        .unwrap();
    let listed: Vec<i32> = first.list.iter().map(|p| p.id).collect();
    assert_eq!(listed, ids[..10].to_vec());
    assert_eq!(first.total_count, 30);

    let capped = h
        .services
        .product_query
        .get(&FindAllProducts::new(0, 100))
        .await
        .unwrap();
    assert_eq!(capped.list.len(), 25);

    let beyond = h
        .services
        .product_query
        .get(&FindAllProducts::new(9, 10))
        .await
        .unwrap();
    assert!(beyond.is_success);
    assert!(beyond.list.is_empty());
    assert_eq!(beyond.total_count, 30);
}

#[tokio::test]
async fn get_sorted_descending_returns_everything() {
    let h = harness().await;
    for price in [300, 100, 200] {
        h.insert(&format!("p{price}"), price).await;
    }

    let res = h
        .services
        .product_query
        .get_sorted(&"price desc".parse().unwrap())
        .await
        .unwrap();

    let prices: Vec<i64> = res.list.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![300, 200, 100]);
    assert_eq!(res.total_count, 3);
}

#[tokio::test]
async fn filtered_listing_counts_all_visible_products() {
    let h = harness().await;
    for price in [25, 5, 20, 15, 10, 30] {
        h.insert(&format!("p{price}"), price).await;
    }

    let res = h
        .services
        .product_query
        .get_filtered(&PriceRange::new(10, 20))
        .await
        .unwrap();

    assert!(res.is_success);
    let prices: Vec<i64> = res.list.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![10, 15, 20]);
    assert_eq!(res.total_count, 6);

    let inverted = h
        .services
        .product_query
        .get_filtered(&PriceRange::new(20, 10))
        .await
        .unwrap();
    assert!(inverted.is_success);
    assert!(inverted.list.is_empty());
}
