mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{execute, setup_schema};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use verger_api::catalog::ProductFilter;
use verger_api::clients::DolibarrClient;
use verger_api::errors::ServiceError;
use verger_api::services::{ProductService, StockService};

async fn seeded_db() -> sea_orm::DatabaseConnection {
    let db = setup_schema().await;
    execute(
        &db,
        "INSERT INTO llx_product (rowid, ref, label, description, price, entity) VALUES
            (1, 'POM-AUT', 'Pommes Fruits Automne', 'Pommes de saison', 2.5, 1),
            (2, 'CAR-HIV', 'Carottes Légumes Hiver', 'Carottes de plein champ', 1.8, 1),
            (3, 'CON-TRA', 'Confiture Produits Transformés', NULL, 4.2, 1),
            (4, 'AUT-ENT', 'Pêches Fruits Été', 'Autre entité', 3.0, 2)",
    )
    .await;
    db
}

fn erp_products_json() -> serde_json::Value {
    json!([
        { "id": "1", "ref": "POM-AUT", "label": "Pommes Fruits Automne", "description": "Pommes de saison", "price": "2.5" },
        { "id": "2", "ref": "CAR-HIV", "label": "Carottes Légumes Hiver", "description": "Carottes de plein champ", "price": "1.8" },
        { "id": "3", "ref": "CON-TRA", "label": "Confiture Produits Transformés", "description": "", "price": "4.2" }
    ])
}

fn erp_client(base_url: &str) -> Arc<DolibarrClient> {
    Arc::new(
        DolibarrClient::new(base_url.to_string(), None, Duration::from_secs(2)).expect("client"),
    )
}

#[tokio::test]
async fn api_failure_falls_back_to_the_schema() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let service = ProductService::new(Arc::new(seeded_db().await), erp_client(&server.uri()));

    let products = service
        .list(&ProductFilter::default())
        .await
        .expect("fallback list");

    // The second-entity product is invisible to the shop.
    assert_eq!(products.len(), 3);
    assert!(products.iter().all(|p| p.id != 4));
}

#[tokio::test]
async fn both_paths_classify_and_filter_identically() {
    // ERP path.
    let up = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/index.php/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(erp_products_json()))
        .mount(&up)
        .await;

    // Fallback path over the same rows.
    let down = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&down)
        .await;

    let db = Arc::new(seeded_db().await);
    let via_api = ProductService::new(db.clone(), erp_client(&up.uri()));
    let via_db = ProductService::new(db, erp_client(&down.uri()));

    let filter = ProductFilter {
        search: Some("pommes".into()),
        season: Some("Automne".into()),
        category: Some("Fruits".into()),
    };

    let from_api = via_api.list(&filter).await.expect("api list");
    let from_db = via_db.list(&filter).await.expect("db list");

    assert_eq!(from_api, from_db);
    assert_eq!(from_api.len(), 1);
    assert_eq!(from_api[0].id, 1);
    assert_eq!(from_api[0].season.as_str(), "Automne");
    assert_eq!(from_api[0].category.as_str(), "Fruits");
}

#[tokio::test]
async fn missing_product_is_a_404_after_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let service = ProductService::new(Arc::new(seeded_db().await), erp_client(&server.uri()));

    let err = service.get(999).await.expect_err("absent product");
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn stock_reads_sum_across_warehouses() {
    let db = Arc::new(seeded_db().await);
    execute(
        &db,
        "INSERT INTO llx_product_stock (fk_product, fk_entrepot, reel) VALUES
            (1, 1, 80.0), (1, 2, 40.0)",
    )
    .await;

    let service = StockService::new(db);

    let view = service.get(1).await.expect("stock");
    assert_eq!(view.stock, 120.0);
    assert_eq!(view.label, "Pommes Fruits Automne");

    // No stock rows reads as zero, not as missing.
    let empty = service.get(2).await.expect("stock without rows");
    assert_eq!(empty.stock, 0.0);
}

#[tokio::test]
async fn stock_writes_update_or_insert() {
    let db = Arc::new(seeded_db().await);
    let service = StockService::new(db);

    // No stock row yet: the write inserts one against the default warehouse.
    service.set(2, 55.0).await.expect("insert");
    assert_eq!(service.get(2).await.expect("get").stock, 55.0);

    // Existing row: the write updates in place.
    service.set(2, 12.0).await.expect("update");
    assert_eq!(service.get(2).await.expect("get").stock, 12.0);

    let err = service.set(999, 1.0).await.expect_err("absent product");
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn unknown_stock_product_is_a_404() {
    let service = StockService::new(Arc::new(seeded_db().await));
    let err = service.get(999).await.expect_err("absent product");
    assert!(matches!(err, ServiceError::NotFound(_)));
}
