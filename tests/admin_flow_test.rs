mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{execute, setup_schema, test_config};
use verger_api::backoffice::{backoffice_routes, BackofficeState};
use verger_api::clients::FacadeClient;
use verger_api::services::StockService;
use verger_api::storefront::{storefront_routes, ShopState};

fn shop_app(facade_url: &str) -> Router {
    let facade = Arc::new(
        FacadeClient::new(facade_url.to_string(), Duration::from_secs(2)).expect("client"),
    );
    storefront_routes().with_state(ShopState::new(test_config(), facade))
}

fn session_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

fn form_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Logs in and returns the operator session cookie.
async fn operator_login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(form_post(
            "/admin/login",
            "username=admin&password=admin123",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/admin");
    session_cookie(&response)
}

#[tokio::test]
async fn operator_section_redirects_unauthenticated_requests() {
    let app = shop_app("http://127.0.0.1:1");

    for uri in ["/admin", "/admin/products", "/admin/stock", "/admin/orders"] {
        let response = app.clone().oneshot(get(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(response.headers()[header::LOCATION], "/admin/login");
    }
}

#[tokio::test]
async fn wrong_credentials_are_rejected() {
    let app = shop_app("http://127.0.0.1:1");

    let response = app
        .oneshot(form_post(
            "/admin/login",
            "username=admin&password=nope",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_drops_the_operator_flag() {
    let app = shop_app("http://127.0.0.1:1");
    let cookie = operator_login(&app).await;

    let response = app
        .clone()
        .oneshot(get("/admin/logout", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.oneshot(get("/admin", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/admin/login");
}

#[tokio::test]
async fn stock_export_emits_the_fixed_csv_layout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "ref": "POM-AUT", "label": "Pommes Fruits Automne", "name": "Pommes Fruits Automne",
              "description": "", "price": 2.5, "season": "Automne", "category": "Fruits" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/stock/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "ref": "POM-AUT", "label": "Pommes Fruits Automne", "price": 2.5, "stock": 120.0
        })))
        .mount(&server)
        .await;

    let app = shop_app(&server.uri());
    let cookie = operator_login(&app).await;

    let response = app
        .oneshot(get("/admin/stock/export", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment;filename=stock_export.csv"
    );

    let body = body_text(response).await;
    let mut lines = body.lines();
    assert_eq!(lines.next(), Some("ID,Nom,Prix,Stock"));
    assert_eq!(lines.next(), Some("1,Pommes Fruits Automne,2.5,120"));
}

#[tokio::test]
async fn stock_import_updates_each_row_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/stock/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/stock/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let app = shop_app(&server.uri());
    let cookie = operator_login(&app).await;

    let csv = "ID,Nom,Prix,Stock\n1,Pommes,2.5,120\n2,Carottes,1.8,45\n";
    let request = Request::builder()
        .method("POST")
        .uri("/admin/stock/import")
        .header(header::COOKIE, &cookie)
        .header(header::CONTENT_TYPE, "text/csv")
        .body(Body::from(csv))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["updated"], 2);
}

#[tokio::test]
async fn single_stock_update_requires_a_quantity() {
    let app = shop_app("http://127.0.0.1:1");
    let cookie = operator_login(&app).await;

    let request = Request::builder()
        .method("POST")
        .uri("/admin/stock/update/1")
        .header(header::COOKIE, &cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Missing stock quantity");
}

// Back office: same login machinery, direct schema access.

async fn backoffice_app() -> Router {
    let db = Arc::new(setup_schema().await);
    execute(
        &db,
        "INSERT INTO llx_product (rowid, ref, label, description, price, entity) VALUES
            (1, 'POM-AUT', 'Pommes Fruits Automne', NULL, 2.5, 1)",
    )
    .await;

    let stock = Arc::new(StockService::new(db));
    backoffice_routes().with_state(BackofficeState::new(test_config(), stock))
}

#[tokio::test]
async fn backoffice_lists_products_with_stock_after_login() {
    let app = backoffice_app().await;
    let cookie = operator_login(&app).await;

    let response = app
        .oneshot(get("/admin/products", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["stock"], 0.0);
}

#[tokio::test]
async fn backoffice_stock_update_writes_the_schema() {
    let app = backoffice_app().await;
    let cookie = operator_login(&app).await;

    let request = Request::builder()
        .method("POST")
        .uri("/admin/stock/update")
        .header(header::COOKIE, &cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "product_id": 1, "stock": 33.0 }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get("/admin/products", Some(&cookie)))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap()[0]["stock"], 33.0);
}

#[tokio::test]
async fn backoffice_stock_update_requires_both_fields() {
    let app = backoffice_app().await;
    let cookie = operator_login(&app).await;

    let request = Request::builder()
        .method("POST")
        .uri("/admin/stock/update")
        .header(header::COOKIE, &cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "stock": 33.0 }).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
