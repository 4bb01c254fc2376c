use std::sync::{Arc, Mutex};

use reqwest::StatusCode;
use serde_json::{Value, json};

use catalog_admin::{
    AdminConfig, AdminContext, AdminError, AdminResult, PriceView, SubClient, SubClientRegistry,
};
use catalog_core::SiteId;
use catalog_infra::StoreError;
use catalog_products::{PRICE_DOMAIN, PriceId, ProductId};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(config: AdminConfig, registry: SubClientRegistry) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = catalog_admin::app::build_app(&config, &registry).expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn spawn_default() -> Self {
        Self::spawn(AdminConfig::default(), SubClientRegistry::new()).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Fails every save, after the prices were written.
struct Failing;

impl SubClient for Failing {
    fn name(&self) -> &str {
        "failing"
    }

    fn save(&self, _ctx: &AdminContext, _view: &mut PriceView) -> AdminResult<Option<String>> {
        Err(AdminError::Store(StoreError::backend("media storage unavailable")))
    }
}

/// Keeps the context of the last save so tests can inspect the stores.
#[derive(Default)]
struct StoreTap {
    ctx: Mutex<Option<AdminContext>>,
}

impl SubClient for StoreTap {
    fn name(&self) -> &str {
        "tap"
    }

    fn save(&self, ctx: &AdminContext, _view: &mut PriceView) -> AdminResult<Option<String>> {
        *self.ctx.lock().unwrap() = Some(ctx.clone());
        Ok(None)
    }
}

async fn create_product(client: &reqwest::Client, base_url: &str, site: SiteId, code: &str) -> String {
    let res = client
        .post(format!("{}/products", base_url))
        .header("X-Site-Id", site.to_string())
        .json(&json!({ "code": code, "label": "Shirt" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

fn two_prices() -> Value {
    json!({
        "price": {
            "product.lists.id": ["", ""],
            "price.value": ["10.00", "8.00"],
            "price.currencyid": ["EUR", "USD"],
            "price.quantity": ["2", "1"],
        }
    })
}

#[tokio::test]
async fn health_needs_no_site() {
    let srv = TestServer::spawn_default().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn site_context_is_derived_from_header() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let site = SiteId::new();
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .header("X-Site-Id", site.to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["site_id"].as_str().unwrap(), site.to_string());

    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body["site_id"].as_str().unwrap(),
        AdminConfig::default().default_site.to_string()
    );

    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .header("X-Site-Id", "main")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_site");
}

#[tokio::test]
async fn price_editor_lifecycle_save_get_resave() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();
    let site = SiteId::new();
    let id = create_product(&client, &srv.base_url, site, "SKU-1").await;

    let res = client
        .put(format!("{}/products/{}/price", srv.base_url, id))
        .header("X-Site-Id", site.to_string())
        .json(&two_prices())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let saved: Value = res.json().await.unwrap();
    assert_eq!(
        saved["priceData"]["price.label"],
        json!(["2 ~ 10.00 EUR", "1 ~ 8.00 USD"])
    );
    assert_eq!(saved["priceData"]["product.lists.position"], json!(["0", "1"]));

    let res = client
        .get(format!("{}/products/{}/price", srv.base_url, id))
        .header("X-Site-Id", site.to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let view: Value = res.json().await.unwrap();
    assert_eq!(view["priceData"], saved["priceData"]);
    assert_eq!(view["priceListTypes"][0]["code"], "default");
    assert_eq!(view["priceCurrencies"].as_array().unwrap().len(), 2);

    // Resubmitting the rendered data keeps every record.
    let res = client
        .put(format!("{}/products/{}/price", srv.base_url, id))
        .header("X-Site-Id", site.to_string())
        .json(&json!({ "price": view["priceData"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let resaved: Value = res.json().await.unwrap();
    assert_eq!(resaved["priceData"], saved["priceData"]);

    // Prices are invisible to other sites.
    let res = client
        .get(format!("{}/products/{}/price", srv.base_url, id))
        .header("X-Site-Id", SiteId::new().to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn copy_blanks_association_ids() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();
    let site = SiteId::new();
    let id = create_product(&client, &srv.base_url, site, "SKU-1").await;

    client
        .put(format!("{}/products/{}/price", srv.base_url, id))
        .header("X-Site-Id", site.to_string())
        .json(&two_prices())
        .send()
        .await
        .unwrap();

    let res = client
        .get(format!("{}/products/{}/price/copy", srv.base_url, id))
        .header("X-Site-Id", site.to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let view: Value = res.json().await.unwrap();
    assert_eq!(view["priceData"]["product.lists.id"], json!(["", ""]));
    assert_eq!(
        view["priceData"]["product.lists.siteid"],
        json!([site.to_string(), site.to_string()])
    );
}

#[tokio::test]
async fn create_echoes_submitted_lines_with_site() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();
    let site = SiteId::new();

    let res = client
        .post(format!("{}/prices/create", srv.base_url))
        .header("X-Site-Id", site.to_string())
        .json(&two_prices())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let view: Value = res.json().await.unwrap();
    assert_eq!(
        view["priceData"]["product.lists.siteid"],
        json!([site.to_string(), site.to_string()])
    );
    assert_eq!(view["priceData"]["price.value"], json!(["10.00", "8.00"]));
}

#[tokio::test]
async fn failed_save_returns_view_with_errors_and_keeps_nothing() {
    let mut registry = SubClientRegistry::new();
    registry.register(Arc::new(Failing));
    let config = AdminConfig {
        price_subparts: vec!["failing".to_string()],
        ..AdminConfig::default()
    };
    let srv = TestServer::spawn(config, registry).await;
    let client = reqwest::Client::new();
    let site = SiteId::new();
    let id = create_product(&client, &srv.base_url, site, "SKU-1").await;

    let res = client
        .put(format!("{}/products/{}/price", srv.base_url, id))
        .header("X-Site-Id", site.to_string())
        .json(&two_prices())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let view: Value = res.json().await.unwrap();
    let message = view["errors"]["product-item-price"].as_str().unwrap();
    assert!(message.starts_with("media storage unavailable, "), "{message}");
    assert_eq!(view["priceData"]["price.value"], json!(["10.00", "8.00"]));

    let res = client
        .get(format!("{}/products/{}/price", srv.base_url, id))
        .header("X-Site-Id", site.to_string())
        .send()
        .await
        .unwrap();
    let view: Value = res.json().await.unwrap();
    assert_eq!(view["priceData"], json!({ "config": [] }));
}

#[tokio::test]
async fn malformed_amount_is_reported_in_the_view() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();
    let site = SiteId::new();
    let id = create_product(&client, &srv.base_url, site, "SKU-1").await;

    let res = client
        .put(format!("{}/products/{}/price", srv.base_url, id))
        .header("X-Site-Id", site.to_string())
        .json(&json!({
            "price": {
                "product.lists.id": [""],
                "price.value": ["ten"],
                "price.currencyid": ["EUR"],
            }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let view: Value = res.json().await.unwrap();
    assert!(
        view["errors"]["product-item-price"]
            .as_str()
            .unwrap()
            .starts_with("validation failed")
    );
}

#[tokio::test]
async fn missing_currencies_is_a_configuration_error() {
    let config = AdminConfig {
        currencies: Vec::new(),
        ..AdminConfig::default()
    };
    let srv = TestServer::spawn(config, SubClientRegistry::new()).await;
    let client = reqwest::Client::new();
    let site = SiteId::new();
    let id = create_product(&client, &srv.base_url, site, "SKU-1").await;

    let res = client
        .get(format!("{}/products/{}/price", srv.base_url, id))
        .header("X-Site-Id", site.to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "configuration_error");
    assert_eq!(
        body["message"],
        "No currencies available. Please enable at least one currency"
    );
}

#[tokio::test]
async fn deleting_a_product_removes_its_prices() {
    let tap = Arc::new(StoreTap::default());
    let mut registry = SubClientRegistry::new();
    registry.register(tap.clone());
    let config = AdminConfig {
        price_subparts: vec!["tap".to_string()],
        ..AdminConfig::default()
    };
    let srv = TestServer::spawn(config, registry).await;
    let client = reqwest::Client::new();
    let site = SiteId::new();
    let id = create_product(&client, &srv.base_url, site, "SKU-1").await;

    let res = client
        .put(format!("{}/products/{}/price", srv.base_url, id))
        .header("X-Site-Id", site.to_string())
        .json(&two_prices())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let view: Value = res.json().await.unwrap();
    let price_ids: Vec<PriceId> = view["priceData"]["price.id"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().parse().unwrap())
        .collect();
    assert_eq!(price_ids.len(), 2);
    let ctx = tap.ctx.lock().unwrap().clone().unwrap();
    let product_id: ProductId = id.parse().unwrap();

    let res = client
        .delete(format!("{}/products/{}", srv.base_url, id))
        .header("X-Site-Id", site.to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/products/{}", srv.base_url, id))
        .header("X-Site-Id", site.to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    assert!(ctx.stores.prices.get_prices(site, &price_ids).unwrap().is_empty());
    assert!(
        ctx.stores
            .lists
            .list_items(site, product_id, PRICE_DOMAIN)
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn duplicate_product_codes_conflict() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();
    let site = SiteId::new();
    create_product(&client, &srv.base_url, site, "SKU-1").await;

    let res = client
        .post(format!("{}/products", srv.base_url))
        .header("X-Site-Id", site.to_string())
        .json(&json!({ "code": "SKU-1", "label": "Other" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client
        .get(format!("{}/products", srv.base_url))
        .header("X-Site-Id", site.to_string())
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

#[test]
fn unknown_subclient_fails_startup() {
    let config = AdminConfig {
        price_subparts: vec!["stock".to_string()],
        ..AdminConfig::default()
    };
    let err = catalog_admin::app::build_app(&config, &SubClientRegistry::new()).unwrap_err();
    assert!(matches!(err, AdminError::UnknownSubClient(name) if name == "stock"));
}
