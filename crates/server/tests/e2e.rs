use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use configs::DatabaseConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::errors::ServiceError;
use service::items::{
    repo::seaorm::SeaOrmItemRepository,
    repository::memory::InMemoryItemRepository,
    Item, ItemRepository,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, ServerState};

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn items(&self) -> String { format!("{}/api/items", self.base_url) }
    fn item(&self, id: impl std::fmt::Display) -> String { format!("{}/api/items/{}", self.base_url, id) }
}

async fn start_server_with(repo: Arc<dyn ItemRepository>) -> anyhow::Result<TestApp> {
    let app: Router = routes::build_router(ServerState::new(repo), cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

async fn start_server() -> anyhow::Result<TestApp> {
    start_server_with(Arc::new(InMemoryItemRepository::default())).await
}

/// Server backed by a migrated in-memory SQLite database.
async fn start_sqlite_server() -> anyhow::Result<TestApp> {
    let cfg = DatabaseConfig { max_connections: 1, min_connections: 1, ..DatabaseConfig::with_url("sqlite::memory:") };
    let db = models::db::connect_and_migrate(&cfg).await?;
    start_server_with(Arc::new(SeaOrmItemRepository::new(db))).await
}

/// Store whose every call fails, as an unreachable database would.
struct UnavailableRepository;

#[async_trait::async_trait]
impl ItemRepository for UnavailableRepository {
    async fn save(&self, _item: Item) -> Result<Item, ServiceError> { Err(ServiceError::Db("down".into())) }
    async fn find_all(&self) -> Result<Vec<Item>, ServiceError> { Err(ServiceError::Db("down".into())) }
    async fn find_by_id(&self, _id: i64) -> Result<Option<Item>, ServiceError> { Err(ServiceError::Db("down".into())) }
    async fn delete(&self, _item: Item) -> Result<(), ServiceError> { Err(ServiceError::Db("down".into())) }
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_create_returns_persisted_item() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().post(app.items())
        .json(&json!({"name": "Test Item", "description": "Test Description"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["name"], "Test Item");
    assert_eq!(body["description"], "Test Description");
    assert!(body["id"].is_i64());
    Ok(())
}

#[tokio::test]
async fn e2e_create_ignores_client_id() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().post(app.items())
        .json(&json!({"id": 500, "name": "n", "description": "d"}))
        .send().await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["id"], 1);
    Ok(())
}

#[tokio::test]
async fn e2e_list_contains_all_created() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let mut ids = HashSet::new();
    for i in 1..=3 {
        let body = c.post(app.items())
            .json(&json!({"name": format!("Item {i}"), "description": format!("Description {i}")}))
            .send().await?
            .json::<Value>().await?;
        ids.insert(body["id"].as_i64().unwrap());
    }

    let res = c.get(app.items()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let listed: Vec<Value> = res.json().await?;
    let listed_ids: HashSet<i64> = listed.iter().filter_map(|v| v["id"].as_i64()).collect();
    assert_eq!(listed_ids, ids);
    Ok(())
}

#[tokio::test]
async fn e2e_empty_list_is_array() -> anyhow::Result<()> {
    let app = start_server().await?;
    let body = client().get(app.items()).send().await?.json::<Value>().await?;
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_id_is_404_with_empty_body() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.get(app.item(99)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert!(res.bytes().await?.is_empty());

    let res = c.put(app.item(99)).json(&json!({"name": "x", "description": "y"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert!(res.bytes().await?.is_empty());

    let res = c.delete(app.item(99)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert!(res.bytes().await?.is_empty());

    // The failed PUT must not have created anything.
    let listed = c.get(app.items()).send().await?.json::<Value>().await?;
    assert_eq!(listed, json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_id_beyond_32_bits_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.get(app.item(4_294_967_296_i64)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.put(app.item(i64::MAX)).json(&json!({"name": "x", "description": "y"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(app.item(4_294_967_296_i64)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_storage_failure_is_500_with_json_body() -> anyhow::Result<()> {
    let app = start_server_with(Arc::new(UnavailableRepository)).await?;
    let c = client();
    let payload = json!({"name": "a", "description": "b"});
    let expected = json!({"error": "Internal Server Error", "message": "database error: down"});

    let responses = vec![
        ("POST /api/items", c.post(app.items()).json(&payload).send().await?),
        ("GET /api/items", c.get(app.items()).send().await?),
        ("GET /api/items/1", c.get(app.item(1)).send().await?),
        ("PUT /api/items/1", c.put(app.item(1)).json(&payload).send().await?),
        ("DELETE /api/items/1", c.delete(app.item(1)).send().await?),
    ];
    for (route, res) in responses {
        assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR, "{route}");
        assert_eq!(res.json::<Value>().await?, expected, "{route}");
    }
    Ok(())
}

#[tokio::test]
async fn e2e_put_requires_both_fields() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    c.post(app.items()).json(&json!({"name": "a", "description": "b"})).send().await?;

    let res = c.put(app.item(1)).json(&json!({"name": "only name"})).send().await?;
    assert!(res.status().is_client_error());

    let body = c.get(app.item(1)).send().await?.json::<Value>().await?;
    assert_eq!(body, json!({"id": 1, "name": "a", "description": "b"}));
    Ok(())
}

#[tokio::test]
async fn e2e_non_numeric_id_is_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.item("abc")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_metrics_exposed() -> anyhow::Result<()> {
    let app = start_server().await?;
    client().get(app.item(12345)).send().await?;
    let res = client().get(format!("{}/metrics", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let text = res.text().await?;
    assert!(text.contains("item_api_operations_total"));
    assert!(text.contains("item_api_not_found_total"));
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document_served() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/api-docs/openapi.json", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let doc = res.json::<Value>().await?;
    assert!(doc["paths"]["/api/items/{id}"].is_object());
    Ok(())
}

/// Create, read, update, delete, then read again.
async fn run_laptop_scenario(app: &TestApp) -> anyhow::Result<()> {
    let c = client();

    let res = c.post(app.items())
        .json(&json!({"name": "Laptop", "description": "Gaming Laptop"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let created = res.json::<Value>().await?;
    let id = created["id"].as_i64().unwrap();

    let res = c.get(app.item(id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"id": id, "name": "Laptop", "description": "Gaming Laptop"}));

    let res = c.get(app.item(99)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.put(app.item(id))
        .json(&json!({"name": "Laptop Pro", "description": "Updated"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"id": id, "name": "Laptop Pro", "description": "Updated"}));

    let res = c.delete(app.item(id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    let res = c.get(app.item(id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_laptop_scenario_in_memory() -> anyhow::Result<()> {
    let app = start_server().await?;
    run_laptop_scenario(&app).await
}

#[tokio::test]
async fn e2e_laptop_scenario_sqlite() -> anyhow::Result<()> {
    let app = start_sqlite_server().await?;
    run_laptop_scenario(&app).await
}
