use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

use super::*;

#[derive(Clone)]
struct MockBackend {
    categories: Arc<Vec<Value>>,
    scripts: Arc<Vec<Value>>,
    requests: Arc<Mutex<Vec<String>>>,
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"code": 404, "message": "The requested resource wasn't found.", "data": {}})),
    )
}

async fn list_records(
    State(state): State<MockBackend>,
    Path(collection): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let mut keys: Vec<_> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    keys.sort();
    state
        .requests
        .lock()
        .await
        .push(format!("list {collection} {}", keys.join("&")));

    match collection.as_str() {
        "categories" => {
            let per_page: usize = query
                .get("perPage")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30);
            let page: usize = query.get("page").and_then(|v| v.parse().ok()).unwrap_or(1);
            let total_pages = state.categories.len().div_ceil(per_page);
            let items: Vec<Value> = state
                .categories
                .iter()
                .skip((page - 1) * per_page)
                .take(per_page)
                .cloned()
                .collect();
            (
                StatusCode::OK,
                Json(json!({
                    "page": page,
                    "perPage": per_page,
                    "totalItems": state.categories.len(),
                    "totalPages": total_pages,
                    "items": items,
                })),
            )
        }
        "proxmox_scripts" => {
            let filter = query.get("filter").cloned().unwrap_or_default();
            let items: Vec<Value> = state
                .scripts
                .iter()
                .filter(|script| {
                    let title = script["title"].as_str().unwrap_or_default();
                    filter == title_filter(title)
                })
                .cloned()
                .collect();
            (
                StatusCode::OK,
                Json(json!({
                    "page": 1, "perPage": 1, "totalItems": items.len(), "totalPages": 1,
                    "items": items,
                })),
            )
        }
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"code": 500, "message": "collection offline", "data": {}})),
        ),
    }
}

async fn get_record(
    State(state): State<MockBackend>,
    Path((collection, id)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    state
        .requests
        .lock()
        .await
        .push(format!("get {collection} {id}"));
    state
        .scripts
        .iter()
        .find(|script| script["id"] == id.as_str())
        .map(|script| (StatusCode::OK, Json(script.clone())))
        .unwrap_or_else(not_found)
}

async fn spawn_backend(
    categories: Vec<Value>,
    scripts: Vec<Value>,
) -> (String, Arc<Mutex<Vec<String>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = MockBackend {
        categories: Arc::new(categories),
        scripts: Arc::new(scripts),
        requests: requests.clone(),
    };
    let app = Router::new()
        .route("/api/collections/:collection/records", get(list_records))
        .route("/api/collections/:collection/records/:id", get(get_record))
        .with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), requests)
}

fn client_for(backend_url: &str, page_size: u32) -> CatalogClient {
    CatalogClient::new(CatalogSettings {
        backend_url: backend_url.to_string(),
        page_size,
        ..CatalogSettings::default()
    })
    .expect("client")
}

fn docker() -> Value {
    json!({
        "id": "a1b2c3d4e5f6g7h",
        "title": "Docker",
        "item_type": "LXC",
        "installCommand": "bash -c \"$(wget -qLO - https://example.invalid/docker.sh)\"",
        "default_cpu": "2",
        "created": "2024-02-01 12:00:00.000Z"
    })
}

fn category(name: &str, scripts: Vec<Value>) -> Value {
    json!({
        "id": format!("cat-{name}"),
        "collectionId": "categories-col",
        "catagoryName": name,
        "expand": { "items": scripts }
    })
}

#[tokio::test]
async fn list_categories_walks_every_page_with_expanded_items() {
    let (url, requests) = spawn_backend(
        vec![
            category("Containers", vec![docker()]),
            category("Media", vec![json!({"id": "p", "title": "Plex"})]),
            category("Misc", vec![]),
        ],
        vec![],
    )
    .await;

    let categories = client_for(&url, 2).list_categories().await.expect("categories");

    let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Containers", "Media", "Misc"]);
    assert_eq!(categories[0].items()[0].title, "Docker");

    let requests = requests.lock().await;
    assert_eq!(
        *requests,
        vec![
            "list categories expand=items&page=1&perPage=2".to_string(),
            "list categories expand=items&page=2&perPage=2".to_string(),
        ]
    );
}

#[tokio::test]
async fn paging_stops_when_backend_omits_the_page_number() {
    let requests = Arc::new(Mutex::new(Vec::<String>::new()));
    let seen = requests.clone();
    let app = Router::new().route(
        "/api/collections/categories/records",
        get(move |Query(query): Query<HashMap<String, String>>| {
            let seen = seen.clone();
            async move {
                let page = query.get("page").cloned().unwrap_or_default();
                seen.lock().await.push(page.clone());
                Json(json!({
                    "perPage": 1, "totalItems": 2, "totalPages": 2,
                    "items": [category(&format!("Page {page}"), vec![])],
                }))
            }
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let categories = client_for(&format!("http://{addr}"), 1)
        .list_categories()
        .await
        .expect("categories");

    assert_eq!(categories.len(), 2);
    assert_eq!(*requests.lock().await, vec!["1".to_string(), "2".to_string()]);
}

#[tokio::test]
async fn get_script_by_record_id() {
    let (url, _) = spawn_backend(vec![], vec![docker()]).await;
    let record = client_for(&url, 50)
        .get_script("a1b2c3d4e5f6g7h")
        .await
        .expect("record");
    assert_eq!(record.title, "Docker");
    assert_eq!(record.default_cpu, "2");
}

#[tokio::test]
async fn resolve_script_falls_back_to_title_lookup() {
    let (url, requests) = spawn_backend(vec![], vec![docker()]).await;
    let record = client_for(&url, 50)
        .resolve_script("Docker")
        .await
        .expect("record");
    assert_eq!(record.id.as_str(), "a1b2c3d4e5f6g7h");

    let requests = requests.lock().await;
    assert_eq!(requests[0], "get proxmox_scripts Docker");
    assert!(requests[1].starts_with("list proxmox_scripts filter=(title='Docker')"));
}

#[tokio::test]
async fn resolve_unknown_script_is_not_found() {
    let (url, _) = spawn_backend(vec![], vec![docker()]).await;
    let err = client_for(&url, 50)
        .resolve_script("Podman")
        .await
        .expect_err("missing script");
    assert!(err.is_not_found(), "unexpected error: {err}");
}

#[tokio::test]
async fn backend_error_message_is_surfaced() {
    let (url, _) = spawn_backend(vec![], vec![]).await;
    let client = CatalogClient::new(CatalogSettings {
        backend_url: url,
        categories_collection: "offline".to_string(),
        ..CatalogSettings::default()
    })
    .expect("client");

    match client.list_categories().await {
        Err(CatalogError::Backend { status, source }) => {
            assert_eq!(status, 500);
            assert_eq!(source.message, "collection offline");
            assert_eq!(source.code, ErrorCode::Internal);
        }
        other => panic!("expected backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = client_for(&format!("http://{addr}"), 50)
        .list_categories()
        .await
        .expect_err("nothing listening");
    assert!(matches!(err, CatalogError::Transport(_)), "got {err}");
}

#[test]
fn rejects_invalid_backend_url() {
    let result = CatalogClient::new(CatalogSettings {
        backend_url: "   ".to_string(),
        ..CatalogSettings::default()
    });
    assert!(matches!(result, Err(CatalogError::InvalidUrl(_))));
}

#[test]
fn title_filter_escapes_quotes() {
    assert_eq!(title_filter("Docker"), "(title='Docker')");
    assert_eq!(title_filter("Bob's Tool"), "(title='Bob\\'s Tool')");
}

#[tokio::test]
async fn static_catalog_resolves_by_id_then_title() {
    let raw = json!({
        "page": 1, "perPage": 10, "totalItems": 1, "totalPages": 1,
        "items": [category("Containers", vec![docker()])]
    })
    .to_string();
    let catalog = StaticCatalog::from_json(&raw).expect("catalog");

    let by_id = catalog.resolve_script("a1b2c3d4e5f6g7h").await.expect("by id");
    let by_title = catalog.resolve_script("Docker").await.expect("by title");
    assert_eq!(by_id, by_title);
    assert!(catalog.resolve_script("docker").await.is_err());
    assert_eq!(catalog.list_categories().await.expect("list").len(), 1);
}

#[tokio::test]
async fn open_backend_prefers_the_offline_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, json!([category("Containers", vec![docker()])]).to_string())
        .expect("write catalog");

    let opened = open_backend(&CatalogSettings::default(), Some(&path)).expect("open");
    assert_eq!(opened.label, path.display().to_string());
    let categories = opened.backend.list_categories().await.expect("list");
    assert_eq!(categories[0].items().len(), 1);
}

#[test]
fn open_backend_labels_the_http_backend() {
    let settings = CatalogSettings {
        backend_url: "catalog.example:8090/".to_string(),
        ..CatalogSettings::default()
    };
    let opened = open_backend(&settings, None).expect("open");
    assert_eq!(opened.label, "http://catalog.example:8090");
}

#[test]
fn open_backend_reports_missing_file() {
    let result = open_backend(
        &CatalogSettings::default(),
        Some(std::path::Path::new("/nonexistent/catalog.json")),
    );
    assert!(matches!(result, Err(CatalogError::Io { .. })));
}

#[test]
fn catalog_errors_map_to_api_codes() {
    assert_eq!(
        CatalogError::NotFound("Docker".to_string()).to_api_error().code,
        ErrorCode::NotFound
    );
    assert_eq!(
        CatalogError::InvalidUrl("::".to_string()).to_api_error().code,
        ErrorCode::BadRequest
    );
}

#[tokio::test]
async fn static_catalog_rejects_blank_keys() {
    let catalog = StaticCatalog::new(vec![Category::new(
        "Tools",
        vec![ScriptRecord {
            title: "Unsaved".to_string(),
            ..ScriptRecord::default()
        }],
    )]);
    for key in ["", "   "] {
        let err = catalog.resolve_script(key).await.expect_err("blank key");
        assert!(err.is_not_found());
    }
}
