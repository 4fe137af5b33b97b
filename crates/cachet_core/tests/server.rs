use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use cachet_cache::{CacheKey, CacheRecord, CacheStore};
use cachet_config::{CachetConfig, OriginConfig, ServerConfig};
use cachet_core::Master;
use http::{HeaderMap, StatusCode};
use httpmock::MockServer;
use reqwest::Method;
use tokio::net::TcpListener;

async fn start_proxy(origin: &str, store: Arc<CacheStore>, tweak: impl FnOnce(&mut CachetConfig)) -> SocketAddr {
    let mut cfg = CachetConfig {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 1,
            ..ServerConfig::default()
        },
        origin: OriginConfig {
            url: origin.to_string(),
            ..OriginConfig::default()
        },
        ..CachetConfig::default()
    };
    tweak(&mut cfg);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(Master::new(cfg, store).serve(listener));
    addr
}

#[tokio::test]
async fn miss_then_hit_over_http() {
    let origin = MockServer::start();
    let mock = origin.mock(|when, then| {
        when.method("GET").path("/products");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"id":1}]"#);
    });

    let addr = start_proxy(&origin.base_url(), Arc::new(CacheStore::new()), |_| {}).await;
    let client = reqwest::Client::new();
    let url = format!("http://{addr}/products");

    let first = client.get(&url).send().await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.headers()["x-cache"], "MISS");
    assert_eq!(first.text().await.unwrap(), r#"[{"id":1}]"#);

    let second = client.get(&url).send().await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(second.headers()["x-cache"], "HIT");
    assert_eq!(second.headers()["content-type"], "application/json");
    assert_eq!(second.text().await.unwrap(), r#"[{"id":1}]"#);

    assert_eq!(mock.hits(), 1);
}

#[tokio::test]
async fn clear_cache_endpoint_empties_the_store() {
    let origin = MockServer::start();
    let mock = origin.mock(|when, then| {
        when.method("GET").path("/page");
        then.status(200).body("page");
    });

    let store = Arc::new(CacheStore::new());
    let addr = start_proxy(&origin.base_url(), Arc::clone(&store), |_| {}).await;
    let client = reqwest::Client::new();
    let page = format!("http://{addr}/page");

    client.get(&page).send().await.unwrap();
    assert_eq!(store.len(), 1);

    let resp = client
        .post(format!("http://{addr}/clear-cache"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get("x-cache").is_none());
    let body: serde_json::Value = serde_json::from_slice(&resp.bytes().await.unwrap()).unwrap();
    assert_eq!(body["status"], "cleared");
    assert_eq!(body["message"], "Cache cleared successfully");
    assert!(store.is_empty());

    let again = client.get(&page).send().await.unwrap();
    assert_eq!(again.headers()["x-cache"], "MISS");
    assert_eq!(mock.hits(), 2);
}

#[tokio::test]
async fn clear_cache_is_never_forwarded() {
    let origin = MockServer::start();
    let mock = origin.mock(|when, then| {
        when.method("POST").path("/clear-cache");
        then.status(200).body("origin");
    });

    let addr = start_proxy(&origin.base_url(), Arc::new(CacheStore::new()), |_| {}).await;
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/clear-cache?now=1"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn unsupported_methods_get_405() {
    let origin = MockServer::start();
    let addr = start_proxy(&origin.base_url(), Arc::new(CacheStore::new()), |_| {}).await;
    let client = reqwest::Client::new();

    for method in [Method::HEAD, Method::OPTIONS] {
        let resp = client
            .request(method, format!("http://{addr}/products"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["allow"], "GET, POST, PUT, PATCH, DELETE");
        assert!(resp.headers().get("x-cache").is_none());
    }
}

#[tokio::test]
async fn oversized_request_body_gets_413() {
    let origin = MockServer::start();
    let mock = origin.mock(|when, then| {
        when.method("POST");
        then.status(200);
    });

    let addr = start_proxy(&origin.base_url(), Arc::new(CacheStore::new()), |cfg| {
        cfg.server.max_request_body_bytes = 8;
    })
    .await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/upload"))
        .body("0123456789abcdef")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn clear_on_startup_drops_preexisting_records() {
    let origin = MockServer::start();
    let store = Arc::new(CacheStore::new());
    store.set(
        CacheKey::new("/stale", None),
        Arc::new(CacheRecord::new(StatusCode::OK, HeaderMap::new(), Bytes::from_static(b"old"))),
    );

    let addr = start_proxy(&origin.base_url(), Arc::clone(&store), |cfg| {
        cfg.cache.clear_on_startup = true;
    })
    .await;

    // The store is cleared before the first accept, so any response proves it ran.
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/clear-cache"))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&resp.bytes().await.unwrap()).unwrap();
    assert_eq!(body["removed"], 0);
}
