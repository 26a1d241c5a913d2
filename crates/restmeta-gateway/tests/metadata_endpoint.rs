#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use restmeta_core::host::{
    DeploymentRegistry, EndpointDescriptor, EndpointKind, MethodRegistry, RegistryProvider,
    ResourceClass,
};
use restmeta_gateway::app_state::AppState;
use restmeta_gateway::config;
use restmeta_gateway::host::StaticHost;
use restmeta_gateway::metadata::REGISTRY_NOT_FOUND_BODY;
use restmeta_gateway::router::build_router;

const ENDPOINT: &str = "/resteasy/KotlinMetadata";

const WITH_DEPLOYMENTS: &str = r#"
version: 1
deployments:
  - id: "main"
    resources:
      - class: "com.example.UserResource"
        annotations: ["kotlin.Metadata", "javax.ws.rs.Path"]
        endpoints:
          - method: "getUser"
            path: "/{id}"
            full_path: "/users/{id}"
            http_methods: ["GET"]
            produces: ["application/json"]
            return_type: { classifier: "com.example.User", nullable: true }
            params:
              - { name: "id", kind: PATH_PARAM, type: { classifier: "kotlin.Long" } }
          - method: "orders"
            kind: locator
            path: "/{id}/orders"
            full_path: "/users/{id}/orders"
            return_type: { classifier: "com.example.OrderResource" }
      - class: "com.example.JavaResource"
        annotations: ["javax.ws.rs.Path"]
        endpoints:
          - method: "ping"
            full_path: "/ping"
            http_methods: ["GET"]
"#;

async fn get(app: &Router, uri: &str) -> (StatusCode, String, Vec<u8>) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, content_type, body.to_vec())
}

fn state_from(yaml: &str) -> AppState {
    AppState::new(config::load_from_str(yaml).expect("config"))
}

#[tokio::test]
async fn serves_marked_resources_as_json() {
    let app = build_router(state_from(WITH_DEPLOYMENTS));

    let (status, content_type, body) = get(&app, ENDPOINT).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");

    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), 2);

    assert_eq!(arr[0]["resourceClass"], "com.example.UserResource");
    assert_eq!(arr[0]["method"], "getUser");
    assert_eq!(arr[0]["resourceMethod"], true);
    assert_eq!(arr[0]["returnType"]["isMarkedNullable"], true);
    assert_eq!(arr[0]["params"][0]["paramType"], "PATH_PARAM");
    assert_eq!(arr[0]["params"][0]["paramName"], "id");
    assert_eq!(arr[0]["params"][0]["type"]["isMarkedNullable"], false);
    assert_eq!(arr[0]["fullPath"], "/users/{id}");

    assert_eq!(arr[1]["method"], "orders");
    assert_eq!(arr[1]["resourceMethod"], false);
    assert_eq!(arr[1]["httpMethods"], serde_json::json!([]));
}

#[tokio::test]
async fn repeated_calls_are_byte_identical() {
    let state = state_from(WITH_DEPLOYMENTS);
    let app = build_router(state.clone());

    let (_, _, first) = get(&app, ENDPOINT).await;
    let (_, _, second) = get(&app, ENDPOINT).await;
    assert_eq!(first, second);
    assert_eq!(state.snapshots().builds(), 1);
}

#[tokio::test]
async fn missing_registry_returns_plain_text_diagnostic() {
    let state = state_from("version: 1\n");
    let app = build_router(state.clone());

    let (status, content_type, body) = get(&app, ENDPOINT).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "text/plain");
    assert_eq!(body, REGISTRY_NOT_FOUND_BODY.as_bytes());

    // Not cached: the next request looks again.
    get(&app, ENDPOINT).await;
    assert!(state.snapshots().get().is_none());
    assert_eq!(state.snapshots().builds(), 2);
}

#[tokio::test]
async fn empty_deployments_are_found_not_absent() {
    let app = build_router(state_from("version: 1\ndeployments: []\n"));

    let (status, content_type, body) = get(&app, ENDPOINT).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(body, b"[]");
}

#[tokio::test]
async fn custom_endpoint_path_and_marker() {
    let yaml = r#"
version: 1
server:
  endpoint_path: "/meta"
  marker_annotation: "com.example.Described"
deployments:
  - id: "main"
    resources:
      - class: "com.example.A"
        annotations: ["com.example.Described"]
        endpoints:
          - { method: "a", http_methods: ["POST"] }
      - class: "com.example.B"
        annotations: ["kotlin.Metadata"]
        endpoints:
          - { method: "b", http_methods: ["GET"] }
"#;
    let state = state_from(yaml);
    assert_eq!(state.snapshots().marker(), "com.example.Described");
    let app = build_router(state);

    let (status, _, body) = get(&app, "/meta").await;
    assert_eq!(status, StatusCode::OK);
    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 1);
    assert_eq!(v[0]["resourceClass"], "com.example.A");

    let (status, _, _) = get(&app, ENDPOINT).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn healthz_is_ok() {
    let app = build_router(state_from("version: 1\n"));
    let (status, _, body) = get(&app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

/// Provider that stalls on lookup so concurrent first requests overlap.
struct SlowHost {
    inner: StaticHost,
}

impl RegistryProvider for SlowHost {
    fn registry(&self) -> Option<Arc<DeploymentRegistry>> {
        std::thread::sleep(Duration::from_millis(50));
        self.inner.registry()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_requests_run_one_discovery_pass() {
    let cfg = config::load_from_str(WITH_DEPLOYMENTS).unwrap();
    let inner = StaticHost::from_config(cfg.deployments.as_deref());
    let state = AppState::with_host(cfg, Arc::new(SlowHost { inner }));
    let app = build_router(state.clone());

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move { get(&app, ENDPOINT).await }));
    }

    let mut bodies = Vec::new();
    for t in tasks {
        let (status, _, body) = t.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        bodies.push(body);
    }

    assert_eq!(state.snapshots().builds(), 1);
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn introspection_failure_is_a_server_error() {
    let class = Arc::new(ResourceClass {
        qualified_name: "com.example.Broken".into(),
        annotations: vec!["kotlin.Metadata".into()],
    });
    let mut methods = MethodRegistry::new();
    methods.bind(
        "/broken",
        Arc::new(EndpointDescriptor {
            resource_class: class,
            method_name: String::new(),
            return_type: None,
            params: vec![],
            full_path: Some("/broken".into()),
            path: None,
            kind: EndpointKind::Locator,
        }),
    );
    let mut registry = DeploymentRegistry::new();
    registry.insert("main", methods);

    let cfg = config::load_from_str("version: 1\n").unwrap();
    let state = AppState::with_host(cfg, Arc::new(StaticHost::with_registry(registry)));
    let app = build_router(state.clone());

    let (status, content_type, _) = get(&app, ENDPOINT).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(content_type, "text/plain");
    assert!(state.snapshots().get().is_none());
}
