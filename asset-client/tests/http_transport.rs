//! reqwest transport against a local axum stand-in for the sheet script

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::json;

use asset_client::{AssetClient, AssetStatus, ClientConfig, ClientError, HistoryEntry};

#[derive(Clone, Default)]
struct Script {
    posts: Arc<Mutex<Vec<(String, String)>>>,
    reads: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn get_data(
    State(script): State<Script>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let action = params.get("action").cloned();
    script.reads.lock().unwrap().push(params);
    if action.as_deref() != Some("GET_DATA") {
        return (StatusCode::BAD_REQUEST, "unknown action").into_response();
    }
    axum::Json(json!({
        "devices": [
            { "tagId": "IT-001", "name": "Laptop A", "status": "AVAILABLE" },
            { "tagId": "IT-002", "name": "Laptop B", "status": "ASSIGNED", "assignedTo": "Trần B" }
        ],
        "users": [
            { "employeeId": "O01", "name": "Nguyễn Văn A", "role": "OPERATION" },
            { "employeeId": "S01", "name": "Trần B", "role": "STAFF" }
        ],
        "history": []
    }))
    .into_response()
}

async fn write(State(script): State<Script>, headers: HeaderMap, body: String) -> &'static str {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    script.posts.lock().unwrap().push((content_type, body));
    // Opaque script reply, never read by the client
    "{\"status\":\"success\"}"
}

const DEVICES_CSV: &str = "Tag ID,Tên thiết bị,Loại,Trạng thái,Người sử dụng\r\n\
IT-001,\"Laptop, 14\"\"\",Laptop,available,\r\n\
IT-002,Monitor,,ASSIGNED,S01\r\n";
const USERS_CSV: &str = "Mã NV,Họ tên,Vai trò\nS01,Trần B,staff\n\nO01,Nguyễn Văn A,OPERATION\n";
const HISTORY_CSV: &str = "Mã tài sản,Tên thiết bị,Hành động,Thời gian,Người thực hiện,Đối tượng\n\
IT-002,Monitor,Cấp phát ASSIGN,2024-05-01T01:00:00Z,Nguyễn Văn A,Trần B\n\
IT-001,Laptop,RETURN,2024-05-02T01:00:00Z,Nguyễn Văn A,Trần B\n";

async fn serve(script: Script) -> SocketAddr {
    let app = Router::new()
        .route("/exec", get(get_data).post(write))
        .route("/devices.csv", get(|| async { DEVICES_CSV }))
        .route("/users.csv", get(|| async { USERS_CSV }))
        .route("/history.csv", get(|| async { HISTORY_CSV }))
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "script crashed") }),
        )
        .with_state(script);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_json_read_and_plain_text_write() {
    let script = Script::default();
    let addr = serve(script.clone()).await;

    let config = ClientConfig::new(format!("http://{addr}/exec"))
        .with_settle_delay(Duration::ZERO)
        .with_timeout(5);
    let mut client = AssetClient::from_config(config).unwrap();
    client.refresh().await.unwrap();
    assert_eq!(client.state().devices().len(), 2);

    client.identify("O01", None).unwrap();
    client.assign_device("IT-001", "S01").await.unwrap();

    let posts = script.posts.lock().unwrap().clone();
    assert_eq!(posts.len(), 1);
    assert!(posts[0].0.starts_with("text/plain"));
    let body: serde_json::Value = serde_json::from_str(&posts[0].1).unwrap();
    assert_eq!(body["action"], "ASSIGN_DEVICE");
    assert_eq!(body["userName"], "Trần B");

    // Initial load plus the refetch, each cache-busted
    let reads = script.reads.lock().unwrap().clone();
    assert_eq!(reads.len(), 2);
    assert!(reads.iter().all(|r| r.contains_key("cb")));
}

#[tokio::test]
async fn test_csv_exports_take_precedence() {
    let script = Script::default();
    let addr = serve(script.clone()).await;

    let config = ClientConfig::new(format!("http://{addr}/exec")).with_csv_exports(
        format!("http://{addr}/devices.csv"),
        format!("http://{addr}/users.csv"),
        format!("http://{addr}/history.csv"),
    );
    let mut client = AssetClient::from_config(config).unwrap();
    client.refresh().await.unwrap();

    let state = client.state();
    assert!(script.reads.lock().unwrap().is_empty());

    let devices = state.devices();
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].name, "Laptop, 14\"");
    assert_eq!(devices[0].status, AssetStatus::Available);
    assert_eq!(devices[0].assigned_to, None);
    assert_eq!(devices[1].kind, "Khác");
    assert_eq!(devices[1].assigned_to.as_deref(), Some("S01"));

    assert_eq!(state.users().len(), 2);

    let history: Vec<&HistoryEntry> = state.history().iter().collect();
    assert_eq!(history[0].tag_id, "IT-001");
    assert_eq!(history[1].raw_action, "Cấp phát ASSIGN");
    assert_eq!(history[1].timestamp, "08:00:00 01/05/2024");
}

#[tokio::test]
async fn test_http_error_status_sets_read_banner() {
    let addr = serve(Script::default()).await;

    let config = ClientConfig::default().with_csv_exports(
        format!("http://{addr}/broken"),
        format!("http://{addr}/users.csv"),
        format!("http://{addr}/history.csv"),
    );
    let mut client = AssetClient::from_config(config).unwrap();
    let err = client.refresh().await.unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 500, .. }));
    assert!(client.state().banner().unwrap().network);
    assert!(client.state().devices().is_empty());
}
