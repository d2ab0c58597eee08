use super::*;
use axum::{http::StatusCode, routing::post, Json, Router};
use std::sync::Arc;
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

fn query() -> SearchQuery {
    SearchQuery {
        train_no: "12345".to_string(),
        date: "2024-01-01".to_string(),
        station: "NDLS".to_string(),
        dest_station: "BCT".to_string(),
        class_pref: "SL".to_string(),
    }
}

#[tokio::test]
async fn posts_query_as_json_to_find_seats_route() {
    let (tx, rx) = oneshot::channel::<serde_json::Value>();
    let tx = Arc::new(Mutex::new(Some(tx)));
    let router = Router::new().route(
        FIND_SEATS_ROUTE,
        post(move |Json(body): Json<serde_json::Value>| {
            let tx = tx.clone();
            async move {
                if let Some(tx) = tx.lock().await.take() {
                    let _ = tx.send(body);
                }
                Json(serde_json::json!({
                    "status": "success",
                    "raw_data": [{ "Coach": "S1", "Seat": "4", "From": "NDLS", "To": "BCT", "Type": "LB" }]
                }))
            }
        }),
    );
    let server_url = spawn_server(router).await;

    let client = SearchClient::new(&server_url).expect("client");
    let result = client.find_seats(&query()).await.expect("result");
    assert!(result.is_success());
    assert_eq!(result.raw_data.expect("rows")[0].seat, "4");

    let body = rx.await.expect("request body");
    assert_eq!(
        body,
        serde_json::json!({
            "train_no": "12345",
            "date": "2024-01-01",
            "station": "NDLS",
            "dest_station": "BCT",
            "class_pref": "SL"
        })
    );
}

#[tokio::test]
async fn error_status_with_json_body_is_a_result_not_a_failure() {
    let router = Router::new().route(
        FIND_SEATS_ROUTE,
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "status": "error", "message": "No data found." })),
            )
        }),
    );
    let server_url = spawn_server(router).await;

    let client = SearchClient::new(&server_url).expect("client");
    let result = client.find_seats(&query()).await.expect("result");
    assert!(!result.is_success());
    assert_eq!(result.message.as_deref(), Some("No data found."));
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let router = Router::new().route(
        FIND_SEATS_ROUTE,
        post(|| async { (StatusCode::BAD_GATEWAY, "<html>proxy error</html>") }),
    );
    let server_url = spawn_server(router).await;

    let client = SearchClient::new(&server_url).expect("client");
    let err = client.find_seats(&query()).await.expect_err("decode");
    assert!(matches!(err, TransportError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = SearchClient::new(&format!("http://{addr}")).expect("client");
    let err = client.find_seats(&query()).await.expect_err("connect");
    assert!(matches!(err, TransportError::Request(_)));
}

#[test]
fn rejects_unparseable_server_url() {
    assert!(matches!(
        SearchClient::new("not a url"),
        Err(TransportError::InvalidServerUrl(_))
    ));
}

#[test]
fn endpoint_replaces_any_base_path() {
    let client = SearchClient::new("http://127.0.0.1:5000/ui/").expect("client");
    assert_eq!(client.endpoint().as_str(), "http://127.0.0.1:5000/api/find_seats");
}
