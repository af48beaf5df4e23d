//! Cache cleanup client and controller against a local HTTP server.
use axum::{http::StatusCode, routing::post, Json, Router};
use pchealth::api::{ApiError, CleanupClient};
use pchealth::cleanup::{CleanupController, CleanupState, CONNECT_ERROR_FALLBACK};
use pchealth::config::CLEANUP_PATH;
use pchealth::render::{ElementId, Screen};
use serde_json::{json, Value};
use url::Url;

async fn serve(app: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{addr}{CLEANUP_PATH}")).unwrap()
}

async fn client_for(app: Router) -> CleanupClient {
    CleanupClient::new(serve(app).await).unwrap()
}

#[tokio::test]
async fn success_response_decodes() {
    let app = Router::new().route(
        CLEANUP_PATH,
        post(|Json(_body): Json<Value>| async {
            Json(json!({
                "status": "success",
                "message": "Cleaned 12 files",
                "details": {"C:\\Temp": {"files_removed": 12}},
                "space_freed": 4096,
                "files_removed": 12
            }))
        }),
    );
    let resp = client_for(app).await.clean_cache().await.unwrap();
    assert!(resp.is_success());
    assert_eq!(resp.message.as_deref(), Some("Cleaned 12 files"));
    assert_eq!(resp.space_freed, Some(4096));
    assert_eq!(resp.files_removed, Some(12));
}

#[tokio::test]
async fn server_error_body_is_still_read() {
    let app = Router::new().route(
        CLEANUP_PATH,
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"status": "error", "message": "Access denied"})),
            )
        }),
    );
    let resp = client_for(app).await.clean_cache().await.unwrap();
    assert!(!resp.is_success());
    assert_eq!(resp.message.as_deref(), Some("Access denied"));
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let app = Router::new().route(CLEANUP_PATH, post(|| async { "<html>oops</html>" }));
    let err = client_for(app).await.clean_cache().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    // bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let url = Url::parse(&format!("http://{addr}{CLEANUP_PATH}")).unwrap();
    let err = CleanupClient::new(url).unwrap().clean_cache().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn controller_round_trip_success_then_back() {
    let app = Router::new().route(
        CLEANUP_PATH,
        post(|| async {
            Json(json!({"status": "success", "message": "Freed cache", "space_freed": 2048, "files_removed": 2}))
        }),
    );
    let client = client_for(app).await;
    let mut screen = Screen::new(&[]);
    let mut c = CleanupController::new();

    assert!(c.begin(&mut screen));
    assert!(screen.is_visible(ElementId::CleaningView));
    let note = c.finish(client.clean_cache().await, &mut screen);
    assert!(note.success);
    assert_eq!(note.title, "Cleanup Complete");
    assert!(screen.is_visible(ElementId::CleanupResultView));
    assert_eq!(
        screen.text(ElementId::CleanupResultMessage),
        "Freed cache\nFreed 2.00 KB across 2 files"
    );

    c.back(&mut screen);
    assert_eq!(c.state(), &CleanupState::Idle);
    assert!(screen.is_visible(ElementId::CacheInfoView));
}

#[tokio::test]
async fn controller_reports_unreachable_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client =
        CleanupClient::new(Url::parse(&format!("http://{addr}{CLEANUP_PATH}")).unwrap()).unwrap();
    let mut screen = Screen::new(&[]);
    let mut c = CleanupController::new();

    c.begin(&mut screen);
    let note = c.finish(client.clean_cache().await, &mut screen);
    assert!(!note.success);
    assert_eq!(note.message, CONNECT_ERROR_FALLBACK);
    assert_eq!(screen.text(ElementId::ToastMessage), CONNECT_ERROR_FALLBACK);
    assert!(screen.is_visible(ElementId::CacheInfoView));
    assert!(!screen.is_visible(ElementId::CleaningView));
}
