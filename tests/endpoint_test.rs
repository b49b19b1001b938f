//! Endpoint resolver tests against a local DevTools-style metadata server.

use warp::Filter;
use webchat_runner::{resolve_ws_url, RunnerError};

/// Serve `/json/version` the way a browser's debug port does.
async fn start_metadata_server(
    ws_url: &str,
) -> (std::net::SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let ws_url = ws_url.to_string();
    let route = warp::path!("json" / "version").map(move || {
        warp::reply::json(&serde_json::json!({
            "Browser": "Chrome/124.0.6367.60",
            "Protocol-Version": "1.3",
            "webSocketDebuggerUrl": ws_url,
        }))
    });

    let (tx, rx) = tokio::sync::oneshot::channel();
    let (addr, server) =
        warp::serve(route).bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async {
            rx.await.ok();
        });
    tokio::spawn(server);

    (addr, tx)
}

#[tokio::test]
async fn websocket_url_is_used_unmodified() {
    let url = "ws://127.0.0.1:9222/devtools/browser/abc-def";
    let resolved = resolve_ws_url(url).await.expect("ws url should resolve");
    assert_eq!(resolved, url);
}

#[tokio::test]
async fn http_endpoint_resolves_via_metadata_lookup() {
    let ws = "ws://127.0.0.1:33445/devtools/browser/deadbeef";
    let (addr, _shutdown) = start_metadata_server(ws).await;

    let resolved = resolve_ws_url(&format!("http://{}", addr))
        .await
        .expect("metadata lookup should succeed");
    assert_eq!(resolved, ws);
}

#[tokio::test]
async fn trailing_slash_on_http_base_is_tolerated() {
    let ws = "ws://127.0.0.1:33445/devtools/browser/cafe";
    let (addr, _shutdown) = start_metadata_server(ws).await;

    let resolved = resolve_ws_url(&format!("http://{}/", addr))
        .await
        .expect("metadata lookup should succeed");
    assert_eq!(resolved, ws);
}

#[tokio::test]
async fn unreachable_http_endpoint_is_a_connect_error() {
    // Bind and drop a listener to get a port nothing is listening on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let err = resolve_ws_url(&format!("http://{}", addr))
        .await
        .expect_err("nothing is listening there");
    assert!(matches!(err, RunnerError::Connect(_)));
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn metadata_without_websocket_url_is_a_connect_error() {
    let route = warp::path!("json" / "version")
        .map(|| warp::reply::json(&serde_json::json!({ "Browser": "Chrome/124.0.6367.60" })));
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let (addr, server) =
        warp::serve(route).bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async {
            rx.await.ok();
        });
    tokio::spawn(server);

    let err = resolve_ws_url(&format!("http://{}", addr))
        .await
        .expect_err("metadata is missing the websocket URL");
    assert!(matches!(err, RunnerError::Connect(_)));
    drop(tx);
}
