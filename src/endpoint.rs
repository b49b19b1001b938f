//! Resolution of the remote-debugging endpoint to a websocket URL.
//!
//! `CDP_URL` may be the debug websocket itself or the DevTools HTTP base
//! (e.g. `http://127.0.0.1:9222`). Attaching needs the websocket, so the HTTP
//! form is resolved through the browser's `/json/version` metadata.

use serde::Deserialize;

use crate::error::{Result, RunnerError};

pub const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:9222";

#[derive(Debug, Deserialize)]
struct VersionMetadata {
    #[serde(rename = "webSocketDebuggerUrl")]
    web_socket_debugger_url: String,
}

/// Resolve a configured endpoint to the websocket URL required for attach.
///
/// `ws://`/`wss://` values are used unmodified with no network I/O; an
/// `http://`/`https://` base triggers one metadata lookup. An unreachable
/// endpoint or malformed metadata is a connect failure.
pub async fn resolve_ws_url(endpoint: &str) -> Result<String> {
    if endpoint.starts_with("ws://") || endpoint.starts_with("wss://") {
        return Ok(endpoint.to_string());
    }

    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        return Err(RunnerError::Connect(format!(
            "unsupported endpoint '{}', expected a ws://, wss://, http:// or https:// URL",
            endpoint
        )));
    }

    let version_url = format!("{}/json/version", endpoint.trim_end_matches('/'));
    log::debug!("Resolving websocket URL via {}", version_url);

    let response = reqwest::get(&version_url).await.map_err(|e| {
        RunnerError::Connect(format!(
            "metadata request to {} failed. Make sure the browser is running \
             with --remote-debugging-port: {}",
            version_url, e
        ))
    })?;

    let meta: VersionMetadata = response.json().await.map_err(|e| {
        RunnerError::Connect(format!("invalid metadata from {}: {}", version_url, e))
    })?;

    Ok(meta.web_socket_debugger_url)
}
