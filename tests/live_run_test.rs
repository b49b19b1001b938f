//! End-to-end runs against a live browser.
//!
//! These tests need a browser already running with
//! `--remote-debugging-port=9222` (or `CDP_URL` pointing elsewhere), so they
//! are ignored by default. They drive the local fake chat page rather than
//! the real sites, which keeps them deterministic and offline.


use std::time::Duration;
use test_server::TestServer;
use webchat_runner::browser::prompt;
use webchat_runner::{await_response, resolve_ws_url, Assistant, ChromeDriver, RunnerError};

fn endpoint() -> String {
    std::env::var("CDP_URL").unwrap_or_else(|_| "http://127.0.0.1:9222".to_string())
}

async fn attach() -> anyhow::Result<ChromeDriver> {
    let ws_url = resolve_ws_url(&endpoint()).await?;
    ChromeDriver::connect(&ws_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to attach: {}", e))
}

#[tokio::test]
#[ignore = "requires a browser running with --remote-debugging-port=9222"]
async fn fake_chat_round_trip_prints_the_answer() -> anyhow::Result<()> {
    let server = TestServer::start().await;
    server.wait_ready().await?;

    let driver = attach().await?;
    let page = driver.open(&server.url()).await?;

    // Gemini's selector chain: textarea first, contenteditable fallbacks.
    let site = Assistant::Gemini.descriptor();
    prompt::submit_prompt(&page, site.input_selectors, "2+2?").await?;

    let answer = await_response(&page, &["div.markdown"]).await?;
    assert_eq!(answer, "4");
    Ok(())
}

#[tokio::test]
#[ignore = "requires a browser running with --remote-debugging-port=9222"]
async fn sampling_stays_on_the_submitted_page() -> anyhow::Result<()> {
    let server = TestServer::start().await;
    server.wait_ready().await?;

    let driver = attach().await?;
    let page = driver.open(&server.url()).await?;

    let site = Assistant::Gemini.descriptor();
    prompt::submit_prompt(&page, site.input_selectors, "2+2?").await?;

    // A tab opened (or focused) mid-wait must not become the sampled page;
    // the blank page has no div.markdown, so sampling it would time out.
    let distraction = driver.browser().new_page(server.blank_url()).await?;

    let answer = await_response(&page, &["div.markdown"]).await?;
    assert_eq!(answer, "4");

    distraction.close().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a browser running with --remote-debugging-port=9222"]
async fn page_without_composer_reports_input_not_found() -> anyhow::Result<()> {
    let server = TestServer::start().await;
    server.wait_ready().await?;

    let driver = attach().await?;
    let page = driver.open(&server.blank_url()).await?;

    let site = Assistant::Gemini.descriptor();
    let result =
        prompt::submit_prompt_within(&page, site.input_selectors, "2+2?", Duration::from_secs(2))
            .await;

    assert!(matches!(result, Err(RunnerError::InputNotFound(_))));
    Ok(())
}

#[tokio::test]
#[ignore = "requires a browser running with --remote-debugging-port=9222"]
async fn minimize_is_best_effort() -> anyhow::Result<()> {
    let server = TestServer::start().await;
    server.wait_ready().await?;

    let driver = attach().await?;
    driver.open(&server.url()).await?;

    // Headless targets may reject window bounds; either way the call returns.
    if let Err(e) = driver.minimize_window().await {
        println!("minimize unsupported here: {}", e);
    }
    Ok(())
}
