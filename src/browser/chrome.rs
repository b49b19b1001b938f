use crate::error::{Result, RunnerError};
use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;

/// How long to wait for the page load event before giving up on it. Chat
/// sites are single-page apps, so a missed load event is survivable: input
/// discovery has its own deadline.
const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Handle on an already-running browser, attached over its debug websocket.
///
/// The browser and its profile are externally owned; this process never
/// launches, locks, or closes the browser.
pub struct ChromeDriver {
    browser: Browser,
}

impl ChromeDriver {
    /// Attach to the browser behind the resolved websocket endpoint.
    pub async fn connect(ws_url: &str) -> Result<Self> {
        let (browser, mut handler) = Browser::connect(ws_url).await.map_err(|e| {
            RunnerError::Connect(format!(
                "Failed to attach to browser at {}. Make sure it is running \
                 with --remote-debugging-port: {}",
                ws_url, e
            ))
        })?;

        // Drain CDP events for the lifetime of the connection.
        tokio::spawn(async move { while handler.next().await.is_some() {} });

        Ok(Self { browser })
    }

    /// Current active page, skipping Chrome's own chrome:// surfaces.
    async fn get_active_page(&self) -> Result<Page> {
        let pages = self.browser.pages().await?;

        for page in pages.iter() {
            if let Ok(Some(url)) = page.url().await {
                if !url.starts_with("chrome://") {
                    return Ok(page.clone());
                }
            }
        }

        // Only chrome:// pages present, reuse the most recent one anyway.
        if let Some(page) = pages.last() {
            return Ok(page.clone());
        }

        self.browser
            .new_page("about:blank")
            .await
            .map_err(|e| RunnerError::Other(format!("Failed to create page: {}", e)))
    }

    /// Navigate the active page to `url` and wait for it to load.
    pub async fn open(&self, url: &str) -> Result<Page> {
        use chromiumoxide::cdp::browser_protocol::page::{EventLoadEventFired, NavigateParams};

        let page = self.get_active_page().await?;

        // Subscribe before navigating so the load event cannot be missed.
        let mut load_events = page.event_listener::<EventLoadEventFired>().await?;

        let params = NavigateParams::builder()
            .url(url)
            .build()
            .map_err(|e| RunnerError::Other(format!("Invalid URL {}: {}", url, e)))?;

        let response = page.execute(params).await.map_err(|e| {
            let text = e.to_string();
            // "oneshot canceled" means the browser side went away entirely.
            if text.contains("oneshot canceled") {
                RunnerError::Connect(format!(
                    "Browser connection lost while navigating to {}: {}",
                    url, text
                ))
            } else {
                RunnerError::Other(format!("Failed to navigate to {}: {}", url, text))
            }
        })?;

        if let Some(error_text) = &response.result.error_text {
            return Err(RunnerError::Other(format!(
                "Navigation to {} failed: {}",
                url, error_text
            )));
        }

        match tokio::time::timeout(NAVIGATION_TIMEOUT, load_events.next()).await {
            Ok(Some(_)) => log::debug!("Load event fired for {}", url),
            Ok(None) => log::warn!("Event stream closed before load event for {}", url),
            Err(_) => log::warn!(
                "No load event within {:?} for {}, continuing anyway",
                NAVIGATION_TIMEOUT,
                url
            ),
        }

        Ok(page)
    }

    /// Underlying browser handle, for advanced CDP usage.
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Minimize the browser window.
    ///
    /// Best-effort: headless builds and some platforms reject window bounds,
    /// so callers log the error and move on. Never affects the exit status.
    pub async fn minimize_window(&self) -> Result<()> {
        use chromiumoxide::cdp::browser_protocol::browser::{
            Bounds, GetWindowForTargetParams, SetWindowBoundsParams, WindowState,
        };

        let page = self.get_active_page().await?;

        let window = page
            .execute(GetWindowForTargetParams {
                target_id: Some(page.target_id().clone()),
            })
            .await?;

        let bounds = Bounds {
            left: None,
            top: None,
            width: None,
            height: None,
            window_state: Some(WindowState::Minimized),
        };

        page.execute(SetWindowBoundsParams {
            window_id: window.window_id.clone(),
            bounds,
        })
        .await?;

        Ok(())
    }
}
