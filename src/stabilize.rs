//! Detection of a streamed answer finishing rendering.
//!
//! The chat sites stream their answers into the DOM with no "done" signal, so
//! completion is inferred from text quiescence: the response region is sampled
//! on a fixed interval and the answer is considered complete once the text has
//! been unchanged for `STABLE_SAMPLES` consecutive samples. A short window
//! risks truncating slow answers, a long one delays output; the constants
//! below sit in between.

use std::future::Future;
use std::time::Duration;

use chromiumoxide::page::Page;

use crate::error::{Result, RunnerError};

pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(700);
pub const STABLE_SAMPLES: usize = 4;
pub const MAX_WAIT: Duration = Duration::from_secs(120);

/// Tracks consecutive identical text snapshots.
///
/// Empty snapshots reset the run; a changed snapshot starts a new run of
/// length 1. The stable text is reported exactly once, at the sample where
/// the unchanged run first reaches `STABLE_SAMPLES`.
#[derive(Debug, Default)]
pub struct StabilityTracker {
    last: Option<String>,
    run: usize,
    fired: bool,
}

impl StabilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one snapshot, returning the stable text when quiescence is first
    /// reached and `None` on every other call.
    pub fn observe(&mut self, snapshot: &str) -> Option<String> {
        if self.fired {
            return None;
        }

        let text = snapshot.trim();
        if text.is_empty() {
            self.last = None;
            self.run = 0;
            return None;
        }

        match self.last.as_deref() {
            Some(prev) if prev == text => self.run += 1,
            _ => {
                self.last = Some(text.to_string());
                self.run = 1;
            }
        }

        if self.run >= STABLE_SAMPLES {
            self.fired = true;
            return self.last.clone();
        }
        None
    }

    /// Latest non-empty snapshot seen, stable or not.
    pub fn latest(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

/// Text of the response region on `page`, or `None` while it has not
/// rendered yet.
///
/// Selectors are tried in priority order; within a match the *last* element
/// wins, which is the newest message in every supported chat UI.
async fn response_text(page: &Page, selectors: &[&str]) -> Result<Option<String>> {
    for selector in selectors {
        let elements = match page.find_elements(*selector).await {
            Ok(elements) => elements,
            Err(_) => continue,
        };
        if let Some(element) = elements.last() {
            if let Ok(Some(text)) = element.inner_text().await {
                return Ok(Some(text));
            }
        }
    }
    Ok(None)
}

/// Poll the response region until its text stabilizes or `MAX_WAIT` elapses.
///
/// `page` is the handle the prompt was submitted on, so a tab the user opens
/// or focuses mid-wait is never the one sampled. Timing out with some text
/// captured returns that text; a slow-rendering answer is better truncated
/// than dropped. Timing out with nothing is `NoResponse`.
pub async fn await_response(page: &Page, selectors: &[&str]) -> Result<String> {
    poll_until_stable(
        || response_text(page, selectors),
        SAMPLE_INTERVAL,
        MAX_WAIT,
    )
    .await
}

pub(crate) async fn poll_until_stable<F, Fut>(
    mut sample: F,
    interval: Duration,
    max_wait: Duration,
) -> Result<String>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<String>>>,
{
    let deadline = tokio::time::Instant::now() + max_wait;
    let mut tracker = StabilityTracker::new();

    loop {
        if let Some(snapshot) = sample().await? {
            if let Some(stable) = tracker.observe(&snapshot) {
                return Ok(stable);
            }
        }

        if tokio::time::Instant::now() >= deadline {
            return match tracker.latest() {
                Some(text) => Ok(text.to_string()),
                None => Err(RunnerError::NoResponse),
            };
        }
        tokio::time::sleep(interval).await;
    }
}
