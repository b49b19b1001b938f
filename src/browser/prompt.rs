//! Prompt input discovery and submission.
//!
//! The input selectors are tried in priority order; a candidate only counts
//! when it matches a *visible* element, since chat UIs keep hidden clones of
//! the composer around (clipboard shims, aria templates). The whole pass is
//! retried until a deadline because the composer often renders well after the
//! load event.

use chromiumoxide::cdp::browser_protocol::input::{DispatchKeyEventParams, DispatchKeyEventType};
use chromiumoxide::page::Page;
use std::time::Duration;

use crate::error::{Result, RunnerError};

/// How long to keep retrying the selector list before InputNotFound.
pub const INPUT_DEADLINE: Duration = Duration::from_secs(20);
const RETRY_INTERVAL: Duration = Duration::from_millis(500);

/// Find the prompt input, insert `prompt` and submit it with an Enter press.
///
/// Fails with `InputNotFound` without attempting submission when no selector
/// matches a visible element before the deadline.
pub async fn submit_prompt(page: &Page, selectors: &[&str], prompt: &str) -> Result<()> {
    submit_prompt_within(page, selectors, prompt, INPUT_DEADLINE).await
}

pub async fn submit_prompt_within(
    page: &Page,
    selectors: &[&str],
    prompt: &str,
    deadline: Duration,
) -> Result<()> {
    let give_up_at = tokio::time::Instant::now() + deadline;

    let selector = loop {
        if let Some(selector) = find_input(page, selectors).await? {
            break selector;
        }
        if tokio::time::Instant::now() >= give_up_at {
            return Err(RunnerError::InputNotFound(selectors.join(", ")));
        }
        tokio::time::sleep(RETRY_INTERVAL).await;
    };

    log::debug!("Prompt input matched selector: {}", selector);
    insert_text(page, prompt).await?;
    press_enter(page).await
}

/// One pass over the selector list. The first selector with a visible match
/// wins and leaves that element focused.
async fn find_input<'a>(page: &Page, selectors: &'a [&'a str]) -> Result<Option<&'a str>> {
    for selector in selectors {
        if focus_visible(page, selector).await? {
            return Ok(Some(selector));
        }
    }
    Ok(None)
}

/// Focus the first visible element matching `selector`, reporting whether one
/// existed. Visibility is a computed-style question, so this runs in the page.
async fn focus_visible(page: &Page, selector: &str) -> Result<bool> {
    let script = format!(
        r#"(() => {{
            for (const el of document.querySelectorAll({selector})) {{
                const rect = el.getBoundingClientRect();
                const style = window.getComputedStyle(el);
                if (rect.width > 0 && rect.height > 0 &&
                    style.display !== 'none' && style.visibility !== 'hidden') {{
                    el.focus();
                    return true;
                }}
            }}
            return false;
        }})()"#,
        selector = js_string(selector)?
    );

    let result = page.evaluate(script.as_str()).await?;
    Ok(result.into_value::<bool>().unwrap_or(false))
}

/// Insert text into the focused element via `insertText`, which takes the
/// same path as a paste and so fires the input emitters that React-style
/// composers require; a bare `.value` assignment goes unnoticed by them.
async fn insert_text(page: &Page, text: &str) -> Result<()> {
    let script = format!(
        r#"(() => {{
            document.execCommand('insertText', false, {text});
            const el = document.activeElement;
            if (el) el.dispatchEvent(new Event('input', {{ bubbles: true }}));
        }})()"#,
        text = js_string(text)?
    );

    page.evaluate(script.as_str()).await?;
    Ok(())
}

/// Simulated Enter key press on the focused element.
async fn press_enter(page: &Page) -> Result<()> {
    let down = DispatchKeyEventParams::builder()
        .r#type(DispatchKeyEventType::KeyDown)
        .key("Enter")
        .code("Enter")
        .text("\r")
        .windows_virtual_key_code(13)
        .native_virtual_key_code(13)
        .build()
        .map_err(|e| RunnerError::Other(format!("key event: {}", e)))?;
    page.execute(down).await?;

    let up = DispatchKeyEventParams::builder()
        .r#type(DispatchKeyEventType::KeyUp)
        .key("Enter")
        .code("Enter")
        .windows_virtual_key_code(13)
        .native_virtual_key_code(13)
        .build()
        .map_err(|e| RunnerError::Other(format!("key event: {}", e)))?;
    page.execute(up).await?;

    Ok(())
}

/// Escape an arbitrary string into a JS string literal.
fn js_string(value: &str) -> Result<String> {
    serde_json::to_string(value).map_err(|e| RunnerError::Other(format!("escape failed: {}", e)))
}
