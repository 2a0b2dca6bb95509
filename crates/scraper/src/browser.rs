//! Scoped headless browser sessions.
//!
//! One session is opened per extraction call and released on every exit
//! path; nothing browser-related outlives the call that created it. A
//! background task drains Chrome DevTools Protocol events for the
//! session's lifetime.

use std::path::Path;
use std::time::Duration;

use autoradar_core::Error;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::{Element, Page};
use futures_util::StreamExt;

use crate::poll::{PollOutcome, poll_until};

/// How often to re-probe the page while waiting for an element.
const PROBE_INTERVAL: Duration = Duration::from_millis(500);

/// A headless Chrome/Chromium session scoped to one extraction call.
pub struct BrowserSession {
    browser: Browser,
    handler_task: tokio::task::JoinHandle<()>,
}

impl BrowserSession {
    /// Launch a headless browser instance.
    ///
    /// When `chrome_executable` is `None` the binary is auto-detected.
    /// Failure to resolve one is [`Error::LauncherNotFound`], a fatal
    /// configuration error that callers should not retry.
    pub async fn launch(chrome_executable: Option<&Path>) -> Result<Self, Error> {
        let mut builder = BrowserConfig::builder();
        if let Some(path) = chrome_executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(Error::LauncherNotFound)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| Error::BrowserLaunch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("browser handler event error: {e}");
                    break;
                }
            }
        });

        Ok(Self { browser, handler_task })
    }

    /// Open a new page and navigate to `url`.
    pub async fn open(&self, url: &str) -> Result<Page, Error> {
        self.browser
            .new_page(url)
            .await
            .map_err(|e| Error::Navigation(e.to_string()))
    }

    /// Shut the browser down and stop the event handler task.
    ///
    /// Runs on every exit path of an extraction call, including failures.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!("browser close failed: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("browser process wait failed: {e}");
        }
        self.handler_task.abort();
    }
}

/// Wait for an element to appear on the page, probing at a fixed interval.
///
/// Absence after `timeout` is a terminal error for the extraction call;
/// there is no retry above this level.
pub async fn wait_for_element(page: &Page, selector: &str, timeout: Duration) -> Result<Element, Error> {
    match poll_until(PROBE_INTERVAL, timeout, move || async move { page.find_element(selector).await.ok() }).await {
        PollOutcome::Completed(element) => Ok(element),
        PollOutcome::TimedOut => Err(Error::ContainerNotFound(selector.to_string())),
    }
}

/// Look up a single descendant element, mapping lookup failure to `None`.
///
/// Per-item extraction treats a missing sub-element as "skip this item",
/// so lookups at that level are fallible without being errors.
pub async fn query_one(scope: &Element, selector: &str) -> Option<Element> {
    scope.find_element(selector).await.ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires Chrome/Chromium installation"]
    async fn test_launch_and_close() {
        let session = BrowserSession::launch(None).await.unwrap();
        session.close().await;
    }

    #[tokio::test]
    async fn test_launch_with_bogus_executable_fails() {
        let result = BrowserSession::launch(Some(Path::new("/nonexistent/chrome"))).await;
        assert!(result.is_err());
    }
}
