use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{Result, SmokeError};

/// One headless browser plus one page, owned by a check for its whole
/// lifetime. Every exit path must go through [`BrowserSession::close`] so
/// the Chromium process cannot outlive the check.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    events: JoinHandle<()>,
}

impl BrowserSession {
    pub async fn launch() -> Result<Self> {
        debug!(target = "smoke", "launching headless chromium");
        let config = BrowserConfig::builder()
            .no_sandbox()
            .window_size(1280, 720)
            .build()
            .map_err(SmokeError::BrowserLaunch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| SmokeError::BrowserLaunch(e.to_string()))?;

        // The CDP event stream must be drained for the connection to make
        // progress; it ends when the browser goes away.
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;

        Ok(Self {
            browser,
            page,
            events,
        })
    }

    /// Navigate and wait for the load to settle.
    pub async fn goto(&self, url: &str) -> Result<()> {
        debug!(target = "smoke", %url, "navigate");
        self.page.goto(url).await.map_err(|e| SmokeError::Navigation {
            url: url.to_string(),
            source: anyhow::Error::new(e),
        })?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| SmokeError::Navigation {
                url: url.to_string(),
                source: anyhow::Error::new(e),
            })?;
        Ok(())
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await?;
        let _ = self.events.await;
        Ok(())
    }
}
