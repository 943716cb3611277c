//! Reader-page check.
//!
//! The reader route must render non-empty reading text within a bounded
//! time; a screenshot records the page afterwards.

use std::path::Path;
use std::time::Duration;

use tracing::info;
use url::Url;

use crate::checks::finish;
use crate::error::Result;
use crate::screenshot;
use crate::session::BrowserSession;
use crate::wait::{self, WaitOptions};

/// Address of the server hosting the app.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/";

/// Book addressed by the check.
const BOOK_ID: u64 = 1;

/// Element holding the rendered reading text.
const READING_TEXT: &str = ".reading-text";

/// Content rendering can lag well behind navigation on first load.
const CONTENT_TIMEOUT: Duration = Duration::from_secs(20);

/// Fixed settle delay before the screenshot, letting trailing animation
/// and layout finish. The app exposes no layout-stability signal to wait
/// on instead.
const SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Builds `reader/{id}` on top of `base`.
fn reader_route(base: &Url, id: u64) -> Result<Url> {
    Ok(base.join(&format!("reader/{id}"))?)
}

pub async fn run(base_url: &str, screenshot_path: &Path) -> Result<()> {
    let base = Url::parse(base_url)?;
    let route = reader_route(&base, BOOK_ID)?;

    let session = BrowserSession::launch().await?;
    let outcome = check(&session, route.as_str(), screenshot_path).await;
    finish(session, outcome).await
}

async fn check(session: &BrowserSession, url: &str, screenshot_path: &Path) -> Result<()> {
    session.goto(url).await?;

    wait::non_empty_text(
        session.page(),
        READING_TEXT,
        WaitOptions::timeout(CONTENT_TIMEOUT),
    )
    .await?;

    info!(
        target = "smoke",
        delay_ms = SETTLE_DELAY.as_millis() as u64,
        "settling before screenshot"
    );
    tokio::time::sleep(SETTLE_DELAY).await;

    screenshot::capture_full_page(session.page(), screenshot_path).await
}
