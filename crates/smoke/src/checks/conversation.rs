//! Conversation-highlight check.
//!
//! Opens the conversations view from the app root and verifies that
//! selecting text in a conversation raises the vocabulary panel, or that
//! the localized empty state is shown when no conversations exist yet.

use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use crate::checks::finish;
use crate::dom;
use crate::error::Result;
use crate::gesture;
use crate::screenshot;
use crate::session::BrowserSession;
use crate::wait::{self, WaitOptions};

/// Address of the dev server hosting the app.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5173/";

/// Visible label of the navigation button opening the conversations view.
const CONVERSATIONS_BUTTON: &str = "Gespräche";

/// Scrollable conversation-list container.
const CONVERSATION_LIST: &str = ".space-y-2.max-h-64.overflow-y-auto";

/// Vocabulary panel: fixed width, responsive max-width, themed shadow.
const VOCABULARY_PANEL: &str = r".w-96.max-w-\[90vw\].shadow-\[var\(--shadow-vocabulary\)\]";

/// Empty-state message shown in place of the list.
const EMPTY_STATE_TEXT: &str = "Noch keine Gespräche";

/// Bound on the vocabulary panel appearing after the selection gesture.
const PANEL_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn run(base_url: &str, screenshot_path: &Path) -> Result<()> {
    let session = BrowserSession::launch().await?;
    let outcome = check(&session, base_url, screenshot_path).await;
    finish(session, outcome).await
}

async fn check(session: &BrowserSession, base_url: &str, screenshot_path: &Path) -> Result<()> {
    session.goto(base_url).await?;

    info!(target = "smoke", button = CONVERSATIONS_BUTTON, "opening conversations view");
    wait::click_button(session.page(), CONVERSATIONS_BUTTON, WaitOptions::default()).await?;

    // Conversations load asynchronously; poll the count before branching
    // so an in-flight load is not mistaken for the empty state.
    let conversations =
        wait::settle_count(session.page(), CONVERSATION_LIST, WaitOptions::default()).await?;

    if conversations > 0 {
        info!(target = "smoke", count = conversations, "conversation list populated");
        dom::focus_first(session.page(), CONVERSATION_LIST).await?;

        match dom::bounding_box(session.page(), CONVERSATION_LIST).await? {
            Some(bounds) => gesture::drag_select(session.page(), &bounds).await?,
            None => warn!(
                target = "smoke",
                selector = CONVERSATION_LIST,
                "list has no layout box, skipping selection gesture"
            ),
        }

        wait::visible(
            session.page(),
            VOCABULARY_PANEL,
            WaitOptions::timeout(PANEL_TIMEOUT),
        )
        .await?;
    } else {
        info!(target = "smoke", "no conversations, expecting empty state");
        wait::text_visible(session.page(), EMPTY_STATE_TEXT, WaitOptions::default()).await?;
    }

    screenshot::capture_full_page(session.page(), screenshot_path).await
}
