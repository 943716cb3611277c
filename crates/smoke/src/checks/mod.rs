//! The two smoke scenarios, one per binary.

pub mod conversation;
pub mod reader;

use tracing::warn;

use crate::error::Result;
use crate::session::BrowserSession;

/// Close `session` on both exit paths so a failed check cannot leak a
/// browser process in CI.
async fn finish(session: BrowserSession, outcome: Result<()>) -> Result<()> {
    match outcome {
        Ok(()) => session.close().await,
        Err(err) => {
            if let Err(close_err) = session.close().await {
                warn!(target = "smoke", error = %close_err, "browser close failed after check error");
            }
            Err(err)
        }
    }
}
