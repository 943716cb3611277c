//! Bounded polling waits.
//!
//! Every assertion a check makes goes through one of these: a condition is
//! re-evaluated against the live DOM until it holds or a deadline passes.
//! Deadlines are the only retry-like mechanism; an expired one is a
//! [`SmokeError::Timeout`] carrying the condition description.

use std::future::Future;
use std::time::Duration;

use chromiumoxide::page::Page;
use tokio::time::Instant;

use crate::dom;
use crate::error::{Result, SmokeError};

/// Default bound for assertions without an explicit timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Pause between condition probes.
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            interval: POLL_INTERVAL,
        }
    }
}

impl WaitOptions {
    pub fn timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

/// Repeatedly evaluate `probe` until it reports true or the deadline
/// passes. Probe errors propagate immediately.
pub async fn poll_until<F, Fut>(condition: &str, opts: WaitOptions, mut probe: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let deadline = Instant::now() + opts.timeout;
    loop {
        if probe().await? {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(SmokeError::Timeout {
                ms: opts.timeout.as_millis() as u64,
                condition: condition.to_string(),
            });
        }
        tokio::time::sleep(opts.interval).await;
    }
}

/// Wait for the first match of `selector` to be laid out and not hidden.
pub async fn visible(page: &Page, selector: &str, opts: WaitOptions) -> Result<()> {
    let condition = format!("selector visible: {selector}");
    poll_until(&condition, opts, || dom::is_visible(page, selector)).await
}

/// Wait for some laid-out element to contain `text`.
pub async fn text_visible(page: &Page, text: &str, opts: WaitOptions) -> Result<()> {
    let condition = format!("text visible: {text:?}");
    poll_until(&condition, opts, || dom::is_text_visible(page, text)).await
}

/// Wait for the first match of `selector` to carry non-empty text.
pub async fn non_empty_text(page: &Page, selector: &str, opts: WaitOptions) -> Result<()> {
    let condition = format!("non-empty text in: {selector}");
    poll_until(&condition, opts, || dom::has_non_empty_text(page, selector)).await
}

/// Find the button labeled `label` and click it, polling until it exists.
pub async fn click_button(page: &Page, label: &str, opts: WaitOptions) -> Result<()> {
    let condition = format!("button labeled {label:?}");
    poll_until(&condition, opts, || dom::click_button_labeled(page, label)).await
}

/// Poll the match count for `selector`. Returns the first non-zero count
/// observed, or zero once the deadline passes without a match. A zero here
/// is a branch decision, not a failure.
pub async fn settle_count(page: &Page, selector: &str, opts: WaitOptions) -> Result<usize> {
    poll_count(opts, || dom::count(page, selector)).await
}

async fn poll_count<F, Fut>(opts: WaitOptions, mut probe: F) -> Result<usize>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<usize>>,
{
    let deadline = Instant::now() + opts.timeout;
    loop {
        let n = probe().await?;
        if n > 0 {
            return Ok(n);
        }
        if Instant::now() >= deadline {
            return Ok(0);
        }
        tokio::time::sleep(opts.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn poll_until_resolves_once_probe_turns_true() {
        let calls = AtomicUsize::new(0);
        let result = poll_until("thing appears", WaitOptions::default(), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(n >= 2) }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_until_times_out_with_the_condition() {
        let opts = WaitOptions {
            timeout: Duration::from_secs(1),
            interval: Duration::from_millis(250),
        };
        let result = poll_until("panel visible", opts, || async { Ok(false) }).await;

        match result {
            Err(SmokeError::Timeout { ms, condition }) => {
                assert_eq!(ms, 1000);
                assert_eq!(condition, "panel visible");
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn poll_count_returns_a_count_appearing_mid_wait() {
        let calls = AtomicUsize::new(0);
        let result = poll_count(WaitOptions::default(), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(if n >= 2 { 3 } else { 0 }) }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_count_settles_to_zero_instead_of_timing_out() {
        let opts = WaitOptions {
            timeout: Duration::from_secs(1),
            interval: Duration::from_millis(250),
        };
        let started = Instant::now();
        let result = poll_count(opts, || async { Ok(0) }).await;

        // Empty is a valid branch outcome, so the deadline must not
        // surface as an error.
        assert_eq!(result.unwrap(), 0);
        assert!(started.elapsed() >= opts.timeout);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_until_propagates_probe_errors() {
        let result = poll_until("anything", WaitOptions::default(), || async {
            Err(SmokeError::JsEval("boom".to_string()))
        })
        .await;

        assert!(matches!(result, Err(SmokeError::JsEval(_))));
    }
}
