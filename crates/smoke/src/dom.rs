//! DOM queries evaluated against the live page.
//!
//! Every query re-resolves its selector at evaluation time; nothing here
//! holds a handle to a node across polls.

use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, SmokeError};

/// Viewport-relative box of a laid-out element.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Embed `s` into JS source as a string literal. JSON encoding doubles the
/// backslashes Tailwind selectors carry (`.max-w-\[90vw\]`) and escapes
/// quotes, so the selector reaches `querySelector` intact.
pub fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_owned()).to_string()
}

fn count_expr(selector: &str) -> String {
    format!(
        "document.querySelectorAll({}).length",
        js_string(selector)
    )
}

fn visible_expr(selector: &str) -> String {
    format!(
        "(() => {{ \
           const el = document.querySelector({sel}); \
           if (!el) return false; \
           const r = el.getBoundingClientRect(); \
           if (r.width === 0 || r.height === 0) return false; \
           const s = window.getComputedStyle(el); \
           return s.visibility !== 'hidden' && s.display !== 'none'; \
         }})()",
        sel = js_string(selector)
    )
}

fn non_empty_text_expr(selector: &str) -> String {
    format!(
        "(() => {{ \
           const el = document.querySelector({sel}); \
           return !!el && el.textContent.trim().length > 0; \
         }})()",
        sel = js_string(selector)
    )
}

fn text_visible_expr(text: &str) -> String {
    format!(
        "(() => {{ \
           if (!document.body) return false; \
           const needle = {needle}; \
           const walker = document.createTreeWalker(document.body, NodeFilter.SHOW_TEXT); \
           let node; \
           while ((node = walker.nextNode())) {{ \
             if (!node.textContent.includes(needle)) continue; \
             const el = node.parentElement; \
             if (!el) continue; \
             const r = el.getBoundingClientRect(); \
             if (r.width > 0 && r.height > 0) return true; \
           }} \
           return false; \
         }})()",
        needle = js_string(text)
    )
}

fn bounding_box_expr(selector: &str) -> String {
    format!(
        "(() => {{ \
           const el = document.querySelector({sel}); \
           if (!el) return null; \
           const r = el.getBoundingClientRect(); \
           if (r.width === 0 && r.height === 0) return null; \
           return {{ x: r.x, y: r.y, width: r.width, height: r.height }}; \
         }})()",
        sel = js_string(selector)
    )
}

async fn eval<T: DeserializeOwned>(page: &Page, expr: &str) -> Result<T> {
    let result = page
        .evaluate(expr)
        .await
        .map_err(|e| SmokeError::JsEval(e.to_string()))?;
    result.into_value().map_err(SmokeError::Json)
}

/// Number of elements currently matching `selector`.
pub async fn count(page: &Page, selector: &str) -> Result<usize> {
    eval(page, &count_expr(selector)).await
}

/// True when the first match for `selector` is laid out and not hidden.
pub async fn is_visible(page: &Page, selector: &str) -> Result<bool> {
    eval(page, &visible_expr(selector)).await
}

/// True when the first match for `selector` has non-empty trimmed text.
pub async fn has_non_empty_text(page: &Page, selector: &str) -> Result<bool> {
    eval(page, &non_empty_text_expr(selector)).await
}

/// True when some laid-out element contains `text`.
pub async fn is_text_visible(page: &Page, text: &str) -> Result<bool> {
    eval(page, &text_visible_expr(text)).await
}

/// Box of the first match for `selector`, or `None` when it is missing or
/// has no layout.
pub async fn bounding_box(page: &Page, selector: &str) -> Result<Option<BoundingBox>> {
    eval(page, &bounding_box_expr(selector)).await
}

/// Give input focus to the first match for `selector`.
pub async fn focus_first(page: &Page, selector: &str) -> Result<()> {
    let element =
        page.find_element(selector)
            .await
            .map_err(|_| SmokeError::ElementNotFound {
                selector: selector.to_string(),
            })?;
    element.focus().await?;
    Ok(())
}

/// Click the first button whose visible label matches `label` exactly
/// (after trimming). Returns false when no such button exists yet; any
/// other session failure propagates so the poll does not mask it as a
/// timeout.
pub async fn click_button_labeled(page: &Page, label: &str) -> Result<bool> {
    let buttons = match page.find_elements("button, [role=\"button\"]").await {
        Ok(elements) => elements,
        Err(err) if no_buttons_yet(&err) => return Ok(false),
        Err(err) => return Err(err.into()),
    };

    for button in buttons {
        let text = button.inner_text().await?.unwrap_or_default();
        if text.trim() == label {
            button.scroll_into_view().await?;
            button.click().await?;
            return Ok(true);
        }
    }
    Ok(false)
}

/// `NotFound` just means no candidate buttons are in the DOM yet; anything
/// else is a real session failure.
fn no_buttons_yet(err: &CdpError) -> bool {
    matches!(err, CdpError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_string_doubles_tailwind_escapes() {
        let sel = r".w-96.max-w-\[90vw\]";
        assert_eq!(js_string(sel), r#"".w-96.max-w-\\[90vw\\]""#);
    }

    #[test]
    fn js_string_escapes_quotes() {
        assert_eq!(js_string(r#"a"b"#), r#""a\"b""#);
    }

    #[test]
    fn count_expr_embeds_the_selector_literally() {
        let expr = count_expr(".space-y-2.max-h-64.overflow-y-auto");
        assert_eq!(
            expr,
            r#"document.querySelectorAll(".space-y-2.max-h-64.overflow-y-auto").length"#
        );
    }

    #[test]
    fn visible_expr_checks_layout_and_computed_style() {
        let expr = visible_expr(".panel");
        assert!(expr.contains("getBoundingClientRect"));
        assert!(expr.contains("getComputedStyle"));
        assert!(expr.contains(r#"".panel""#));
    }

    #[test]
    fn text_visible_expr_embeds_localized_text() {
        let expr = text_visible_expr("Noch keine Gespräche");
        assert!(expr.contains(r#""Noch keine Gespräche""#));
    }

    #[test]
    fn only_missing_buttons_read_as_not_there_yet() {
        assert!(no_buttons_yet(&CdpError::NotFound));
        assert!(!no_buttons_yet(&CdpError::NoResponse));
    }

    #[test]
    fn bounding_box_deserializes_from_rect_json() {
        let rect: Option<BoundingBox> =
            serde_json::from_str(r#"{"x":10.5,"y":20.0,"width":300.0,"height":64.0}"#).unwrap();
        assert_eq!(
            rect,
            Some(BoundingBox {
                x: 10.5,
                y: 20.0,
                width: 300.0,
                height: 64.0
            })
        );

        let missing: Option<BoundingBox> = serde_json::from_str("null").unwrap();
        assert_eq!(missing, None);
    }
}
