//! Mouse gestures dispatched through the CDP Input domain.

use chromiumoxide::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType, MouseButton,
};
use chromiumoxide::page::Page;
use tracing::debug;

use crate::dom::BoundingBox;
use crate::error::{Result, SmokeError};

/// Drag start point, relative to the box origin.
const DRAG_START_OFFSET: (f64, f64) = (20.0, 20.0);

/// Drag end point, relative to the box origin. Same y as the start, so the
/// drag stays on one line of text.
const DRAG_END_OFFSET: (f64, f64) = (100.0, 20.0);

/// Start and end points of the selection drag inside `bounds`.
pub fn drag_points(bounds: &BoundingBox) -> ((f64, f64), (f64, f64)) {
    (
        (bounds.x + DRAG_START_OFFSET.0, bounds.y + DRAG_START_OFFSET.1),
        (bounds.x + DRAG_END_OFFSET.0, bounds.y + DRAG_END_OFFSET.1),
    )
}

/// Bitmask of buttons held during the drag. CDP mouse events are
/// stateless: the browser derives the drag modifier on a move event from
/// `buttons`, not from the preceding press, so every move while the
/// primary button is down must carry this mask.
const PRIMARY_BUTTON_MASK: i64 = 1;

/// Approximate a user selecting a run of text: move to the start point,
/// press the primary button, drag to the end point, release.
pub async fn drag_select(page: &Page, bounds: &BoundingBox) -> Result<()> {
    let ((sx, sy), (ex, ey)) = drag_points(bounds);
    debug!(target = "smoke", sx, sy, ex, ey, "drag-select gesture");

    dispatch(page, hover_event(sx, sy)?).await?;
    dispatch(page, press_event(sx, sy)?).await?;
    dispatch(page, drag_event(ex, ey)?).await?;
    dispatch(page, release_event(ex, ey)?).await?;
    Ok(())
}

/// Plain move with no button held.
fn hover_event(x: f64, y: f64) -> Result<DispatchMouseEventParams> {
    DispatchMouseEventParams::builder()
        .r#type(DispatchMouseEventType::MouseMoved)
        .x(x)
        .y(y)
        .button(MouseButton::None)
        .build()
        .map_err(SmokeError::Input)
}

fn press_event(x: f64, y: f64) -> Result<DispatchMouseEventParams> {
    DispatchMouseEventParams::builder()
        .r#type(DispatchMouseEventType::MousePressed)
        .x(x)
        .y(y)
        .button(MouseButton::Left)
        .buttons(PRIMARY_BUTTON_MASK)
        .click_count(1)
        .build()
        .map_err(SmokeError::Input)
}

/// Move with the primary button held; this is what extends the selection.
fn drag_event(x: f64, y: f64) -> Result<DispatchMouseEventParams> {
    DispatchMouseEventParams::builder()
        .r#type(DispatchMouseEventType::MouseMoved)
        .x(x)
        .y(y)
        .button(MouseButton::Left)
        .buttons(PRIMARY_BUTTON_MASK)
        .build()
        .map_err(SmokeError::Input)
}

fn release_event(x: f64, y: f64) -> Result<DispatchMouseEventParams> {
    DispatchMouseEventParams::builder()
        .r#type(DispatchMouseEventType::MouseReleased)
        .x(x)
        .y(y)
        .button(MouseButton::Left)
        .click_count(1)
        .build()
        .map_err(SmokeError::Input)
}

async fn dispatch(page: &Page, params: DispatchMouseEventParams) -> Result<()> {
    page.execute(params).await?;
    Ok(())
}
