//! Headless-browser smoke checks for the reader web app.
//!
//! Two binaries drive a locally running dev server over the Chrome
//! DevTools Protocol: `conversation-check` exercises the conversation
//! list and the selection-triggered vocabulary panel, `reader-check`
//! verifies the reader route renders text and records a screenshot.
//! Both assume the server is already up; they never start it.

pub mod checks;
pub mod dom;
pub mod error;
pub mod gesture;
pub mod logging;
pub mod screenshot;
pub mod session;
pub mod wait;
