use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SmokeError>;

#[derive(Debug, Error)]
pub enum SmokeError {
    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    #[error("navigation failed: {url}")]
    Navigation {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("javascript evaluation failed: {0}")]
    JsEval(String),

    #[error("input dispatch failed: {0}")]
    Input(String),

    #[error("screenshot failed: {path}")]
    Screenshot {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("timeout after {ms}ms waiting for: {condition}")]
    Timeout { ms: u64, condition: String },

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_names_the_condition() {
        let err = SmokeError::Timeout {
            ms: 10_000,
            condition: "selector visible: .panel".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "timeout after 10000ms waiting for: selector visible: .panel"
        );
    }

    #[test]
    fn element_not_found_names_the_selector() {
        let err = SmokeError::ElementNotFound {
            selector: "button".to_string(),
        };
        assert_eq!(err.to_string(), "element not found: button");
    }
}
