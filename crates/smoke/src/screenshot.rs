use std::path::Path;

use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};
use tracing::info;

use crate::error::{Result, SmokeError};

/// Artifact path shared by both checks; each run overwrites it.
pub const DEFAULT_PATH: &str = "jules-scratch/verification/verification.png";

/// Capture a full-page PNG to `path`, creating parent directories as
/// needed and replacing any prior file.
pub async fn capture_full_page(page: &Page, path: &Path) -> Result<()> {
    ensure_parent(path)?;

    let params = ScreenshotParams::builder()
        .format(CaptureScreenshotFormat::Png)
        .full_page(true)
        .build();

    page.save_screenshot(params, path)
        .await
        .map_err(|e| SmokeError::Screenshot {
            path: path.to_path_buf(),
            source: anyhow::Error::new(e),
        })?;

    info!(target = "smoke", path = %path.display(), "screenshot saved");
    Ok(())
}

/// Create the parent directory when missing; a bare filename needs none.
fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_parent_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir
            .path()
            .join("jules-scratch/verification/verification.png");

        ensure_parent(&path).unwrap();
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn ensure_parent_accepts_a_bare_filename() {
        ensure_parent(Path::new("verification.png")).unwrap();
    }

    #[test]
    fn ensure_parent_tolerates_an_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verification.png");

        ensure_parent(&path).unwrap();
        ensure_parent(&path).unwrap();
    }
}
