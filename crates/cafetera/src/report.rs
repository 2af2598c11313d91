//! Screenshot capture and artifact output.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::result::CafeteraResult;
use crate::scope::Session;

/// Default directory for captured screenshots
pub const DEFAULT_SCREENSHOT_DIR: &str = "target/screenshots";

/// Writes screenshots captured during a run to disk
#[derive(Debug, Clone)]
pub struct ScreenshotReporter {
    dir: PathBuf,
}

impl Default for ScreenshotReporter {
    fn default() -> Self {
        Self::new(DEFAULT_SCREENSHOT_DIR)
    }
}

impl ScreenshotReporter {
    /// Create a reporter writing under `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write raw PNG bytes as `<dir>/<name>.png`
    ///
    /// # Errors
    ///
    /// Returns error if directory creation or file writing fails
    pub fn save(&self, name: &str, png: &[u8]) -> CafeteraResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.png", sanitize_name(name)));
        std::fs::write(&path, png)?;
        debug!(path = %path.display(), bytes = png.len(), "screenshot saved");
        Ok(path)
    }

    /// Capture the session's current page and write it as `<dir>/<name>.png`
    ///
    /// # Errors
    ///
    /// Returns error if the capture or file writing fails
    pub async fn capture(&self, session: &Session, name: &str) -> CafeteraResult<PathBuf> {
        let png = session.driver().screenshot().await?;
        self.save(name, &png)
    }
}

/// Reduce a test name to a safe file stem.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "screenshot".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("promo appears at 3 cups"), "promo_appears_at_3_cups");
        assert_eq!(sanitize_name("cart::totals"), "cart__totals");
        assert_eq!(sanitize_name("already_safe-1"), "already_safe-1");
        assert_eq!(sanitize_name(""), "screenshot");
    }

    #[test]
    fn test_save_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = ScreenshotReporter::new(dir.path().join("shots"));
        let path = reporter.save("menu page", &[0x89, 0x50, 0x4E, 0x47]).unwrap();
        assert_eq!(path.file_name().unwrap(), "menu_page.png");
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn test_save_creates_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = ScreenshotReporter::new(dir.path().join("a").join("b"));
        let path = reporter.save("shot", &[1, 2, 3]).unwrap();
        assert!(path.exists());
    }
}
