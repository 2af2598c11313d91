//! A single ingredient layer inside a cup.

use async_trait::async_trait;

use crate::driver::ElementId;
use crate::result::CafeteraResult;
use crate::scope::{ElementScope, Session};
use crate::styles::{normalize_color, parse_height_percent};

/// One colored layer of a cup body. The element's inline `style` carries
/// the layer height; the background color comes from computed styles.
#[derive(Debug, Clone)]
pub struct Ingredient {
    session: Session,
    root: ElementId,
}

#[async_trait]
impl ElementScope for Ingredient {
    fn session(&self) -> &Session {
        &self.session
    }

    fn root(&self) -> Option<ElementId> {
        Some(self.root)
    }
}

impl Ingredient {
    pub(crate) fn new(session: Session, root: ElementId) -> Self {
        Self { session, root }
    }

    /// Displayed ingredient name
    pub async fn name(&self) -> CafeteraResult<String> {
        let text = self.session.driver().text(self.root).await?;
        Ok(text.trim().to_string())
    }

    /// Layer height percentage from the inline style, `0.0` when absent
    pub async fn height_percent(&self) -> CafeteraResult<f64> {
        let style = self
            .session
            .driver()
            .attribute(self.root, "style")
            .await?
            .unwrap_or_default();
        Ok(parse_height_percent(&style))
    }

    /// Background color, normalized to `rgb(r, g, b)`
    pub async fn color(&self) -> CafeteraResult<String> {
        let raw = self
            .session
            .driver()
            .computed_style(self.root, "backgroundColor")
            .await?;
        Ok(normalize_color(&raw))
    }
}
