//! The driver boundary.
//!
//! Everything the page objects know about a browser is the [`Driver`]
//! trait: navigate, find elements scoped to a root, read text/attributes,
//! click, fill, and evaluate a script. The CDP implementation lives in
//! [`crate::browser`] behind the `browser` feature; tests use the
//! deterministic application model in [`crate::sim`].
//!
//! Element handles are opaque. A handle stops being valid once the page
//! mutates underneath it; the driver reports that as
//! [`CafeteraError::StaleElement`] and callers re-resolve.

use async_trait::async_trait;

use crate::locator::Locator;
use crate::result::{CafeteraError, CafeteraResult};

/// Opaque handle to a resolved DOM element.
///
/// Validity is bounded by the lifetime of the underlying node; drivers
/// invalidate handles when the document mutates or navigates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Raw handle value
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Browser-automation surface consumed by the page objects.
///
/// One driver owns one browser session; all calls within a session are
/// strictly sequential. Implementations surface "selector matched zero
/// nodes" as [`CafeteraError::ElementNotFound`] from [`Driver::find`],
/// while [`Driver::find_all`] returns an empty vector.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate the session to `url`. Invalidates all element handles.
    async fn navigate(&self, url: &str) -> CafeteraResult<()>;

    /// Current document title
    async fn title(&self) -> CafeteraResult<String>;

    /// Current URL
    async fn current_url(&self) -> CafeteraResult<String>;

    /// Resolve the first element matching `locator` under `scope`
    /// (`None` = whole document).
    async fn find(&self, scope: Option<ElementId>, locator: &Locator)
        -> CafeteraResult<ElementId>;

    /// Resolve all elements matching `locator` under `scope`, in document
    /// order. Zero matches is an empty vector, not an error.
    async fn find_all(
        &self,
        scope: Option<ElementId>,
        locator: &Locator,
    ) -> CafeteraResult<Vec<ElementId>>;

    /// Visible text of the element, trimmed
    async fn text(&self, element: ElementId) -> CafeteraResult<String>;

    /// Attribute value, `None` when the attribute is absent
    async fn attribute(&self, element: ElementId, name: &str)
        -> CafeteraResult<Option<String>>;

    /// Whether the element is rendered and visible
    async fn is_displayed(&self, element: ElementId) -> CafeteraResult<bool>;

    /// Left-click
    async fn click(&self, element: ElementId) -> CafeteraResult<()>;

    /// Right-click (context menu / secondary action)
    async fn context_click(&self, element: ElementId) -> CafeteraResult<()>;

    /// Double-click
    async fn double_click(&self, element: ElementId) -> CafeteraResult<()>;

    /// Move the pointer over the element
    async fn hover(&self, element: ElementId) -> CafeteraResult<()>;

    /// Clear the input, then type `text`. Deterministic: the resulting
    /// value is exactly `text` regardless of prior content.
    async fn fill(&self, element: ElementId, text: &str) -> CafeteraResult<()>;

    /// Computed CSS style value for one property (camelCase name)
    async fn computed_style(
        &self,
        element: ElementId,
        property: &str,
    ) -> CafeteraResult<String>;

    /// Evaluate a JavaScript expression and return its JSON value
    async fn execute_script(&self, script: &str) -> CafeteraResult<serde_json::Value>;

    /// PNG screenshot of the current viewport
    async fn screenshot(&self) -> CafeteraResult<Vec<u8>>;
}

/// Build the `ElementNotFound` error for a locator
#[must_use]
pub fn not_found(locator: &Locator) -> CafeteraError {
    CafeteraError::ElementNotFound {
        locator: locator.to_string(),
    }
}

/// Build the `StaleElement` error for a handle
#[must_use]
pub fn stale(element: ElementId) -> CafeteraError {
    CafeteraError::StaleElement {
        detail: format!("element #{}", element.raw()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Locator;

    #[test]
    fn test_element_id_raw() {
        assert_eq!(ElementId(42).raw(), 42);
    }

    #[test]
    fn test_error_constructors() {
        let err = not_found(&Locator::css(".promo"));
        assert!(err.is_absence());
        assert_eq!(err.to_string(), "Element not found: css:.promo");

        let err = stale(ElementId(7));
        assert!(err.is_stale());
        assert!(err.to_string().contains("element #7"));
    }
}
