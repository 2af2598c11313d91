//! Session handle and the scoped-find capability.
//!
//! Pages and components do not inherit from a base class; they share the
//! [`ElementScope`] capability. A page resolves against the whole document
//! (`root() == None`), a component against its root element. Composition
//! does the rest: a cup holds a locator-capable root, and its ingredients
//! hold theirs.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::Config;
use crate::driver::{Driver, ElementId};
use crate::locator::Locator;
use crate::result::CafeteraResult;

/// Cloneable handle to the single browser session exclusively owned by the
/// currently executing test.
#[derive(Clone)]
pub struct Session {
    driver: Arc<dyn Driver>,
    config: Config,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Wrap a driver with suite configuration
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>, config: Config) -> Self {
        Self { driver, config }
    }

    /// The underlying driver
    #[must_use]
    pub fn driver(&self) -> &dyn Driver {
        self.driver.as_ref()
    }

    /// Suite configuration
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Navigate to the application base URL
    pub async fn open_base(&self) -> CafeteraResult<()> {
        self.driver.navigate(&self.config.base_url).await
    }
}

/// Scoped element lookup: the one capability shared by pages and
/// components.
#[async_trait]
pub trait ElementScope {
    /// The session this scope belongs to
    fn session(&self) -> &Session;

    /// Root element constraining lookups, `None` for the whole document
    fn root(&self) -> Option<ElementId>;

    /// First element matching `locator` inside this scope.
    ///
    /// # Errors
    ///
    /// `ElementNotFound` when zero nodes match; the caller decides whether
    /// that means absence or a broken page.
    async fn find(&self, locator: &Locator) -> CafeteraResult<ElementId> {
        self.session().driver().find(self.root(), locator).await
    }

    /// All elements matching `locator` inside this scope, document order.
    async fn find_all(&self, locator: &Locator) -> CafeteraResult<Vec<ElementId>> {
        self.session().driver().find_all(self.root(), locator).await
    }

    /// Lookup for UI that may legitimately be absent: `Ok(None)` on
    /// not-found or timeout, propagation for everything else.
    async fn find_optional(&self, locator: &Locator) -> CafeteraResult<Option<ElementId>> {
        match self.find(locator).await {
            Ok(element) => Ok(Some(element)),
            Err(err) if err.is_absence() => {
                debug!(%locator, "optional element absent");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Trimmed text of the first element matching `locator`.
    async fn text_of(&self, locator: &Locator) -> CafeteraResult<String> {
        let element = self.find(locator).await?;
        self.session().driver().text(element).await
    }

    /// Click the first element matching `locator`.
    async fn click_on(&self, locator: &Locator) -> CafeteraResult<()> {
        let element = self.find(locator).await?;
        self.session().driver().click(element).await
    }
}
