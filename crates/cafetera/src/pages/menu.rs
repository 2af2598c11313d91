//! The menu page: the nine cups, the pay button, and the promo banner.

use async_trait::async_trait;
use tracing::debug;

use crate::components::promo;
use crate::components::{Cup, Header, Pay, PromoBanner};
use crate::driver::{not_found, ElementId};
use crate::locator::Locator;
use crate::result::CafeteraResult;
use crate::scope::{ElementScope, Session};
use crate::wait::{wait_until, WaitOptions};

const CUPS: Locator = Locator::xpath("//li/h4/..");
const SNACKBAR_SUCCESS: Locator = Locator::css(".snackbar.success");

/// The menu page. The entry point of almost every scenario: open it,
/// click cups, then follow the header or the pay button somewhere else.
#[derive(Debug, Clone)]
pub struct MenuPage {
    session: Session,
}

#[async_trait]
impl ElementScope for MenuPage {
    fn session(&self) -> &Session {
        &self.session
    }

    fn root(&self) -> Option<ElementId> {
        None
    }
}

impl MenuPage {
    /// Navigate to the base URL and wait until the menu is rendered
    pub async fn open(session: &Session) -> CafeteraResult<Self> {
        debug!(url = %session.config().base_url, "opening menu page");
        session.open_base().await?;
        let page = Self::attach(session).await?;
        let options =
            WaitOptions::new().with_timeout(session.config().default_timeout_ms);
        wait_until(options, || async {
            Ok(!page.find_all(&CUPS).await?.is_empty())
        })
        .await?;
        Ok(page)
    }

    /// Wrap the current document as a menu page without navigating
    pub async fn attach(session: &Session) -> CafeteraResult<Self> {
        Ok(Self {
            session: session.clone(),
        })
    }

    /// The navigation header
    pub async fn header(&self) -> CafeteraResult<Header> {
        Header::attach(&self.session).await
    }

    /// All cups on the menu, in page order
    pub async fn cups(&self) -> CafeteraResult<Vec<Cup>> {
        let elements = self.find_all(&CUPS).await?;
        Ok(elements
            .into_iter()
            .map(|el| Cup::new(self.session.clone(), el))
            .collect())
    }

    /// The cup displaying `name`
    pub async fn cup_by_name(&self, name: &str) -> CafeteraResult<Cup> {
        for cup in self.cups().await? {
            if cup.name().await? == name {
                return Ok(cup);
            }
        }
        Err(not_found(&Locator::css_owned(format!("cup {name:?}"))))
    }

    /// The cup at 1-based menu position `order`
    pub async fn cup_by_order(&self, order: usize) -> CafeteraResult<Cup> {
        let cups = self.cups().await?;
        order
            .checked_sub(1)
            .and_then(|i| cups.into_iter().nth(i))
            .ok_or_else(|| not_found(&Locator::css_owned(format!("cup #{order}"))))
    }

    /// Click the cup displaying `name`, chaining for fluent scenarios
    pub async fn add_to_cart(&self, name: &str) -> CafeteraResult<&Self> {
        self.cup_by_name(name).await?.click().await?;
        Ok(self)
    }

    /// Click the cup at 1-based menu position `order`
    pub async fn add_to_cart_by_order(&self, order: usize) -> CafeteraResult<&Self> {
        self.cup_by_order(order).await?.click().await?;
        Ok(self)
    }

    /// The pay button
    #[must_use]
    pub fn pay(&self) -> Pay {
        Pay::new(self.session.clone())
    }

    /// The promo banner, `None` while it is absent
    pub async fn promo(&self) -> CafeteraResult<Option<PromoBanner>> {
        Ok(self
            .find_optional(&promo::ROOT)
            .await?
            .map(|root| PromoBanner::new(self.session.clone(), root)))
    }

    /// Whether the purchase-success snackbar is showing. Polls on a short
    /// budget since the snackbar animates in after submit.
    pub async fn snackbar_success_visible(&self) -> CafeteraResult<bool> {
        let shown = wait_until(WaitOptions::fast(), || async {
            match self.find_optional(&SNACKBAR_SUCCESS).await? {
                Some(el) => self.session.driver().is_displayed(el).await,
                None => Ok(false),
            }
        })
        .await;
        match shown {
            Ok(()) => Ok(true),
            Err(err) if err.is_absence() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Follow the header to the cart page
    pub async fn goto_cart(&self) -> CafeteraResult<super::CartPage> {
        self.header().await?.goto_cart().await
    }

    /// Follow the header to the GitHub page
    pub async fn goto_github(&self) -> CafeteraResult<super::GitHubPage> {
        self.header().await?.goto_github().await
    }
}
