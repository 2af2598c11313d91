//! The cart page: one line per drink, plus the pay button.

use async_trait::async_trait;
use tracing::debug;

use crate::components::{CartItem, Header, Pay};
use crate::driver::ElementId;
use crate::locator::Locator;
use crate::result::CafeteraResult;
use crate::retry::once_on_stale;
use crate::scope::{ElementScope, Session};

// The preview list on the menu page reuses the same item class, so the
// cart list is addressed by excluding it.
const ITEMS: Locator = Locator::css("ul:not(.cart-preview) li.list-item");
const EMPTY_MESSAGE: Locator = Locator::xpath("//p[contains(text(), 'No coffee')]");

/// The cart page.
#[derive(Debug, Clone)]
pub struct CartPage {
    session: Session,
}

#[async_trait]
impl ElementScope for CartPage {
    fn session(&self) -> &Session {
        &self.session
    }

    fn root(&self) -> Option<ElementId> {
        None
    }
}

impl CartPage {
    /// Navigate directly to the cart route
    pub async fn open(session: &Session) -> CafeteraResult<Self> {
        let url = session.config().cart_url();
        debug!(%url, "opening cart page");
        session.driver().navigate(&url).await?;
        Self::attach(session).await
    }

    /// Wrap the current document as a cart page without navigating
    pub async fn attach(session: &Session) -> CafeteraResult<Self> {
        Ok(Self {
            session: session.clone(),
        })
    }

    /// The navigation header
    pub async fn header(&self) -> CafeteraResult<Header> {
        Header::attach(&self.session).await
    }

    /// All cart lines. The cart re-renders on every mutation; stale
    /// resolution retries once through the central path.
    pub async fn items(&self) -> CafeteraResult<Vec<CartItem>> {
        once_on_stale("cart items", || async {
            let elements = self.find_all(&ITEMS).await?;
            Ok(elements
                .into_iter()
                .map(|el| CartItem::new(self.session.clone(), el))
                .collect())
        })
        .await
    }

    /// The cart line for `name`, when present
    pub async fn item_by_name(&self, name: &str) -> CafeteraResult<Option<CartItem>> {
        for item in self.items().await? {
            if item.name().await? == name {
                return Ok(Some(item));
            }
        }
        debug!(name, "drink not present in cart");
        Ok(None)
    }

    /// Remove lines until the cart is empty, re-querying after each removal
    pub async fn clear_cart(&self) -> CafeteraResult<&Self> {
        loop {
            let items = self.items().await?;
            let Some(first) = items.into_iter().next() else {
                break;
            };
            first.remove().await?;
        }
        debug!("cart cleared");
        Ok(self)
    }

    /// Whether the empty-cart message is showing
    pub async fn empty_message_visible(&self) -> CafeteraResult<bool> {
        match self.find_optional(&EMPTY_MESSAGE).await? {
            Some(el) => self.session.driver().is_displayed(el).await,
            None => Ok(false),
        }
    }

    /// Text of the empty-cart message
    pub async fn empty_message(&self) -> CafeteraResult<String> {
        self.text_of(&EMPTY_MESSAGE).await
    }

    /// The pay button on the cart page
    #[must_use]
    pub fn pay(&self) -> Pay {
        Pay::new(self.session.clone())
    }

    /// Follow the header back to the menu page
    pub async fn goto_menu(&self) -> CafeteraResult<super::MenuPage> {
        self.header().await?.goto_menu().await
    }
}
