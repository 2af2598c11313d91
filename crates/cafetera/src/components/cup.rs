//! One cup item on the menu.

use async_trait::async_trait;
use tracing::debug;

use crate::components::ingredient::Ingredient;
use crate::components::modal::AddCupModal;
use crate::driver::ElementId;
use crate::locator::Locator;
use crate::money::Price;
use crate::result::CafeteraResult;
use crate::scope::{ElementScope, Session};
use crate::wait::{wait_until, WaitOptions};

const NAME: Locator = Locator::xpath(".//h4");
const PRICE: Locator = Locator::xpath(".//h4/small");
const BODY: Locator = Locator::class_name("cup");
const INGREDIENTS: Locator = Locator::css(".ingredient");

/// A cup on the menu: heading, price, and the clickable body with its
/// stack of ingredient layers.
#[derive(Debug, Clone)]
pub struct Cup {
    session: Session,
    root: ElementId,
}

#[async_trait]
impl ElementScope for Cup {
    fn session(&self) -> &Session {
        &self.session
    }

    fn root(&self) -> Option<ElementId> {
        Some(self.root)
    }
}

impl Cup {
    pub(crate) fn new(session: Session, root: ElementId) -> Self {
        Self { session, root }
    }

    /// Displayed drink name, the first line of the heading
    pub async fn name(&self) -> CafeteraResult<String> {
        let heading = self.text_of(&NAME).await?;
        Ok(heading
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string())
    }

    /// Displayed unit price
    pub async fn price(&self) -> CafeteraResult<Price> {
        let text = self.text_of(&PRICE).await?;
        Price::parse(&text)
    }

    /// Ingredient layers in display order, top of the cup first.
    ///
    /// The document lists layers bottom-first; this is the one place the
    /// ordering is reversed, so every consumer sees the same contract.
    pub async fn ingredients(&self) -> CafeteraResult<Vec<Ingredient>> {
        let mut elements = self.find_all(&INGREDIENTS).await?;
        elements.reverse();
        Ok(elements
            .into_iter()
            .map(|el| Ingredient::new(self.session.clone(), el))
            .collect())
    }

    /// Click the cup body, adding one unit to the cart
    pub async fn click(&self) -> CafeteraResult<()> {
        debug!("adding cup to cart");
        self.click_on(&BODY).await
    }

    /// Right-click the cup body and wait for the add-to-cart dialog
    pub async fn open_add_cup_modal(&self) -> CafeteraResult<AddCupModal> {
        let body = self.find(&BODY).await?;
        self.session.driver().context_click(body).await?;
        let options =
            WaitOptions::new().with_timeout(self.session.config().default_timeout_ms);
        wait_until(options, || async {
            match AddCupModal::attach(&self.session).await {
                Ok(modal) => modal.is_open().await,
                Err(err) if err.is_absence() => Ok(false),
                Err(err) => Err(err),
            }
        })
        .await?;
        AddCupModal::attach(&self.session).await
    }

    /// Double-click the heading, toggling the translated drink name
    pub async fn double_click_name(&self) -> CafeteraResult<()> {
        let heading = self.find(&NAME).await?;
        self.session.driver().double_click(heading).await
    }

    /// `class` attribute of the cup body
    pub async fn body_class(&self) -> CafeteraResult<String> {
        let body = self.find(&BODY).await?;
        Ok(self
            .session
            .driver()
            .attribute(body, "class")
            .await?
            .unwrap_or_default())
    }
}
