//! The lucky-day promo banner.

use async_trait::async_trait;
use tracing::debug;

use crate::components::ingredient::Ingredient;
use crate::driver::ElementId;
use crate::locator::Locator;
use crate::pages::MenuPage;
use crate::result::CafeteraResult;
use crate::scope::{ElementScope, Session};

/// Root of the promo banner; absent except right after every third cup
pub const ROOT: Locator = Locator::css(".promo");

const TEXT: Locator = Locator::xpath(".//span[@class='promo-text']");
const CUP: Locator = Locator::xpath(r#".//div[contains(@class, "cup-body")]"#);
const YES_BUTTON: Locator = Locator::xpath(r#".//div[@class="buttons"]/button[1]"#);
const NO_BUTTON: Locator = Locator::xpath(r#".//div[@class="buttons"]/button[2]"#);

/// The promo banner offering a discounted cup. Obtained through
/// [`MenuPage::promo`], which returns `None` while the banner is absent.
#[derive(Debug, Clone)]
pub struct PromoBanner {
    session: Session,
    root: ElementId,
}

#[async_trait]
impl ElementScope for PromoBanner {
    fn session(&self) -> &Session {
        &self.session
    }

    fn root(&self) -> Option<ElementId> {
        Some(self.root)
    }
}

impl PromoBanner {
    pub(crate) fn new(session: Session, root: ElementId) -> Self {
        Self { session, root }
    }

    /// Full banner message
    pub async fn text(&self) -> CafeteraResult<String> {
        self.text_of(&TEXT).await
    }

    /// Label of the accept button
    pub async fn yes_button_text(&self) -> CafeteraResult<String> {
        self.text_of(&YES_BUTTON).await
    }

    /// Label of the decline button
    pub async fn no_button_text(&self) -> CafeteraResult<String> {
        self.text_of(&NO_BUTTON).await
    }

    /// The miniature cup rendered inside the banner
    pub async fn discounted_cup(&self) -> CafeteraResult<PromoCup> {
        let body = self.find(&CUP).await?;
        Ok(PromoCup {
            session: self.session.clone(),
            root: body,
        })
    }

    /// Accept the offer; the discounted cup lands in the cart
    pub async fn accept(self) -> CafeteraResult<MenuPage> {
        debug!("accepting promo offer");
        self.click_on(&YES_BUTTON).await?;
        MenuPage::attach(&self.session).await
    }

    /// Decline the offer; the cart stays as it was
    pub async fn decline(self) -> CafeteraResult<MenuPage> {
        debug!("declining promo offer");
        self.click_on(&NO_BUTTON).await?;
        MenuPage::attach(&self.session).await
    }
}

/// The non-interactive cup inside the promo banner: a cup body with
/// ingredient layers but no heading or price.
#[derive(Debug, Clone)]
pub struct PromoCup {
    session: Session,
    root: ElementId,
}

const PROMO_INGREDIENTS: Locator = Locator::xpath(".//div[starts-with(@class, 'ingredient')]");

#[async_trait]
impl ElementScope for PromoCup {
    fn session(&self) -> &Session {
        &self.session
    }

    fn root(&self) -> Option<ElementId> {
        Some(self.root)
    }
}

impl PromoCup {
    /// `class` attribute of the cup body
    pub async fn body_class(&self) -> CafeteraResult<String> {
        Ok(self
            .session
            .driver()
            .attribute(self.root, "class")
            .await?
            .unwrap_or_default())
    }

    /// Ingredient layers in display order, top of the cup first
    pub async fn ingredients(&self) -> CafeteraResult<Vec<Ingredient>> {
        let mut elements = self.find_all(&PROMO_INGREDIENTS).await?;
        elements.reverse();
        Ok(elements
            .into_iter()
            .map(|el| Ingredient::new(self.session.clone(), el))
            .collect())
    }
}
