//! One line of the cart page list.

use async_trait::async_trait;
use tracing::debug;

use crate::driver::ElementId;
use crate::locator::Locator;
use crate::money::{parse_unit_desc, Price};
use crate::result::CafeteraResult;
use crate::scope::{ElementScope, Session};

const NAME: Locator = Locator::css("div:nth-child(1)");
const UNIT_DESC: Locator = Locator::css("span.unit-desc");
const TOTAL: Locator = Locator::xpath("./div[3]");
const PLUS: Locator = Locator::css("button[aria-label^='Add one']");
const MINUS: Locator = Locator::css("button[aria-label^='Remove one']");
const REMOVE: Locator = Locator::css("button.delete");

/// A cart line: drink name, unit description (`"$8.00 x 2"`), displayed
/// line total, and the three mutation buttons.
///
/// The handle is only valid until the next mutation of the cart; after
/// calling [`CartItem::increase`], [`CartItem::decrease`] or
/// [`CartItem::remove`], re-query the list.
#[derive(Debug, Clone)]
pub struct CartItem {
    session: Session,
    root: ElementId,
}

#[async_trait]
impl ElementScope for CartItem {
    fn session(&self) -> &Session {
        &self.session
    }

    fn root(&self) -> Option<ElementId> {
        Some(self.root)
    }
}

impl CartItem {
    pub(crate) fn new(session: Session, root: ElementId) -> Self {
        Self { session, root }
    }

    /// Drink name of this line
    pub async fn name(&self) -> CafeteraResult<String> {
        let text = self.text_of(&NAME).await?;
        Ok(text.lines().next().unwrap_or_default().trim().to_string())
    }

    /// Quantity from the unit description
    pub async fn quantity(&self) -> CafeteraResult<u32> {
        let text = self.text_of(&UNIT_DESC).await?;
        let (_, quantity) = parse_unit_desc(&text)?;
        Ok(quantity)
    }

    /// Unit price from the unit description
    pub async fn unit_price(&self) -> CafeteraResult<Price> {
        let text = self.text_of(&UNIT_DESC).await?;
        let (unit, _) = parse_unit_desc(&text)?;
        Ok(unit)
    }

    /// Line total as displayed in the third column
    pub async fn total_price(&self) -> CafeteraResult<Price> {
        let text = self.text_of(&TOTAL).await?;
        Price::parse(&text)
    }

    /// Line total this line should display: unit price times quantity
    pub async fn expected_total(&self) -> CafeteraResult<Price> {
        let text = self.text_of(&UNIT_DESC).await?;
        let (unit, quantity) = parse_unit_desc(&text)?;
        Ok(unit.times(quantity))
    }

    /// Add one unit
    pub async fn increase(&self) -> CafeteraResult<()> {
        debug!("cart item: increase quantity");
        self.click_on(&PLUS).await
    }

    /// Remove one unit; at quantity one this removes the line
    pub async fn decrease(&self) -> CafeteraResult<()> {
        debug!("cart item: decrease quantity");
        self.click_on(&MINUS).await
    }

    /// Remove the whole line
    pub async fn remove(&self) -> CafeteraResult<()> {
        debug!("cart item: remove line");
        self.click_on(&REMOVE).await
    }
}
