//! The pay button, its running total, and the hover cart preview.

use async_trait::async_trait;
use tracing::debug;

use crate::components::modal::PaymentDetailsModal;
use crate::driver::ElementId;
use crate::locator::Locator;
use crate::money::{parse_unit_desc, Price};
use crate::result::CafeteraResult;
use crate::retry::once_on_stale;
use crate::scope::{ElementScope, Session};
use crate::wait::{wait_until, WaitOptions};

const TOTAL_BUTTON: Locator = Locator::class_name("pay");
const PREVIEW_ROOT: Locator = Locator::xpath("//ul[contains(@class, 'cart-preview')]");
const PREVIEW_VISIBLE_ROOT: Locator =
    Locator::xpath("//ul[contains(@class, 'cart-preview') and contains(@class, 'show')]");
const PREVIEW_ITEMS: Locator = Locator::xpath(".//li[contains(@class, 'list-item')]");

const ITEM_NAME: Locator = Locator::xpath(".//div/span");
const ITEM_UNIT_DESC: Locator = Locator::xpath(r#".//div/span[@class="unit-desc"]"#);
const ITEM_PLUS: Locator = Locator::xpath(".//div/button[1]");
const ITEM_MINUS: Locator = Locator::xpath(".//div/button[2]");

/// The pay button with its `"Total: $N.NN"` label. Present on both the
/// menu and cart pages; hovering it on the menu page reveals the cart
/// preview.
#[derive(Debug, Clone)]
pub struct Pay {
    session: Session,
}

#[async_trait]
impl ElementScope for Pay {
    fn session(&self) -> &Session {
        &self.session
    }

    fn root(&self) -> Option<ElementId> {
        None
    }
}

impl Pay {
    pub(crate) fn new(session: Session) -> Self {
        Self { session }
    }

    /// Raw label of the pay button, e.g. `"Total: $18.00"`
    pub async fn total_text(&self) -> CafeteraResult<String> {
        self.text_of(&TOTAL_BUTTON).await
    }

    /// Total amount parsed from the label; an empty cart reads `$0.00`
    pub async fn total_amount(&self) -> CafeteraResult<Price> {
        let text = self.total_text().await?;
        Price::parse(&text)
    }

    /// Click the pay button and wait for the payment details dialog
    pub async fn click_pay(&self) -> CafeteraResult<PaymentDetailsModal> {
        debug!("opening payment details");
        self.click_on(&TOTAL_BUTTON).await?;
        let options =
            WaitOptions::new().with_timeout(self.session.config().default_timeout_ms);
        wait_until(options, || async {
            match PaymentDetailsModal::attach(&self.session).await {
                Ok(modal) => modal.is_open().await,
                Err(err) if err.is_absence() => Ok(false),
                Err(err) => Err(err),
            }
        })
        .await?;
        PaymentDetailsModal::attach(&self.session).await
    }

    /// Move the pointer over the pay button, revealing the cart preview
    pub async fn hover(&self) -> CafeteraResult<()> {
        let button = self.find(&TOTAL_BUTTON).await?;
        self.session.driver().hover(button).await
    }

    /// The hover cart preview
    #[must_use]
    pub fn preview(&self) -> PayPreview {
        PayPreview {
            session: self.session.clone(),
        }
    }
}

/// The cart preview list shown while hovering the pay button.
///
/// The preview re-renders on every quantity change, so collection reads
/// go through the single stale-recovery path.
#[derive(Debug, Clone)]
pub struct PayPreview {
    session: Session,
}

#[async_trait]
impl ElementScope for PayPreview {
    fn session(&self) -> &Session {
        &self.session
    }

    fn root(&self) -> Option<ElementId> {
        None
    }
}

impl PayPreview {
    /// Whether the preview is currently shown
    pub async fn is_visible(&self) -> CafeteraResult<bool> {
        match self.find_optional(&PREVIEW_VISIBLE_ROOT).await? {
            Some(root) => self.session.driver().is_displayed(root).await,
            None => Ok(false),
        }
    }

    /// Whether the preview exists in the document at all
    pub async fn exists(&self) -> CafeteraResult<bool> {
        Ok(self.find_optional(&PREVIEW_ROOT).await?.is_some())
    }

    /// All preview lines, empty when the preview is hidden
    pub async fn items(&self) -> CafeteraResult<Vec<PayPreviewItem>> {
        once_on_stale("pay preview items", || async {
            let Some(root) = self.find_optional(&PREVIEW_VISIBLE_ROOT).await? else {
                debug!("cart preview not visible, no items");
                return Ok(Vec::new());
            };
            let elements = self
                .session
                .driver()
                .find_all(Some(root), &PREVIEW_ITEMS)
                .await?;
            Ok(elements
                .into_iter()
                .map(|el| PayPreviewItem::new(self.session.clone(), el))
                .collect())
        })
        .await
    }

    /// The preview line for `name`, when present
    pub async fn item_by_name(&self, name: &str) -> CafeteraResult<Option<PayPreviewItem>> {
        for item in self.items().await? {
            if item.name().await? == name {
                return Ok(Some(item));
            }
        }
        debug!(name, "drink not present in cart preview");
        Ok(None)
    }

    /// Sum of quantities across all preview lines
    pub async fn total_quantity(&self) -> CafeteraResult<u32> {
        let mut total = 0;
        for item in self.items().await? {
            total += item.quantity().await?;
        }
        Ok(total)
    }
}

/// One line of the cart preview. Like cart lines, the handle is only
/// valid until the next quantity change.
#[derive(Debug, Clone)]
pub struct PayPreviewItem {
    session: Session,
    root: ElementId,
}

#[async_trait]
impl ElementScope for PayPreviewItem {
    fn session(&self) -> &Session {
        &self.session
    }

    fn root(&self) -> Option<ElementId> {
        Some(self.root)
    }
}

impl PayPreviewItem {
    pub(crate) fn new(session: Session, root: ElementId) -> Self {
        Self { session, root }
    }

    /// Drink name of this preview line
    pub async fn name(&self) -> CafeteraResult<String> {
        self.text_of(&ITEM_NAME).await
    }

    /// Raw unit description, e.g. `"$8.00 x 2"`
    pub async fn unit_text(&self) -> CafeteraResult<String> {
        self.text_of(&ITEM_UNIT_DESC).await
    }

    /// Quantity parsed from the unit description
    pub async fn quantity(&self) -> CafeteraResult<u32> {
        let text = self.unit_text().await?;
        let (_, quantity) = parse_unit_desc(&text)?;
        Ok(quantity)
    }

    /// Unit price parsed from the unit description
    pub async fn unit_price(&self) -> CafeteraResult<Price> {
        let text = self.unit_text().await?;
        let (unit, _) = parse_unit_desc(&text)?;
        Ok(unit)
    }

    /// Click the `+` button of this line
    pub async fn increment(&self) -> CafeteraResult<()> {
        debug!("preview item: increment");
        self.click_on(&ITEM_PLUS).await
    }

    /// Click the `-` button of this line; at quantity one the line goes away
    pub async fn decrement(&self) -> CafeteraResult<()> {
        debug!("preview item: decrement");
        self.click_on(&ITEM_MINUS).await
    }
}
