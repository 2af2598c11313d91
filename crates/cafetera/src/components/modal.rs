//! The two dialogs: add-to-cart confirmation and payment details.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::debug;

use crate::driver::ElementId;
use crate::locator::Locator;
use crate::pages::MenuPage;
use crate::result::CafeteraResult;
use crate::scope::{ElementScope, Session};
use crate::styles::get_styles;
use crate::users::User;

const ADD_CUP_ROOT: Locator = Locator::xpath("//dialog[@data-cy='add-to-cart-modal']");
const ADD_CUP_MESSAGE: Locator = Locator::xpath(".//p");
const ADD_CUP_PRODUCT: Locator = Locator::xpath(".//p/strong");
static ADD_CUP_YES: Locator = Locator::xpath(".//form/button[normalize-space()='Yes']");
static ADD_CUP_NO: Locator = Locator::xpath(".//form/button[normalize-space()='No']");

const PAYMENT_ROOT: Locator = Locator::css(".modal");
const PAYMENT_NAME: Locator = Locator::css("input#name");
const PAYMENT_EMAIL: Locator = Locator::css("input#email");
const PAYMENT_SUBMIT: Locator = Locator::css("button#submit-payment");

const DIALOG_STYLE_PROPERTIES: &[&str] = &[
    "position",
    "display",
    "width",
    "height",
    "backgroundColor",
    "color",
    "margin",
    "padding",
    "borderStyle",
    "borderColor",
    "borderWidth",
];

const BUTTON_STYLE_PROPERTIES: &[&str] = &["border", "backgroundColor", "margin"];

/// Which button of the add-to-cart dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalButton {
    /// The confirm button
    Yes,
    /// The cancel button
    No,
}

impl ModalButton {
    fn locator(self) -> &'static Locator {
        match self {
            Self::Yes => &ADD_CUP_YES,
            Self::No => &ADD_CUP_NO,
        }
    }
}

/// The `<dialog>` opened by right-clicking a cup, asking to confirm the
/// add. Cancelling leaves the cart untouched.
#[derive(Debug, Clone)]
pub struct AddCupModal {
    session: Session,
    root: ElementId,
}

#[async_trait]
impl ElementScope for AddCupModal {
    fn session(&self) -> &Session {
        &self.session
    }

    fn root(&self) -> Option<ElementId> {
        Some(self.root)
    }
}

impl AddCupModal {
    /// Resolve the dialog in the current document
    pub async fn attach(session: &Session) -> CafeteraResult<Self> {
        let root = session.driver().find(None, &ADD_CUP_ROOT).await?;
        Ok(Self {
            session: session.clone(),
            root,
        })
    }

    /// Whether the dialog is displayed with its `open` attribute set
    pub async fn is_open(&self) -> CafeteraResult<bool> {
        let displayed = self.session.driver().is_displayed(self.root).await?;
        let open = self
            .session
            .driver()
            .attribute(self.root, "open")
            .await?
            .is_some();
        Ok(displayed && open)
    }

    /// Full dialog message
    pub async fn message(&self) -> CafeteraResult<String> {
        self.text_of(&ADD_CUP_MESSAGE).await
    }

    /// The product name highlighted inside the message
    pub async fn product_name(&self) -> CafeteraResult<String> {
        self.text_of(&ADD_CUP_PRODUCT).await
    }

    /// Confirm the add; one unit lands in the cart and the dialog closes
    pub async fn confirm(self) -> CafeteraResult<()> {
        debug!("add-cup dialog: confirm");
        self.click_on(&ADD_CUP_YES).await
    }

    /// Dismiss the dialog; the cart stays unchanged
    pub async fn cancel(self) -> CafeteraResult<()> {
        debug!("add-cup dialog: cancel");
        self.click_on(&ADD_CUP_NO).await
    }

    /// Computed styles of the dialog element
    pub async fn dialog_styles(&self) -> CafeteraResult<BTreeMap<String, String>> {
        get_styles(self.session.driver(), self.root, DIALOG_STYLE_PROPERTIES).await
    }

    /// Computed styles of one of the dialog buttons
    pub async fn button_styles(
        &self,
        button: ModalButton,
    ) -> CafeteraResult<BTreeMap<String, String>> {
        let element = self.find(button.locator()).await?;
        get_styles(self.session.driver(), element, BUTTON_STYLE_PROPERTIES).await
    }
}

/// The payment details form opened by the pay button. Submitting with
/// credentials the form rejects leaves the dialog open; there is no
/// automatic retry.
#[derive(Debug, Clone)]
pub struct PaymentDetailsModal {
    session: Session,
    root: ElementId,
}

#[async_trait]
impl ElementScope for PaymentDetailsModal {
    fn session(&self) -> &Session {
        &self.session
    }

    fn root(&self) -> Option<ElementId> {
        Some(self.root)
    }
}

impl PaymentDetailsModal {
    /// Resolve the payment dialog in the current document
    pub async fn attach(session: &Session) -> CafeteraResult<Self> {
        let root = session.driver().find(None, &PAYMENT_ROOT).await?;
        Ok(Self {
            session: session.clone(),
            root,
        })
    }

    /// Whether the dialog is displayed
    pub async fn is_open(&self) -> CafeteraResult<bool> {
        self.session.driver().is_displayed(self.root).await
    }

    /// Type the user's name and email into the form
    pub async fn fill_credentials(&self, user: &User) -> CafeteraResult<&Self> {
        debug!(name = %user.name, "filling payment credentials");
        let name_input = self.find(&PAYMENT_NAME).await?;
        self.session.driver().fill(name_input, &user.name).await?;
        let email_input = self.find(&PAYMENT_EMAIL).await?;
        self.session.driver().fill(email_input, &user.email).await?;
        Ok(self)
    }

    /// Submit expecting acceptance; lands back on the menu page
    pub async fn submit_success(self) -> CafeteraResult<MenuPage> {
        debug!("submitting payment, expecting success");
        self.click_on(&PAYMENT_SUBMIT).await?;
        MenuPage::attach(&self.session).await
    }

    /// Submit expecting rejection; the dialog remains for inspection
    pub async fn submit_failure(self) -> CafeteraResult<Self> {
        debug!("submitting payment, expecting rejection");
        self.click_on(&PAYMENT_SUBMIT).await?;
        let session = self.session.clone();
        Self::attach(&session).await
    }
}
