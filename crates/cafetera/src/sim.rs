//! Deterministic in-memory model of the coffee-cart application.
//!
//! [`SimDriver`] implements [`Driver`] over a small state machine covering
//! the menu, cart and GitHub routes, the promo banner, both dialogs, the
//! hover preview and the purchase flow. Each mutation re-renders the node
//! tree and advances an epoch; handles resolved before the mutation report
//! [`CafeteraError::StaleElement`] exactly like a live page that re-rendered
//! underneath them.
//!
//! Nodes answer lookups by locator equality: a node lists the locators it
//! satisfies, which are the same `const` items the page objects use. The
//! simulator therefore needs no selector engine, and a renamed locator
//! breaks loudly in tests rather than silently matching nothing.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::catalog::{self, CatalogDrink, MENU, PROMO_CART_NAME, PROMO_PRICE_CENTS, PROMO_TEXT};
use crate::driver::{not_found, Driver, ElementId};
use crate::locator::Locator;
use crate::money::Price;
use crate::result::{CafeteraError, CafeteraResult};

const SNACKBAR_TEXT: &str = "Thanks for your purchase. Please check your email for payment.";

// Transparent 1x1 PNG, enough for artifact-writing paths.
const PNG_1X1: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Menu,
    Cart,
    Github,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SimAction {
    GotoMenu,
    GotoCart,
    GotoGithub,
    AddToCart(usize),
    ToggleTranslation(usize),
    PromoAccept,
    PromoDecline,
    ModalConfirm,
    ModalCancel,
    PreviewIncrement(String),
    PreviewDecrement(String),
    CartIncrement(String),
    CartDecrement(String),
    CartRemove(String),
    OpenPayment,
    SubmitPayment,
    OpenAds,
    OpenBreakable,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputField {
    Name,
    Email,
}

#[derive(Debug, Clone)]
struct CartLine {
    name: String,
    unit_cents: u64,
    quantity: u32,
}

impl CartLine {
    fn unit_price(&self) -> Price {
        Price::from_cents(self.unit_cents)
    }

    fn total(&self) -> Price {
        self.unit_price().times(self.quantity)
    }
}

/// One rendered element of the simulated document.
#[derive(Debug, Default)]
struct SimNode {
    parent: Option<usize>,
    text: String,
    attrs: Vec<(&'static str, String)>,
    styles: Vec<(&'static str, &'static str)>,
    selectors: Vec<Locator>,
    action: Option<SimAction>,
    input: Option<InputField>,
}

#[derive(Debug)]
struct SimState {
    route: Route,
    origin: String,
    current_url: String,
    cart: Vec<CartLine>,
    promo_visible: bool,
    add_modal_for: Option<usize>,
    payment_open: bool,
    payment_name: String,
    payment_email: String,
    snackbar_success: bool,
    preview_shown: bool,
    translated: [bool; 9],
    epoch: u64,
    nodes: Vec<SimNode>,
}

impl SimState {
    fn new() -> Self {
        let mut state = Self {
            route: Route::Menu,
            origin: "https://coffee-cart.app".to_string(),
            current_url: "about:blank".to_string(),
            cart: Vec::new(),
            promo_visible: false,
            add_modal_for: None,
            payment_open: false,
            payment_name: String::new(),
            payment_email: String::new(),
            snackbar_success: false,
            preview_shown: false,
            translated: [false; 9],
            epoch: 0,
            nodes: Vec::new(),
        };
        state.render();
        state
    }

    fn cup_count(&self) -> u32 {
        self.cart.iter().map(|line| line.quantity).sum()
    }

    fn total(&self) -> Price {
        Price::sum(self.cart.iter().map(CartLine::total))
    }

    fn line_mut(&mut self, name: &str) -> Option<&mut CartLine> {
        self.cart.iter_mut().find(|line| line.name == name)
    }

    fn add_drink(&mut self, drink: &CatalogDrink) {
        self.add_named(drink.name, drink.price_cents);
    }

    fn add_named(&mut self, name: &str, unit_cents: u64) {
        if let Some(line) = self.line_mut(name) {
            line.quantity += 1;
        } else {
            self.cart.push(CartLine {
                name: name.to_string(),
                unit_cents,
                quantity: 1,
            });
        }
    }

    fn decrement(&mut self, name: &str) {
        if let Some(line) = self.line_mut(name) {
            line.quantity -= 1;
        }
        self.cart.retain(|line| line.quantity > 0);
    }

    /// The banner shows whenever an add lands the cup count on a positive
    /// multiple of three.
    fn recompute_promo(&mut self) {
        let count = self.cup_count();
        self.promo_visible = count > 0 && count % 3 == 0;
    }

    fn navigate_to(&mut self, url: &str) {
        if let Some(origin) = parse_origin(url) {
            self.origin = origin;
        }
        self.route = if url.contains("/cart") {
            Route::Cart
        } else if url.contains("/github") {
            Route::Github
        } else {
            Route::Menu
        };
        self.current_url = url.to_string();
        self.add_modal_for = None;
        self.payment_open = false;
        self.snackbar_success = false;
        self.preview_shown = false;
        self.render();
    }

    fn apply(&mut self, action: SimAction) {
        match action {
            SimAction::GotoMenu => {
                let url = self.origin.clone();
                self.navigate_to(&url);
                return;
            }
            SimAction::GotoCart => {
                let url = format!("{}/cart", self.origin);
                self.navigate_to(&url);
                return;
            }
            SimAction::GotoGithub => {
                let url = format!("{}/github", self.origin);
                self.navigate_to(&url);
                return;
            }
            SimAction::OpenAds => {
                let url = format!("{}/?ad=1", self.origin);
                self.navigate_to(&url);
                return;
            }
            SimAction::OpenBreakable => {
                let url = format!("{}/?breakable=1", self.origin);
                self.navigate_to(&url);
                return;
            }
            SimAction::AddToCart(index) => {
                self.add_drink(&MENU[index]);
                self.recompute_promo();
            }
            SimAction::ToggleTranslation(index) => {
                self.translated[index] = !self.translated[index];
            }
            SimAction::PromoAccept => {
                self.add_named(PROMO_CART_NAME, PROMO_PRICE_CENTS);
                self.recompute_promo();
                self.promo_visible = false;
            }
            SimAction::PromoDecline => {
                self.promo_visible = false;
            }
            SimAction::ModalConfirm => {
                if let Some(index) = self.add_modal_for.take() {
                    self.add_drink(&MENU[index]);
                    self.recompute_promo();
                }
            }
            SimAction::ModalCancel => {
                self.add_modal_for = None;
            }
            SimAction::PreviewIncrement(name) | SimAction::CartIncrement(name) => {
                if let Some(line) = self.line_mut(&name) {
                    line.quantity += 1;
                }
                self.recompute_promo();
            }
            SimAction::PreviewDecrement(name) | SimAction::CartDecrement(name) => {
                self.decrement(&name);
            }
            SimAction::CartRemove(name) => {
                self.cart.retain(|line| line.name != name);
            }
            SimAction::OpenPayment => {
                self.payment_open = true;
                self.payment_name.clear();
                self.payment_email.clear();
            }
            SimAction::SubmitPayment => {
                if payment_accepted(&self.payment_name, &self.payment_email) {
                    self.cart.clear();
                    self.payment_open = false;
                    self.promo_visible = false;
                    self.snackbar_success = true;
                } else {
                    debug!("payment rejected, dialog stays open");
                    return;
                }
            }
            SimAction::External => return,
        }
        self.render();
    }

    fn open_add_modal(&mut self, index: usize) {
        self.add_modal_for = Some(index);
        self.render();
    }

    fn hover_pay(&mut self) {
        if !self.cart.is_empty() && !self.preview_shown {
            self.preview_shown = true;
            self.render();
        }
    }

    // Rendering

    fn render(&mut self) {
        self.epoch += 1;
        self.nodes = Vec::new();
        self.render_header();
        match self.route {
            Route::Menu => self.render_menu(),
            Route::Cart => self.render_cart(),
            Route::Github => self.render_github(),
        }
    }

    fn push(&mut self, node: SimNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn render_header(&mut self) {
        let header = self.push(SimNode {
            selectors: vec![Locator::css("#app ul")],
            ..SimNode::default()
        });
        self.push(SimNode {
            parent: Some(header),
            text: "menu".to_string(),
            selectors: vec![Locator::css(r#"a[aria-label="Menu page"]"#)],
            action: Some(SimAction::GotoMenu),
            ..SimNode::default()
        });
        self.push(SimNode {
            parent: Some(header),
            text: format!("Cart ({})", self.cup_count()),
            selectors: vec![Locator::css(r#"a[aria-label="Cart page"]"#)],
            action: Some(SimAction::GotoCart),
            ..SimNode::default()
        });
        self.push(SimNode {
            parent: Some(header),
            text: "github".to_string(),
            selectors: vec![Locator::css(r#"a[aria-label="GitHub page"]"#)],
            action: Some(SimAction::GotoGithub),
            ..SimNode::default()
        });
    }

    fn render_menu(&mut self) {
        for (index, drink) in MENU.iter().enumerate() {
            self.render_cup(index, drink);
        }
        if self.promo_visible {
            self.render_promo();
        }
        self.render_pay_button();
        if self.preview_shown && !self.cart.is_empty() {
            self.render_preview();
        }
        if let Some(index) = self.add_modal_for {
            self.render_add_modal(MENU[index].name);
        }
        if self.payment_open {
            self.render_payment_modal();
        }
        if self.snackbar_success {
            self.push(SimNode {
                text: SNACKBAR_TEXT.to_string(),
                selectors: vec![Locator::css(".snackbar.success")],
                ..SimNode::default()
            });
        }
    }

    fn render_cup(&mut self, index: usize, drink: &CatalogDrink) {
        let cup = self.push(SimNode {
            selectors: vec![Locator::xpath("//li/h4/..")],
            ..SimNode::default()
        });
        let displayed_name = if self.translated[index] {
            drink.translated_name
        } else {
            drink.name
        };
        self.push(SimNode {
            parent: Some(cup),
            text: format!("{displayed_name}\n{}", drink.price()),
            selectors: vec![Locator::xpath(".//h4")],
            action: Some(SimAction::ToggleTranslation(index)),
            ..SimNode::default()
        });
        self.push(SimNode {
            parent: Some(cup),
            text: drink.price().to_string(),
            selectors: vec![Locator::xpath(".//h4/small")],
            ..SimNode::default()
        });
        let body = self.push(SimNode {
            parent: Some(cup),
            attrs: vec![("class", "cup".to_string())],
            selectors: vec![Locator::class_name("cup"), Locator::css(".cup")],
            action: Some(SimAction::AddToCart(index)),
            ..SimNode::default()
        });
        // The document stacks layers bottom-up, so the catalog's display
        // order is emitted in reverse.
        for ingredient in drink.ingredients.iter().rev() {
            self.push(SimNode {
                parent: Some(body),
                text: ingredient.name.to_string(),
                attrs: vec![
                    ("class", "ingredient".to_string()),
                    ("style", format!("height: {}%;", ingredient.height_percent)),
                ],
                styles: vec![("backgroundColor", ingredient.color)],
                selectors: vec![
                    Locator::css(".ingredient"),
                    Locator::xpath(".//div[starts-with(@class, 'ingredient')]"),
                ],
                ..SimNode::default()
            });
        }
    }

    fn render_promo(&mut self) {
        let promo = self.push(SimNode {
            selectors: vec![Locator::css(".promo")],
            ..SimNode::default()
        });
        self.push(SimNode {
            parent: Some(promo),
            text: PROMO_TEXT.to_string(),
            selectors: vec![Locator::xpath(".//span[@class='promo-text']")],
            ..SimNode::default()
        });
        let body = self.push(SimNode {
            parent: Some(promo),
            attrs: vec![("class", "cup-body disabled-hover".to_string())],
            selectors: vec![
                Locator::xpath(r#".//div[contains(@class, "cup-body")]"#),
                Locator::css(".cup-body.disabled-hover"),
            ],
            ..SimNode::default()
        });
        let mocha = catalog::drink_by_name(catalog::PROMO_DRINK)
            .unwrap_or(&MENU[3]);
        for ingredient in mocha.ingredients.iter().rev() {
            self.push(SimNode {
                parent: Some(body),
                text: ingredient.name.to_string(),
                attrs: vec![
                    ("class", "ingredient".to_string()),
                    ("style", format!("height: {}%;", ingredient.height_percent)),
                ],
                styles: vec![("backgroundColor", ingredient.color)],
                selectors: vec![
                    Locator::css(".ingredient"),
                    Locator::xpath(".//div[starts-with(@class, 'ingredient')]"),
                ],
                ..SimNode::default()
            });
        }
        self.push(SimNode {
            parent: Some(promo),
            text: catalog::PROMO_YES_TEXT.to_string(),
            selectors: vec![Locator::xpath(r#".//div[@class="buttons"]/button[1]"#)],
            action: Some(SimAction::PromoAccept),
            ..SimNode::default()
        });
        self.push(SimNode {
            parent: Some(promo),
            text: catalog::PROMO_NO_TEXT.to_string(),
            selectors: vec![Locator::xpath(r#".//div[@class="buttons"]/button[2]"#)],
            action: Some(SimAction::PromoDecline),
            ..SimNode::default()
        });
    }

    fn render_pay_button(&mut self) {
        self.push(SimNode {
            text: format!("Total: {}", self.total()),
            selectors: vec![Locator::class_name("pay"), Locator::css("button.pay")],
            action: Some(SimAction::OpenPayment),
            ..SimNode::default()
        });
    }

    fn render_preview(&mut self) {
        let preview = self.push(SimNode {
            attrs: vec![("class", "cart-preview show".to_string())],
            selectors: vec![
                Locator::xpath("//ul[contains(@class, 'cart-preview')]"),
                Locator::xpath(
                    "//ul[contains(@class, 'cart-preview') and contains(@class, 'show')]",
                ),
            ],
            ..SimNode::default()
        });
        let lines = self.cart.clone();
        for line in &lines {
            let item = self.push(SimNode {
                parent: Some(preview),
                selectors: vec![Locator::xpath(".//li[contains(@class, 'list-item')]")],
                ..SimNode::default()
            });
            self.push(SimNode {
                parent: Some(item),
                text: line.name.clone(),
                selectors: vec![Locator::xpath(".//div/span")],
                ..SimNode::default()
            });
            self.push(SimNode {
                parent: Some(item),
                text: format!("{} x {}", line.unit_price(), line.quantity),
                selectors: vec![Locator::xpath(r#".//div/span[@class="unit-desc"]"#)],
                ..SimNode::default()
            });
            self.push(SimNode {
                parent: Some(item),
                text: "+".to_string(),
                selectors: vec![Locator::xpath(".//div/button[1]")],
                action: Some(SimAction::PreviewIncrement(line.name.clone())),
                ..SimNode::default()
            });
            self.push(SimNode {
                parent: Some(item),
                text: "-".to_string(),
                selectors: vec![Locator::xpath(".//div/button[2]")],
                action: Some(SimAction::PreviewDecrement(line.name.clone())),
                ..SimNode::default()
            });
        }
    }

    fn render_add_modal(&mut self, drink_name: &str) {
        let dialog = self.push(SimNode {
            attrs: vec![
                ("open", String::new()),
                ("data-cy", "add-to-cart-modal".to_string()),
            ],
            styles: vec![
                ("position", "fixed"),
                ("display", "block"),
                ("width", "420px"),
                ("height", "232px"),
                ("backgroundColor", "rgb(255, 255, 255)"),
                ("color", "rgb(0, 0, 0)"),
                ("margin", "auto"),
                ("padding", "18px"),
                ("borderStyle", "solid"),
                ("borderColor", "rgb(0, 0, 0)"),
                ("borderWidth", "1.5px"),
            ],
            selectors: vec![Locator::xpath("//dialog[@data-cy='add-to-cart-modal']")],
            ..SimNode::default()
        });
        self.push(SimNode {
            parent: Some(dialog),
            text: format!("Add {drink_name} to the cart?"),
            selectors: vec![Locator::xpath(".//p")],
            ..SimNode::default()
        });
        self.push(SimNode {
            parent: Some(dialog),
            text: drink_name.to_string(),
            selectors: vec![Locator::xpath(".//p/strong")],
            ..SimNode::default()
        });
        self.push(SimNode {
            parent: Some(dialog),
            text: "Yes".to_string(),
            styles: vec![
                ("border", "1px solid rgb(0, 0, 0)"),
                ("backgroundColor", "rgb(255, 255, 255)"),
                ("margin", "5px"),
            ],
            selectors: vec![Locator::xpath(".//form/button[normalize-space()='Yes']")],
            action: Some(SimAction::ModalConfirm),
            ..SimNode::default()
        });
        self.push(SimNode {
            parent: Some(dialog),
            text: "No".to_string(),
            styles: vec![
                ("border", "1px solid rgb(0, 0, 0)"),
                ("backgroundColor", "rgb(255, 255, 255)"),
                ("margin", "5px"),
            ],
            selectors: vec![Locator::xpath(".//form/button[normalize-space()='No']")],
            action: Some(SimAction::ModalCancel),
            ..SimNode::default()
        });
    }

    fn render_payment_modal(&mut self) {
        let modal = self.push(SimNode {
            attrs: vec![("class", "modal".to_string())],
            selectors: vec![Locator::css(".modal")],
            ..SimNode::default()
        });
        self.push(SimNode {
            parent: Some(modal),
            text: "Payment details".to_string(),
            selectors: vec![Locator::css("h1")],
            ..SimNode::default()
        });
        self.push(SimNode {
            parent: Some(modal),
            selectors: vec![Locator::css("input#name")],
            input: Some(InputField::Name),
            ..SimNode::default()
        });
        self.push(SimNode {
            parent: Some(modal),
            selectors: vec![Locator::css("input#email")],
            input: Some(InputField::Email),
            ..SimNode::default()
        });
        self.push(SimNode {
            parent: Some(modal),
            text: "Submit".to_string(),
            selectors: vec![Locator::css("button#submit-payment")],
            action: Some(SimAction::SubmitPayment),
            ..SimNode::default()
        });
    }

    fn render_cart(&mut self) {
        if self.cart.is_empty() {
            self.push(SimNode {
                text: "No coffee, go add some.".to_string(),
                selectors: vec![Locator::xpath("//p[contains(text(), 'No coffee')]")],
                ..SimNode::default()
            });
        } else {
            let list = self.push(SimNode::default());
            let lines = self.cart.clone();
            for line in &lines {
                let item = self.push(SimNode {
                    parent: Some(list),
                    attrs: vec![("class", "list-item".to_string())],
                    selectors: vec![Locator::css("ul:not(.cart-preview) li.list-item")],
                    ..SimNode::default()
                });
                self.push(SimNode {
                    parent: Some(item),
                    text: line.name.clone(),
                    selectors: vec![Locator::css("div:nth-child(1)")],
                    ..SimNode::default()
                });
                self.push(SimNode {
                    parent: Some(item),
                    text: format!("{} x {}", line.unit_price(), line.quantity),
                    selectors: vec![Locator::css("span.unit-desc")],
                    ..SimNode::default()
                });
                self.push(SimNode {
                    parent: Some(item),
                    text: line.total().to_string(),
                    selectors: vec![Locator::xpath("./div[3]")],
                    ..SimNode::default()
                });
                self.push(SimNode {
                    parent: Some(item),
                    text: "+".to_string(),
                    selectors: vec![Locator::css("button[aria-label^='Add one']")],
                    action: Some(SimAction::CartIncrement(line.name.clone())),
                    ..SimNode::default()
                });
                self.push(SimNode {
                    parent: Some(item),
                    text: "-".to_string(),
                    selectors: vec![Locator::css("button[aria-label^='Remove one']")],
                    action: Some(SimAction::CartDecrement(line.name.clone())),
                    ..SimNode::default()
                });
                self.push(SimNode {
                    parent: Some(item),
                    text: "x".to_string(),
                    selectors: vec![Locator::css("button.delete")],
                    action: Some(SimAction::CartRemove(line.name.clone())),
                    ..SimNode::default()
                });
            }
        }
        self.render_pay_button();
        if self.payment_open {
            self.render_payment_modal();
        }
        if self.snackbar_success {
            self.push(SimNode {
                text: SNACKBAR_TEXT.to_string(),
                selectors: vec![Locator::css(".snackbar.success")],
                ..SimNode::default()
            });
        }
    }

    fn render_github(&mut self) {
        let origin = self.origin.clone();
        self.push(SimNode {
            text: "jecfish/coffee-cart".to_string(),
            selectors: vec![Locator::link_text("jecfish/coffee-cart")],
            action: Some(SimAction::External),
            ..SimNode::default()
        });
        self.push(SimNode {
            text: "usual add to cart flows.".to_string(),
            selectors: vec![Locator::link_text("usual add to cart flows.")],
            action: Some(SimAction::External),
            ..SimNode::default()
        });
        self.push(SimNode {
            text: format!("{origin}/?ad=1"),
            selectors: vec![Locator::link_text_owned(format!("{origin}/?ad=1"))],
            action: Some(SimAction::OpenAds),
            ..SimNode::default()
        });
        self.push(SimNode {
            text: format!("{origin}/?breakable=1"),
            selectors: vec![Locator::link_text_owned(format!("{origin}/?breakable=1"))],
            action: Some(SimAction::OpenBreakable),
            ..SimNode::default()
        });
        self.push(SimNode {
            text: "Recorder panel".to_string(),
            selectors: vec![Locator::xpath(
                "//li[contains(normalize-space(.), 'Recorder panel (link)')]//a",
            )],
            action: Some(SimAction::External),
            ..SimNode::default()
        });
        self.push(SimNode {
            text: "Performance insights panel".to_string(),
            selectors: vec![Locator::xpath(
                "//li[contains(normalize-space(.), 'Performance insights panel (link)')]//a",
            )],
            action: Some(SimAction::External),
            ..SimNode::default()
        });
    }

    // Lookup

    fn encode(&self, index: usize) -> ElementId {
        ElementId((self.epoch << 32) | index as u64)
    }

    fn decode(&self, element: ElementId) -> CafeteraResult<usize> {
        let epoch = element.raw() >> 32;
        let index = (element.raw() & 0xFFFF_FFFF) as usize;
        if epoch != self.epoch || index >= self.nodes.len() {
            return Err(crate::driver::stale(element));
        }
        Ok(index)
    }

    fn is_descendant_of(&self, mut index: usize, ancestor: usize) -> bool {
        while let Some(parent) = self.nodes[index].parent {
            if parent == ancestor {
                return true;
            }
            index = parent;
        }
        false
    }

    fn matches(&self, scope: Option<usize>, locator: &Locator) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(index, node)| {
                node.selectors.contains(locator)
                    && scope.map_or(true, |root| self.is_descendant_of(*index, root))
            })
            .map(|(index, _)| index)
            .collect()
    }
}

fn parse_origin(url: &str) -> Option<String> {
    let scheme_end = url.find("://")?;
    let rest = &url[scheme_end + 3..];
    let host_end = rest.find('/').unwrap_or(rest.len());
    Some(format!("{}{}", &url[..scheme_end + 3], &rest[..host_end]))
}

fn payment_accepted(name: &str, email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !name.trim().is_empty() && !local.is_empty() && !domain.is_empty()
}

/// Deterministic [`Driver`] over the in-memory application model.
#[derive(Debug)]
pub struct SimDriver {
    state: Mutex<SimState>,
}

impl SimDriver {
    /// Fresh application state: empty cart, menu route not yet loaded
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SimState::new()),
        }
    }

    fn locked(&self) -> std::sync::MutexGuard<'_, SimState> {
        self.state.lock().unwrap()
    }
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Driver for SimDriver {
    async fn navigate(&self, url: &str) -> CafeteraResult<()> {
        debug!(url, "sim: navigate");
        self.locked().navigate_to(url);
        Ok(())
    }

    async fn title(&self) -> CafeteraResult<String> {
        Ok("Coffee cart".to_string())
    }

    async fn current_url(&self) -> CafeteraResult<String> {
        Ok(self.locked().current_url.clone())
    }

    async fn find(
        &self,
        scope: Option<ElementId>,
        locator: &Locator,
    ) -> CafeteraResult<ElementId> {
        let state = self.locked();
        let root = scope.map(|s| state.decode(s)).transpose()?;
        state
            .matches(root, locator)
            .first()
            .map(|&index| state.encode(index))
            .ok_or_else(|| not_found(locator))
    }

    async fn find_all(
        &self,
        scope: Option<ElementId>,
        locator: &Locator,
    ) -> CafeteraResult<Vec<ElementId>> {
        let state = self.locked();
        let root = scope.map(|s| state.decode(s)).transpose()?;
        Ok(state
            .matches(root, locator)
            .into_iter()
            .map(|index| state.encode(index))
            .collect())
    }

    async fn text(&self, element: ElementId) -> CafeteraResult<String> {
        let state = self.locked();
        let index = state.decode(element)?;
        Ok(state.nodes[index].text.clone())
    }

    async fn attribute(
        &self,
        element: ElementId,
        name: &str,
    ) -> CafeteraResult<Option<String>> {
        let state = self.locked();
        let index = state.decode(element)?;
        Ok(state.nodes[index]
            .attrs
            .iter()
            .find(|(attr, _)| *attr == name)
            .map(|(_, value)| value.clone()))
    }

    async fn is_displayed(&self, element: ElementId) -> CafeteraResult<bool> {
        let state = self.locked();
        state.decode(element)?;
        Ok(true)
    }

    async fn click(&self, element: ElementId) -> CafeteraResult<()> {
        let mut state = self.locked();
        let index = state.decode(element)?;
        // Heading translation answers double-click only.
        if let Some(action) = state.nodes[index].action.clone() {
            if matches!(action, SimAction::ToggleTranslation(_)) {
                return Ok(());
            }
            debug!(?action, "sim: click");
            state.apply(action);
        }
        Ok(())
    }

    async fn context_click(&self, element: ElementId) -> CafeteraResult<()> {
        let mut state = self.locked();
        let index = state.decode(element)?;
        if let Some(SimAction::AddToCart(drink)) = state.nodes[index].action.clone() {
            debug!(drink, "sim: context click opens add-cup dialog");
            state.open_add_modal(drink);
        }
        Ok(())
    }

    async fn double_click(&self, element: ElementId) -> CafeteraResult<()> {
        let mut state = self.locked();
        let index = state.decode(element)?;
        if let Some(SimAction::ToggleTranslation(drink)) = state.nodes[index].action.clone() {
            debug!(drink, "sim: double click toggles translation");
            state.apply(SimAction::ToggleTranslation(drink));
        }
        Ok(())
    }

    async fn hover(&self, element: ElementId) -> CafeteraResult<()> {
        let mut state = self.locked();
        let index = state.decode(element)?;
        if matches!(state.nodes[index].action, Some(SimAction::OpenPayment)) {
            state.hover_pay();
        }
        Ok(())
    }

    async fn fill(&self, element: ElementId, text: &str) -> CafeteraResult<()> {
        let mut state = self.locked();
        let index = state.decode(element)?;
        match state.nodes[index].input {
            Some(InputField::Name) => {
                state.payment_name = text.to_string();
                Ok(())
            }
            Some(InputField::Email) => {
                state.payment_email = text.to_string();
                Ok(())
            }
            None => Err(CafeteraError::Script {
                message: "element is not an input".to_string(),
            }),
        }
    }

    async fn computed_style(
        &self,
        element: ElementId,
        property: &str,
    ) -> CafeteraResult<String> {
        let state = self.locked();
        let index = state.decode(element)?;
        Ok(state.nodes[index]
            .styles
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| (*value).to_string())
            .unwrap_or_default())
    }

    async fn execute_script(&self, _script: &str) -> CafeteraResult<Value> {
        Ok(Value::Null)
    }

    async fn screenshot(&self) -> CafeteraResult<Vec<u8>> {
        Ok(PNG_1X1.to_vec())
    }
}
