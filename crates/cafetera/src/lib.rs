//! Cafetera: page-object test harness for the coffee-cart demo shop
//!
//! Page objects and components model the shop UI once; suites drive them
//! through a backend-agnostic [`Driver`] trait. The in-process simulator
//! ([`sim::SimDriver`]) answers the same locators the real page does, so
//! suites run against either backend unchanged.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      CAFETERA Architecture                   │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌─────────────┐   ┌───────────────────────┐  │
//! │  │ Suites   │   │ Pages /     │   │ Driver backends       │  │
//! │  │ (tokio)  │──►│ Components  │──►│  SimDriver (default)  │  │
//! │  │          │   │ (ElementScope)  │  CdpDriver (browser)  │  │
//! │  └──────────┘   └─────────────┘   └───────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

#[cfg(feature = "browser")]
pub mod browser;
pub mod catalog;
pub mod components;
pub mod config;
pub mod driver;
pub mod locator;
pub mod money;
pub mod pages;
pub mod report;
pub mod result;
pub mod retry;
pub mod scope;
pub mod sim;
pub mod styles;
pub mod users;
pub mod wait;

#[cfg(feature = "browser")]
pub use browser::{Browser, BrowserConfig, CdpDriver};
pub use catalog::{CatalogDrink, CatalogIngredient, MENU};
pub use components::{
    AddCupModal, CartItem, Cup, Header, Ingredient, ModalButton, Pay, PayPreview,
    PayPreviewItem, PaymentDetailsModal, PromoBanner, PromoCup,
};
pub use config::Config;
pub use driver::{Driver, ElementId};
pub use locator::{Locator, Strategy};
pub use money::Price;
pub use pages::{CartPage, GitHubPage, MenuPage};
pub use report::ScreenshotReporter;
pub use result::{CafeteraError, CafeteraResult};
pub use retry::once_on_stale;
pub use scope::{ElementScope, Session};
pub use sim::SimDriver;
pub use users::User;
pub use wait::{wait_until, WaitOptions};
