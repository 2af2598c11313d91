//! The navigation header shared by every page.

use async_trait::async_trait;
use tracing::debug;

use crate::driver::ElementId;
use crate::locator::Locator;
use crate::pages::{CartPage, GitHubPage, MenuPage};
use crate::result::{CafeteraError, CafeteraResult};
use crate::scope::{ElementScope, Session};

/// Root of the header bar
pub const ROOT: Locator = Locator::css("#app ul");

const MENU_LINK: Locator = Locator::css(r#"a[aria-label="Menu page"]"#);
const CART_LINK: Locator = Locator::css(r#"a[aria-label="Cart page"]"#);
const GITHUB_LINK: Locator = Locator::css(r#"a[aria-label="GitHub page"]"#);

/// Header component: the three page links plus the live cart count.
#[derive(Debug, Clone)]
pub struct Header {
    session: Session,
    root: ElementId,
}

#[async_trait]
impl ElementScope for Header {
    fn session(&self) -> &Session {
        &self.session
    }

    fn root(&self) -> Option<ElementId> {
        Some(self.root)
    }
}

impl Header {
    /// Resolve the header on the current page
    pub async fn attach(session: &Session) -> CafeteraResult<Self> {
        let root = session.driver().find(None, &ROOT).await?;
        Ok(Self {
            session: session.clone(),
            root,
        })
    }

    /// Number of cups in the cart, parsed from the `"Cart (N)"` link text
    pub async fn cart_count(&self) -> CafeteraResult<u32> {
        let text = self.text_of(&CART_LINK).await?;
        parse_cart_count(&text)
    }

    /// Click the menu link and land on the menu page
    pub async fn goto_menu(&self) -> CafeteraResult<MenuPage> {
        debug!("header: navigating to menu page");
        self.click_on(&MENU_LINK).await?;
        MenuPage::attach(&self.session).await
    }

    /// Click the cart link and land on the cart page
    pub async fn goto_cart(&self) -> CafeteraResult<CartPage> {
        debug!("header: navigating to cart page");
        self.click_on(&CART_LINK).await?;
        CartPage::attach(&self.session).await
    }

    /// Click the GitHub link and land on the GitHub page
    pub async fn goto_github(&self) -> CafeteraResult<GitHubPage> {
        debug!("header: navigating to github page");
        self.click_on(&GITHUB_LINK).await?;
        GitHubPage::attach(&self.session).await
    }
}

fn parse_cart_count(text: &str) -> CafeteraResult<u32> {
    let inner = text
        .split_once('(')
        .and_then(|(_, rest)| rest.split_once(')'))
        .map(|(count, _)| count.trim());
    inner
        .and_then(|c| c.parse::<u32>().ok())
        .ok_or_else(|| CafeteraError::Parse {
            what: "cart count",
            input: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cart_count() {
        assert_eq!(parse_cart_count("Cart (0)").unwrap(), 0);
        assert_eq!(parse_cart_count("Cart (12)").unwrap(), 12);
        assert_eq!(parse_cart_count("Cart ( 3 )").unwrap(), 3);
    }

    #[test]
    fn test_parse_cart_count_rejects_missing_parens() {
        assert!(parse_cart_count("Cart").is_err());
        assert!(parse_cart_count("Cart (x)").is_err());
    }
}
