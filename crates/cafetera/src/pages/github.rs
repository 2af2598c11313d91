//! The GitHub info page with its outbound and simulation links.

use async_trait::async_trait;
use tracing::debug;

use crate::components::Header;
use crate::driver::ElementId;
use crate::locator::Locator;
use crate::result::CafeteraResult;
use crate::scope::{ElementScope, Session};

const REPO_LINK: Locator = Locator::link_text("jecfish/coffee-cart");
const TUTORIAL_LINK: Locator = Locator::link_text("usual add to cart flows.");
const RECORDER_LINK: Locator =
    Locator::xpath("//li[contains(normalize-space(.), 'Recorder panel (link)')]//a");
const PERFORMANCE_LINK: Locator = Locator::xpath(
    "//li[contains(normalize-space(.), 'Performance insights panel (link)')]//a",
);

/// The GitHub page: documentation links plus the two links that reopen
/// the menu in a degraded simulation mode.
#[derive(Debug, Clone)]
pub struct GitHubPage {
    session: Session,
}

#[async_trait]
impl ElementScope for GitHubPage {
    fn session(&self) -> &Session {
        &self.session
    }

    fn root(&self) -> Option<ElementId> {
        None
    }
}

impl GitHubPage {
    /// Navigate directly to the GitHub route
    pub async fn open(session: &Session) -> CafeteraResult<Self> {
        let url = session.config().github_url();
        debug!(%url, "opening github page");
        session.driver().navigate(&url).await?;
        Self::attach(session).await
    }

    /// Wrap the current document as a GitHub page without navigating
    pub async fn attach(session: &Session) -> CafeteraResult<Self> {
        Ok(Self {
            session: session.clone(),
        })
    }

    /// The navigation header
    pub async fn header(&self) -> CafeteraResult<Header> {
        Header::attach(&self.session).await
    }

    /// Open the repository link
    pub async fn open_repo(&self) -> CafeteraResult<()> {
        self.click_on(&REPO_LINK).await
    }

    /// Open the add-to-cart tutorial link
    pub async fn open_tutorial(&self) -> CafeteraResult<()> {
        self.click_on(&TUTORIAL_LINK).await
    }

    /// Reopen the menu with ad overlays enabled (`?ad=1`)
    pub async fn open_ads_simulation(&self) -> CafeteraResult<super::MenuPage> {
        debug!("opening ads simulation");
        self.click_on(&self.simulation_link("ad=1")).await?;
        super::MenuPage::attach(&self.session).await
    }

    /// Reopen the menu with random failures enabled (`?breakable=1`)
    pub async fn open_error_simulation(&self) -> CafeteraResult<super::MenuPage> {
        debug!("opening error simulation");
        self.click_on(&self.simulation_link("breakable=1")).await?;
        super::MenuPage::attach(&self.session).await
    }

    /// The simulation links spell out their own URL, so the link text
    /// follows the configured base URL.
    fn simulation_link(&self, query: &str) -> Locator {
        let base = self.session.config().base_url.trim_end_matches('/');
        Locator::link_text_owned(format!("{base}/?{query}"))
    }

    /// Open the Recorder panel documentation link
    pub async fn open_recorder_panel(&self) -> CafeteraResult<()> {
        self.click_on(&RECORDER_LINK).await
    }

    /// Open the Performance insights panel documentation link
    pub async fn open_performance_panel(&self) -> CafeteraResult<()> {
        self.click_on(&PERFORMANCE_LINK).await
    }
}
