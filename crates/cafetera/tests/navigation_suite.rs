//! Header navigation, the GitHub page links, and screenshot capture.

mod common;

use cafetera::report::ScreenshotReporter;

#[tokio::test]
async fn test_header_cycles_through_all_pages() {
    let (session, menu) = common::open_menu().await;
    assert_eq!(
        session.driver().current_url().await.unwrap(),
        "https://coffee-cart.app"
    );

    let cart = menu.goto_cart().await.unwrap();
    assert_eq!(
        session.driver().current_url().await.unwrap(),
        "https://coffee-cart.app/cart"
    );

    let header = cart.header().await.unwrap();
    let github = header.goto_github().await.unwrap();
    assert_eq!(
        session.driver().current_url().await.unwrap(),
        "https://coffee-cart.app/github"
    );

    let header = github.header().await.unwrap();
    header.goto_menu().await.unwrap();
    assert_eq!(
        session.driver().current_url().await.unwrap(),
        "https://coffee-cart.app"
    );
}

#[tokio::test]
async fn test_ads_simulation_link_lands_on_menu() {
    let (session, menu) = common::open_menu().await;
    let github = menu.goto_github().await.unwrap();

    let menu = github.open_ads_simulation().await.unwrap();
    assert_eq!(
        session.driver().current_url().await.unwrap(),
        "https://coffee-cart.app/?ad=1"
    );
    assert_eq!(menu.cups().await.unwrap().len(), 9);
}

#[tokio::test]
async fn test_error_simulation_link_lands_on_menu() {
    let (session, menu) = common::open_menu().await;
    let github = menu.goto_github().await.unwrap();

    github.open_error_simulation().await.unwrap();
    assert_eq!(
        session.driver().current_url().await.unwrap(),
        "https://coffee-cart.app/?breakable=1"
    );
}

#[tokio::test]
async fn test_simulation_links_follow_configured_base_url() {
    use std::sync::Arc;

    use cafetera::scope::Session;
    use cafetera::sim::SimDriver;
    use cafetera::Config;
    use cafetera::pages::MenuPage;

    let config = Config::default().with_base_url("https://staging.coffee-cart.app");
    let session = Session::new(Arc::new(SimDriver::new()), config);
    let menu = MenuPage::open(&session).await.unwrap();

    let github = menu.goto_github().await.unwrap();
    github.open_ads_simulation().await.unwrap();
    assert_eq!(
        session.driver().current_url().await.unwrap(),
        "https://staging.coffee-cart.app/?ad=1"
    );
}

#[tokio::test]
async fn test_external_links_are_present() {
    let (_session, menu) = common::open_menu().await;
    let github = menu.goto_github().await.unwrap();

    // External targets are not followed, only clicked.
    github.open_repo().await.unwrap();
    github.open_tutorial().await.unwrap();
    github.open_recorder_panel().await.unwrap();
    github.open_performance_panel().await.unwrap();
}

#[tokio::test]
async fn test_screenshot_capture_writes_png() {
    let (session, _menu) = common::open_menu().await;

    let dir = tempfile::tempdir().unwrap();
    let reporter = ScreenshotReporter::new(dir.path());
    let path = reporter.capture(&session, "menu page").await.unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}
