//! Promo banner coverage: the every-third-cup offer and both answers to it.

mod common;

use cafetera::catalog::{PROMO_CART_NAME, PROMO_NO_TEXT, PROMO_PRICE_CENTS, PROMO_TEXT, PROMO_YES_TEXT};
use cafetera::money::Price;
use cafetera::pages::MenuPage;

async fn add_espressos(menu: &MenuPage, count: usize) {
    for _ in 0..count {
        menu.add_to_cart("Espresso").await.unwrap();
    }
}

#[tokio::test]
async fn test_banner_absent_below_three_cups() {
    let (_session, menu) = common::open_menu().await;
    assert!(menu.promo().await.unwrap().is_none());

    add_espressos(&menu, 1).await;
    assert!(menu.promo().await.unwrap().is_none());

    add_espressos(&menu, 1).await;
    assert!(menu.promo().await.unwrap().is_none());
}

#[tokio::test]
async fn test_banner_appears_at_third_cup_and_leaves_at_fourth() {
    let (_session, menu) = common::open_menu().await;
    add_espressos(&menu, 3).await;
    assert!(menu.promo().await.unwrap().is_some());

    add_espressos(&menu, 1).await;
    assert!(menu.promo().await.unwrap().is_none());
}

#[tokio::test]
async fn test_banner_returns_at_the_sixth_cup() {
    let (_session, menu) = common::open_menu().await;
    add_espressos(&menu, 3).await;
    menu.promo()
        .await
        .unwrap()
        .expect("promo at three")
        .decline()
        .await
        .unwrap();

    add_espressos(&menu, 2).await;
    assert!(menu.promo().await.unwrap().is_none());

    add_espressos(&menu, 1).await;
    assert!(menu.promo().await.unwrap().is_some(), "promo at six cups");
}

#[tokio::test]
async fn test_banner_copy_and_discounted_cup() {
    let (_session, menu) = common::open_menu().await;
    add_espressos(&menu, 3).await;

    let promo = menu.promo().await.unwrap().expect("promo banner");
    assert_eq!(promo.text().await.unwrap(), PROMO_TEXT);
    assert_eq!(promo.yes_button_text().await.unwrap(), PROMO_YES_TEXT);
    assert_eq!(promo.no_button_text().await.unwrap(), PROMO_NO_TEXT);

    let cup = promo.discounted_cup().await.unwrap();
    assert!(cup.body_class().await.unwrap().contains("disabled-hover"));

    // The offered drink is a Mocha: its four layers, top down.
    let ingredients = cup.ingredients().await.unwrap();
    let mut layers = Vec::new();
    for ingredient in &ingredients {
        layers.push((
            ingredient.name().await.unwrap(),
            ingredient.height_percent().await.unwrap(),
        ));
    }
    assert_eq!(
        layers,
        vec![
            ("whipped cream".to_string(), 25.0),
            ("steamed milk".to_string(), 25.0),
            ("chocolate syrup".to_string(), 20.0),
            ("espresso".to_string(), 30.0),
        ]
    );
}

#[tokio::test]
async fn test_accepting_adds_discounted_mocha() {
    let (_session, menu) = common::open_menu().await;
    add_espressos(&menu, 3).await;

    let menu = menu
        .promo()
        .await
        .unwrap()
        .expect("promo banner")
        .accept()
        .await
        .unwrap();
    assert!(menu.promo().await.unwrap().is_none());

    let header = menu.header().await.unwrap();
    assert_eq!(header.cart_count().await.unwrap(), 4);

    let cart = menu.goto_cart().await.unwrap();
    let discounted = cart
        .item_by_name(PROMO_CART_NAME)
        .await
        .unwrap()
        .expect("discounted line");
    assert_eq!(
        discounted.unit_price().await.unwrap(),
        Price::from_cents(PROMO_PRICE_CENTS)
    );
    assert_eq!(
        cart.pay().total_amount().await.unwrap(),
        Price::from_cents(30_00 + PROMO_PRICE_CENTS)
    );
}

#[tokio::test]
async fn test_declining_leaves_cart_untouched() {
    let (_session, menu) = common::open_menu().await;
    add_espressos(&menu, 3).await;

    let menu = menu
        .promo()
        .await
        .unwrap()
        .expect("promo banner")
        .decline()
        .await
        .unwrap();
    assert!(menu.promo().await.unwrap().is_none());

    let header = menu.header().await.unwrap();
    assert_eq!(header.cart_count().await.unwrap(), 3);

    let cart = menu.goto_cart().await.unwrap();
    assert!(cart.item_by_name(PROMO_CART_NAME).await.unwrap().is_none());
}
