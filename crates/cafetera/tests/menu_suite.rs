//! Menu page coverage: listing, prices, ingredient bars, translations.

mod common;

use cafetera::catalog::{self, MENU};

const PRICES_CSV: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/drink_prices.csv");
const COLORS_CSV: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/data/drink_ingredient_colors.csv"
);

#[tokio::test]
async fn test_menu_lists_all_drinks_in_order() {
    let (_session, menu) = common::open_menu().await;
    let cups = menu.cups().await.unwrap();
    assert_eq!(cups.len(), MENU.len());
    for (cup, drink) in cups.iter().zip(MENU) {
        assert_eq!(cup.name().await.unwrap(), drink.name);
    }
}

#[tokio::test]
async fn test_page_title() {
    let (session, _menu) = common::open_menu().await;
    assert_eq!(session.driver().title().await.unwrap(), "Coffee cart");
}

#[tokio::test]
async fn test_prices_match_expectation_table() {
    let rows = catalog::load_price_rows(PRICES_CSV).unwrap();
    assert_eq!(rows.len(), MENU.len());

    let (_session, menu) = common::open_menu().await;
    for row in rows {
        let cup = menu.cup_by_name(&row.drink_name).await.unwrap();
        assert_eq!(
            cup.price().await.unwrap(),
            row.expected(),
            "price mismatch for {}",
            row.drink_name
        );
    }
}

#[tokio::test]
async fn test_ingredients_listed_top_down_with_heights() {
    let (_session, menu) = common::open_menu().await;
    for drink in MENU {
        let cup = menu.cup_by_name(drink.name).await.unwrap();
        let ingredients = cup.ingredients().await.unwrap();
        assert_eq!(
            ingredients.len(),
            drink.ingredients.len(),
            "layer count for {}",
            drink.name
        );
        for (ingredient, expected) in ingredients.iter().zip(drink.ingredients) {
            assert_eq!(ingredient.name().await.unwrap(), expected.name);
            let height = ingredient.height_percent().await.unwrap();
            assert!(
                (height - expected.height_percent).abs() < f64::EPSILON,
                "{} {} height {height}",
                drink.name,
                expected.name
            );
        }
    }
}

#[tokio::test]
async fn test_ingredient_colors_match_expectation_table() {
    let rows = catalog::load_ingredient_color_rows(COLORS_CSV).unwrap();

    let (_session, menu) = common::open_menu().await;
    for row in rows {
        let cup = menu.cup_by_name(&row.drink_name).await.unwrap();
        let ingredients = cup.ingredients().await.unwrap();
        let mut found = false;
        for ingredient in &ingredients {
            if ingredient.name().await.unwrap() == row.ingredient_name {
                assert_eq!(
                    ingredient.color().await.unwrap(),
                    row.expected_color,
                    "color mismatch for {} / {}",
                    row.drink_name,
                    row.ingredient_name
                );
                found = true;
            }
        }
        assert!(found, "{} has no {}", row.drink_name, row.ingredient_name);
    }
}

#[tokio::test]
async fn test_double_click_translates_drink_name() {
    let (_session, menu) = common::open_menu().await;

    let cup = menu.cup_by_name("Espresso").await.unwrap();
    cup.double_click_name().await.unwrap();

    let cup = menu.cup_by_order(1).await.unwrap();
    assert_eq!(cup.name().await.unwrap(), "特浓咖啡");

    // Second double-click flips back to English.
    cup.double_click_name().await.unwrap();
    let cup = menu.cup_by_order(1).await.unwrap();
    assert_eq!(cup.name().await.unwrap(), "Espresso");
}

#[tokio::test]
async fn test_translation_is_per_drink() {
    let (_session, menu) = common::open_menu().await;

    menu.cup_by_name("Mocha")
        .await
        .unwrap()
        .double_click_name()
        .await
        .unwrap();

    let names: Vec<String> = {
        let mut names = Vec::new();
        for cup in menu.cups().await.unwrap() {
            names.push(cup.name().await.unwrap());
        }
        names
    };
    assert!(names.contains(&"摩卡".to_string()));
    assert!(names.contains(&"Espresso".to_string()));
    assert!(!names.contains(&"Mocha".to_string()));
}

#[tokio::test]
async fn test_add_to_cart_by_position() {
    let (_session, menu) = common::open_menu().await;

    // Fourth cup on the menu is the Mocha.
    menu.add_to_cart_by_order(4).await.unwrap();

    let cart = menu.goto_cart().await.unwrap();
    let items = cart.items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name().await.unwrap(), "Mocha");
}

#[tokio::test]
async fn test_unknown_drink_reports_not_found() {
    let (_session, menu) = common::open_menu().await;
    let err = menu.cup_by_name("Decaf Surprise").await.unwrap_err();
    assert!(err.is_absence(), "unexpected error: {err}");
}
