//! Add-to-cart confirmation dialog: open, answer, and rendered styling.

mod common;

use cafetera::components::ModalButton;
use cafetera::money::Price;

#[tokio::test]
async fn test_right_click_opens_confirmation_dialog() {
    let (_session, menu) = common::open_menu().await;

    let cup = menu.cup_by_name("Cappuccino").await.unwrap();
    let modal = cup.open_add_cup_modal().await.unwrap();

    assert!(modal.is_open().await.unwrap());
    assert_eq!(
        modal.message().await.unwrap(),
        "Add Cappuccino to the cart?"
    );
    assert_eq!(modal.product_name().await.unwrap(), "Cappuccino");
}

#[tokio::test]
async fn test_confirm_adds_the_drink() {
    let (_session, menu) = common::open_menu().await;

    let cup = menu.cup_by_name("Cappuccino").await.unwrap();
    cup.open_add_cup_modal().await.unwrap().confirm().await.unwrap();

    let header = menu.header().await.unwrap();
    assert_eq!(header.cart_count().await.unwrap(), 1);
    assert_eq!(
        menu.pay().total_amount().await.unwrap(),
        Price::from_dollars(19)
    );
}

#[tokio::test]
async fn test_cancel_leaves_cart_alone() {
    let (session, menu) = common::open_menu().await;

    let cup = menu.cup_by_name("Cappuccino").await.unwrap();
    cup.open_add_cup_modal().await.unwrap().cancel().await.unwrap();

    let header = menu.header().await.unwrap();
    assert_eq!(header.cart_count().await.unwrap(), 0);

    // And the dialog is really gone.
    let err = cafetera::components::AddCupModal::attach(&session)
        .await
        .unwrap_err();
    assert!(err.is_absence(), "unexpected error: {err}");
}

#[tokio::test]
async fn test_dialog_styles() {
    let (_session, menu) = common::open_menu().await;

    let cup = menu.cup_by_name("Espresso").await.unwrap();
    let modal = cup.open_add_cup_modal().await.unwrap();

    let styles = modal.dialog_styles().await.unwrap();
    assert_eq!(styles["position"], "fixed");
    assert_eq!(styles["display"], "block");
    assert_eq!(styles["width"], "420px");
    assert_eq!(styles["height"], "232px");
    assert_eq!(styles["backgroundColor"], "rgb(255, 255, 255)");
    assert_eq!(styles["color"], "rgb(0, 0, 0)");
    assert_eq!(styles["margin"], "auto");
    assert_eq!(styles["padding"], "18px");
    assert_eq!(styles["borderStyle"], "solid");
    assert_eq!(styles["borderColor"], "rgb(0, 0, 0)");
    assert_eq!(styles["borderWidth"], "1.5px");
}

#[tokio::test]
async fn test_both_buttons_share_styling() {
    let (_session, menu) = common::open_menu().await;

    let cup = menu.cup_by_name("Espresso").await.unwrap();
    let modal = cup.open_add_cup_modal().await.unwrap();

    for button in [ModalButton::Yes, ModalButton::No] {
        let styles = modal.button_styles(button).await.unwrap();
        assert_eq!(styles["border"], "1px solid rgb(0, 0, 0)", "{button:?}");
        assert_eq!(styles["backgroundColor"], "rgb(255, 255, 255)", "{button:?}");
        assert_eq!(styles["margin"], "5px", "{button:?}");
    }
}
