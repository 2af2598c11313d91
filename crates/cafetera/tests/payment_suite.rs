//! Checkout coverage: payment details dialog, validation, purchase reset.

mod common;

use cafetera::users::User;

#[tokio::test]
async fn test_total_button_opens_payment_dialog() {
    let (_session, menu) = common::open_menu().await;
    menu.add_to_cart("Espresso").await.unwrap();

    let modal = menu.pay().click_pay().await.unwrap();
    assert!(modal.is_open().await.unwrap());
}

#[tokio::test]
async fn test_valid_purchase_thanks_and_resets() {
    let (_session, menu) = common::open_menu().await;
    menu.add_to_cart("Espresso")
        .await
        .unwrap()
        .add_to_cart("Mocha")
        .await
        .unwrap();

    let modal = menu.pay().click_pay().await.unwrap();
    modal.fill_credentials(&User::valid()).await.unwrap();
    let menu = modal.submit_success().await.unwrap();

    assert!(menu.snackbar_success_visible().await.unwrap());
    let header = menu.header().await.unwrap();
    assert_eq!(header.cart_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_invalid_credentials_keep_dialog_open() {
    for user in User::invalid_users() {
        let (_session, menu) = common::open_menu().await;
        menu.add_to_cart("Espresso").await.unwrap();

        let modal = menu.pay().click_pay().await.unwrap();
        modal.fill_credentials(&user).await.unwrap();
        let modal = modal.submit_failure().await.unwrap();

        assert!(modal.is_open().await.unwrap(), "dialog closed for {user:?}");
        assert!(
            !menu.snackbar_success_visible().await.unwrap(),
            "snackbar shown for {user:?}"
        );

        // The cart is untouched for another attempt.
        let header = menu.header().await.unwrap();
        assert_eq!(header.cart_count().await.unwrap(), 1);
    }
}

#[tokio::test]
async fn test_checkout_also_works_from_cart_page() {
    let (_session, menu) = common::open_menu().await;
    menu.add_to_cart("Cafe Breve").await.unwrap();

    let cart = menu.goto_cart().await.unwrap();
    let modal = cart.pay().click_pay().await.unwrap();
    modal.fill_credentials(&User::valid()).await.unwrap();
    let menu = modal.submit_success().await.unwrap();

    assert!(menu.snackbar_success_visible().await.unwrap());
    let cart = menu.goto_cart().await.unwrap();
    assert!(cart.empty_message_visible().await.unwrap());
}
