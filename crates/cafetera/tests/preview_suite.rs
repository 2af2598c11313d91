//! Hover preview over the total button: contents and in-place edits.

mod common;

use cafetera::money::Price;

#[tokio::test]
async fn test_preview_hidden_before_hover() {
    let (_session, menu) = common::open_menu().await;
    menu.add_to_cart("Espresso").await.unwrap();

    let pay = menu.pay();
    assert!(!pay.preview().exists().await.unwrap());
    assert!(!pay.preview().is_visible().await.unwrap());
    assert!(pay.preview().items().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_hover_reveals_cart_contents() {
    let (_session, menu) = common::open_menu().await;
    menu.add_to_cart("Espresso")
        .await
        .unwrap()
        .add_to_cart("Espresso")
        .await
        .unwrap()
        .add_to_cart("Mocha")
        .await
        .unwrap();

    let pay = menu.pay();
    pay.hover().await.unwrap();

    let preview = pay.preview();
    assert!(preview.is_visible().await.unwrap());
    assert_eq!(preview.total_quantity().await.unwrap(), 3);

    let espresso = preview
        .item_by_name("Espresso")
        .await
        .unwrap()
        .expect("espresso row");
    assert_eq!(espresso.quantity().await.unwrap(), 2);
    assert_eq!(espresso.unit_text().await.unwrap(), "$10.00 x 2");
    assert_eq!(espresso.unit_price().await.unwrap(), Price::from_dollars(10));
}

#[tokio::test]
async fn test_preview_edits_flow_through_to_the_total() {
    let (_session, menu) = common::open_menu().await;
    let pay = menu.pay();
    assert_eq!(pay.total_amount().await.unwrap(), Price::ZERO);

    menu.add_to_cart("Espresso").await.unwrap();
    assert_eq!(pay.total_amount().await.unwrap(), Price::from_dollars(10));

    pay.hover().await.unwrap();
    pay.preview()
        .item_by_name("Espresso")
        .await
        .unwrap()
        .expect("espresso row")
        .increment()
        .await
        .unwrap();
    assert_eq!(pay.total_amount().await.unwrap(), Price::from_dollars(20));

    pay.preview()
        .item_by_name("Espresso")
        .await
        .unwrap()
        .expect("espresso row")
        .decrement()
        .await
        .unwrap();
    assert_eq!(pay.total_amount().await.unwrap(), Price::from_dollars(10));
}

#[tokio::test]
async fn test_decrementing_last_cup_empties_the_preview() {
    let (_session, menu) = common::open_menu().await;
    menu.add_to_cart("Mocha").await.unwrap();

    let pay = menu.pay();
    pay.hover().await.unwrap();
    pay.preview()
        .item_by_name("Mocha")
        .await
        .unwrap()
        .expect("mocha row")
        .decrement()
        .await
        .unwrap();

    assert_eq!(pay.total_amount().await.unwrap(), Price::ZERO);
    assert!(pay.preview().items().await.unwrap().is_empty());

    let header = menu.header().await.unwrap();
    assert_eq!(header.cart_count().await.unwrap(), 0);
}
