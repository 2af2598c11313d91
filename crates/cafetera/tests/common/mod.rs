//! Shared setup for the suite binaries: a simulator-backed session plus
//! tracing initialization.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use cafetera::pages::MenuPage;
use cafetera::scope::Session;
use cafetera::sim::SimDriver;
use cafetera::Config;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// A fresh session backed by the in-process simulator.
pub fn sim_session() -> Session {
    init_tracing();
    Session::new(Arc::new(SimDriver::new()), Config::default())
}

/// Session plus an opened menu page, the start state of most flows.
pub async fn open_menu() -> (Session, MenuPage) {
    let session = sim_session();
    let menu = MenuPage::open(&session)
        .await
        .expect("menu page should open");
    (session, menu)
}
