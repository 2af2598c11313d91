//! UI components of the coffee-cart application.
//!
//! A component is a [`crate::scope::ElementScope`] rooted at one element:
//! the header bar, a cup on the menu, a cart line, the pay button with its
//! hover preview, the promo banner, and the two dialogs. Components hold no
//! cached element state beyond their root; reads resolve on every call, and
//! after a mutation the caller re-queries the collection it came from.

pub mod cart_item;
pub mod cup;
pub mod header;
pub mod ingredient;
pub mod modal;
pub mod pay;
pub mod promo;

pub use cart_item::CartItem;
pub use cup::Cup;
pub use header::Header;
pub use ingredient::Ingredient;
pub use modal::{AddCupModal, ModalButton, PaymentDetailsModal};
pub use pay::{Pay, PayPreview, PayPreviewItem};
pub use promo::{PromoBanner, PromoCup};
