//! Page objects for the three routes of the application.

pub mod cart;
pub mod github;
pub mod menu;

pub use cart::CartPage;
pub use github::GitHubPage;
pub use menu::MenuPage;
