//! Canned payment-form users.

use serde::{Deserialize, Serialize};

/// Credentials typed into the payment details form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Value for the name field
    pub name: String,
    /// Value for the email field
    pub email: String,
}

impl User {
    /// Build a user from borrowed parts
    #[must_use]
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    /// A user the form accepts
    #[must_use]
    pub fn valid() -> Self {
        Self::new("test_user", "testemail@gmail.com")
    }

    /// Missing name, valid email
    #[must_use]
    pub fn empty_name() -> Self {
        Self::new("", "testemail@gmail.com")
    }

    /// Valid name, missing email
    #[must_use]
    pub fn empty_email() -> Self {
        Self::new("test_user", "")
    }

    /// Email with no local part
    #[must_use]
    pub fn malformed_email() -> Self {
        Self::new("test_user", "@gmail.com")
    }

    /// All users the form should reject
    #[must_use]
    pub fn invalid_users() -> Vec<Self> {
        vec![Self::empty_name(), Self::empty_email(), Self::malformed_email()]
    }
}
