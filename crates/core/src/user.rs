//! # User Module
//!
//! User identity and profile. A User owns zero or more bank accounts and
//! is addressed by a unique email - the authenticated principal resolves
//! to a User through that email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Postal address embedded in a user profile.
///
/// Only the first line is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub line2: Option<String>,
    pub line3: Option<String>,
    pub town: Option<String>,
    pub county: Option<String>,
    pub postcode: Option<String>,
}

impl Address {
    /// Address with only the required first line set
    pub fn line1(line1: impl Into<String>) -> Self {
        Self {
            line1: line1.into(),
            ..Self::default()
        }
    }
}

/// A registered user.
///
/// The password is carried only as an opaque hash; hashing and
/// verification live in the business layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Unique, matched case-sensitively.
    pub email: String,
    pub password_hash: String,
    pub phone_number: String,
    pub address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id and timestamps set to now
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        phone_number: impl Into<String>,
        address: Address,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            phone_number: phone_number.into(),
            address,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump the updated timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User {} <{}>", self.id, self.email)
    }
}
