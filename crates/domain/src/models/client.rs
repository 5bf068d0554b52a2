//! Client domain model and operation payloads.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::validation::{validate_client_name, validate_phone_numbers};

/// A contact record: a name with an optional email and a set of phone numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    /// Sorted; each number belongs to exactly one client at a time.
    pub phone_numbers: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Client {
    /// Renders as `(id) Name <email> [number, number]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.id, self.name)?;
        if let Some(email) = &self.email {
            write!(f, " <{email}>")?;
        }
        if !self.phone_numbers.is_empty() {
            write!(f, " [{}]", self.phone_numbers.join(", "))?;
        }
        Ok(())
    }
}

/// Payload for creating a client.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactValues {
    #[validate(custom(function = "validate_client_name"))]
    pub name: String,

    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_phone_numbers"))]
    pub phone_numbers: Vec<String>,
}

impl From<&Client> for ContactValues {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            email: client.email.clone(),
            phone_numbers: client.phone_numbers.clone(),
        }
    }
}

/// Partial-match filter for client search.
///
/// Name and email match as case-insensitive substrings; a phone number
/// matches as a substring of the stored value. All supplied fields are
/// combined with AND.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSearchValues {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl ClientSearchValues {
    /// Returns true when no filter field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone_number.is_none()
    }
}
