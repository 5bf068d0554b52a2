//! Client entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the clients table.
#[derive(Debug, Clone, FromRow)]
pub struct ClientEntity {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClientEntity {
    /// Combines the row with its phone numbers into a domain client.
    pub fn into_client(self, phone_numbers: Vec<String>) -> domain::models::Client {
        domain::models::Client {
            id: self.id,
            name: self.name,
            email: self.email,
            phone_numbers,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Database row mapping for the client_phone_numbers table.
#[derive(Debug, Clone, FromRow)]
pub struct ClientPhoneNumberEntity {
    pub client_id: i64,
    pub phone_number: String,
}
