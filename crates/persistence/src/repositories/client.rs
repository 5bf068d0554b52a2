//! Client repository: schema lifecycle and record operations.

use std::collections::HashMap;

use sqlx::PgPool;
use validator::Validate;

use domain::errors::ClientError;
use domain::models::{Client, ClientSearchValues, ContactValues};
use shared::validation::validate_phone_number;

use crate::entities::{ClientEntity, ClientPhoneNumberEntity};
use crate::metrics::QueryTimer;

/// Manages client records across the clients and client_phone_numbers
/// tables.
///
/// Every public method is one transactional round trip; multi-statement
/// operations never leave partial state behind.
#[derive(Clone)]
pub struct ClientManager {
    pool: PgPool,
}

impl ClientManager {
    /// Creates a new ClientManager with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // =========================================================================
    // Schema lifecycle
    // =========================================================================

    /// Drops and recreates both client tables.
    ///
    /// Destructive: all existing client data is lost. The end state is
    /// always two empty tables.
    pub async fn setup(&self) -> Result<(), ClientError> {
        self.drop_tables().await?;
        self.ensure_tables().await
    }

    /// Creates both client tables when they do not exist yet; existing
    /// data is left untouched.
    pub async fn ensure_tables(&self) -> Result<(), ClientError> {
        let timer = QueryTimer::new("ensure_tables");
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS clients (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(200) NOT NULL,
                email VARCHAR(200),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // Phone numbers live in a child table so they can be searched and
        // added/removed independently of the client row. The UNIQUE
        // constraint keeps a number owned by exactly one client at a time.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS client_phone_numbers (
                client_id BIGINT NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
                phone_number VARCHAR(20) NOT NULL UNIQUE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(())
    }

    /// Drops both client tables when present; a no-op otherwise.
    pub async fn drop_tables(&self) -> Result<(), ClientError> {
        let timer = QueryTimer::new("drop_tables");
        sqlx::query("DROP TABLE IF EXISTS client_phone_numbers")
            .execute(&self.pool)
            .await?;
        sqlx::query("DROP TABLE IF EXISTS clients")
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(())
    }

    // =========================================================================
    // Record operations
    // =========================================================================

    /// Creates a client together with its phone numbers in one
    /// transaction and returns it with its assigned id.
    ///
    /// A phone number already owned by another client fails with a
    /// validation error.
    pub async fn add_client(&self, values: &ContactValues) -> Result<Client, ClientError> {
        values.validate()?;

        let timer = QueryTimer::new("add_client");
        let mut tx = self.pool.begin().await?;

        let entity = sqlx::query_as::<_, ClientEntity>(
            r#"
            INSERT INTO clients (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at, updated_at
            "#,
        )
        .bind(&values.name)
        .bind(values.email.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        for phone_number in &values.phone_numbers {
            sqlx::query(
                "INSERT INTO client_phone_numbers (client_id, phone_number) VALUES ($1, $2)",
            )
            .bind(entity.id)
            .bind(phone_number)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();

        tracing::debug!(client_id = entity.id, "client created");

        // Reload so the phone ordering matches what later loads return.
        self.load_client(entity.id).await?.ok_or_else(|| {
            ClientError::NotFound(format!("Client with id={} does not exist", entity.id))
        })
    }

    /// Loads a client by id, or `None` when absent.
    pub async fn load_client(&self, client_id: i64) -> Result<Option<Client>, ClientError> {
        let timer = QueryTimer::new("load_client");
        let entity = sqlx::query_as::<_, ClientEntity>(
            "SELECT id, name, email, created_at, updated_at FROM clients WHERE id = $1",
        )
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(entity) = entity else {
            timer.record();
            return Ok(None);
        };

        let phone_numbers = self.load_phone_numbers(client_id).await?;
        timer.record();
        Ok(Some(entity.into_client(phone_numbers)))
    }

    /// Loads several clients at once.
    ///
    /// Ids that do not exist are simply absent from the result; partial
    /// results are valid, and an empty map means none of the ids exist.
    pub async fn load_clients(
        &self,
        client_ids: &[i64],
    ) -> Result<HashMap<i64, Client>, ClientError> {
        let timer = QueryTimer::new("load_clients");
        let entities = sqlx::query_as::<_, ClientEntity>(
            "SELECT id, name, email, created_at, updated_at FROM clients WHERE id = ANY($1)",
        )
        .bind(client_ids)
        .fetch_all(&self.pool)
        .await?;

        // One phone-number query for the whole batch rather than one per
        // client.
        let phone_rows = sqlx::query_as::<_, ClientPhoneNumberEntity>(
            r#"
            SELECT client_id, phone_number
            FROM client_phone_numbers
            WHERE client_id = ANY($1)
            ORDER BY phone_number
            "#,
        )
        .bind(client_ids)
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        let mut clients: HashMap<i64, Client> = entities
            .into_iter()
            .map(|entity| (entity.id, entity.into_client(Vec::new())))
            .collect();
        for row in phone_rows {
            if let Some(client) = clients.get_mut(&row.client_id) {
                client.phone_numbers.push(row.phone_number);
            }
        }
        Ok(clients)
    }

    /// Persists a modified client: name, email and the whole phone-number
    /// set, replaced in one transaction.
    ///
    /// Returns `None` when the id does not exist.
    pub async fn update_client(&self, client: &Client) -> Result<Option<Client>, ClientError> {
        ContactValues::from(client).validate()?;

        let timer = QueryTimer::new("update_client");
        let mut tx = self.pool.begin().await?;

        let updated_id = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE clients
            SET name = $2, email = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(client.id)
        .bind(&client.name)
        .bind(client.email.as_deref())
        .fetch_optional(&mut *tx)
        .await?;

        if updated_id.is_none() {
            timer.record();
            return Ok(None);
        }

        // Replace the phone set wholesale; the surrounding transaction
        // keeps the intermediate empty state invisible to readers.
        sqlx::query("DELETE FROM client_phone_numbers WHERE client_id = $1")
            .bind(client.id)
            .execute(&mut *tx)
            .await?;
        for phone_number in &client.phone_numbers {
            sqlx::query(
                "INSERT INTO client_phone_numbers (client_id, phone_number) VALUES ($1, $2)",
            )
            .bind(client.id)
            .bind(phone_number)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();

        tracing::debug!(client_id = client.id, "client updated");

        self.load_client(client.id).await
    }

    /// Deletes a client; the cascade removes its phone numbers.
    ///
    /// Idempotent: a missing id is not an error.
    pub async fn delete_client(&self, client_id: i64) -> Result<(), ClientError> {
        let timer = QueryTimer::new("delete_client");
        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(client_id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(())
    }

    /// Searches clients by partial match.
    ///
    /// Name and email match case-insensitive substrings; a phone number
    /// matches as a substring of the stored value, so "79990000001" finds
    /// "+79990000001". Supplied conditions are combined with AND. Returns
    /// `None` when the filter is empty or when nothing matches.
    pub async fn search_clients(
        &self,
        values: &ClientSearchValues,
    ) -> Result<Option<HashMap<i64, Client>>, ClientError> {
        if values.is_empty() {
            return Ok(None);
        }

        let timer = QueryTimer::new("search_clients");
        let client_ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT DISTINCT c.id
            FROM clients c
            LEFT JOIN client_phone_numbers cpn ON cpn.client_id = c.id
            WHERE ($1::TEXT IS NULL OR c.name ILIKE '%' || $1 || '%')
              AND ($2::TEXT IS NULL OR c.email ILIKE '%' || $2 || '%')
              AND ($3::TEXT IS NULL OR cpn.phone_number ILIKE '%' || $3 || '%')
            "#,
        )
        .bind(values.name.as_deref())
        .bind(values.email.as_deref())
        .bind(values.phone_number.as_deref())
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        if client_ids.is_empty() {
            return Ok(None);
        }

        Ok(Some(self.load_clients(&client_ids).await?))
    }

    /// Attaches a phone number to an existing client and returns the
    /// updated client.
    ///
    /// Fails with a validation error when the format is invalid or the
    /// number already belongs to any client, and with not-found when the
    /// client id does not exist.
    pub async fn add_phone_number(
        &self,
        client_id: i64,
        phone_number: &str,
    ) -> Result<Client, ClientError> {
        validate_phone_number(phone_number)?;

        let timer = QueryTimer::new("add_phone_number");
        // The FK violation maps to NotFound and the unique violation to
        // Validation, matching the contract of this operation.
        sqlx::query("INSERT INTO client_phone_numbers (client_id, phone_number) VALUES ($1, $2)")
            .bind(client_id)
            .bind(phone_number)
            .execute(&self.pool)
            .await?;
        timer.record();

        self.load_client(client_id).await?.ok_or_else(|| {
            ClientError::NotFound(format!("Client with id={client_id} does not exist"))
        })
    }

    /// Detaches a phone number from a client; a missing association is a
    /// no-op.
    ///
    /// Returns the updated client, or `None` when the client itself does
    /// not exist.
    pub async fn delete_phone_number(
        &self,
        client_id: i64,
        phone_number: &str,
    ) -> Result<Option<Client>, ClientError> {
        let timer = QueryTimer::new("delete_phone_number");
        sqlx::query(
            "DELETE FROM client_phone_numbers WHERE client_id = $1 AND phone_number = $2",
        )
        .bind(client_id)
        .bind(phone_number)
        .execute(&self.pool)
        .await?;
        timer.record();

        self.load_client(client_id).await
    }

    /// Loads a client's phone numbers in sorted order.
    async fn load_phone_numbers(&self, client_id: i64) -> Result<Vec<String>, ClientError> {
        let numbers = sqlx::query_scalar::<_, String>(
            r#"
            SELECT phone_number
            FROM client_phone_numbers
            WHERE client_id = $1
            ORDER BY phone_number
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(numbers)
    }
}

#[cfg(test)]
mod tests {
    // Note: ClientManager tests require a database connection and live in
    // tests/client_manager.rs
}
