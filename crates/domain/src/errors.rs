//! Domain error types.

use thiserror::Error;

/// Errors surfaced by client record operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The operation requires a client that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Supplied data violates a domain constraint.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Underlying database failure, propagated as-is.
    #[error("Store error: {0}")]
    Store(#[source] sqlx::Error),
}

impl From<sqlx::Error> for ClientError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        // unique_violation: the phone number is already taken
                        "23505" => {
                            return ClientError::Validation(
                                "Phone number already belongs to a client".into(),
                            )
                        }
                        // foreign_key_violation: the referenced client is gone
                        "23503" => {
                            return ClientError::NotFound("Referenced client not found".into())
                        }
                        _ => {}
                    }
                }
                ClientError::Store(sqlx::Error::Database(db_err))
            }
            other => ClientError::Store(other),
        }
    }
}

impl From<validator::ValidationError> for ClientError {
    fn from(err: validator::ValidationError) -> Self {
        let message = err
            .message
            .map(|m| m.to_string())
            .unwrap_or_else(|| err.code.to_string());
        ClientError::Validation(message)
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    let message = e
                        .message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{field}: {message}")
                })
            })
            .collect();
        ClientError::Validation(details.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ClientError::NotFound("Client with id=42 does not exist".into());
        assert_eq!(
            err.to_string(),
            "Not found: Client with id=42 does not exist"
        );
    }

    #[test]
    fn test_validation_display() {
        let err = ClientError::Validation("Phone numbers must be unique".into());
        assert_eq!(
            err.to_string(),
            "Validation error: Phone numbers must be unique"
        );
    }

    #[test]
    fn test_plain_sqlx_error_maps_to_store() {
        let err: ClientError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ClientError::Store(_)));
    }

    #[test]
    fn test_validation_error_maps_message() {
        let mut source = validator::ValidationError::new("phone_format");
        source.message = Some("Bad phone".into());
        let err: ClientError = source.into();
        match err {
            ClientError::Validation(message) => assert_eq!(message, "Bad phone"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_error_falls_back_to_code() {
        let source = validator::ValidationError::new("phone_format");
        let err: ClientError = source.into();
        match err {
            ClientError::Validation(message) => assert_eq!(message, "phone_format"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
