use thiserror::Error;
use validator::ValidationErrors;

use health_keeper_data::repository::RepositoryError;

use super::export::ExportError;

/// Errors surfaced by the domain services
///
/// None of these end the session: the caller reports them and the user may
/// retry by submitting again.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input rejected before anything reached the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// Insert, query or delete failed at the store
    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),

    /// Spreadsheet could not be produced
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(describe_validation_errors(&errors))
    }
}

/// Flatten validator output into one message, fields in name order
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors
                .iter()
                .map(|err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid {}", field),
                })
                .collect();
            format!("{}: {}", field, messages.join(", "))
        })
        .collect::<Vec<String>>()
        .join("; ")
}
