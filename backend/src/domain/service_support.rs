//! Internal helpers shared by the record services.

use crate::domain::ports::RepositoryError;
use crate::domain::{Entity, Error, Field, Reason, ValidationErrors};

/// Translate an adapter failure for `entity` into a domain error.
///
/// Constraint violations raised by the adapter become the same field failures
/// the validators would have produced, so a lost uniqueness race still reads
/// as `not_unique` to the caller.
pub(crate) fn map_repository_error(entity: Entity, error: RepositoryError) -> Error {
    match error {
        RepositoryError::Connection { message } => {
            Error::service_unavailable(format!("{entity} repository unavailable: {message}"))
        }
        RepositoryError::Query { message } => {
            Error::internal(format!("{entity} repository error: {message}"))
        }
        RepositoryError::UniqueViolation { field } => {
            Error::rejected(entity, ValidationErrors::single(field, Reason::NotUnique))
        }
        RepositoryError::ForeignKeyViolation { field } => {
            Error::rejected(entity, ValidationErrors::single(field, Reason::NotFound))
        }
        RepositoryError::DependentRecords {
            entity: parent,
            dependents,
        } => Error::conflict(format!("{parent} still has {dependents} records"))
            .with_details(serde_json::json!({
                "entity": parent,
                "dependents": dependents,
            })),
    }
}

/// True when a non-blank candidate value is held by a record other than
/// `except`.
pub(crate) fn taken_by_other<Id: PartialEq>(holder: Option<Id>, except: Option<Id>) -> bool {
    match (holder, except) {
        (Some(holder), Some(except)) => holder != except,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Value worth looking up, skipping blanks the presence rule already rejects.
pub(crate) fn lookup_key(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

pub(crate) fn not_found(entity: Entity, id: impl std::fmt::Display) -> Error {
    Error::not_found(format!("{entity} {id} not found")).with_details(serde_json::json!({
        "entity": entity,
        "id": id.to_string(),
    }))
}
