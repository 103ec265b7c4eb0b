//! Persistence errors shared by the record repository ports.

use crate::domain::{Entity, Field};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user, post, and comment repository adapters.
    pub enum RepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// A case-insensitive unique index rejected the write.
        UniqueViolation { field: Field } => "unique constraint violated on {field}",
        /// A reference column named a record that does not exist.
        ForeignKeyViolation { field: Field } => "foreign key violated on {field}",
        /// Deleting the record would orphan rows that reference it.
        DependentRecords { entity: Entity, dependents: Entity } =>
            "{entity} still has dependent {dependents} records",
    }
}
