//! Outbound adapters implementing domain ports.
//!
//! Adapters are thin translators between domain records and a storage
//! representation. Field rules live in the domain; adapters only enforce the
//! constraints a database would: unique indexes, foreign keys, and
//! restrict-on-delete.

pub mod persistence;
