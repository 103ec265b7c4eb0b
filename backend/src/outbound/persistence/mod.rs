//! Persistence adapters for the record repository ports.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use linkboard::domain::DemoDataSeeder;
//! use linkboard::outbound::persistence::InMemoryStore;
//! use mockable::DefaultClock;
//!
//! let store = Arc::new(InMemoryStore::new());
//! let seeder = DemoDataSeeder::new(
//!     Arc::clone(&store),
//!     Arc::clone(&store),
//!     store,
//!     Arc::new(DefaultClock),
//! );
//! # let _ = seeder;
//! ```

mod in_memory_store;

pub use in_memory_store::InMemoryStore;
