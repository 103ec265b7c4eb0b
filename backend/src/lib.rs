//! Record validation and relationship rules for a link-sharing board.
//!
//! Users post links, other users comment on them. The [`domain`] module holds
//! the three records with their field rules and the services that validate
//! and save them; [`outbound`] provides the in-memory store implementing the
//! repository ports; [`seeding`] wires the demo dataset into a seed run.

pub mod domain;
pub mod outbound;
pub mod seeding;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
