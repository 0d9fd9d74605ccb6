//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL ledger, ownership, score log and catalogue
//!   via Diesel, plus the transactional unit-of-work coordinator
//! - **redis**: catalogue cache and sorted-set leaderboard
//! - **memory**: in-process stand-ins for every port, used when no database
//!   or Redis URL is configured and throughout the tests
//! - **security**: Argon2 credential hashing
//!
//! Adapters are thin translators between domain types and storage
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod redis;
pub mod security;
