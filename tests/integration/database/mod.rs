//! Database-backed tests

pub mod migrations_test;
pub mod unread_test;
