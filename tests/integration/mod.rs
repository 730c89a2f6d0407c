//! Integration tests
//!
//! Realtime tests run against the in-process hub and need no external
//! services. Database and scenario tests need PostgreSQL and are
//! `#[ignore]`d by default.

pub mod auth_test;
pub mod database;
pub mod realtime;
pub mod scenarios;
