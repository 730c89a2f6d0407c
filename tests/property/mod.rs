//! Property-based tests

pub mod event_proptest;
pub mod snapshot_proptest;
pub mod supervisor_proptest;
