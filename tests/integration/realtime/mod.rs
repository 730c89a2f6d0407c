//! Realtime delivery integration tests

pub mod broadcast_test;
