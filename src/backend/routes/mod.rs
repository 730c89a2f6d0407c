//! Routes Module
//!
//! Router assembly for the HTTP surface.

/// JSON API route registration
pub mod api_routes;

/// Top-level router construction
pub mod router;

pub use router::create_router;
