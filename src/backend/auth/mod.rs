//! Authentication Module
//!
//! JWT session tokens and principal resolution. The backend does not
//! manage user accounts; it only verifies tokens minted by the identity
//! tier and scopes every operation to the resolved principal.

/// JWT token creation and verification
pub mod sessions;

/// Bearer-token to principal-id resolution
pub mod principal;

pub use principal::resolve_principal;
