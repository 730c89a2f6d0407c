//! Principal resolution through the public surface
//!
//! Uses the shared test fixture so the token format stays in lockstep
//! with what production handlers accept.

use axum::http::HeaderMap;
use socialite::backend::auth::resolve_principal;

use crate::common::TestPrincipal;

#[test]
fn fixture_token_resolves_to_its_principal() {
    let principal = TestPrincipal::new();
    let resolved = resolve_principal(&principal.headers()).expect("token must resolve");
    assert_eq!(resolved, principal.user_id);
}

#[test]
fn two_principals_stay_distinct() {
    let a = TestPrincipal::new();
    let b = TestPrincipal::new();
    assert_ne!(a.user_id, b.user_id);
    assert_ne!(a.token, b.token);

    assert_eq!(resolve_principal(&a.headers()).unwrap(), a.user_id);
    assert_eq!(resolve_principal(&b.headers()).unwrap(), b.user_id);
}

#[test]
fn empty_headers_are_rejected() {
    assert!(resolve_principal(&HeaderMap::new()).is_err());
}
