//! Shared application state for all routes.

use crate::auth::CredentialVerifier;
use crate::store::Catalog;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
    /// Checked by the `Authorized` extractor on every mutating route.
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn Catalog>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        AppState { catalog, verifier }
    }
}
