//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UserDirectory;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserDirectory>,
}

impl HttpState {
    /// Construct state from the directory port implementation.
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }
}
