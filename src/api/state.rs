use std::sync::Arc;

use crate::services::providers::CatalogProvider;

/// Shared application state
///
/// Holds the catalog provider behind a trait object so tests can swap in a
/// stub without standing up a real upstream.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self { catalog }
    }
}
