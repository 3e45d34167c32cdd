//! Shared state for the explainer router.

use std::sync::Arc;

use crate::explain::Explainer;
use crate::reference::ReferenceTables;

/// Shared context for all API routes. Read-only after construction.
#[derive(Clone)]
pub struct ApiContext {
    pub explainer: Arc<Explainer>,
}

impl ApiContext {
    pub fn new(tables: ReferenceTables) -> Self {
        Self {
            explainer: Arc::new(Explainer::new(Arc::new(tables))),
        }
    }
}
