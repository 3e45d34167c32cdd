//! HTTP surface for the report explainer.
//!
//! Serves the form page at `/` and JSON endpoints under `/api/`. Handlers
//! hold no state beyond the shared, read-only reference tables.

pub mod endpoints;
pub mod error;
pub mod page;
pub mod router;
pub mod server;
pub mod types;

pub use router::explainer_router;
pub use server::{start_server, ExplainerServer, ServerError, ServerSession};
pub use types::ApiContext;
