//! Shared error types for the services crate.

use thiserror::Error;

use playground_core::CatalogError;

/// Errors emitted while bootstrapping the playgrounds.
///
/// Session operations themselves never fail; only loading the case data can.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlaygroundsError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
