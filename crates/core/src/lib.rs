#![forbid(unsafe_code)]

pub mod catalog;
pub mod model;

pub use catalog::{Catalog, CatalogError};
pub use model::{Case, CaseId, CaseList, Topic, Verdict};
