//! Data access layer for the three input datasets.
//!
//! Follows the repository pattern: [`repository::StoreDataRepository`] is
//! the abstract read-only interface the report pipeline consumes, and
//! [`local::LocalRepository`] is the in-memory implementation seeded from
//! CSV files by [`csv_loader`]. Alternative backends (a SQL store, for
//! instance) plug in behind the same trait.

pub mod csv_loader;
pub mod local;
pub mod repository;

pub use csv_loader::{load_datasets, DatasetCounts};
pub use local::LocalRepository;
pub use repository::{RepositoryError, RepositoryResult, StoreDataRepository};
