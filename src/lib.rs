//! # Store Monitor Backend
//!
//! Uptime/downtime estimation service for monitored stores.
//!
//! Restaurants and stores are polled periodically for their operational
//! status. This crate turns those sparse observations into per-store
//! uptime/downtime minute estimates over three trailing windows (last hour,
//! last day, last week), restricted to each store's local business hours.
//! Reports are generated asynchronously: a trigger returns a report id
//! immediately and clients poll for completion of the CSV artifact.
//!
//! ## Architecture
//!
//! - [`models`]: domain types and timestamp normalization
//! - [`db`]: repository trait over the three input datasets, in-memory
//!   implementation, and CSV dataset loading
//! - [`services`]: report generation pipeline and the async job tracker
//! - [`http`]: axum-based HTTP server and request handlers
//!
//! ## Estimation model
//!
//! Each surviving poll is counted as one fixed-length observation interval
//! (60 minutes); no interpolation is performed between adjacent polls of
//! differing status. This is a deliberate coarse approximation: uneven poll
//! spacing skews totals proportionally.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod services;
