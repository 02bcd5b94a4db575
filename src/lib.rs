//! Read-side backend for governance vote tallies and the points ledger.

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod store;
