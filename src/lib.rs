//! Model evaluation test server library.
//!
//! Provides the wire contract and API services for launching model
//! evaluation tests against registered datasets and tracking their
//! background jobs, plus the view-model logic for parameter group panels.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
pub mod view;
