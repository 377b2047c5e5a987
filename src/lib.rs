//! In-memory family members REST API.
//!
//! A single family holds an ordered list of members. The HTTP layer maps
//! each route directly onto a store operation:
//!
//! ```text
//! GET    /members        list all members
//! GET    /members/{id}   fetch one (404 if absent)
//! POST   /members        create (400 on invalid input)
//! DELETE /members/{id}   remove (404 if absent)
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`family`]: Member types, validation and the family store
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod family;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
