//! Family module: the in-memory member collection.
//!
//! This module handles:
//! - Member types and data structures
//! - Validation of create payloads
//! - The list-backed family store

pub mod store;
pub mod types;
pub mod validation;

pub use store::FamilyStore;
pub use types::{Member, MemberField, NewMember};
pub use validation::parse_new_member;
