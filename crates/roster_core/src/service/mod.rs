//! Use-case facade over the department and employee mappers.
//!
//! # Responsibility
//! - Bundle both mappers over one connection for callers.
//! - Host the cross-entity traversal so the mapper modules never import
//!   each other.

pub mod directory_service;
