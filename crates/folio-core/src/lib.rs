//! # Folio Core
//!
//! The domain layer of the Folio blog client.
//! This crate contains the block renderer, the voting state machine, the
//! persisted UI contexts and the port traits, with zero infrastructure
//! dependencies.

pub mod assistant;
pub mod context;
pub mod domain;
pub mod error;
pub mod ports;
pub mod render;
pub mod search;
pub mod share;

#[cfg(test)]
mod test_support;

pub use error::{ApiError, DomainError};
