//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the trait interfaces that adapters must implement:
//! - Oracle: external text-generation operations
//! - OracleFactory: provider-name based oracle construction
//!
//! These traits define the contracts that allow the domain to be independent
//! of specific infrastructure implementations.

pub mod oracle;

pub use oracle::{Oracle, OracleFactory, OraclePrompt};
