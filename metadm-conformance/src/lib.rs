#![forbid(unsafe_code)]

//! Conformance vectors for meta-feed direct message key derivation.
//!
//! [`harness`] checks the derivation and agreement invariants over random and fixed
//! inputs; [`vector`] is the JSON artifact consumed by other implementations.

pub mod harness;
pub mod vector;

pub use harness::{Harness, HarnessReport, PropertyResult, FIXED_NONCE, FIXED_SEED};
pub use vector::{TestVector, VECTOR_TYPE};
