//! Shared test utilities for the obras pipeline.

pub mod faulty_store;
pub mod helpers;

pub use faulty_store::{FaultOp, FaultyStore};
pub use helpers::*;
