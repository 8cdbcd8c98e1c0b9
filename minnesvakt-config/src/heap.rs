//! Heap arena configuration parameters.
//!
//! Everything here is fixed at construction time: the allocator never
//! resizes its arena, so a bad value caught here never reaches a live heap.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation;

/// Arena sizing and compatibility switches for the allocator.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct HeapConfig {
    /// Total arena capacity in bytes, chunk headers included. Must be a
    /// multiple of 8 and hold at least one minimum chunk (16 bytes).
    #[serde(default = "default_capacity")]
    #[validate(range(min = 16, max = 1048576))]
    #[validate(custom(function = validation::validate_multiple_of_eight))]
    pub capacity_bytes: usize,

    /// Serve zero-byte requests with a unique minimum-sized block instead of
    /// failing them. Off by default; the deterministic always-fails behavior
    /// is the primary contract.
    #[serde(default)]
    pub zero_size_grants: bool,
}

fn default_capacity() -> usize {
    4096
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self {
            capacity_bytes: default_capacity(),
            zero_size_grants: false,
        }
    }
}
