//! # minnesvakt-core
//!
//! Foundation layer for user-space memory management over a fixed arena.
//! Built with safety, determinism, and maintainability as primary design
//! constraints.
//!
//! ### Expectations (Production):
//! - Zero platform-allocator traffic after arena construction
//! - Every operation bounded by the chunk count, no suspension points
//! - No `unsafe` anywhere in the crate
//!
//! ### Key Submodules:
//! - `alloc`: fixed-arena first-fit allocator with split/coalesce and
//!   leak reporting
//! - `error`: allocation error taxonomy, corruption class included
//!
//! ### Future:
//! - Explicit free-list variant for O(1) backward coalescing

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod alloc;
pub mod error;

pub mod prelude {
    pub use crate::alloc::*;
    pub use crate::error::*;
}

pub use error::AllocError;
