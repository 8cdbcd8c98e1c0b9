//! ## minnesvakt-core::alloc
//! **Fixed-arena first-fit allocator with split/coalesce**
//!
//! ### Expectations (Production):
//! - Zero platform-allocator traffic after arena construction
//! - Every operation bounded by the chunk count
//! - No `unsafe`: chunk handles are word offsets, never raw addresses
//!
//! ### Key Submodules:
//! - `arena/`: the allocator itself: first-fit scan, split, coalesce,
//!   leak reporting at drop
//! - `chunk/`: one-word in-band header codec (63-bit size + free flag)
//! - `stats/`: allocation counters and high-water tracking

pub mod arena;
pub mod chunk;
pub mod stats;

pub use arena::{ArenaAllocator, Block, ChunkView, Chunks, LeakReport};
pub use stats::HeapStats;
