//! ## minnesvakt-core::alloc::arena
//! **First-fit allocation over a fixed, word-aligned arena**
//!
//! The arena is a boxed slice of `u64` words, so the backing store is 8-byte
//! aligned by construction and every chunk boundary falls on a word. Chunk
//! handles are word offsets into that slice rather than raw pointers, which
//! keeps the whole allocator in safe Rust: a bad handle is caught by a chain
//! walk, not by undefined behavior.
//!
//! ### Expectations (Production):
//! - Zero platform-allocator traffic after arena construction
//! - First-fit, address-ordered scan; split on allocate, coalesce on release
//! - Leak scan runs exactly once, when the allocator is dropped

use std::fmt;
use std::panic::Location;

use tracing::{error, warn};

use minnesvakt_config::HeapConfig;

use crate::alloc::chunk::{align_up, ChunkHeader, HEADER_BYTES, MIN_PAYLOAD, WORD_BYTES};
use crate::alloc::stats::HeapStats;
use crate::error::AllocError;

/// Arena capacity used by [`ArenaAllocator::default`], matching the
/// configuration default.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Smallest arena that can hold one header plus one minimum payload.
const MIN_CAPACITY: usize = HEADER_BYTES + MIN_PAYLOAD;

/// Opaque handle to an allocated payload. Obtained from
/// [`ArenaAllocator::allocate`] and surrendered to
/// [`ArenaAllocator::release`].
///
/// Handles are `Copy`; a stale copy released twice is the corruption case
/// the allocator diagnoses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    /// Word offset of the payload start. The header sits one word before.
    offset: usize,
}

impl Block {
    /// Byte offset of the payload within the arena. Always a multiple of 8.
    pub fn byte_offset(self) -> usize {
        self.offset * WORD_BYTES
    }
}

/// Read-only projection of one chunk, for introspection and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkView {
    /// Byte offset of the chunk header within the arena.
    pub offset: usize,
    /// Payload capacity in bytes.
    pub size: usize,
    /// Whether the chunk is free.
    pub free: bool,
}

/// Outcome of a leak scan: payload bytes and object count still allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeakReport {
    pub bytes: usize,
    pub objects: usize,
}

/// A first-fit allocator over one fixed-capacity arena.
///
/// The arena is carved into chunks, each a one-word header followed by its
/// payload. Allocation scans in address order and splits oversized free
/// chunks; release validates the handle against the chain and merges free
/// neighbors, so no two adjacent chunks are ever both free. Dropping the
/// allocator emits a leak diagnostic for chunks still in use.
pub struct ArenaAllocator {
    words: Box<[u64]>,
    zero_size_grants: bool,
    stats: HeapStats,
}

impl ArenaAllocator {
    /// Create an allocator over a fresh arena of `capacity_bytes`.
    ///
    /// # Panics
    /// If the capacity is not a multiple of 8 or cannot hold a single
    /// minimum chunk. [`HeapConfig`] validates both up front, so reaching
    /// either panic is a programming error, not a runtime condition.
    pub fn new(capacity_bytes: usize) -> Self {
        assert!(
            capacity_bytes >= MIN_CAPACITY,
            "arena capacity must hold at least one chunk"
        );
        assert_eq!(
            capacity_bytes % WORD_BYTES,
            0,
            "arena capacity must be a multiple of 8"
        );
        let mut words = vec![0u64; capacity_bytes / WORD_BYTES].into_boxed_slice();
        words[0] = ChunkHeader::new(capacity_bytes - HEADER_BYTES, true).encode();
        Self {
            words,
            zero_size_grants: false,
            stats: HeapStats::default(),
        }
    }

    /// Create an allocator from validated configuration.
    pub fn from_config(config: &HeapConfig) -> Self {
        let mut heap = Self::new(config.capacity_bytes);
        heap.zero_size_grants = config.zero_size_grants;
        heap
    }

    /// Total arena capacity in bytes, headers included.
    pub fn capacity(&self) -> usize {
        self.words.len() * WORD_BYTES
    }

    #[inline]
    fn header(&self, offset: usize) -> ChunkHeader {
        ChunkHeader::decode(self.words[offset])
    }

    #[inline]
    fn set_header(&mut self, offset: usize, header: ChunkHeader) {
        self.words[offset] = header.encode();
    }

    /// Allocate `size` bytes, rounded up to the next multiple of 8.
    ///
    /// Zero-byte requests fail with [`AllocError::ZeroSizedRequest`] unless
    /// the `zero_size_grants` compatibility switch is on, in which case they
    /// are served as minimum-sized requests and yield unique blocks.
    ///
    /// Exhaustion is reported on the diagnostic stream with the caller's
    /// file and line, and leaves the arena untouched.
    #[track_caller]
    pub fn allocate(&mut self, size: usize) -> Result<Block, AllocError> {
        let requested = if size == 0 {
            if !self.zero_size_grants {
                self.stats.record_failure();
                return Err(AllocError::ZeroSizedRequest);
            }
            MIN_PAYLOAD
        } else {
            size
        };
        let Some(payload) = align_up(requested) else {
            return self.exhausted(requested);
        };

        let mut offset = 0;
        while offset < self.words.len() {
            let header = self.header(offset);
            if header.free && header.size >= payload {
                let leftover = header.size - payload;
                if leftover >= HEADER_BYTES + MIN_PAYLOAD {
                    self.set_header(offset, ChunkHeader::new(payload, false));
                    let split = offset + 1 + payload / WORD_BYTES;
                    self.set_header(split, ChunkHeader::new(leftover - HEADER_BYTES, true));
                    self.stats.record_split();
                    self.stats.record_allocation(payload);
                } else {
                    // Too little left over to host another chunk: hand the
                    // whole thing out, slack included.
                    self.set_header(offset, ChunkHeader::new(header.size, false));
                    self.stats.record_allocation(header.size);
                }
                return Ok(Block { offset: offset + 1 });
            }
            offset += header.span_words();
        }
        self.exhausted(payload)
    }

    #[track_caller]
    fn exhausted(&mut self, requested: usize) -> Result<Block, AllocError> {
        let site = Location::caller();
        warn!(
            "Unable to allocate {} bytes ({}:{})",
            requested,
            site.file(),
            site.line()
        );
        self.stats.record_failure();
        Err(AllocError::OutOfMemory { requested })
    }

    /// Release a block back to the arena and merge it with free neighbors.
    ///
    /// Releasing `None` is a no-op, never an error. A handle that addresses
    /// an already-free chunk, or no chunk boundary at all, yields a
    /// corruption-class error (see [`AllocError::is_corruption`]); the arena
    /// is left untouched in both cases.
    #[track_caller]
    pub fn release(&mut self, block: impl Into<Option<Block>>) -> Result<(), AllocError> {
        let Some(block) = block.into() else {
            return Ok(());
        };
        let site = Location::caller();

        // No back-pointers are stored, so walk from the base. The walk both
        // validates the handle and hands us the predecessor for coalescing.
        let mut offset = 0;
        let mut previous: Option<usize> = None;
        while offset < self.words.len() {
            let header = self.header(offset);
            if offset + 1 == block.offset {
                if header.free {
                    error!("Double free detected ({}:{})", site.file(), site.line());
                    return Err(AllocError::DoubleFree);
                }

                let mut size = header.size;
                let next = offset + 1 + size / WORD_BYTES;
                if next < self.words.len() {
                    let next_header = self.header(next);
                    if next_header.free {
                        size += HEADER_BYTES + next_header.size;
                        self.stats.record_merge();
                    }
                }
                self.set_header(offset, ChunkHeader::new(size, true));

                if let Some(prev) = previous {
                    let prev_header = self.header(prev);
                    if prev_header.free {
                        self.set_header(
                            prev,
                            ChunkHeader::new(prev_header.size + HEADER_BYTES + size, true),
                        );
                        self.stats.record_merge();
                    }
                }

                self.stats.record_release(header.size);
                return Ok(());
            }
            previous = Some(offset);
            offset += header.span_words();
        }

        error!(
            "Inappropriate release ({}:{})",
            site.file(),
            site.line()
        );
        Err(AllocError::ForeignPointer)
    }

    /// Payload bytes of a live block.
    ///
    /// # Panics
    /// If the handle does not address a currently allocated chunk.
    pub fn payload(&self, block: Block) -> &[u8] {
        let header = self.live_header(block);
        bytemuck::cast_slice(&self.words[block.offset..block.offset + header.size / WORD_BYTES])
    }

    /// Mutable payload bytes of a live block.
    ///
    /// # Panics
    /// If the handle does not address a currently allocated chunk.
    pub fn payload_mut(&mut self, block: Block) -> &mut [u8] {
        let header = self.live_header(block);
        bytemuck::cast_slice_mut(
            &mut self.words[block.offset..block.offset + header.size / WORD_BYTES],
        )
    }

    fn live_header(&self, block: Block) -> ChunkHeader {
        assert!(
            block.offset >= 1 && block.offset < self.words.len(),
            "block offset out of arena bounds"
        );
        let header = self.header(block.offset - 1);
        assert!(!header.free, "block has already been released");
        assert!(
            block.offset + header.size / WORD_BYTES <= self.words.len(),
            "chunk header inconsistent with arena bounds"
        );
        header
    }

    /// Iterate the chunk chain in address order.
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks {
            words: &self.words,
            offset: 0,
        }
    }

    /// Total free payload bytes across the arena.
    pub fn free_bytes(&self) -> usize {
        self.chunks().filter(|c| c.free).map(|c| c.size).sum()
    }

    /// Largest single free payload, i.e. the biggest request that can still
    /// succeed.
    pub fn largest_free(&self) -> usize {
        self.chunks()
            .filter(|c| c.free)
            .map(|c| c.size)
            .max()
            .unwrap_or(0)
    }

    /// Scan for chunks still in use. `None` when nothing is outstanding.
    pub fn leak_report(&self) -> Option<LeakReport> {
        let (bytes, objects) = self
            .chunks()
            .filter(|c| !c.free)
            .fold((0, 0), |(b, n), c| (b + c.size, n + 1));
        (objects > 0).then_some(LeakReport { bytes, objects })
    }

    /// Allocation counters for this arena.
    pub fn stats(&self) -> &HeapStats {
        &self.stats
    }
}

impl Default for ArenaAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Drop for ArenaAllocator {
    fn drop(&mut self) {
        if let Some(report) = self.leak_report() {
            warn!("{} bytes leaked in {} objects.", report.bytes, report.objects);
        }
    }
}

impl fmt::Debug for ArenaAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaAllocator")
            .field("capacity", &self.capacity())
            .field("chunks", &self.chunks().collect::<Vec<_>>())
            .finish()
    }
}

/// Address-ordered iterator over the chunk chain.
pub struct Chunks<'a> {
    words: &'a [u64],
    offset: usize,
}

impl Iterator for Chunks<'_> {
    type Item = ChunkView;

    fn next(&mut self) -> Option<ChunkView> {
        if self.offset >= self.words.len() {
            return None;
        }
        let header = ChunkHeader::decode(self.words[self.offset]);
        let view = ChunkView {
            offset: self.offset * WORD_BYTES,
            size: header.size,
            free: header.free,
        };
        self.offset += header.span_words();
        Some(view)
    }
}
