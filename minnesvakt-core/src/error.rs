//! Error types for the allocator core.

use thiserror::Error;

/// Allocation and release error conditions.
///
/// Two of these are ordinary, recoverable outcomes a caller handles locally
/// (`ZeroSizedRequest`, `OutOfMemory`). The other two signal arena corruption
/// and are not locally recoverable; see [`AllocError::is_corruption`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    /// Zero-byte requests are defined to fail deterministically unless the
    /// `zero_size_grants` compatibility switch is enabled.
    #[error("Zero-sized allocation request")]
    ZeroSizedRequest,

    /// No free chunk was large enough for the (aligned) request.
    #[error("Unable to allocate {requested} bytes")]
    OutOfMemory {
        /// Request size after 8-byte rounding.
        requested: usize,
    },

    /// The chunk addressed by the handle is already free.
    #[error("Double free detected")]
    DoubleFree,

    /// The handle does not address a chunk boundary reachable from the arena
    /// base, so it was never issued by this allocator.
    #[error("Inappropriate release of a foreign pointer")]
    ForeignPointer,
}

impl AllocError {
    /// Whether this error signals corrupted arena metadata.
    ///
    /// A double release cannot be told apart from a miscomputed address that
    /// happens to land on a free chunk, so once either is observed the chunk
    /// chain can no longer be trusted. Callers should propagate such errors
    /// to a top-level abort with nonzero status instead of continuing.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::DoubleFree | Self::ForeignPointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corruption_class_covers_release_faults() {
        assert!(AllocError::DoubleFree.is_corruption());
        assert!(AllocError::ForeignPointer.is_corruption());
        assert!(!AllocError::OutOfMemory { requested: 64 }.is_corruption());
        assert!(!AllocError::ZeroSizedRequest.is_corruption());
    }

    #[test]
    fn display_names_the_requested_size() {
        let err = AllocError::OutOfMemory { requested: 4096 };
        assert_eq!(err.to_string(), "Unable to allocate 4096 bytes");
    }
}
