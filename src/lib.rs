//! fec8 - Reed-Solomon erasure coding and hashcash proof-of-work primitives
//!
//! This library bundles the two numeric cores of a peer-to-peer block store:
//!
//! * A systematic Reed-Solomon (k, n) codec over GF(2^8) built from a
//!   Vandermonde-derived encode matrix. Any k of the n shards produced for a
//!   block are enough to reconstruct the original k data shards.
//! * Two hashcash-style proof-of-work cores: a 32-byte SHA-256 core with an
//!   optional difficulty cutoff, and a 64-byte SHA-512 core whose candidate
//!   evaluation runs through a 256 KiB expansion buffer to keep the search
//!   memory-bandwidth-bound.
//!
//! Neither core performs I/O, logging, or framing; callers hand in buffers and
//! get buffers back.
//!
//! # Example
//!
//! ```rust
//! use fec8::Fec;
//!
//! let fec = Fec::new(3, 5).unwrap();
//!
//! let src: Vec<Vec<u8>> = vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8], vec![9, 10, 11, 12]];
//! let src_refs: Vec<&[u8]> = src.iter().map(|s| s.as_slice()).collect();
//!
//! // Materialize the two parity shards (rows 3 and 4 of the encode matrix).
//! let mut parity = vec![vec![0u8; 4]; 2];
//! let mut parity_refs: Vec<&mut [u8]> = parity.iter_mut().map(|s| s.as_mut_slice()).collect();
//! fec.encode(&src_refs, &mut parity_refs, &[3, 4], 4).unwrap();
//!
//! // Shards 1 and 2 are lost; recover them from shard 0 plus the parity.
//! let mut held = vec![src[0].clone(), parity[0].clone(), parity[1].clone()];
//! let mut held_refs: Vec<&mut [u8]> = held.iter_mut().map(|s| s.as_mut_slice()).collect();
//! let mut idx = vec![0u16, 3, 4];
//! fec.decode(&mut held_refs, &mut idx, 4).unwrap();
//!
//! assert_eq!(held[1], vec![5, 6, 7, 8]);
//! assert_eq!(held[2], vec![9, 10, 11, 12]);
//! ```

pub mod bytes;
mod fec;
mod gf;
mod matrix;
mod pow;
mod xorshift;

pub use fec::Fec;
pub use pow::{pow32, pow64};

/// Error type for codec operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Rejected parameters: `k < 1`, `k > n`, `n > 256`, or a shard whose
    /// length does not match the declared shard length.
    InvalidParameters,
    /// The decode matrix is singular; the supplied shard set cannot
    /// reconstruct the original data (e.g. a parity row listed twice).
    Unrecoverable,
    /// The index vector contains a cycle that cannot be resolved, which means
    /// the shard set is corrupt.
    ShuffleConflict,
    /// The cooperative cancel flag was observed mid-operation.
    Cancelled,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidParameters => write!(f, "invalid codec parameters"),
            Error::Unrecoverable => write!(f, "shard set is unrecoverable"),
            Error::ShuffleConflict => write!(f, "conflicting shard indices"),
            Error::Cancelled => write!(f, "operation cancelled"),
        }
    }
}

impl std::error::Error for Error {}
