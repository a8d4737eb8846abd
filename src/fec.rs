//! The Reed-Solomon (k, n) erasure codec.
//!
//! A `Fec` instance owns its field tables and encode matrix, both read-only
//! after construction, so sharing one instance across threads for `encode`
//! is safe. `decode` rewrites the caller's shard and index arrays in place
//! and must not run concurrently on the same buffers.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::bytes;
use crate::gf::{self, GfTables, MulAddFn};
use crate::matrix;
use crate::Error;

/// Systematic Reed-Solomon codec over GF(2^8).
///
/// `k` data shards are expanded to up to `n` total shards; any `k` of those
/// reconstruct the originals. Shards are raw equal-length byte buffers with
/// no framing; positions `[0, k)` carry data and `[k, n)` carry parity.
pub struct Fec {
    k: usize,
    n: usize,
    tables: GfTables,
    enc_matrix: Vec<u8>,
    mul_add: MulAddFn,
    cancel: AtomicBool,
}

impl Fec {
    /// Build a codec for `k` data shards out of `n` total.
    ///
    /// Requires `1 <= k <= n <= 256`; anything else is
    /// [`Error::InvalidParameters`].
    pub fn new(k: u16, n: u16) -> Result<Fec, Error> {
        if k < 1 || n > 256 || k > n {
            return Err(Error::InvalidParameters);
        }
        let k = k as usize;
        let n = n as usize;

        let tables = GfTables::new();
        let enc_matrix = matrix::create_encode_matrix(&tables, k, n);

        Ok(Fec {
            k,
            n,
            tables,
            enc_matrix,
            mul_add: gf::select_mul_add(),
            cancel: AtomicBool::new(false),
        })
    }

    /// Number of data shards.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Total number of shards.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Raise the cooperative cancel flag. A running `encode`/`decode` on any
    /// thread observes it between output rows and bails with
    /// [`Error::Cancelled`]; the flag stays set until [`Fec::clear_cancel`].
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Re-arm the instance after a cancellation.
    pub fn clear_cancel(&self) {
        self.cancel.store(false, Ordering::Relaxed);
    }

    fn check_cancel(&self) -> Result<(), Error> {
        if self.cancel.load(Ordering::Relaxed) {
            return Err(Error::Cancelled);
        }
        Ok(())
    }

    /// Produce output shards for the encode-matrix rows listed in `idx`.
    ///
    /// `src` must hold all `k` data shards of exactly `shard_len` bytes.
    /// `repair[j]` receives the shard for row `idx[j]`: a plain copy of
    /// `src[idx[j]]` for data rows, a parity codeword for rows in `[k, n)`.
    /// Callers pick which rows to materialize, so a systematic stripe and an
    /// arbitrary repair subset are the same call.
    pub fn encode(
        &self,
        src: &[&[u8]],
        repair: &mut [&mut [u8]],
        idx: &[u16],
        shard_len: usize,
    ) -> Result<(), Error> {
        if src.len() != self.k || repair.len() != idx.len() {
            return Err(Error::InvalidParameters);
        }
        if src.iter().any(|s| s.len() != shard_len) {
            return Err(Error::InvalidParameters);
        }
        if repair.iter().any(|s| s.len() != shard_len) {
            return Err(Error::InvalidParameters);
        }
        if idx.iter().any(|&row| row as usize >= self.n) {
            return Err(Error::InvalidParameters);
        }

        for (out, &row) in repair.iter_mut().zip(idx.iter()) {
            self.check_cancel()?;
            let row = row as usize;
            if row < self.k {
                // Identity row: systematic copy.
                bytes::copy(src[row], out);
            } else {
                out.fill(0);
                let base = row * self.k;
                for col in 0..self.k {
                    (self.mul_add)(&self.tables, out, src[col], self.enc_matrix[base + col]);
                }
            }
        }

        Ok(())
    }

    /// Reconstruct the original data shards from any `k` received shards.
    ///
    /// `idx[i]` names the original row shard `pkts[i]` was produced from;
    /// the values must be distinct and in `[0, n)`. Both arrays are rewritten
    /// in place: on success `pkts[0..k)` holds the data shards in order and
    /// `idx[i] == i`. A shard set that is already in order comes back
    /// byte-for-byte untouched.
    pub fn decode(
        &self,
        pkts: &mut [&mut [u8]],
        idx: &mut [u16],
        shard_len: usize,
    ) -> Result<(), Error> {
        if pkts.len() != self.k || idx.len() != self.k {
            return Err(Error::InvalidParameters);
        }
        if pkts.iter().any(|s| s.len() != shard_len) {
            return Err(Error::InvalidParameters);
        }
        if idx.iter().any(|&row| row as usize >= self.n) {
            return Err(Error::InvalidParameters);
        }

        shuffle(pkts, idx, self.k)?;

        let dec_matrix = matrix::create_decode_matrix(&self.tables, &self.enc_matrix, idx, self.k)
            .map_err(|_| Error::Unrecoverable)?;

        // Every slot still holding parity gets a scratch reconstruction. All
        // of them are computed before any write-back: each one reads the
        // received parity shards that later iterations would otherwise have
        // overwritten.
        let mut recovered: Vec<(usize, Vec<u8>)> = Vec::new();
        for row in 0..self.k {
            if (idx[row] as usize) < self.k {
                continue;
            }
            self.check_cancel()?;

            let mut tmp = vec![0u8; shard_len];
            let base = row * self.k;
            for col in 0..self.k {
                (self.mul_add)(&self.tables, &mut tmp, &pkts[col][..], dec_matrix[base + col]);
            }
            recovered.push((row, tmp));
        }

        for (row, tmp) in recovered {
            bytes::copy(&tmp, &mut pkts[row][..]);
            idx[row] = row as u16;
        }

        Ok(())
    }
}

/// Swap shards in place until every data shard whose row survives sits at
/// its original position. Parity shards end up parked in the slots of the
/// missing rows, ready for reconstruction.
fn shuffle(pkts: &mut [&mut [u8]], idx: &mut [u16], k: usize) -> Result<(), Error> {
    let mut i = 0;
    while i < k {
        let target = idx[i] as usize;
        if target >= k || target == i {
            i += 1;
        } else {
            // The slot this shard belongs in must not already be settled,
            // otherwise two shards claim the same row.
            if idx[target] as usize == target {
                return Err(Error::ShuffleConflict);
            }
            idx.swap(i, target);
            pkts.swap(i, target);
        }
    }
    Ok(())
}
