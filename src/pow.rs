//! Hashcash-style proof-of-work token generation.
//!
//! Both cores run the same search: draw candidate keys from xorshift128,
//! hash each one against the fixed value, and keep the candidate whose
//! digest compares highest as an unsigned big-endian number. Verification
//! counts the leading zero bits of the recomputed digest, so the search
//! criterion and the difficulty measure pull in opposite directions; the
//! mismatch is inherited wire behavior and must not be "fixed" (see the
//! ordering tests below). Timeout expiry is not an error: the best key found
//! so far comes back, which on an unlucky seed can have zero difficulty.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::bytes;
use crate::xorshift::Xorshift128;

/// The monotone acceptance rule shared by both cores: a candidate digest
/// replaces the incumbent only when it is strictly larger.
#[inline]
fn improves(candidate: &[u8], incumbent: &[u8]) -> bool {
    bytes::compare(candidate, incumbent) > 0
}

#[inline]
fn timed_out(started: Instant, timeout: i32) -> bool {
    started.elapsed().as_secs() as i64 >= timeout as i64
}

/// 32-byte proof-of-work over SHA-256.
///
/// A key is valid for a 32-byte value when `SHA-256(key || value)` carries
/// enough leading zero bits for the caller's difficulty target.
pub mod pow32 {
    use super::*;
    use sha2::{Digest, Sha256};

    /// Search for a key whose digest reaches `limit` leading zero bits.
    ///
    /// `limit == -1` disables the difficulty cutoff and `timeout == -1`
    /// disables the clock; at least one must be set or the search never
    /// terminates. The difficulty gate is only consulted when a candidate is
    /// accepted as the new best, so a candidate that meets `limit` without
    /// beating the incumbent digest is skipped (inherited behavior).
    pub fn create(value: &[u8; 32], limit: i32, timeout: i32) -> [u8; 32] {
        create_cancellable(value, limit, timeout, &AtomicBool::new(false))
    }

    /// Like [`create`], but also stops (returning the best key so far) once
    /// `cancel` becomes true.
    pub fn create_cancellable(
        value: &[u8; 32],
        limit: i32,
        timeout: i32,
        cancel: &AtomicBool,
    ) -> [u8; 32] {
        let started = Instant::now();
        let mut rng = Xorshift128::seeded();

        let mut key = [0u8; 32];
        rng.fill_key(&mut key);
        let mut best_key = key;
        let mut best_digest = digest(&key, value);

        if limit != -1 && bytes::leading_zero_bits(&best_digest) as i32 >= limit {
            return best_key;
        }

        loop {
            rng.fill_key(&mut key);
            let candidate = digest(&key, value);

            if improves(&candidate, &best_digest) {
                best_key = key;
                best_digest = candidate;

                if limit != -1 && bytes::leading_zero_bits(&best_digest) as i32 >= limit {
                    return best_key;
                }
            }

            if timeout != -1 && timed_out(started, timeout) {
                return best_key;
            }
            if cancel.load(Ordering::Relaxed) {
                return best_key;
            }
        }
    }

    /// Leading-zero-bit count of `SHA-256(key || value)`.
    pub fn verify(key: &[u8; 32], value: &[u8; 32]) -> u32 {
        bytes::leading_zero_bits(&digest(key, value))
    }

    fn digest(key: &[u8; 32], value: &[u8; 32]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(key);
        hasher.update(value);
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        out
    }
}

/// 64-byte proof-of-work over SHA-512 with a memory-hard expansion.
///
/// Each candidate is scored by filling a 256 KiB buffer through a chained
/// mask-generation pass and hashing the whole buffer. Scoring a candidate
/// therefore costs 4096 SHA-512 compressions plus a 256 KiB write and read,
/// which keeps the search bound by memory bandwidth rather than raw hash
/// throughput.
pub mod pow64 {
    use super::*;
    use sha2::{Digest, Sha512};

    const BUFFER_LEN: usize = 256 * 1024;
    const DIGEST_LEN: usize = 64;

    /// Search until the time budget runs out and return the best key found.
    ///
    /// The budget is a floor: the candidate in flight always finishes before
    /// the clock is consulted, and a non-positive budget therefore still
    /// evaluates a couple of candidates.
    pub fn create(value: &[u8], timeout: i32) -> [u8; 64] {
        create_cancellable(value, timeout, &AtomicBool::new(false))
    }

    /// Like [`create`], but also stops early once `cancel` becomes true.
    pub fn create_cancellable(value: &[u8], timeout: i32, cancel: &AtomicBool) -> [u8; 64] {
        let started = Instant::now();
        let mut rng = Xorshift128::seeded();

        // One scratch expansion buffer for the whole search.
        let mut buffer = vec![0u8; BUFFER_LEN];

        let mut key = [0u8; 64];
        rng.fill_key(&mut key);
        let mut best_key = key;
        let mut best_digest = expand_digest(&key, value, &mut buffer);

        loop {
            rng.fill_key(&mut key);
            let candidate = expand_digest(&key, value, &mut buffer);

            if improves(&candidate, &best_digest) {
                best_key = key;
                best_digest = candidate;
            }

            if timed_out(started, timeout) {
                return best_key;
            }
            if cancel.load(Ordering::Relaxed) {
                return best_key;
            }
        }
    }

    /// Recompute the expansion for `key` and count the leading zero bits of
    /// its digest.
    pub fn verify(key: &[u8; 64], value: &[u8]) -> u32 {
        let mut buffer = vec![0u8; BUFFER_LEN];
        bytes::leading_zero_bits(&expand_digest(key, value, &mut buffer))
    }

    /// Fill the expansion buffer back-to-front with the running XOR chain
    /// `accum ^= SHA-512(key || value || accum)` and digest the result.
    fn expand_digest(key: &[u8; 64], value: &[u8], buffer: &mut [u8]) -> [u8; 64] {
        let mut accum = [0u8; DIGEST_LEN];

        for slot in buffer.chunks_exact_mut(DIGEST_LEN).rev() {
            let mut hasher = Sha512::new();
            hasher.update(key);
            hasher.update(value);
            hasher.update(accum);
            bytes::xor_assign(&mut accum, &hasher.finalize());
            slot.copy_from_slice(&accum);
        }

        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&Sha512::digest(&buffer[..]));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_array<const N: usize>(s: &str) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&hex::decode(s).unwrap());
        out
    }

    #[test]
    fn larger_digest_wins_even_with_fewer_zero_bits() {
        // A digest of all ones has zero difficulty but dominates the search
        // ordering; a near-zero digest with 255 leading zero bits loses.
        // This is the inherited behavior: the search maximizes the digest
        // while the verifier counts zeros.
        let mut sparse = [0u8; 32];
        sparse[31] = 1;
        let dense = [0xffu8; 32];

        assert!(improves(&dense, &sparse));
        assert!(!improves(&sparse, &dense));
        // Strict: a tie is not an improvement.
        assert!(!improves(&dense, &dense));
    }

    #[test]
    fn verify_short_known_keys() {
        let value = [0x01u8; 32];
        let cases = [
            (
                "e8637a65315e17953424e0081ed288ed64895b5be8b29274caf95a7d5dcce9d6",
                22,
            ),
            (
                "dd9582a578328dafd1b65e0c5a375cfd5179c14c439c198aef5b08733354f26f",
                26,
            ),
            (
                "ce2025a78ee303fc1cada1e609ca144c15b0b9c25f24452126a467cae17bc920",
                34,
            ),
        ];
        for (key_hex, bits) in cases {
            let key: [u8; 32] = hex_array(key_hex);
            assert_eq!(pow32::verify(&key, &value), bits, "key {key_hex}");
        }
    }

    #[test]
    fn verify_short_differs_per_value() {
        let key: [u8; 32] =
            hex_array("e8637a65315e17953424e0081ed288ed64895b5be8b29274caf95a7d5dcce9d6");
        let value = [0x02u8; 32];
        // Same key against another value is an unrelated digest; the odds of
        // it also reaching 22 bits are astronomically small.
        assert_ne!(pow32::verify(&key, &value), 22);
    }

    #[test]
    fn create_short_returns_immediately_at_zero_limit() {
        let value = [0x01u8; 32];
        let key = pow32::create(&value, 0, -1);
        // A zero limit accepts the very first candidate, whatever its
        // difficulty.
        let _ = pow32::verify(&key, &value);
    }

    #[test]
    fn create_short_meets_limit_when_it_returns_early() {
        let value = [0x07u8; 32];
        let started = Instant::now();
        let key = pow32::create(&value, 1, 2);
        if started.elapsed().as_secs() < 2 {
            assert!(pow32::verify(&key, &value) >= 1);
        }
    }

    #[test]
    fn create_short_cancels() {
        let value = [0x03u8; 32];
        let cancel = AtomicBool::new(true);
        // Pre-set flag: the search gives up after one loop pass.
        let key = pow32::create_cancellable(&value, -1, -1, &cancel);
        let _ = pow32::verify(&key, &value);
    }

    #[test]
    fn verify_long_known_keys() {
        let value = [0x01u8; 64];
        let key: [u8; 64] = hex_array(
            "882ba9e83704b21280978d2523788ae731fade4661ddcfc4ef63b78d1a594839\
             7023f688dac368326376f6046e7f0d7f5c3ed9464e53db32187e2985dc97cb91",
        );
        assert_eq!(pow64::verify(&key, &value), 2);

        let key: [u8; 64] = hex_array(
            "e0ee19d617ee6ea9ea592afbdf71bafba6eecde2beba0d3cdc51419522fe5dbd\
             f18f6830081be1615969b1fe43344fac3c312cd86a487cb1bd04f2c44cddca11",
        );
        assert_eq!(pow64::verify(&key, &value), 4);
    }

    #[test]
    fn long_core_accepts_any_value_length() {
        let key = [0u8; 64];
        // Different value lengths feed different block layouts; all of them
        // must digest without tripping any internal size assumption.
        for len in [0usize, 1, 31, 64, 128, 200] {
            let value = vec![0x55u8; len];
            let _ = pow64::verify(&key, &value);
        }
    }

    #[test]
    fn create_long_respects_zero_budget() {
        let value = [0x01u8; 16];
        let started = Instant::now();
        let key = pow64::create(&value, 0);
        // Two candidates at most: the initial one plus the one in flight
        // when the clock is first consulted.
        assert!(started.elapsed().as_secs() < 30);
        let _ = pow64::verify(&key, &value);
    }

    #[test]
    fn create_long_cancels() {
        let value = [0x09u8; 8];
        let cancel = AtomicBool::new(true);
        let key = pow64::create_cancellable(&value, 3600, &cancel);
        let _ = pow64::verify(&key, &value);
    }
}
