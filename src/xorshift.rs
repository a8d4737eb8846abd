//! Marsaglia xorshift128, the candidate-space explorer for the proof-of-work
//! search.
//!
//! The generator is deliberately not cryptographic: candidates only need to
//! be spread out, not unpredictable, because the SHA challenge does the
//! hard part. One word of real entropy is mixed into the seed so that
//! concurrent miners do not walk the same candidate sequence.

use rand::rngs::OsRng;
use rand::RngCore;

pub(crate) struct Xorshift128 {
    x: u32,
    y: u32,
    z: u32,
    w: u32,
}

impl Xorshift128 {
    pub(crate) fn new(entropy: u32) -> Xorshift128 {
        Xorshift128 {
            x: 123456789,
            y: 362436069,
            z: 521288629,
            w: 88675123 ^ entropy,
        }
    }

    /// Seed from the operating system RNG.
    pub(crate) fn seeded() -> Xorshift128 {
        Xorshift128::new(OsRng.next_u32())
    }

    #[inline]
    pub(crate) fn next_u32(&mut self) -> u32 {
        let t = self.x ^ (self.x << 11);
        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w = (self.w ^ (self.w >> 19)) ^ (t ^ (t >> 8));
        self.w
    }

    /// Fill a key buffer from consecutive output words, least-significant
    /// byte first.
    pub(crate) fn fill_key(&mut self, key: &mut [u8]) {
        debug_assert_eq!(key.len() % 4, 0);
        for chunk in key.chunks_exact_mut(4) {
            chunk.copy_from_slice(&self.next_u32().to_le_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sequence_from_reference_seed() {
        let mut rng = Xorshift128::new(0);
        let words: Vec<u32> = (0..4).map(|_| rng.next_u32()).collect();
        assert_eq!(words, vec![0xdca345ea, 0x1b5116e6, 0x951049aa, 0xd88d00b0]);
    }

    #[test]
    fn fill_key_writes_words_little_endian() {
        let mut rng = Xorshift128::new(0);
        let mut key = [0u8; 32];
        rng.fill_key(&mut key);
        assert_eq!(
            hex::encode(key),
            "ea45a3dce616511baa491095b0008dd85e82c71e4641b28d4314f89a2c0fc02a"
        );
    }

    #[test]
    fn entropy_changes_the_walk() {
        let mut a = Xorshift128::new(1);
        let mut b = Xorshift128::new(2);
        let wa: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let wb: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(wa, wb);
    }
}
