//! GF(2^8) arithmetic: table construction and the `mul_add` kernels.
//!
//! The field is defined by the primitive polynomial
//! `x^8 + x^4 + x^3 + x^2 + 1` (0x11d), the classic choice for byte-wide
//! Reed-Solomon codes. Everything the codec needs is precomputed at
//! construction: log/exp tables, the inverse table, the full 256x256
//! multiplication table, and the nibble-split tables the `pshufb`/`tbl`
//! kernels shuffle against.
//!
//! The hot loop is `dst[i] ^= mul[c][src[i]]` with `c` held constant across a
//! whole shard, which is why a plain table row plus XOR beats any on-the-fly
//! field multiply. All kernel variants produce byte-identical output; the
//! fastest one available is picked once per codec instance.

use crate::bytes;

const GF_BITS: usize = 8;
pub(crate) const GF_SIZE: usize = (1 << GF_BITS) - 1;

/// x^8 + x^4 + x^3 + x^2 + 1, least-significant coefficient first.
const PRIM_POLY: u16 = 0x11d;

/// Precomputed field tables. Built once per codec instance and read-only
/// afterwards.
pub(crate) struct GfTables {
    /// `exp[i] = alpha^i`, duplicated so `exp[i + 255] = exp[i]` and sums of
    /// two logs never need a modulo.
    exp: [u8; 2 * GF_SIZE],
    /// `log[exp[i]] = i`; `log[0]` holds the sentinel 255.
    log: [u8; 256],
    /// `inverse[x] = x^254`; `inverse[0]` is a sentinel 0 that no valid
    /// caller reads.
    inverse: [u8; 256],
    /// Full multiplication table, `mul[x][y] = x * y`. Row and column 0 are
    /// all zero.
    mul: Vec<[u8; 256]>,
    /// `nib_lo[c][x] = c * x` and `nib_hi[c][x] = c * (x << 4)` for
    /// `x < 16`, so a byte product splits into two 16-entry shuffles.
    nib_lo: Vec<[u8; 16]>,
    nib_hi: Vec<[u8; 16]>,
}

/// Fold `x` back into [0, 255). Index form arithmetic only ever produces
/// sums of a few logs, so the loop runs at most twice.
#[inline]
pub(crate) fn modnn(mut x: usize) -> usize {
    while x >= GF_SIZE {
        x -= GF_SIZE;
        x = (x >> GF_BITS) + (x & GF_SIZE);
    }
    x
}

impl GfTables {
    pub(crate) fn new() -> GfTables {
        let mut exp = [0u8; 2 * GF_SIZE];
        let mut log = [0u8; 256];
        let mut inverse = [0u8; 256];

        // The first GF_BITS powers of alpha are plain bit shifts; the
        // polynomial's low coefficients assemble alpha^8 on the way.
        let mut mask: u8 = 1;
        exp[GF_BITS] = 0;
        for i in 0..GF_BITS {
            exp[i] = mask;
            log[mask as usize] = i as u8;
            if (PRIM_POLY >> i) & 1 == 1 {
                exp[GF_BITS] ^= mask;
            }
            mask <<= 1;
        }
        log[exp[GF_BITS] as usize] = GF_BITS as u8;

        // alpha^(i+1) is alpha^i shifted left, reduced by alpha^8 whenever
        // the shift carries out of the byte.
        let high_bit: u8 = 1 << (GF_BITS - 1);
        for i in GF_BITS + 1..GF_SIZE {
            exp[i] = if exp[i - 1] >= high_bit {
                exp[GF_BITS] ^ ((exp[i - 1] ^ high_bit) << 1)
            } else {
                exp[i - 1] << 1
            };
            log[exp[i] as usize] = i as u8;
        }

        // log(0) is undefined; park the sentinel.
        log[0] = GF_SIZE as u8;

        for i in 0..GF_SIZE {
            exp[i + GF_SIZE] = exp[i];
        }

        // 0 has no inverse; the sentinel 0 is never read by valid callers.
        inverse[0] = 0;
        inverse[1] = 1;
        for i in 2..256 {
            inverse[i] = exp[GF_SIZE - log[i] as usize];
        }

        let mut mul = vec![[0u8; 256]; 256];
        for x in 1..256 {
            for y in 1..256 {
                mul[x][y] = exp[modnn(log[x] as usize + log[y] as usize)];
            }
        }

        let mut nib_lo = vec![[0u8; 16]; 256];
        let mut nib_hi = vec![[0u8; 16]; 256];
        for c in 0..256 {
            for x in 0..16 {
                nib_lo[c][x] = mul[c][x];
                nib_hi[c][x] = mul[c][x << 4];
            }
        }

        GfTables {
            exp,
            log,
            inverse,
            mul,
            nib_lo,
            nib_hi,
        }
    }

    #[inline(always)]
    pub(crate) fn mul(&self, x: u8, y: u8) -> u8 {
        self.mul[x as usize][y as usize]
    }

    /// Multiplicative inverse of a non-zero element.
    #[inline(always)]
    pub(crate) fn inv(&self, x: u8) -> u8 {
        self.inverse[x as usize]
    }

    /// `alpha^e` for an arbitrary (unreduced) exponent.
    #[inline(always)]
    pub(crate) fn alpha_pow(&self, e: usize) -> u8 {
        self.exp[modnn(e)]
    }

    #[cfg(test)]
    fn log_of(&self, x: u8) -> u8 {
        self.log[x as usize]
    }
}

// =============================================================================
// mul_add kernels
// =============================================================================

/// `dst[i] ^= c * src[i]` over a whole span. Selected once per codec
/// instance; every variant is byte-identical to the scalar reference.
pub(crate) type MulAddFn = fn(&GfTables, &mut [u8], &[u8], u8);

/// Scalar reference kernel, unrolled by 16 like the classic fec inner loop.
pub(crate) fn mul_add_scalar(tables: &GfTables, dst: &mut [u8], src: &[u8], c: u8) {
    debug_assert_eq!(dst.len(), src.len());

    if c == 0 {
        return;
    }
    if c == 1 {
        bytes::xor_assign(dst, src);
        return;
    }

    let row = &tables.mul[c as usize];
    let len = dst.len();
    let mut i = 0;

    while i + 16 <= len {
        dst[i] ^= row[src[i] as usize];
        dst[i + 1] ^= row[src[i + 1] as usize];
        dst[i + 2] ^= row[src[i + 2] as usize];
        dst[i + 3] ^= row[src[i + 3] as usize];
        dst[i + 4] ^= row[src[i + 4] as usize];
        dst[i + 5] ^= row[src[i + 5] as usize];
        dst[i + 6] ^= row[src[i + 6] as usize];
        dst[i + 7] ^= row[src[i + 7] as usize];
        dst[i + 8] ^= row[src[i + 8] as usize];
        dst[i + 9] ^= row[src[i + 9] as usize];
        dst[i + 10] ^= row[src[i + 10] as usize];
        dst[i + 11] ^= row[src[i + 11] as usize];
        dst[i + 12] ^= row[src[i + 12] as usize];
        dst[i + 13] ^= row[src[i + 13] as usize];
        dst[i + 14] ^= row[src[i + 14] as usize];
        dst[i + 15] ^= row[src[i + 15] as usize];
        i += 16;
    }

    while i < len {
        dst[i] ^= row[src[i] as usize];
        i += 1;
    }
}

/// Pick the fastest kernel the running CPU supports.
#[allow(unreachable_code)]
pub(crate) fn select_mul_add() -> MulAddFn {
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    {
        if is_x86_feature_detected!("avx2") {
            return mul_add_avx2;
        }
        if is_x86_feature_detected!("ssse3") {
            return mul_add_ssse3;
        }
    }

    #[cfg(all(feature = "simd", target_arch = "aarch64"))]
    {
        return mul_add_neon;
    }

    mul_add_scalar
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
fn mul_add_ssse3(tables: &GfTables, dst: &mut [u8], src: &[u8], c: u8) {
    debug_assert_eq!(dst.len(), src.len());

    if c == 0 {
        return;
    }
    if c == 1 {
        bytes::xor_assign(dst, src);
        return;
    }

    // SAFETY: this function pointer is only handed out after the ssse3
    // feature check in `select_mul_add`.
    unsafe { simd_x86::mul_add_ssse3(tables, dst, src, c) }
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
fn mul_add_avx2(tables: &GfTables, dst: &mut [u8], src: &[u8], c: u8) {
    debug_assert_eq!(dst.len(), src.len());

    if c == 0 {
        return;
    }
    if c == 1 {
        bytes::xor_assign(dst, src);
        return;
    }

    // SAFETY: only selected after the avx2 feature check.
    unsafe { simd_x86::mul_add_avx2(tables, dst, src, c) }
}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
fn mul_add_neon(tables: &GfTables, dst: &mut [u8], src: &[u8], c: u8) {
    debug_assert_eq!(dst.len(), src.len());

    if c == 0 {
        return;
    }
    if c == 1 {
        bytes::xor_assign(dst, src);
        return;
    }

    // SAFETY: neon is baseline on aarch64.
    unsafe { simd_neon::mul_add(tables, dst, src, c) }
}

// SIMD kernels split each source byte into nibbles and run both halves
// through 16-entry shuffle tables: product = lo_table[x & 0x0f] ^
// hi_table[x >> 4].
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
mod simd_x86 {
    use super::GfTables;
    use std::arch::x86_64::*;

    /// Multiply 16 bytes by the kernel coefficient using pshufb.
    #[inline(always)]
    unsafe fn mul_16(src: *const u8, table_lo: __m128i, table_hi: __m128i, mask_0f: __m128i) -> __m128i {
        let data = _mm_loadu_si128(src as *const __m128i);
        let lo_nibbles = _mm_and_si128(data, mask_0f);
        let lo_result = _mm_shuffle_epi8(table_lo, lo_nibbles);
        let hi_nibbles = _mm_and_si128(_mm_srli_epi64(data, 4), mask_0f);
        let hi_result = _mm_shuffle_epi8(table_hi, hi_nibbles);
        _mm_xor_si128(lo_result, hi_result)
    }

    /// Multiply 32 bytes by the kernel coefficient using vpshufb.
    #[inline(always)]
    unsafe fn mul_32(src: *const u8, table_lo: __m256i, table_hi: __m256i, mask_0f: __m256i) -> __m256i {
        let data = _mm256_loadu_si256(src as *const __m256i);
        let lo_nibbles = _mm256_and_si256(data, mask_0f);
        let lo_result = _mm256_shuffle_epi8(table_lo, lo_nibbles);
        let hi_nibbles = _mm256_and_si256(_mm256_srli_epi64(data, 4), mask_0f);
        let hi_result = _mm256_shuffle_epi8(table_hi, hi_nibbles);
        _mm256_xor_si256(lo_result, hi_result)
    }

    #[target_feature(enable = "ssse3")]
    pub unsafe fn mul_add_ssse3(tables: &GfTables, dst: &mut [u8], src: &[u8], c: u8) {
        let len = dst.len();
        let table_lo = _mm_loadu_si128(tables.nib_lo[c as usize].as_ptr() as *const __m128i);
        let table_hi = _mm_loadu_si128(tables.nib_hi[c as usize].as_ptr() as *const __m128i);
        let mask_0f = _mm_set1_epi8(0x0f);

        // 64 bytes per round, 4x unrolled.
        let chunks_64 = len / 64;
        for i in 0..chunks_64 {
            let offset = i * 64;
            let p0 = mul_16(src.as_ptr().add(offset), table_lo, table_hi, mask_0f);
            let p1 = mul_16(src.as_ptr().add(offset + 16), table_lo, table_hi, mask_0f);
            let p2 = mul_16(src.as_ptr().add(offset + 32), table_lo, table_hi, mask_0f);
            let p3 = mul_16(src.as_ptr().add(offset + 48), table_lo, table_hi, mask_0f);
            let c0 = _mm_loadu_si128(dst.as_ptr().add(offset) as *const __m128i);
            let c1 = _mm_loadu_si128(dst.as_ptr().add(offset + 16) as *const __m128i);
            let c2 = _mm_loadu_si128(dst.as_ptr().add(offset + 32) as *const __m128i);
            let c3 = _mm_loadu_si128(dst.as_ptr().add(offset + 48) as *const __m128i);
            _mm_storeu_si128(dst.as_mut_ptr().add(offset) as *mut __m128i, _mm_xor_si128(c0, p0));
            _mm_storeu_si128(dst.as_mut_ptr().add(offset + 16) as *mut __m128i, _mm_xor_si128(c1, p1));
            _mm_storeu_si128(dst.as_mut_ptr().add(offset + 32) as *mut __m128i, _mm_xor_si128(c2, p2));
            _mm_storeu_si128(dst.as_mut_ptr().add(offset + 48) as *mut __m128i, _mm_xor_si128(c3, p3));
        }

        // Remaining 16-byte blocks.
        let remainder_64 = chunks_64 * 64;
        let chunks_16 = (len - remainder_64) / 16;
        for i in 0..chunks_16 {
            let offset = remainder_64 + i * 16;
            let product = mul_16(src.as_ptr().add(offset), table_lo, table_hi, mask_0f);
            let current = _mm_loadu_si128(dst.as_ptr().add(offset) as *const __m128i);
            _mm_storeu_si128(dst.as_mut_ptr().add(offset) as *mut __m128i, _mm_xor_si128(current, product));
        }

        // Scalar tail.
        let row = &tables.mul[c as usize];
        for i in (len / 16) * 16..len {
            dst[i] ^= row[src[i] as usize];
        }
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn mul_add_avx2(tables: &GfTables, dst: &mut [u8], src: &[u8], c: u8) {
        let len = dst.len();
        let table_lo_128 = _mm_loadu_si128(tables.nib_lo[c as usize].as_ptr() as *const __m128i);
        let table_hi_128 = _mm_loadu_si128(tables.nib_hi[c as usize].as_ptr() as *const __m128i);
        let table_lo = _mm256_broadcastsi128_si256(table_lo_128);
        let table_hi = _mm256_broadcastsi128_si256(table_hi_128);
        let mask_0f = _mm256_set1_epi8(0x0f);

        // 128 bytes per round, 4x unrolled.
        let chunks_128 = len / 128;
        for i in 0..chunks_128 {
            let offset = i * 128;
            let p0 = mul_32(src.as_ptr().add(offset), table_lo, table_hi, mask_0f);
            let p1 = mul_32(src.as_ptr().add(offset + 32), table_lo, table_hi, mask_0f);
            let p2 = mul_32(src.as_ptr().add(offset + 64), table_lo, table_hi, mask_0f);
            let p3 = mul_32(src.as_ptr().add(offset + 96), table_lo, table_hi, mask_0f);
            let c0 = _mm256_loadu_si256(dst.as_ptr().add(offset) as *const __m256i);
            let c1 = _mm256_loadu_si256(dst.as_ptr().add(offset + 32) as *const __m256i);
            let c2 = _mm256_loadu_si256(dst.as_ptr().add(offset + 64) as *const __m256i);
            let c3 = _mm256_loadu_si256(dst.as_ptr().add(offset + 96) as *const __m256i);
            _mm256_storeu_si256(dst.as_mut_ptr().add(offset) as *mut __m256i, _mm256_xor_si256(c0, p0));
            _mm256_storeu_si256(dst.as_mut_ptr().add(offset + 32) as *mut __m256i, _mm256_xor_si256(c1, p1));
            _mm256_storeu_si256(dst.as_mut_ptr().add(offset + 64) as *mut __m256i, _mm256_xor_si256(c2, p2));
            _mm256_storeu_si256(dst.as_mut_ptr().add(offset + 96) as *mut __m256i, _mm256_xor_si256(c3, p3));
        }

        // Remaining 32-byte blocks.
        let remainder_128 = chunks_128 * 128;
        let chunks_32 = (len - remainder_128) / 32;
        for i in 0..chunks_32 {
            let offset = remainder_128 + i * 32;
            let product = mul_32(src.as_ptr().add(offset), table_lo, table_hi, mask_0f);
            let current = _mm256_loadu_si256(dst.as_ptr().add(offset) as *const __m256i);
            _mm256_storeu_si256(dst.as_mut_ptr().add(offset) as *mut __m256i, _mm256_xor_si256(current, product));
        }

        // One 16-byte block if it fits.
        let remainder_32 = remainder_128 + chunks_32 * 32;
        let mask_0f_128 = _mm_set1_epi8(0x0f);
        if len >= remainder_32 + 16 {
            let product = mul_16(src.as_ptr().add(remainder_32), table_lo_128, table_hi_128, mask_0f_128);
            let current = _mm_loadu_si128(dst.as_ptr().add(remainder_32) as *const __m128i);
            _mm_storeu_si128(dst.as_mut_ptr().add(remainder_32) as *mut __m128i, _mm_xor_si128(current, product));
        }

        // Scalar tail.
        let row = &tables.mul[c as usize];
        for i in (len / 16) * 16..len {
            dst[i] ^= row[src[i] as usize];
        }
    }
}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
mod simd_neon {
    use super::GfTables;
    use std::arch::aarch64::*;

    /// Multiply 16 bytes by the kernel coefficient using tbl lookups.
    #[inline(always)]
    unsafe fn mul_16(src: *const u8, table_lo: uint8x16_t, table_hi: uint8x16_t, mask_0f: uint8x16_t) -> uint8x16_t {
        let data = vld1q_u8(src);
        let lo_nibbles = vandq_u8(data, mask_0f);
        let lo_result = vqtbl1q_u8(table_lo, lo_nibbles);
        let hi_nibbles = vandq_u8(vshrq_n_u8(data, 4), mask_0f);
        let hi_result = vqtbl1q_u8(table_hi, hi_nibbles);
        veorq_u8(lo_result, hi_result)
    }

    #[target_feature(enable = "neon")]
    pub unsafe fn mul_add(tables: &GfTables, dst: &mut [u8], src: &[u8], c: u8) {
        let len = dst.len();
        let table_lo = vld1q_u8(tables.nib_lo[c as usize].as_ptr());
        let table_hi = vld1q_u8(tables.nib_hi[c as usize].as_ptr());
        let mask_0f = vdupq_n_u8(0x0f);

        // 64 bytes per round, 4x unrolled.
        let chunks_64 = len / 64;
        for i in 0..chunks_64 {
            let offset = i * 64;
            let p0 = mul_16(src.as_ptr().add(offset), table_lo, table_hi, mask_0f);
            let p1 = mul_16(src.as_ptr().add(offset + 16), table_lo, table_hi, mask_0f);
            let p2 = mul_16(src.as_ptr().add(offset + 32), table_lo, table_hi, mask_0f);
            let p3 = mul_16(src.as_ptr().add(offset + 48), table_lo, table_hi, mask_0f);
            let c0 = vld1q_u8(dst.as_ptr().add(offset));
            let c1 = vld1q_u8(dst.as_ptr().add(offset + 16));
            let c2 = vld1q_u8(dst.as_ptr().add(offset + 32));
            let c3 = vld1q_u8(dst.as_ptr().add(offset + 48));
            vst1q_u8(dst.as_mut_ptr().add(offset), veorq_u8(c0, p0));
            vst1q_u8(dst.as_mut_ptr().add(offset + 16), veorq_u8(c1, p1));
            vst1q_u8(dst.as_mut_ptr().add(offset + 32), veorq_u8(c2, p2));
            vst1q_u8(dst.as_mut_ptr().add(offset + 48), veorq_u8(c3, p3));
        }

        // Remaining 16-byte blocks.
        let remainder_64 = chunks_64 * 64;
        let chunks_16 = (len - remainder_64) / 16;
        for i in 0..chunks_16 {
            let offset = remainder_64 + i * 16;
            let product = mul_16(src.as_ptr().add(offset), table_lo, table_hi, mask_0f);
            let current = vld1q_u8(dst.as_ptr().add(offset));
            vst1q_u8(dst.as_mut_ptr().add(offset), veorq_u8(current, product));
        }

        // Scalar tail.
        let row = &tables.mul[c as usize];
        for i in (len / 16) * 16..len {
            dst[i] ^= row[src[i] as usize];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf256::gf::gf;

    // Independent implementation of the same field, used to cross-check the
    // hand-built tables.
    #[gf(polynomial = 0x11d, generator = 0x2)]
    type RefGf;

    fn fill_pattern(buf: &mut [u8], mut state: u32) {
        for b in buf.iter_mut() {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            *b = (state >> 24) as u8;
        }
    }

    #[test]
    fn exp_table_walks_the_polynomial() {
        let t = GfTables::new();
        assert_eq!(&t.exp[..10], &[1, 2, 4, 8, 16, 32, 64, 128, 29, 58]);
        // alpha is primitive: the powers cycle with period 255.
        assert_eq!(t.exp[254], 142);
        assert_eq!(t.exp[255], t.exp[0]);
        assert_eq!(t.exp[509], t.exp[254]);
    }

    #[test]
    fn log_table_inverts_exp() {
        let t = GfTables::new();
        for i in 0..GF_SIZE {
            assert_eq!(t.log_of(t.exp[i]) as usize, i);
        }
        assert_eq!(t.log_of(0), 255);
        assert_eq!(t.log_of(2), 1);
        assert_eq!(t.log_of(29), 8);
    }

    #[test]
    fn inverse_table_properties() {
        let t = GfTables::new();
        assert_eq!(t.inv(0), 0);
        assert_eq!(t.inv(1), 1);
        assert_eq!(t.inv(2), 142);
        assert_eq!(t.inv(3), 244);
        for x in 1..=255u8 {
            assert_eq!(t.mul(x, t.inv(x)), 1, "x = {x}");
            assert_eq!(t.inv(t.inv(x)), x, "x = {x}");
        }
    }

    #[test]
    fn mul_table_properties() {
        let t = GfTables::new();
        assert_eq!(t.mul(2, 2), 4);
        assert_eq!(t.mul(3, 7), 9);
        assert_eq!(t.mul(0x80, 2), 29);
        for x in 0..=255u8 {
            assert_eq!(t.mul(0, x), 0);
            assert_eq!(t.mul(x, 0), 0);
            assert_eq!(t.mul(1, x), x);
            for y in 0..=255u8 {
                assert_eq!(t.mul(x, y), t.mul(y, x));
            }
        }
    }

    #[test]
    fn tables_match_reference_field() {
        let t = GfTables::new();
        for x in 0..=255u8 {
            for y in 0..=255u8 {
                assert_eq!(t.mul(x, y), (RefGf(x) * RefGf(y)).0);
            }
            if x != 0 {
                assert_eq!(t.inv(x), (RefGf(1) / RefGf(x)).0);
            }
        }
    }

    #[test]
    fn nibble_tables_recombine() {
        let t = GfTables::new();
        for c in 0..=255usize {
            for x in 0..=255usize {
                let split = t.nib_lo[c][x & 0x0f] ^ t.nib_hi[c][x >> 4];
                assert_eq!(split, t.mul[c][x]);
            }
        }
    }

    #[test]
    fn mul_add_known_vector() {
        let t = GfTables::new();
        let src: Vec<u8> = (1..=16).collect();
        let mut dst = vec![0u8; 16];
        mul_add_scalar(&t, &mut dst, &src, 3);
        assert_eq!(
            dst,
            vec![3, 6, 5, 12, 15, 10, 9, 24, 27, 30, 29, 20, 23, 18, 17, 48]
        );
    }

    #[test]
    fn mul_add_zero_and_one_coefficients() {
        let t = GfTables::new();
        let src = [0xabu8; 40];
        let mut dst = [0x5cu8; 40];

        mul_add_scalar(&t, &mut dst, &src, 0);
        assert_eq!(dst, [0x5cu8; 40]);

        mul_add_scalar(&t, &mut dst, &src, 1);
        assert_eq!(dst, [0x5c ^ 0xab; 40]);
    }

    #[test]
    fn selected_kernel_matches_scalar() {
        let t = GfTables::new();
        let kernel = select_mul_add();

        // Lengths chosen to hit the wide blocks, the 16-byte blocks, and the
        // scalar tails of every variant.
        for &len in &[0usize, 1, 15, 16, 17, 63, 64, 100, 128, 255, 1000] {
            for &c in &[0u8, 1, 2, 3, 0x53, 0xff] {
                let mut src = vec![0u8; len];
                fill_pattern(&mut src, 0x1234_5678 ^ len as u32);
                let mut base = vec![0u8; len];
                fill_pattern(&mut base, 0x9abc_def0 ^ c as u32);

                let mut expect = base.clone();
                mul_add_scalar(&t, &mut expect, &src, c);

                let mut got = base.clone();
                kernel(&t, &mut got, &src, c);

                assert_eq!(expect, got, "len = {len}, c = {c}");
            }
        }
    }
}
