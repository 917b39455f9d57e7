//! One step of the four-lane linear congruential recurrence.
//!
//! Each lane evolves as `x' = x * MULTIPLIER[i] + INCREMENT[i] (mod 2^32)`.
//! The multiply only has a 32x32->64 primitive for the even lanes, so the
//! state is split into even and odd halves, each half is multiplied, the
//! products are masked down to 32 bits and the halves are shuffled back
//! together with an OR.

pub(crate) const MULTIPLIER: [u32; 4] = [214013, 17405, 214013, 69069];
pub(crate) const INCREMENT: [u32; 4] = [2531011, 10395331, 13737667, 1];
pub(crate) const EVEN_MASK: [u32; 4] = [0xFFFF_FFFF, 0, 0xFFFF_FFFF, 0];

/// Per-lane seed multipliers, lane 0 first.
pub(crate) const SEED_SCALE: [u32; 4] = [11, 7, 3, 1];

pub(crate) fn seed_lanes(value: u32) -> [u32; 4] {
    SEED_SCALE.map(|scale| value.wrapping_mul(scale))
}

pub(crate) fn step(state: [u32; 4]) -> [u32; 4] {
    #[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
    {
        sse2::step(state)
    }
    #[cfg(not(all(target_arch = "x86_64", target_feature = "sse2")))]
    {
        portable::step(state)
    }
}

#[cfg_attr(
    all(target_arch = "x86_64", target_feature = "sse2"),
    allow(dead_code)
)]
pub(crate) mod portable {
    use super::{EVEN_MASK, INCREMENT, MULTIPLIER};

    /// Lane order (1, 0, 3, 2): swaps each even lane with its odd neighbour.
    fn swap_pairs(v: [u32; 4]) -> [u32; 4] {
        [v[1], v[0], v[3], v[2]]
    }

    /// Multiplies lanes 0 and 2, leaving each 64-bit product across a lane pair.
    fn mul_even(a: [u32; 4], b: [u32; 4]) -> [u32; 4] {
        let lo = (a[0] as u64) * (b[0] as u64);
        let hi = (a[2] as u64) * (b[2] as u64);
        [lo as u32, (lo >> 32) as u32, hi as u32, (hi >> 32) as u32]
    }

    fn and(a: [u32; 4], b: [u32; 4]) -> [u32; 4] {
        [a[0] & b[0], a[1] & b[1], a[2] & b[2], a[3] & b[3]]
    }

    fn or(a: [u32; 4], b: [u32; 4]) -> [u32; 4] {
        [a[0] | b[0], a[1] | b[1], a[2] | b[2], a[3] | b[3]]
    }

    fn add(a: [u32; 4], b: [u32; 4]) -> [u32; 4] {
        [
            a[0].wrapping_add(b[0]),
            a[1].wrapping_add(b[1]),
            a[2].wrapping_add(b[2]),
            a[3].wrapping_add(b[3]),
        ]
    }

    pub(crate) fn step(state: [u32; 4]) -> [u32; 4] {
        let odd = swap_pairs(state);
        let even_products = and(mul_even(state, MULTIPLIER), EVEN_MASK);
        let odd_products = and(mul_even(odd, swap_pairs(MULTIPLIER)), EVEN_MASK);
        add(or(even_products, swap_pairs(odd_products)), INCREMENT)
    }
}

#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
pub(crate) mod sse2 {
    use super::{EVEN_MASK, INCREMENT, MULTIPLIER};
    use std::arch::x86_64::{
        __m128i, _mm_add_epi32, _mm_and_si128, _mm_loadu_si128, _mm_mul_epu32, _mm_or_si128,
        _mm_shuffle_epi32, _mm_storeu_si128,
    };

    // _MM_SHUFFLE(2, 3, 0, 1)
    const SWAP_PAIRS: i32 = 0b10_11_00_01;

    pub(crate) fn step(state: [u32; 4]) -> [u32; 4] {
        let mut next = [0u32; 4];
        // SAFETY: sse2 is enabled for this target and every load/store goes
        // through a 16-byte `[u32; 4]` with unaligned intrinsics.
        unsafe {
            let seed = _mm_loadu_si128(state.as_ptr() as *const __m128i);
            let multiplier = _mm_loadu_si128(MULTIPLIER.as_ptr() as *const __m128i);
            let adder = _mm_loadu_si128(INCREMENT.as_ptr() as *const __m128i);
            let mask = _mm_loadu_si128(EVEN_MASK.as_ptr() as *const __m128i);

            let split = _mm_shuffle_epi32::<SWAP_PAIRS>(seed);
            let even = _mm_and_si128(_mm_mul_epu32(seed, multiplier), mask);
            let odd_multiplier = _mm_shuffle_epi32::<SWAP_PAIRS>(multiplier);
            let odd = _mm_and_si128(_mm_mul_epu32(split, odd_multiplier), mask);
            let odd = _mm_shuffle_epi32::<SWAP_PAIRS>(odd);
            let result = _mm_add_epi32(_mm_or_si128(even, odd), adder);

            _mm_storeu_si128(next.as_mut_ptr() as *mut __m128i, result);
        }
        next
    }
}
