//! Batched disjointness testing.
//!
//! The hot loops of the exact engine test one combined bitset against 8
//! candidate bitsets per step: AND each lane with the probe and compare the
//! result to zero. On x86-64 with AVX2 this is a single
//! compare-after-AND plus a movemask; everywhere else a scalar kernel
//! produces bit-identical results.

/// Number of bitsets tested per batch step.
pub const LANES: usize = 8;

/// Which disjointness kernel to run.
///
/// Resolved once per engine run via [`Kernel::detect`] so the per-step cost
/// is a plain match, not a feature probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    /// Portable scalar kernel.
    Scalar,
    /// 256-bit AVX2 kernel (x86-64 only).
    #[cfg(target_arch = "x86_64")]
    Avx2,
}

impl Kernel {
    /// Picks the widest kernel the running CPU supports.
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("avx2") {
                return Kernel::Avx2;
            }
        }
        Kernel::Scalar
    }

    /// Returns a bitmask with bit `l` set iff `probe & window[l] == 0`.
    ///
    /// `window` must hold at least [`LANES`] entries.
    #[inline]
    pub fn disjoint_mask8(self, probe: u32, window: &[u32]) -> u8 {
        match self {
            Kernel::Scalar => disjoint_mask8_scalar(probe, window),
            #[cfg(target_arch = "x86_64")]
            // Detection in `detect` guarantees AVX2 is present.
            Kernel::Avx2 => unsafe { avx2::disjoint_mask8(probe, window) },
        }
    }
}

/// Scalar reference kernel; the vector path must match it exactly.
#[inline]
pub fn disjoint_mask8_scalar(probe: u32, window: &[u32]) -> u8 {
    debug_assert!(window.len() >= LANES);
    let mut hits = 0u8;
    for lane in 0..LANES {
        if probe & window[lane] == 0 {
            hits |= 1 << lane;
        }
    }
    hits
}

#[cfg(target_arch = "x86_64")]
mod avx2 {
    use super::LANES;
    use std::arch::x86_64::*;

    /// # Safety
    ///
    /// The caller must have verified AVX2 support and `window.len() >= 8`.
    #[target_feature(enable = "avx2")]
    pub unsafe fn disjoint_mask8(probe: u32, window: &[u32]) -> u8 {
        debug_assert!(window.len() >= LANES);
        let probe = _mm256_set1_epi32(probe as i32);
        let masks = _mm256_loadu_si256(window.as_ptr() as *const __m256i);
        let hits = _mm256_cmpeq_epi32(_mm256_and_si256(probe, masks), _mm256_setzero_si256());
        _mm256_movemask_ps(_mm256_castsi256_ps(hits)) as u8
    }
}
