//! Bridges the object-safe `hpq_core::CryptoRngCore` trait object to the
//! concrete, `Sized` RNG type the upstream primitive crates are generic
//! over (their keygen/encapsulate entry points take `R: RngCore + CryptoRng`
//! with an implicit `Sized` bound, so a bare `&mut dyn CryptoRngCore` won't
//! monomorphize).

use rand_core::{CryptoRng, RngCore};

pub(crate) struct RngAdapter<'a>(pub &'a mut dyn hpq_core::CryptoRngCore);

impl RngCore for RngAdapter<'_> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl CryptoRng for RngAdapter<'_> {}
