//! Object-safe randomness source used across scheme trait objects.
//!
//! `RngCore + CryptoRng` cannot be named as a single trait object directly;
//! this marker ties the two together so combiners can hold a single
//! `&mut dyn CryptoRngCore` and hand it down through an arbitrary number of
//! component schemes.

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use rand_core::{CryptoRng, RngCore};

pub trait CryptoRngCore: RngCore + CryptoRng {}
impl<T: RngCore + CryptoRng> CryptoRngCore for T {}

/// A deterministic RNG whose output is the Blake2b-based XOF keystream of a
/// fixed seed. Feeding this into an otherwise-randomized `generate_keypair`
/// turns it into a deterministic derivation without every scheme needing
/// its own seeded construction.
#[cfg(feature = "alloc")]
pub struct SeedRng {
    seed: Vec<u8>,
    counter: u64,
    block: [u8; 64],
    pos: usize,
}

#[cfg(feature = "alloc")]
impl SeedRng {
    pub fn new(seed: &[u8]) -> Self {
        Self {
            seed: seed.to_vec(),
            counter: 0,
            block: [0u8; 64],
            pos: 64,
        }
    }

    fn refill(&mut self) {
        self.block = crate::prf::expand_block(&self.seed, self.counter);
        self.counter += 1;
        self.pos = 0;
    }
}

#[cfg(feature = "alloc")]
impl RngCore for SeedRng {
    fn next_u32(&mut self) -> u32 {
        let mut b = [0u8; 4];
        self.fill_bytes(&mut b);
        u32::from_le_bytes(b)
    }

    fn next_u64(&mut self) -> u64 {
        let mut b = [0u8; 8];
        self.fill_bytes(&mut b);
        u64::from_le_bytes(b)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut written = 0;
        while written < dest.len() {
            if self.pos >= self.block.len() {
                self.refill();
            }
            let take = core::cmp::min(self.block.len() - self.pos, dest.len() - written);
            dest[written..written + take].copy_from_slice(&self.block[self.pos..self.pos + take]);
            self.pos += take;
            written += take;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(feature = "alloc")]
impl CryptoRng for SeedRng {}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;

    #[test]
    fn seed_rng_is_deterministic() {
        let mut a = SeedRng::new(b"seed");
        let mut b = SeedRng::new(b"seed");
        let mut out_a = [0u8; 100];
        let mut out_b = [0u8; 100];
        a.fill_bytes(&mut out_a);
        b.fill_bytes(&mut out_b);
        assert_eq!(out_a, out_b);
    }

    #[test]
    fn seed_rng_matches_expand() {
        let mut rng = SeedRng::new(b"seed");
        let mut streamed = Vec::new();
        streamed.resize(130, 0u8);
        rng.fill_bytes(&mut streamed);
        assert_eq!(streamed, crate::prf::expand(b"seed", 130));
    }
}
