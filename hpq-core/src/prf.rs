//! The Blake2b-256 PRF and the Blake2b-based seed-expansion XOF shared by
//! the NIKE→KEM adapter, the KEM combiner, and the NIKE composer.

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use blake2::{
    digest::{consts::U32, consts::U64, Digest},
    Blake2b,
};

/// Output length of the fixed PRF and of every composed shared secret.
pub const PRF_OUTPUT_SIZE: usize = 32;

type Blake2b256 = Blake2b<U32>;
type Blake2b512 = Blake2b<U64>;

/// `Blake2b256(parts[0] ∥ parts[1] ∥ ...)`.
pub fn prf(parts: &[&[u8]]) -> [u8; PRF_OUTPUT_SIZE] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        Digest::update(&mut hasher, part);
    }
    let digest = hasher.finalize();
    let mut out = [0u8; PRF_OUTPUT_SIZE];
    out.copy_from_slice(&digest);
    out
}

/// XOR two PRF outputs byte-wise.
pub fn xor32(a: [u8; PRF_OUTPUT_SIZE], b: [u8; PRF_OUTPUT_SIZE]) -> [u8; PRF_OUTPUT_SIZE] {
    let mut out = [0u8; PRF_OUTPUT_SIZE];
    for i in 0..PRF_OUTPUT_SIZE {
        out[i] = a[i] ^ b[i];
    }
    out
}

/// One 64-byte block of the counter-mode Blake2b-512 keystream underlying
/// [`expand`] and [`crate::rng::SeedRng`]. Kept separate so both can share
/// the exact same domain separation and block boundaries.
pub(crate) fn expand_block(seed: &[u8], counter: u64) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    Digest::update(&mut hasher, b"hpq-seed-xof-v1");
    Digest::update(&mut hasher, seed);
    Digest::update(&mut hasher, &counter.to_le_bytes());
    let block = hasher.finalize();
    let mut out = [0u8; 64];
    out.copy_from_slice(&block);
    out
}

/// Expand `seed` into exactly `out_len` deterministic bytes via counter-mode
/// Blake2b-512, so a short seed can safely drive keygen randomness for an
/// arbitrarily large component without a weak subseed biasing the output.
#[cfg(feature = "alloc")]
pub fn expand(seed: &[u8], out_len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(out_len);
    let mut counter: u64 = 0;
    while out.len() < out_len {
        let block = expand_block(seed, counter);
        let take = core::cmp::min(block.len(), out_len - out.len());
        out.extend_from_slice(&block[..take]);
        counter += 1;
    }
    out
}
