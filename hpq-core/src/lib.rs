//! hpq-core - scheme contracts, error types, and the Blake2b PRF/XOF shared
//! across the hybrid post-quantum combiner crates.
//!
//! This crate has no notion of any concrete cryptographic primitive; it
//! only defines the shapes (`NikeScheme`, `KemScheme`, `SignScheme`) that
//! primitive and composed schemes alike must satisfy, plus the byte-level
//! machinery (PRF, XOF, constant-time equality, zeroization) every layer
//! above reuses.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod prf;
pub mod rng;
pub mod traits;

pub use error::{Error, Result};
pub use prf::{expand, prf, xor32, PRF_OUTPUT_SIZE};
pub use rng::CryptoRngCore;
#[cfg(feature = "alloc")]
pub use rng::SeedRng;
pub use traits::{
    require_same_scheme, Ciphertext, KemPrivateKey, KemPublicKey, KemScheme, NikePrivateKey,
    NikePublicKey, NikeScheme, SharedSecret, SigPrivateKey, SigPublicKey, Signature, SignScheme,
};
