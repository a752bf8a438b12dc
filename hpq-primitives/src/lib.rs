//! Concrete primitive schemes built on real upstream crates: Ed25519 for
//! signatures, X25519 for NIKE key exchange, ML-KEM-768 for key
//! encapsulation. Nothing cryptographic is reimplemented here; each module
//! only adapts an upstream crate's own API to the `hpq-core` scheme
//! contracts.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod rng_adapter;

pub mod ed25519;
pub mod ml_kem768;
pub mod x25519;

pub use ed25519::{Ed25519Scheme, ED25519};
pub use ml_kem768::{MlKem768Scheme, ML_KEM_768};
pub use x25519::{X25519Scheme, X25519};
