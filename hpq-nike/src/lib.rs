//! Pairwise NIKE composition: canonical-ordered transcript binding over
//! two independent Diffie-Hellman-style exchanges.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
pub mod composer;

#[cfg(feature = "alloc")]
pub use composer::NikeComposer;
