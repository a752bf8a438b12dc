//! KEM combinator layer: the NIKE→KEM adapter and the N-ary split-PRF
//! combiner that sits above it.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
pub mod adapter;
#[cfg(feature = "alloc")]
pub mod combiner;
#[cfg(feature = "alloc")]
pub mod pair;

#[cfg(feature = "alloc")]
pub use adapter::NikeToKemAdapter;
#[cfg(feature = "alloc")]
pub use combiner::KemCombiner;
#[cfg(feature = "alloc")]
pub use pair::pair;
