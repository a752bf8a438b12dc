//! Pairwise signature composition: AND-verification over two independently
//! signed halves.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
pub mod composer;

#[cfg(feature = "alloc")]
pub use composer::SignatureComposer;
