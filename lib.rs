//! Hybrid post-quantum combiner machinery.
//!
//! Re-exports the scheme contracts, leaf primitives, NIKE→KEM adapter, KEM
//! and NIKE combiners, signature composer, and process-wide registry from
//! their respective crates, plus a thin PEM-adjacent text encoding for keys.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod pem;

pub use hpq_core::{
    prf, require_same_scheme, Ciphertext, CryptoRngCore, Error, KemPrivateKey, KemPublicKey,
    KemScheme, NikePrivateKey, NikePublicKey, NikeScheme, Result, SeedRng, SharedSecret,
    SigPrivateKey, SigPublicKey, SignScheme, Signature,
};

pub use hpq_primitives::{Ed25519Scheme, MlKem768Scheme, X25519Scheme, ED25519, ML_KEM_768, X25519};

pub use hpq_kem::{pair, KemCombiner, NikeToKemAdapter};
pub use hpq_nike::NikeComposer;
pub use hpq_sig::SignatureComposer;

pub use hpq_registry::{all as registered_schemes, by_name, RegisteredScheme};
