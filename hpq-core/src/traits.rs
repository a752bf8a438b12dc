//! Scheme contracts: the abstract operation sets that any NIKE, KEM, or
//! signature scheme — primitive or composed — must satisfy.
//!
//! Keys carry their owning scheme's name rather than a reference to the
//! scheme itself, so a key can be constructed from any borrowed scheme
//! value, including a combiner or composer built on the stack for the
//! lifetime of a single call.

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "alloc")]
use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};
use crate::rng::CryptoRngCore;

fn check_length(buf: &[u8], expected: usize) -> Result<()> {
    if buf.len() != expected {
        return Err(Error::InvalidKey {
            expected,
            actual: buf.len(),
        });
    }
    Ok(())
}

/// A Non-Interactive Key Exchange scheme.
pub trait NikeScheme: Send + Sync {
    fn name(&self) -> &str;
    fn public_key_size(&self) -> usize;
    fn private_key_size(&self) -> usize;

    fn generate_keypair(&self, rng: &mut dyn CryptoRngCore) -> (NikePublicKey, NikePrivateKey);

    /// `DeriveSecret(sk_A, pk_B) == DeriveSecret(sk_B, pk_A)`.
    fn derive_secret(&self, sk: &NikePrivateKey, pk: &NikePublicKey) -> Result<Vec<u8>>;

    /// Recompute the public key that corresponds to `sk`. Needed by the
    /// NIKE→KEM adapter, whose `Decapsulate` binds the recipient's own
    /// public key into the PRF input but is handed only the private key.
    fn public_key_from_private(&self, sk: &NikePrivateKey) -> Result<NikePublicKey>;

    fn unmarshal_public_key(&self, bytes: &[u8]) -> Result<NikePublicKey>;
    fn unmarshal_private_key(&self, bytes: &[u8]) -> Result<NikePrivateKey>;
}

/// A Key Encapsulation Mechanism scheme.
pub trait KemScheme: Send + Sync {
    fn name(&self) -> &str;
    fn public_key_size(&self) -> usize;
    fn private_key_size(&self) -> usize;
    fn ciphertext_size(&self) -> usize;
    fn shared_key_size(&self) -> usize;
    fn seed_size(&self) -> usize;
    fn encapsulation_seed_size(&self) -> usize;

    fn generate_keypair(&self, rng: &mut dyn CryptoRngCore) -> (KemPublicKey, KemPrivateKey);

    /// Deterministic keypair derivation from a seed of `seed_size()` bytes.
    fn derive_keypair(&self, seed: &[u8]) -> Result<(KemPublicKey, KemPrivateKey)>;

    fn encapsulate(
        &self,
        pk: &KemPublicKey,
        rng: &mut dyn CryptoRngCore,
    ) -> Result<(Ciphertext, SharedSecret)>;

    fn encapsulate_deterministically(
        &self,
        pk: &KemPublicKey,
        seed: &[u8],
    ) -> Result<(Ciphertext, SharedSecret)>;

    fn decapsulate(&self, sk: &KemPrivateKey, ct: &Ciphertext) -> Result<SharedSecret>;

    fn unmarshal_public_key(&self, bytes: &[u8]) -> Result<KemPublicKey>;
    fn unmarshal_private_key(&self, bytes: &[u8]) -> Result<KemPrivateKey>;
}

/// A digital signature scheme.
pub trait SignScheme: Send + Sync {
    fn name(&self) -> &str;
    fn public_key_size(&self) -> usize;
    fn private_key_size(&self) -> usize;
    fn signature_size(&self) -> usize;

    fn generate_keypair(&self, rng: &mut dyn CryptoRngCore) -> (SigPublicKey, SigPrivateKey);

    fn sign(&self, sk: &SigPrivateKey, message: &[u8]) -> Result<Signature>;
    fn verify(&self, pk: &SigPublicKey, message: &[u8], signature: &Signature) -> bool;

    fn unmarshal_public_key(&self, bytes: &[u8]) -> Result<SigPublicKey>;
    fn unmarshal_private_key(&self, bytes: &[u8]) -> Result<SigPrivateKey>;
}

/// Returns a `TypeMismatch` error if `actual`'s name differs from
/// `expected` (scheme names are unique per process).
#[cfg(feature = "alloc")]
pub fn require_same_scheme(expected: &str, actual: &str) -> Result<()> {
    if expected != actual {
        return Err(Error::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

#[cfg(not(feature = "alloc"))]
pub fn require_same_scheme(expected: &'static str, actual: &'static str) -> Result<()> {
    if expected != actual {
        return Err(Error::TypeMismatch { expected, actual });
    }
    Ok(())
}

macro_rules! key_type {
    ($name:ident, $scheme:ty, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug)]
        pub struct $name {
            scheme_name: String,
            data: Vec<u8>,
        }

        impl $name {
            pub fn new(scheme: &$scheme, data: Vec<u8>) -> Result<Self> {
                check_length(&data, scheme.public_key_size())?;
                Ok(Self {
                    scheme_name: scheme.name().to_string(),
                    data,
                })
            }

            /// Construct without a declared-size check. For scheme
            /// implementations that already know the invariant holds
            /// (the bytes came straight out of the underlying primitive).
            pub fn new_unchecked(scheme: &$scheme, data: Vec<u8>) -> Self {
                Self {
                    scheme_name: scheme.name().to_string(),
                    data,
                }
            }

            pub fn scheme_name(&self) -> &str {
                &self.scheme_name
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.data
            }

            pub fn marshal_binary(&self) -> Vec<u8> {
                self.data.clone()
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.scheme_name == other.scheme_name
                    && bool::from(self.data.as_slice().ct_eq(other.data.as_slice()))
            }
        }
        impl Eq for $name {}
    };
}

key_type!(NikePublicKey, dyn NikeScheme, "NIKE public key.");
key_type!(KemPublicKey, dyn KemScheme, "KEM public key.");
key_type!(SigPublicKey, dyn SignScheme, "Signature public key.");

macro_rules! private_key_type {
    ($name:ident, $scheme:ty, $doc:literal) => {
        #[doc = $doc]
        #[derive(Zeroize, ZeroizeOnDrop)]
        pub struct $name {
            #[zeroize(skip)]
            scheme_name: String,
            data: Vec<u8>,
        }

        impl $name {
            pub fn new(scheme: &$scheme, data: Vec<u8>) -> Result<Self> {
                check_length(&data, scheme.private_key_size())?;
                Ok(Self {
                    scheme_name: scheme.name().to_string(),
                    data,
                })
            }

            pub fn new_unchecked(scheme: &$scheme, data: Vec<u8>) -> Self {
                Self {
                    scheme_name: scheme.name().to_string(),
                    data,
                }
            }

            pub fn scheme_name(&self) -> &str {
                &self.scheme_name
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.data
            }

            pub fn marshal_binary(&self) -> Vec<u8> {
                self.data.clone()
            }

            /// Explicitly zeroize the key material.
            pub fn reset(&mut self) {
                self.data.zeroize();
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.scheme_name == other.scheme_name
                    && bool::from(self.data.as_slice().ct_eq(other.data.as_slice()))
            }
        }
        impl Eq for $name {}
    };
}

private_key_type!(NikePrivateKey, dyn NikeScheme, "NIKE private key.");
private_key_type!(KemPrivateKey, dyn KemScheme, "KEM private key.");
private_key_type!(SigPrivateKey, dyn SignScheme, "Signature private key.");

/// An opaque, fixed-length KEM ciphertext.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext(Vec<u8>);

impl Ciphertext {
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A shared secret, zeroized on drop.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn reset(&mut self) {
        self.zeroize();
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.0.as_slice().ct_eq(other.0.as_slice()))
    }
}
impl Eq for SharedSecret {}

/// A signature, fixed length per scheme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_secret_equality_is_constant_time_path() {
        let a = SharedSecret::new(vec![1, 2, 3]);
        let b = SharedSecret::new(vec![1, 2, 3]);
        let c = SharedSecret::new(vec![1, 2, 4]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn shared_secret_reset_zeroizes() {
        let mut s = SharedSecret::new(vec![0xAA; 32]);
        s.reset();
        assert!(s.as_bytes().iter().all(|&b| b == 0));
    }
}
