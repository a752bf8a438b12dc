//! Two-component signature composer. AND-composition of independent
//! signatures stays EUF-CMA-secure as long as either component scheme is
//! secure, which is the point for PQ-hybrid migration: a classical scheme
//! and a post-quantum one, combined, survive the break of either alone.

extern crate alloc;
use alloc::{boxed::Box, string::String, vec::Vec};

use hpq_core::{
    require_same_scheme, CryptoRngCore, Error, Result, SigPrivateKey, SigPublicKey, Signature,
    SignScheme,
};

fn wrap(index: usize, e: Error) -> Error {
    Error::ComponentFailure {
        component_index: index,
        source: Box::new(e),
    }
}

/// `first ∥ second`, in that order, for keys and signatures alike. Order is
/// part of the composed scheme's identity.
pub struct SignatureComposer {
    first: Box<dyn SignScheme>,
    second: Box<dyn SignScheme>,
    name: String,
}

impl SignatureComposer {
    pub fn new(first: Box<dyn SignScheme>, second: Box<dyn SignScheme>) -> Self {
        let mut name = String::new();
        name.push_str(first.name());
        name.push('+');
        name.push_str(second.name());
        Self { first, second, name }
    }

    fn split<'a>(&self, buf: &'a [u8], first_len: usize) -> (&'a [u8], &'a [u8]) {
        buf.split_at(first_len)
    }
}

impl SignScheme for SignatureComposer {
    fn name(&self) -> &str {
        &self.name
    }

    fn public_key_size(&self) -> usize {
        self.first.public_key_size() + self.second.public_key_size()
    }

    fn private_key_size(&self) -> usize {
        self.first.private_key_size() + self.second.private_key_size()
    }

    fn signature_size(&self) -> usize {
        self.first.signature_size() + self.second.signature_size()
    }

    fn generate_keypair(&self, rng: &mut dyn CryptoRngCore) -> (SigPublicKey, SigPrivateKey) {
        let (pk1, sk1) = self.first.generate_keypair(rng);
        let (pk2, sk2) = self.second.generate_keypair(rng);
        let mut pk_bytes = Vec::with_capacity(self.public_key_size());
        pk_bytes.extend_from_slice(pk1.as_bytes());
        pk_bytes.extend_from_slice(pk2.as_bytes());
        let mut sk_bytes = Vec::with_capacity(self.private_key_size());
        sk_bytes.extend_from_slice(sk1.as_bytes());
        sk_bytes.extend_from_slice(sk2.as_bytes());
        (
            SigPublicKey::new_unchecked(self, pk_bytes),
            SigPrivateKey::new_unchecked(self, sk_bytes),
        )
    }

    fn sign(&self, sk: &SigPrivateKey, message: &[u8]) -> Result<Signature> {
        require_same_scheme(self.name(), sk.scheme_name())?;
        let (sk1_bytes, sk2_bytes) = self.split(sk.as_bytes(), self.first.private_key_size());
        let sk1 = self
            .first
            .unmarshal_private_key(sk1_bytes)
            .map_err(|e| wrap(0, e))?;
        let sk2 = self
            .second
            .unmarshal_private_key(sk2_bytes)
            .map_err(|e| wrap(1, e))?;
        let sig1 = self.first.sign(&sk1, message).map_err(|e| wrap(0, e))?;
        let sig2 = self.second.sign(&sk2, message).map_err(|e| wrap(1, e))?;
        let mut bytes = Vec::with_capacity(self.signature_size());
        bytes.extend_from_slice(sig1.as_bytes());
        bytes.extend_from_slice(sig2.as_bytes());
        Ok(Signature::new(bytes))
    }

    fn verify(&self, pk: &SigPublicKey, message: &[u8], signature: &Signature) -> bool {
        if pk.scheme_name() != self.name() {
            return false;
        }
        if signature.len() != self.signature_size() {
            return false;
        }
        let (pk1_bytes, pk2_bytes) = self.split(pk.as_bytes(), self.first.public_key_size());
        let (sig1_bytes, sig2_bytes) = signature
            .as_bytes()
            .split_at(self.first.signature_size());

        let Ok(pk1) = self.first.unmarshal_public_key(pk1_bytes) else {
            return false;
        };
        let Ok(pk2) = self.second.unmarshal_public_key(pk2_bytes) else {
            return false;
        };
        let sig1 = Signature::new(sig1_bytes.to_vec());
        let sig2 = Signature::new(sig2_bytes.to_vec());

        self.first.verify(&pk1, message, &sig1) && self.second.verify(&pk2, message, &sig2)
    }

    fn unmarshal_public_key(&self, bytes: &[u8]) -> Result<SigPublicKey> {
        if bytes.len() != self.public_key_size() {
            return Err(Error::InvalidKey {
                expected: self.public_key_size(),
                actual: bytes.len(),
            });
        }
        let (b1, b2) = self.split(bytes, self.first.public_key_size());
        self.first.unmarshal_public_key(b1).map_err(|e| wrap(0, e))?;
        self.second.unmarshal_public_key(b2).map_err(|e| wrap(1, e))?;
        SigPublicKey::new(self, bytes.to_vec())
    }

    fn unmarshal_private_key(&self, bytes: &[u8]) -> Result<SigPrivateKey> {
        if bytes.len() != self.private_key_size() {
            return Err(Error::InvalidKey {
                expected: self.private_key_size(),
                actual: bytes.len(),
            });
        }
        let (b1, b2) = self.split(bytes, self.first.private_key_size());
        self.first
            .unmarshal_private_key(b1)
            .map_err(|e| wrap(0, e))?;
        self.second
            .unmarshal_private_key(b2)
            .map_err(|e| wrap(1, e))?;
        SigPrivateKey::new(self, bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hpq_primitives::{Ed25519Scheme, ED25519};
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    // Stands in for a second PQ signature scheme in tests; the composer
    // doesn't care that both halves are the same concrete scheme.
    fn composer() -> SignatureComposer {
        SignatureComposer::new(Box::new(Ed25519Scheme), Box::new(Ed25519Scheme))
    }

    #[test]
    fn sign_then_verify_round_trips() {
        let c = composer();
        let mut rng = ChaCha20Rng::seed_from_u64(20);
        let (pk, sk) = c.generate_keypair(&mut rng);
        let sig = c.sign(&sk, b"hello").unwrap();
        assert_eq!(sig.len(), c.signature_size());
        assert!(c.verify(&pk, b"hello", &sig));
    }

    #[test]
    fn tampered_second_half_fails_verification() {
        let c = composer();
        let mut rng = ChaCha20Rng::seed_from_u64(21);
        let (pk, sk) = c.generate_keypair(&mut rng);
        let sig = c.sign(&sk, b"hello").unwrap();
        let mut bytes = sig.as_bytes().to_vec();
        let last = bytes.len() - 1;
        bytes[last] ^= 1;
        let tampered = Signature::new(bytes);
        assert!(!c.verify(&pk, b"hello", &tampered));
    }

    #[test]
    fn random_second_half_fails_verification() {
        let c = composer();
        let mut rng = ChaCha20Rng::seed_from_u64(22);
        let (pk, sk) = c.generate_keypair(&mut rng);
        let sig = c.sign(&sk, b"hello").unwrap();
        let mut bytes = sig.as_bytes().to_vec();
        let half = ED25519.signature_size();
        for b in &mut bytes[half..] {
            *b = 0x42;
        }
        let tampered = Signature::new(bytes);
        assert!(!c.verify(&pk, b"hello", &tampered));
    }

    #[test]
    fn public_key_size_is_additive() {
        let c = composer();
        assert_eq!(c.public_key_size(), 64);
    }
}
