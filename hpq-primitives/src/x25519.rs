//! X25519, the default NIKE leaf scheme, built on `x25519-dalek`.

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use hpq_core::{require_same_scheme, CryptoRngCore, Error, NikePrivateKey, NikePublicKey, NikeScheme, Result};
use x25519_dalek::{PublicKey, StaticSecret};

use crate::rng_adapter::RngAdapter;

pub const PUBLIC_KEY_SIZE: usize = 32;
pub const PRIVATE_KEY_SIZE: usize = 32;

/// The X25519 scheme. One process-wide instance; see [`X25519`].
pub struct X25519Scheme;

pub static X25519: X25519Scheme = X25519Scheme;

impl NikeScheme for X25519Scheme {
    fn name(&self) -> &str {
        "x25519"
    }

    fn public_key_size(&self) -> usize {
        PUBLIC_KEY_SIZE
    }

    fn private_key_size(&self) -> usize {
        PRIVATE_KEY_SIZE
    }

    fn generate_keypair(&self, rng: &mut dyn CryptoRngCore) -> (NikePublicKey, NikePrivateKey) {
        let mut adapter = RngAdapter(rng);
        let secret = StaticSecret::random_from_rng(&mut adapter);
        let public = PublicKey::from(&secret);
        let pk = NikePublicKey::new_unchecked(self, public.as_bytes().to_vec());
        let sk = NikePrivateKey::new_unchecked(self, secret.to_bytes().to_vec());
        (pk, sk)
    }

    fn derive_secret(&self, sk: &NikePrivateKey, pk: &NikePublicKey) -> Result<Vec<u8>> {
        require_same_scheme(self.name(), sk.scheme_name())?;
        require_same_scheme(self.name(), pk.scheme_name())?;
        let secret = decode_static_secret(sk.as_bytes())?;
        let public = decode_public_key(pk.as_bytes())?;
        let shared = secret.diffie_hellman(&public);
        Ok(shared.as_bytes().to_vec())
    }

    fn public_key_from_private(&self, sk: &NikePrivateKey) -> Result<NikePublicKey> {
        require_same_scheme(self.name(), sk.scheme_name())?;
        let secret = decode_static_secret(sk.as_bytes())?;
        let public = PublicKey::from(&secret);
        NikePublicKey::new(self, public.as_bytes().to_vec())
    }

    fn unmarshal_public_key(&self, bytes: &[u8]) -> Result<NikePublicKey> {
        decode_public_key(bytes)?;
        NikePublicKey::new(self, bytes.to_vec())
    }

    fn unmarshal_private_key(&self, bytes: &[u8]) -> Result<NikePrivateKey> {
        decode_static_secret(bytes)?;
        NikePrivateKey::new(self, bytes.to_vec())
    }
}

fn decode_static_secret(bytes: &[u8]) -> Result<StaticSecret> {
    let arr: [u8; PRIVATE_KEY_SIZE] = bytes.try_into().map_err(|_| Error::InvalidKey {
        expected: PRIVATE_KEY_SIZE,
        actual: bytes.len(),
    })?;
    Ok(StaticSecret::from(arr))
}

fn decode_public_key(bytes: &[u8]) -> Result<PublicKey> {
    let arr: [u8; PUBLIC_KEY_SIZE] = bytes.try_into().map_err(|_| Error::InvalidKey {
        expected: PUBLIC_KEY_SIZE,
        actual: bytes.len(),
    })?;
    Ok(PublicKey::from(arr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    #[test]
    fn derive_secret_agrees_both_directions() {
        let mut rng = ChaCha20Rng::seed_from_u64(10);
        let (pk_a, sk_a) = X25519.generate_keypair(&mut rng);
        let (pk_b, sk_b) = X25519.generate_keypair(&mut rng);
        let ss_a = X25519.derive_secret(&sk_a, &pk_b).unwrap();
        let ss_b = X25519.derive_secret(&sk_b, &pk_a).unwrap();
        assert_eq!(ss_a, ss_b);
    }

    #[test]
    fn unmarshal_rejects_wrong_length() {
        assert!(X25519.unmarshal_public_key(&[0u8; 31]).is_err());
    }
}
