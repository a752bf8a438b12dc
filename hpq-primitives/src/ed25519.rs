//! Ed25519, the default signature leaf scheme, built on `ed25519-dalek`.

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use hpq_core::{require_same_scheme, CryptoRngCore, Error, Result, SigPrivateKey, SigPublicKey, Signature, SignScheme};

use crate::rng_adapter::RngAdapter;

pub const PUBLIC_KEY_SIZE: usize = 32;
pub const PRIVATE_KEY_SIZE: usize = 32;
pub const SIGNATURE_SIZE: usize = 64;

/// The Ed25519 scheme. One process-wide instance; see [`ED25519`].
pub struct Ed25519Scheme;

/// The singleton Ed25519 scheme instance.
pub static ED25519: Ed25519Scheme = Ed25519Scheme;

impl SignScheme for Ed25519Scheme {
    fn name(&self) -> &str {
        "ed25519"
    }

    fn public_key_size(&self) -> usize {
        PUBLIC_KEY_SIZE
    }

    fn private_key_size(&self) -> usize {
        PRIVATE_KEY_SIZE
    }

    fn signature_size(&self) -> usize {
        SIGNATURE_SIZE
    }

    fn generate_keypair(&self, rng: &mut dyn CryptoRngCore) -> (SigPublicKey, SigPrivateKey) {
        let mut adapter = RngAdapter(rng);
        let signing_key = SigningKey::generate(&mut adapter);
        let verifying_key = signing_key.verifying_key();
        let pk = SigPublicKey::new_unchecked(self, verifying_key.to_bytes().to_vec());
        let sk = SigPrivateKey::new_unchecked(self, signing_key.to_bytes().to_vec());
        (pk, sk)
    }

    fn sign(&self, sk: &SigPrivateKey, message: &[u8]) -> Result<Signature> {
        require_same_scheme(self.name(), sk.scheme_name())?;
        let signing_key = decode_signing_key(sk.as_bytes())?;
        let sig = signing_key.sign(message);
        Ok(Signature::new(sig.to_bytes().to_vec()))
    }

    fn verify(&self, pk: &SigPublicKey, message: &[u8], signature: &Signature) -> bool {
        if pk.scheme_name() != self.name() {
            return false;
        }
        let Ok(verifying_key) = decode_verifying_key(pk.as_bytes()) else {
            return false;
        };
        let Ok(sig_bytes) = <[u8; SIGNATURE_SIZE]>::try_from(signature.as_bytes()) else {
            return false;
        };
        let sig = ed25519_dalek::Signature::from_bytes(&sig_bytes);
        verifying_key.verify(message, &sig).is_ok()
    }

    fn unmarshal_public_key(&self, bytes: &[u8]) -> Result<SigPublicKey> {
        decode_verifying_key(bytes)?;
        SigPublicKey::new(self, bytes.to_vec())
    }

    fn unmarshal_private_key(&self, bytes: &[u8]) -> Result<SigPrivateKey> {
        decode_signing_key(bytes)?;
        SigPrivateKey::new(self, bytes.to_vec())
    }
}

fn decode_signing_key(bytes: &[u8]) -> Result<SigningKey> {
    let arr: [u8; PRIVATE_KEY_SIZE] = bytes.try_into().map_err(|_| Error::InvalidKey {
        expected: PRIVATE_KEY_SIZE,
        actual: bytes.len(),
    })?;
    Ok(SigningKey::from_bytes(&arr))
}

fn decode_verifying_key(bytes: &[u8]) -> Result<VerifyingKey> {
    let arr: [u8; PUBLIC_KEY_SIZE] = bytes.try_into().map_err(|_| Error::InvalidKey {
        expected: PUBLIC_KEY_SIZE,
        actual: bytes.len(),
    })?;
    VerifyingKey::from_bytes(&arr).map_err(|_| Error::InvalidKey {
        expected: PUBLIC_KEY_SIZE,
        actual: bytes.len(),
    })
}
