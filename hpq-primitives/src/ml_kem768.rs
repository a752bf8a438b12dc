//! ML-KEM-768, the default KEM leaf scheme, built on the RustCrypto
//! `ml-kem` crate (FIPS 203). Deterministic key derivation and
//! deterministic encapsulation reuse the ML-KEM primitive's own
//! `generate`/`encapsulate_deterministic` entry points rather than
//! reimplementing the lattice arithmetic.

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use kem::{Decapsulate, Encapsulate};
use ml_kem::kem::{DecapsulationKey, EncapsulationKey};
use ml_kem::{EncapsulateDeterministic, Encoded, EncodedSizeUser, KemCore, MlKem768, MlKem768Params};
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

use hpq_core::{
    require_same_scheme, Ciphertext, CryptoRngCore, Error, KemPrivateKey, KemPublicKey, KemScheme,
    Result, SharedSecret,
};

use crate::rng_adapter::RngAdapter;

pub const PUBLIC_KEY_SIZE: usize = 1184;
pub const PRIVATE_KEY_SIZE: usize = 2400;
pub const CIPHERTEXT_SIZE: usize = 1088;
pub const SHARED_KEY_SIZE: usize = 32;
pub const SEED_SIZE: usize = 32;
pub const ENCAPSULATION_SEED_SIZE: usize = 32;

type Ek = EncapsulationKey<MlKem768Params>;
type Dk = DecapsulationKey<MlKem768Params>;
type Ct = ml_kem::Ciphertext<MlKem768>;

/// The ML-KEM-768 scheme. One process-wide instance; see [`ML_KEM_768`].
pub struct MlKem768Scheme;

pub static ML_KEM_768: MlKem768Scheme = MlKem768Scheme;

impl KemScheme for MlKem768Scheme {
    fn name(&self) -> &str {
        "ml-kem-768"
    }

    fn public_key_size(&self) -> usize {
        PUBLIC_KEY_SIZE
    }

    fn private_key_size(&self) -> usize {
        PRIVATE_KEY_SIZE
    }

    fn ciphertext_size(&self) -> usize {
        CIPHERTEXT_SIZE
    }

    fn shared_key_size(&self) -> usize {
        SHARED_KEY_SIZE
    }

    fn seed_size(&self) -> usize {
        SEED_SIZE
    }

    fn encapsulation_seed_size(&self) -> usize {
        ENCAPSULATION_SEED_SIZE
    }

    fn generate_keypair(&self, rng: &mut dyn CryptoRngCore) -> (KemPublicKey, KemPrivateKey) {
        let mut adapter = RngAdapter(rng);
        let (dk, ek) = MlKem768::generate(&mut adapter);
        let pk = KemPublicKey::new_unchecked(self, ek.as_bytes().to_vec());
        let sk = KemPrivateKey::new_unchecked(self, dk.as_bytes().to_vec());
        (pk, sk)
    }

    fn derive_keypair(&self, seed: &[u8]) -> Result<(KemPublicKey, KemPrivateKey)> {
        let arr: [u8; SEED_SIZE] = seed.try_into().map_err(|_| Error::InvalidSeed {
            expected: SEED_SIZE,
            actual: seed.len(),
        })?;
        let mut rng = ChaCha20Rng::from_seed(arr);
        let (dk, ek) = MlKem768::generate(&mut rng);
        let pk = KemPublicKey::new_unchecked(self, ek.as_bytes().to_vec());
        let sk = KemPrivateKey::new_unchecked(self, dk.as_bytes().to_vec());
        Ok((pk, sk))
    }

    fn encapsulate(
        &self,
        pk: &KemPublicKey,
        rng: &mut dyn CryptoRngCore,
    ) -> Result<(Ciphertext, SharedSecret)> {
        require_same_scheme(self.name(), pk.scheme_name())?;
        let ek = decode_encapsulation_key(pk.as_bytes())?;
        let mut adapter = RngAdapter(rng);
        let (ct, ss) = ek.encapsulate(&mut adapter).map_err(|_| Error::RngFailure)?;
        Ok((
            Ciphertext::new(ct.as_slice().to_vec()),
            SharedSecret::new(ss.as_slice().to_vec()),
        ))
    }

    fn encapsulate_deterministically(
        &self,
        pk: &KemPublicKey,
        seed: &[u8],
    ) -> Result<(Ciphertext, SharedSecret)> {
        require_same_scheme(self.name(), pk.scheme_name())?;
        let arr: [u8; ENCAPSULATION_SEED_SIZE] =
            seed.try_into().map_err(|_| Error::InvalidSeed {
                expected: ENCAPSULATION_SEED_SIZE,
                actual: seed.len(),
            })?;
        let ek = decode_encapsulation_key(pk.as_bytes())?;
        let m = ml_kem::B32::from(arr);
        let (ct, ss) = ek
            .encapsulate_deterministic(&m)
            .map_err(|_| Error::RngFailure)?;
        Ok((
            Ciphertext::new(ct.as_slice().to_vec()),
            SharedSecret::new(ss.as_slice().to_vec()),
        ))
    }

    fn decapsulate(&self, sk: &KemPrivateKey, ct: &Ciphertext) -> Result<SharedSecret> {
        require_same_scheme(self.name(), sk.scheme_name())?;
        let dk = decode_decapsulation_key(sk.as_bytes())?;
        let ct_arr = decode_ciphertext(ct.as_bytes())?;
        let ss = dk
            .decapsulate(&ct_arr)
            .map_err(|_| Error::InvalidCiphertext {
                expected: CIPHERTEXT_SIZE,
                actual: ct.len(),
            })?;
        Ok(SharedSecret::new(ss.as_slice().to_vec()))
    }

    fn unmarshal_public_key(&self, bytes: &[u8]) -> Result<KemPublicKey> {
        decode_encapsulation_key(bytes)?;
        KemPublicKey::new(self, bytes.to_vec())
    }

    fn unmarshal_private_key(&self, bytes: &[u8]) -> Result<KemPrivateKey> {
        decode_decapsulation_key(bytes)?;
        KemPrivateKey::new(self, bytes.to_vec())
    }
}

fn decode_encapsulation_key(bytes: &[u8]) -> Result<Ek> {
    if bytes.len() != PUBLIC_KEY_SIZE {
        return Err(Error::InvalidKey {
            expected: PUBLIC_KEY_SIZE,
            actual: bytes.len(),
        });
    }
    let arr = Encoded::<Ek>::try_from(bytes).map_err(|_| Error::InvalidKey {
        expected: PUBLIC_KEY_SIZE,
        actual: bytes.len(),
    })?;
    Ok(Ek::from_bytes(&arr))
}

fn decode_decapsulation_key(bytes: &[u8]) -> Result<Dk> {
    if bytes.len() != PRIVATE_KEY_SIZE {
        return Err(Error::InvalidKey {
            expected: PRIVATE_KEY_SIZE,
            actual: bytes.len(),
        });
    }
    let arr = Encoded::<Dk>::try_from(bytes).map_err(|_| Error::InvalidKey {
        expected: PRIVATE_KEY_SIZE,
        actual: bytes.len(),
    })?;
    Ok(Dk::from_bytes(&arr))
}

fn decode_ciphertext(bytes: &[u8]) -> Result<Ct> {
    Ct::try_from(bytes).map_err(|_| Error::InvalidCiphertext {
        expected: CIPHERTEXT_SIZE,
        actual: bytes.len(),
    })
}
