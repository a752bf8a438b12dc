//! NIKE→KEM adapter: hashed ElGamal built from any NIKE scheme.
//!
//! KEM public/private keys are byte-identical to the underlying NIKE's; the
//! adapter only changes what `Encapsulate`/`Decapsulate` compute. Both
//! parties hash the recipient key and the ephemeral key together with the
//! raw Diffie-Hellman output so an adversary cannot malleate the ephemeral
//! key into a second ciphertext that decapsulates to the same secret.

extern crate alloc;
use alloc::{boxed::Box, format, string::String};

use hpq_core::{
    prf, require_same_scheme, Ciphertext, CryptoRngCore, Error, KemPrivateKey, KemPublicKey,
    KemScheme, NikeScheme, Result, SeedRng, SharedSecret,
};

/// A KEM over `nike` via hashed ElGamal.
pub struct NikeToKemAdapter {
    nike: Box<dyn NikeScheme>,
    name: String,
}

impl NikeToKemAdapter {
    pub fn new(nike: Box<dyn NikeScheme>) -> Self {
        let name = format!("{}-kem", nike.name());
        Self { nike, name }
    }

    fn derive_ss(&self, ss_raw: &[u8], pk_recipient: &[u8], pk_eph: &[u8]) -> [u8; 32] {
        prf::prf(&[ss_raw, pk_recipient, pk_eph])
    }
}

impl KemScheme for NikeToKemAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn public_key_size(&self) -> usize {
        self.nike.public_key_size()
    }

    fn private_key_size(&self) -> usize {
        self.nike.private_key_size()
    }

    fn ciphertext_size(&self) -> usize {
        self.nike.public_key_size()
    }

    fn shared_key_size(&self) -> usize {
        prf::PRF_OUTPUT_SIZE
    }

    fn seed_size(&self) -> usize {
        32
    }

    fn encapsulation_seed_size(&self) -> usize {
        32
    }

    fn generate_keypair(&self, rng: &mut dyn CryptoRngCore) -> (KemPublicKey, KemPrivateKey) {
        let (nike_pk, nike_sk) = self.nike.generate_keypair(rng);
        let pk = KemPublicKey::new_unchecked(self, nike_pk.marshal_binary());
        let sk = KemPrivateKey::new_unchecked(self, nike_sk.marshal_binary());
        (pk, sk)
    }

    fn derive_keypair(&self, seed: &[u8]) -> Result<(KemPublicKey, KemPrivateKey)> {
        if seed.len() != self.seed_size() {
            return Err(Error::InvalidSeed {
                expected: self.seed_size(),
                actual: seed.len(),
            });
        }
        let mut rng = SeedRng::new(seed);
        Ok(self.generate_keypair(&mut rng))
    }

    fn encapsulate(
        &self,
        pk: &KemPublicKey,
        rng: &mut dyn CryptoRngCore,
    ) -> Result<(Ciphertext, SharedSecret)> {
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        self.encapsulate_deterministically(pk, &seed)
    }

    fn encapsulate_deterministically(
        &self,
        pk: &KemPublicKey,
        seed: &[u8],
    ) -> Result<(Ciphertext, SharedSecret)> {
        require_same_scheme(self.name(), pk.scheme_name())?;
        if seed.len() != self.encapsulation_seed_size() {
            return Err(Error::InvalidSeed {
                expected: self.encapsulation_seed_size(),
                actual: seed.len(),
            });
        }
        let pk_recipient = self.nike.unmarshal_public_key(pk.as_bytes())?;
        let mut eph_rng = SeedRng::new(seed);
        let (pk_eph, sk_eph) = self.nike.generate_keypair(&mut eph_rng);
        let ss_raw = self.nike.derive_secret(&sk_eph, &pk_recipient)?;
        let ss = self.derive_ss(&ss_raw, pk.as_bytes(), pk_eph.as_bytes());
        Ok((
            Ciphertext::new(pk_eph.marshal_binary()),
            SharedSecret::new(ss.to_vec()),
        ))
    }

    fn decapsulate(&self, sk: &KemPrivateKey, ct: &Ciphertext) -> Result<SharedSecret> {
        require_same_scheme(self.name(), sk.scheme_name())?;
        if ct.len() != self.ciphertext_size() {
            return Err(Error::InvalidCiphertext {
                expected: self.ciphertext_size(),
                actual: ct.len(),
            });
        }
        let sk_recipient = self.nike.unmarshal_private_key(sk.as_bytes())?;
        let pk_eph = self.nike.unmarshal_public_key(ct.as_bytes())?;
        let pk_recipient = self.nike.public_key_from_private(&sk_recipient)?;
        let ss_raw = self.nike.derive_secret(&sk_recipient, &pk_eph)?;
        let ss = self.derive_ss(&ss_raw, pk_recipient.as_bytes(), ct.as_bytes());
        Ok(SharedSecret::new(ss.to_vec()))
    }

    fn unmarshal_public_key(&self, bytes: &[u8]) -> Result<KemPublicKey> {
        self.nike.unmarshal_public_key(bytes)?;
        KemPublicKey::new(self, bytes.to_vec())
    }

    fn unmarshal_private_key(&self, bytes: &[u8]) -> Result<KemPrivateKey> {
        self.nike.unmarshal_private_key(bytes)?;
        KemPrivateKey::new(self, bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hpq_primitives::X25519Scheme;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn adapter() -> NikeToKemAdapter {
        NikeToKemAdapter::new(Box::new(X25519Scheme))
    }

    #[test]
    fn encapsulate_then_decapsulate_agree() {
        let scheme = adapter();
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let (pk, sk) = scheme.generate_keypair(&mut rng);
        let (ct, ss_enc) = scheme
            .encapsulate_deterministically(&pk, &[1u8; 32])
            .unwrap();
        assert_eq!(ct.len(), scheme.public_key_size());
        let ss_dec = scheme.decapsulate(&sk, &ct).unwrap();
        assert_eq!(ss_enc, ss_dec);
    }

    #[test]
    fn ciphertext_is_ephemeral_public_key() {
        let scheme = adapter();
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        let (pk, _) = scheme.generate_keypair(&mut rng);
        let (ct, _) = scheme
            .encapsulate_deterministically(&pk, &[2u8; 32])
            .unwrap();
        assert_eq!(ct.len(), 32);
    }

    #[test]
    fn encapsulate_deterministically_is_deterministic() {
        let scheme = adapter();
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let (pk, _) = scheme.generate_keypair(&mut rng);
        let (ct_a, ss_a) = scheme
            .encapsulate_deterministically(&pk, &[3u8; 32])
            .unwrap();
        let (ct_b, ss_b) = scheme
            .encapsulate_deterministically(&pk, &[3u8; 32])
            .unwrap();
        assert_eq!(ct_a, ct_b);
        assert_eq!(ss_a, ss_b);
    }

    #[test]
    fn wrong_ciphertext_length_rejected() {
        let scheme = adapter();
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let (_, sk) = scheme.generate_keypair(&mut rng);
        let bad_ct = Ciphertext::new(vec![0u8; 31]);
        assert!(scheme.decapsulate(&sk, &bad_ct).is_err());
    }
}
