//! Two-component NIKE composer. Keys are plain concatenation; the derived
//! secret binds both parties' full composite public keys in a canonical
//! (lexicographic) order so either side computes the same PRF input
//! regardless of who is "self" and who is "peer".

extern crate alloc;
use alloc::{boxed::Box, string::String, vec::Vec};

use hpq_core::{
    prf, require_same_scheme, CryptoRngCore, Error, NikePrivateKey, NikePublicKey, NikeScheme,
    Result,
};

fn wrap(index: usize, e: Error) -> Error {
    Error::ComponentFailure {
        component_index: index,
        source: Box::new(e),
    }
}

pub struct NikeComposer {
    first: Box<dyn NikeScheme>,
    second: Box<dyn NikeScheme>,
    name: String,
}

impl NikeComposer {
    pub fn new(first: Box<dyn NikeScheme>, second: Box<dyn NikeScheme>) -> Self {
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

impl NikeScheme for NikeComposer {
    fn name(&self) -> &str {
        &self.name
    }

    fn public_key_size(&self) -> usize {
        self.first.public_key_size() + self.second.public_key_size()
    }

    fn private_key_size(&self) -> usize {
        self.first.private_key_size() + self.second.private_key_size()
    }

    fn generate_keypair(&self, rng: &mut dyn CryptoRngCore) -> (NikePublicKey, NikePrivateKey) {
        let (pk1, sk1) = self.first.generate_keypair(rng);
        let (pk2, sk2) = self.second.generate_keypair(rng);
        let mut pk_bytes = Vec::with_capacity(self.public_key_size());
        pk_bytes.extend_from_slice(pk1.as_bytes());
        pk_bytes.extend_from_slice(pk2.as_bytes());
        let mut sk_bytes = Vec::with_capacity(self.private_key_size());
        sk_bytes.extend_from_slice(sk1.as_bytes());
        sk_bytes.extend_from_slice(sk2.as_bytes());
        (
            NikePublicKey::new_unchecked(self, pk_bytes),
            NikePrivateKey::new_unchecked(self, sk_bytes),
        )
    }

    fn derive_secret(&self, sk: &NikePrivateKey, pk: &NikePublicKey) -> Result<Vec<u8>> {
        require_same_scheme(self.name(), sk.scheme_name())?;
        require_same_scheme(self.name(), pk.scheme_name())?;

        let (sk1_bytes, sk2_bytes) = self.split(sk.as_bytes(), self.first.private_key_size());
        let (pk1_bytes, pk2_bytes) = self.split(pk.as_bytes(), self.first.public_key_size());

        let sk1 = self
            .first
            .unmarshal_private_key(sk1_bytes)
            .map_err(|e| wrap(0, e))?;
        let sk2 = self
            .second
            .unmarshal_private_key(sk2_bytes)
            .map_err(|e| wrap(1, e))?;
        let pk1 = self
            .first
            .unmarshal_public_key(pk1_bytes)
            .map_err(|e| wrap(0, e))?;
        let pk2 = self
            .second
            .unmarshal_public_key(pk2_bytes)
            .map_err(|e| wrap(1, e))?;

        let ss1 = self.first.derive_secret(&sk1, &pk1).map_err(|e| wrap(0, e))?;
        let ss2 = self.second.derive_secret(&sk2, &pk2).map_err(|e| wrap(1, e))?;

        let own_pk = self.public_key_from_private(sk)?;
        let (pk_a, pk_b) = if own_pk.as_bytes() <= pk.as_bytes() {
            (own_pk.as_bytes(), pk.as_bytes())
        } else {
            (pk.as_bytes(), own_pk.as_bytes())
        };

        Ok(prf::prf(&[&ss1, &ss2, pk_a, pk_b]).to_vec())
    }

    fn public_key_from_private(&self, sk: &NikePrivateKey) -> Result<NikePublicKey> {
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
        let pk1 = self
            .first
            .public_key_from_private(&sk1)
            .map_err(|e| wrap(0, e))?;
        let pk2 = self
            .second
            .public_key_from_private(&sk2)
            .map_err(|e| wrap(1, e))?;
        let mut bytes = Vec::with_capacity(self.public_key_size());
        bytes.extend_from_slice(pk1.as_bytes());
        bytes.extend_from_slice(pk2.as_bytes());
        NikePublicKey::new(self, bytes)
    }

    fn unmarshal_public_key(&self, bytes: &[u8]) -> Result<NikePublicKey> {
        if bytes.len() != self.public_key_size() {
            return Err(Error::InvalidKey {
                expected: self.public_key_size(),
                actual: bytes.len(),
            });
        }
        let (b1, b2) = self.split(bytes, self.first.public_key_size());
        self.first.unmarshal_public_key(b1).map_err(|e| wrap(0, e))?;
        self.second.unmarshal_public_key(b2).map_err(|e| wrap(1, e))?;
        NikePublicKey::new(self, bytes.to_vec())
    }

    fn unmarshal_private_key(&self, bytes: &[u8]) -> Result<NikePrivateKey> {
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
        NikePrivateKey::new(self, bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hpq_primitives::X25519Scheme;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn composer() -> NikeComposer {
        NikeComposer::new(Box::new(X25519Scheme), Box::new(X25519Scheme))
    }

    #[test]
    fn derive_secret_agrees_both_directions() {
        let c = composer();
        let mut rng = ChaCha20Rng::seed_from_u64(30);
        let (pk_a, sk_a) = c.generate_keypair(&mut rng);
        let (pk_b, sk_b) = c.generate_keypair(&mut rng);
        let ss_a = c.derive_secret(&sk_a, &pk_b).unwrap();
        let ss_b = c.derive_secret(&sk_b, &pk_a).unwrap();
        assert_eq!(ss_a, ss_b);
        assert_eq!(ss_a.len(), 32);
    }

    #[test]
    fn public_key_from_private_matches_generated_key() {
        let c = composer();
        let mut rng = ChaCha20Rng::seed_from_u64(31);
        let (pk, sk) = c.generate_keypair(&mut rng);
        let recomputed = c.public_key_from_private(&sk).unwrap();
        assert_eq!(pk, recomputed);
    }

    #[test]
    fn wrong_length_public_key_rejected() {
        let c = composer();
        assert!(c.unmarshal_public_key(&[0u8; 63]).is_err());
    }
}
