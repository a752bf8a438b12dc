//! N-ary split-PRF KEM combiner — the security-preserving combiner from
//! Giacon/Heuer/Poettering. Composes any number of component KEMs into one
//! whose IND-CCA2 security holds as long as at least one component is
//! IND-CCA2, by XORing a PRF of each component's shared secret together
//! with the *full* concatenated ciphertext so a break of N-1 components
//! can't forge the remaining branch without also matching the whole
//! transcript.

extern crate alloc;
use alloc::{boxed::Box, string::String, vec::Vec};

use hpq_core::{
    prf, require_same_scheme, Ciphertext, CryptoRngCore, Error, KemPrivateKey, KemPublicKey,
    KemScheme, Result, SharedSecret,
};

fn wrap(index: usize, e: Error) -> Error {
    Error::ComponentFailure {
        component_index: index,
        source: Box::new(e),
    }
}

/// Composes `components`, in order, into a single KEM. Component order is
/// part of the resulting scheme's identity: `KemCombiner::new([a, b])` and
/// `KemCombiner::new([b, a])` produce incompatible keys and ciphertexts.
pub struct KemCombiner {
    components: Vec<Box<dyn KemScheme>>,
    name: String,
}

impl KemCombiner {
    pub fn new(components: Vec<Box<dyn KemScheme>>) -> Self {
        assert!(
            !components.is_empty(),
            "a KEM combiner needs at least one component"
        );
        let mut name = String::new();
        for (i, c) in components.iter().enumerate() {
            if i > 0 {
                name.push('+');
            }
            name.push_str(c.name());
        }
        Self { components, name }
    }

    fn split<'a>(&self, buf: &'a [u8], size_of: impl Fn(&dyn KemScheme) -> usize) -> Vec<&'a [u8]> {
        let mut out = Vec::with_capacity(self.components.len());
        let mut rest = buf;
        for c in &self.components {
            let n = size_of(c.as_ref());
            let (head, tail) = rest.split_at(n);
            out.push(head);
            rest = tail;
        }
        out
    }

    /// `⊕_i Blake2b256(ss_i ∥ full_ct)`.
    fn combine_secret(&self, per_component_ss: &[Vec<u8>], full_ct: &[u8]) -> [u8; 32] {
        let mut acc = [0u8; 32];
        for ss in per_component_ss {
            let branch = prf::prf(&[ss.as_slice(), full_ct]);
            acc = prf::xor32(acc, branch);
        }
        acc
    }
}

impl KemScheme for KemCombiner {
    fn name(&self) -> &str {
        &self.name
    }

    fn public_key_size(&self) -> usize {
        self.components.iter().map(|c| c.public_key_size()).sum()
    }

    fn private_key_size(&self) -> usize {
        self.components.iter().map(|c| c.private_key_size()).sum()
    }

    fn ciphertext_size(&self) -> usize {
        self.components.iter().map(|c| c.ciphertext_size()).sum()
    }

    fn shared_key_size(&self) -> usize {
        prf::PRF_OUTPUT_SIZE
    }

    fn seed_size(&self) -> usize {
        self.components.iter().map(|c| c.seed_size()).sum()
    }

    fn encapsulation_seed_size(&self) -> usize {
        self.components
            .iter()
            .map(|c| c.encapsulation_seed_size())
            .sum()
    }

    fn generate_keypair(&self, rng: &mut dyn CryptoRngCore) -> (KemPublicKey, KemPrivateKey) {
        let mut pk_bytes = Vec::with_capacity(self.public_key_size());
        let mut sk_bytes = Vec::with_capacity(self.private_key_size());
        for c in &self.components {
            let (pk, sk) = c.generate_keypair(rng);
            pk_bytes.extend_from_slice(pk.as_bytes());
            sk_bytes.extend_from_slice(sk.as_bytes());
        }
        (
            KemPublicKey::new_unchecked(self, pk_bytes),
            KemPrivateKey::new_unchecked(self, sk_bytes),
        )
    }

    fn derive_keypair(&self, seed: &[u8]) -> Result<(KemPublicKey, KemPrivateKey)> {
        if seed.len() != self.seed_size() {
            return Err(Error::InvalidSeed {
                expected: self.seed_size(),
                actual: seed.len(),
            });
        }
        let seed_slices = self.split(seed, |c| c.seed_size());
        let mut pk_bytes = Vec::with_capacity(self.public_key_size());
        let mut sk_bytes = Vec::with_capacity(self.private_key_size());
        for (i, c) in self.components.iter().enumerate() {
            let (pk, sk) = c.derive_keypair(seed_slices[i]).map_err(|e| wrap(i, e))?;
            pk_bytes.extend_from_slice(pk.as_bytes());
            sk_bytes.extend_from_slice(sk.as_bytes());
        }
        Ok((
            KemPublicKey::new_unchecked(self, pk_bytes),
            KemPrivateKey::new_unchecked(self, sk_bytes),
        ))
    }

    fn encapsulate(
        &self,
        pk: &KemPublicKey,
        rng: &mut dyn CryptoRngCore,
    ) -> Result<(Ciphertext, SharedSecret)> {
        let mut seed = Vec::new();
        seed.resize(self.encapsulation_seed_size(), 0u8);
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
        let pk_slices = self.split(pk.as_bytes(), |c| c.public_key_size());
        let seed_slices = self.split(seed, |c| c.encapsulation_seed_size());

        let mut ct_bytes = Vec::with_capacity(self.ciphertext_size());
        let mut per_component_ct = Vec::with_capacity(self.components.len());
        let mut per_component_ss = Vec::with_capacity(self.components.len());
        for (i, c) in self.components.iter().enumerate() {
            let pk_i = c
                .unmarshal_public_key(pk_slices[i])
                .map_err(|e| wrap(i, e))?;
            let (ct_i, ss_i) = c
                .encapsulate_deterministically(&pk_i, seed_slices[i])
                .map_err(|e| wrap(i, e))?;
            per_component_ct.push(ct_i);
            per_component_ss.push(ss_i.as_bytes().to_vec());
        }
        for ct_i in &per_component_ct {
            ct_bytes.extend_from_slice(ct_i.as_bytes());
        }

        let ss = self.combine_secret(&per_component_ss, &ct_bytes);
        Ok((Ciphertext::new(ct_bytes), SharedSecret::new(ss.to_vec())))
    }

    fn decapsulate(&self, sk: &KemPrivateKey, ct: &Ciphertext) -> Result<SharedSecret> {
        require_same_scheme(self.name(), sk.scheme_name())?;
        if ct.len() != self.ciphertext_size() {
            return Err(Error::InvalidCiphertext {
                expected: self.ciphertext_size(),
                actual: ct.len(),
            });
        }
        let sk_slices = self.split(sk.as_bytes(), |c| c.private_key_size());
        let ct_slices = self.split(ct.as_bytes(), |c| c.ciphertext_size());

        let mut per_component_ss = Vec::with_capacity(self.components.len());
        for (i, c) in self.components.iter().enumerate() {
            let sk_i = c
                .unmarshal_private_key(sk_slices[i])
                .map_err(|e| wrap(i, e))?;
            let ct_i = Ciphertext::new(ct_slices[i].to_vec());
            let ss_i = c.decapsulate(&sk_i, &ct_i).map_err(|e| wrap(i, e))?;
            per_component_ss.push(ss_i.as_bytes().to_vec());
        }

        let ss = self.combine_secret(&per_component_ss, ct.as_bytes());
        Ok(SharedSecret::new(ss.to_vec()))
    }

    fn unmarshal_public_key(&self, bytes: &[u8]) -> Result<KemPublicKey> {
        if bytes.len() != self.public_key_size() {
            return Err(Error::InvalidKey {
                expected: self.public_key_size(),
                actual: bytes.len(),
            });
        }
        let slices = self.split(bytes, |c| c.public_key_size());
        for (i, c) in self.components.iter().enumerate() {
            c.unmarshal_public_key(slices[i]).map_err(|e| wrap(i, e))?;
        }
        KemPublicKey::new(self, bytes.to_vec())
    }

    fn unmarshal_private_key(&self, bytes: &[u8]) -> Result<KemPrivateKey> {
        if bytes.len() != self.private_key_size() {
            return Err(Error::InvalidKey {
                expected: self.private_key_size(),
                actual: bytes.len(),
            });
        }
        let slices = self.split(bytes, |c| c.private_key_size());
        for (i, c) in self.components.iter().enumerate() {
            c.unmarshal_private_key(slices[i])
                .map_err(|e| wrap(i, e))?;
        }
        KemPrivateKey::new(self, bytes.to_vec())
    }
}
