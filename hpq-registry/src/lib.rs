//! Process-wide scheme registry: an immutable, case-insensitive name →
//! scheme lookup built once from a hard-coded list of primitive and
//! composed schemes. No runtime registration.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
use alloc::{boxed::Box, collections::BTreeMap, string::String, vec::Vec};

use hpq_core::{KemScheme, NikeScheme, SignScheme};
use hpq_kem::{KemCombiner, NikeToKemAdapter};
use hpq_primitives::{Ed25519Scheme, MlKem768Scheme, X25519Scheme};

/// One entry in the registry, tagged by the family of the underlying
/// scheme. Schemes of different families never share a name, since names
/// must be unique after case-folding, so a flat namespace is safe.
pub enum RegisteredScheme {
    Nike(Box<dyn NikeScheme>),
    Kem(Box<dyn KemScheme>),
    Sign(Box<dyn SignScheme>),
}

impl RegisteredScheme {
    pub fn name(&self) -> &str {
        match self {
            RegisteredScheme::Nike(s) => s.name(),
            RegisteredScheme::Kem(s) => s.name(),
            RegisteredScheme::Sign(s) => s.name(),
        }
    }
}

struct Registry {
    by_name: BTreeMap<String, RegisteredScheme>,
}

impl Registry {
    fn new() -> Self {
        let hybrid = KemCombiner::new(alloc::vec![
            Box::new(NikeToKemAdapter::new(Box::new(X25519Scheme))) as Box<dyn KemScheme>,
            Box::new(MlKem768Scheme),
        ]);

        let mut by_name = BTreeMap::new();
        let mut insert = |entry: RegisteredScheme| {
            by_name.insert(fold(entry.name()), entry);
        };

        insert(RegisteredScheme::Sign(Box::new(Ed25519Scheme)));
        insert(RegisteredScheme::Nike(Box::new(X25519Scheme)));
        insert(RegisteredScheme::Kem(Box::new(MlKem768Scheme)));
        insert(RegisteredScheme::Kem(Box::new(NikeToKemAdapter::new(
            Box::new(X25519Scheme),
        ))));
        insert(RegisteredScheme::Kem(Box::new(hybrid)));

        Self { by_name }
    }

    fn by_name(&self, name: &str) -> Option<&RegisteredScheme> {
        self.by_name.get(&fold(name))
    }

    fn all(&self) -> Vec<&RegisteredScheme> {
        self.by_name.values().collect()
    }
}

fn fold(name: &str) -> String {
    name.to_ascii_lowercase()
}

lazy_static::lazy_static! {
    static ref REGISTRY: Registry = Registry::new();
}

/// Look up a scheme by name, case-insensitively. `None` on miss.
pub fn by_name(name: &str) -> Option<&'static RegisteredScheme> {
    REGISTRY.by_name(name)
}

/// All registered schemes, in no particular order.
pub fn all() -> Vec<&'static RegisteredScheme> {
    REGISTRY.all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let a = by_name("ED25519").unwrap();
        let b = by_name("ed25519").unwrap();
        assert_eq!(a.name(), b.name());
    }

    #[test]
    fn unknown_name_returns_none() {
        assert!(by_name("nosuch").is_none());
    }

    #[test]
    fn enumeration_includes_hybrid_kem() {
        let names: Vec<&str> = all().iter().map(|s| s.name()).collect();
        assert!(names.contains(&"ml-kem-768"));
        assert!(names.iter().any(|n| n.contains('+')));
    }
}
