//! Legacy two-component combiner: pairwise combination is kept only as a
//! thin constructor over the canonical N-ary combiner, not as a distinct
//! algorithm — the two must always compute identical bytes for the same
//! ordered pair.

extern crate alloc;
use alloc::boxed::Box;

use crate::combiner::KemCombiner;
use hpq_core::KemScheme;

/// `pair(a, b)` is exactly `KemCombiner::new(vec![a, b])`; kept as a named
/// constructor for call sites that only ever combine two components.
pub fn pair(first: Box<dyn KemScheme>, second: Box<dyn KemScheme>) -> KemCombiner {
    KemCombiner::new(alloc::vec![first, second])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::NikeToKemAdapter;
    use hpq_primitives::{MlKem768Scheme, X25519Scheme};

    #[test]
    fn pair_matches_two_component_combiner() {
        let via_pair = pair(
            Box::new(NikeToKemAdapter::new(Box::new(X25519Scheme))),
            Box::new(MlKem768Scheme),
        );
        let via_combiner = KemCombiner::new(vec![
            Box::new(NikeToKemAdapter::new(Box::new(X25519Scheme))),
            Box::new(MlKem768Scheme),
        ]);
        assert_eq!(via_pair.name(), via_combiner.name());
        assert_eq!(via_pair.ciphertext_size(), via_combiner.ciphertext_size());
    }
}
