#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Mutable candidate-word sets, one per slot.
//!
//! The store is owned by the solver. Propagation shrinks it, and the search
//! restores it around each candidate trial via whole-store snapshots, so a
//! failed branch leaves no residual shrinkage behind.

use crate::puzzle::crossword::Crossword;
use crate::puzzle::variable::Variable;
use rustc_hash::{FxHashMap, FxHashSet};

/// A full copy of the store, taken before a speculative trial and put back on
/// failure.
pub type DomainSnapshot = FxHashMap<Variable, FxHashSet<String>>;

/// Per-variable candidate sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStore {
    domains: FxHashMap<Variable, FxHashSet<String>>,
}

impl DomainStore {
    /// Seeds every slot's domain with an independent copy of the vocabulary.
    #[must_use]
    pub fn new(crossword: &Crossword) -> Self {
        let domains = crossword
            .variables()
            .iter()
            .map(|&var| (var, crossword.words().clone()))
            .collect();
        Self { domains }
    }

    /// Removes every candidate whose length differs from its slot's length.
    ///
    /// Purely a filter; idempotent. Returns the number of words dropped.
    pub fn enforce_node_consistency(&mut self) -> usize {
        let mut removed = 0;
        for (var, domain) in &mut self.domains {
            let before = domain.len();
            domain.retain(|word| word.chars().count() == var.length);
            removed += before - domain.len();
        }
        removed
    }

    /// The current candidates for `var`. Slots unknown to the store have an
    /// empty domain.
    #[must_use]
    pub fn candidates(&self, var: Variable) -> impl Iterator<Item = &str> {
        self.domains
            .get(&var)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    #[must_use]
    pub fn len(&self, var: Variable) -> usize {
        self.domains.get(&var).map_or(0, FxHashSet::len)
    }

    #[must_use]
    pub fn is_empty(&self, var: Variable) -> bool {
        self.len(var) == 0
    }

    /// The sole remaining candidate for `var`, if the domain is a singleton.
    #[must_use]
    pub fn sole_candidate(&self, var: Variable) -> Option<&str> {
        let domain = self.domains.get(&var)?;
        if domain.len() == 1 {
            domain.iter().next().map(String::as_str)
        } else {
            None
        }
    }

    pub fn remove(&mut self, var: Variable, word: &str) -> bool {
        self.domains.get_mut(&var).is_some_and(|d| d.remove(word))
    }

    #[must_use]
    pub fn snapshot(&self) -> DomainSnapshot {
        self.domains.clone()
    }

    pub fn restore(&mut self, snapshot: DomainSnapshot) {
        self.domains = snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::variable::Direction;

    const PLUS: &str = "#_##\n\
                        #_##\n\
                        ____\n\
                        #_##";

    fn store() -> (Crossword, DomainStore) {
        let puzzle = Crossword::new(PLUS, "CAT\nACRE\nABED\nTSAR\nPLASMA").unwrap();
        let domains = DomainStore::new(&puzzle);
        (puzzle, domains)
    }

    #[test]
    fn test_seeded_from_full_vocabulary() {
        let (puzzle, domains) = store();
        for &var in puzzle.variables() {
            assert_eq!(domains.len(var), puzzle.words().len());
        }
    }

    #[test]
    fn test_node_consistency_filters_by_length() {
        let (puzzle, mut domains) = store();
        domains.enforce_node_consistency();
        for &var in puzzle.variables() {
            assert_eq!(var.length, 4);
            assert_eq!(domains.len(var), 3);
            assert!(domains.candidates(var).all(|w| w.len() == 4));
        }
    }

    #[test]
    fn test_node_consistency_is_idempotent() {
        let (_, mut domains) = store();
        let removed = domains.enforce_node_consistency();
        assert!(removed > 0);
        let again = domains.clone();
        assert_eq!(domains.enforce_node_consistency(), 0);
        assert_eq!(domains, again);
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let (puzzle, mut domains) = store();
        domains.enforce_node_consistency();
        let snapshot = domains.snapshot();
        let before = domains.clone();

        let var = puzzle.variables()[0];
        assert!(domains.remove(var, "ACRE"));
        assert_ne!(domains, before);

        domains.restore(snapshot);
        assert_eq!(domains, before);
    }

    #[test]
    fn test_sole_candidate() {
        let (puzzle, mut domains) = store();
        domains.enforce_node_consistency();
        let var = puzzle.variables()[0];
        assert_eq!(domains.sole_candidate(var), None);
        domains.remove(var, "ACRE");
        domains.remove(var, "ABED");
        assert_eq!(domains.sole_candidate(var), Some("TSAR"));
    }

    #[test]
    fn test_unknown_variable_has_empty_domain() {
        let (_, domains) = store();
        let stranger = Variable::new(9, 9, 4, Direction::Across);
        assert!(domains.is_empty(stranger));
        assert_eq!(domains.candidates(stranger).count(), 0);
    }
}
