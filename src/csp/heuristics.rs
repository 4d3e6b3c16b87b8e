#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Search-ordering heuristics.
//!
//! Variable choice and value choice are trait seams so the solver can be
//! configured with or without the informed heuristics; the uninformed
//! [`InputOrder`]/[`Lexicographic`] pair exists mostly as a baseline for
//! benchmarks.
//!
//! Every heuristic here is deterministic. Remaining ties fall back to the
//! derived `Ord` on [`Variable`] and to lexicographic word order, so repeated
//! runs on the same puzzle explore the same tree.

use crate::csp::assignment::Assignment;
use crate::csp::domains::DomainStore;
use crate::puzzle::crossword::{letter_at, Crossword};
use crate::puzzle::variable::Variable;
use itertools::Itertools;
use std::cmp::Reverse;

/// Chooses the next unassigned slot to branch on.
pub trait VariableSelection {
    /// Returns `None` only when every slot is assigned.
    fn select(
        &self,
        crossword: &Crossword,
        domains: &DomainStore,
        assignment: &Assignment,
    ) -> Option<Variable>;
}

/// Orders the chosen slot's candidates for trial.
pub trait ValueOrdering {
    /// Returns a permutation of `var`'s current domain.
    fn order(
        &self,
        crossword: &Crossword,
        domains: &DomainStore,
        assignment: &Assignment,
        var: Variable,
    ) -> Vec<String>;
}

/// Minimum-remaining-values with degree tie-break: fewest candidates first,
/// then most neighbors, then `Variable` order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MrvDegree;

impl VariableSelection for MrvDegree {
    fn select(
        &self,
        crossword: &Crossword,
        domains: &DomainStore,
        assignment: &Assignment,
    ) -> Option<Variable> {
        crossword
            .variables()
            .iter()
            .copied()
            .filter(|&var| !assignment.contains(var))
            .min_by_key(|&var| (domains.len(var), Reverse(crossword.degree(var)), var))
    }
}

/// First unassigned slot in `Variable` order. Uninformed baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputOrder;

impl VariableSelection for InputOrder {
    fn select(
        &self,
        crossword: &Crossword,
        _domains: &DomainStore,
        assignment: &Assignment,
    ) -> Option<Variable> {
        crossword
            .variables()
            .iter()
            .copied()
            .find(|&var| !assignment.contains(var))
    }
}

/// Least-constraining-value: candidates that eliminate fewer options from
/// unassigned neighbors' domains come first; ties break lexicographically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lcv;

impl Lcv {
    /// Counts the (neighbor, candidate) pairs that `word` would rule out at
    /// the shared overlap offsets, over unassigned neighbors only.
    fn eliminations(
        crossword: &Crossword,
        domains: &DomainStore,
        assignment: &Assignment,
        var: Variable,
        word: &str,
    ) -> usize {
        crossword
            .neighbors(var)
            .filter(|&n| !assignment.contains(n))
            .map(|n| {
                let Some((i, j)) = crossword.overlap(var, n) else {
                    return 0;
                };
                let c = letter_at(word, i);
                domains
                    .candidates(n)
                    .filter(|wn| letter_at(wn, j) != c)
                    .count()
            })
            .sum()
    }
}

impl ValueOrdering for Lcv {
    fn order(
        &self,
        crossword: &Crossword,
        domains: &DomainStore,
        assignment: &Assignment,
        var: Variable,
    ) -> Vec<String> {
        domains
            .candidates(var)
            .map(|word| {
                let count = Self::eliminations(crossword, domains, assignment, var, word);
                (count, word.to_owned())
            })
            .sorted()
            .map(|(_, word)| word)
            .collect()
    }
}

/// Plain lexicographic order, no constraint counting. Uninformed baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lexicographic;

impl ValueOrdering for Lexicographic {
    fn order(
        &self,
        _crossword: &Crossword,
        domains: &DomainStore,
        _assignment: &Assignment,
        var: Variable,
    ) -> Vec<String> {
        domains.candidates(var).map(str::to_owned).sorted().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::variable::Direction;

    // Two down slots of length 2 and 3 crossing one across slot of length 3.
    const LADDER: &str = "_#_\n\
                          ___\n\
                          ##_";

    fn setup(words: &str) -> (Crossword, DomainStore) {
        let puzzle = Crossword::new(LADDER, words).unwrap();
        let mut domains = DomainStore::new(&puzzle);
        domains.enforce_node_consistency();
        (puzzle, domains)
    }

    fn short_down() -> Variable {
        Variable::new(0, 0, 2, Direction::Down)
    }

    fn long_down() -> Variable {
        Variable::new(0, 2, 3, Direction::Down)
    }

    fn across() -> Variable {
        Variable::new(1, 0, 3, Direction::Across)
    }

    #[test]
    fn test_mrv_picks_smallest_domain() {
        // One 2-letter word, two 3-letter words: the short down slot has the
        // smallest domain.
        let (puzzle, domains) = setup("AT\nCAT\nDOG");
        let assignment = Assignment::new();

        let picked = MrvDegree.select(&puzzle, &domains, &assignment);
        assert_eq!(picked, Some(short_down()));
    }

    #[test]
    fn test_mrv_breaks_ties_by_degree() {
        // All three slots see both 3-letter words... except the 2-length slot,
        // so assign it first and compare the two remaining length-3 slots:
        // the across slot crosses two others, the long down slot only one.
        let (puzzle, domains) = setup("AT\nCAT\nDOG");
        let mut assignment = Assignment::new();
        assignment.insert(short_down(), "AT".into());

        let picked = MrvDegree.select(&puzzle, &domains, &assignment);
        assert_eq!(picked, Some(across()));
        assert!(puzzle.degree(across()) > puzzle.degree(long_down()));
    }

    #[test]
    fn test_selection_skips_assigned_variables() {
        let (puzzle, domains) = setup("AT\nCAT\nDOG");
        let mut assignment = Assignment::new();
        for &var in puzzle.variables() {
            let picked = MrvDegree.select(&puzzle, &domains, &assignment).unwrap();
            assert!(!assignment.contains(picked));
            assignment.insert(picked, "X".into());
        }
        assert_eq!(MrvDegree.select(&puzzle, &domains, &assignment), None);
    }

    #[test]
    fn test_input_order_is_positional() {
        let (puzzle, domains) = setup("AT\nCAT\nDOG");
        let assignment = Assignment::new();
        assert_eq!(
            InputOrder.select(&puzzle, &domains, &assignment),
            Some(short_down())
        );
    }

    #[test]
    fn test_lcv_orders_by_eliminations() {
        // The across slot's first letter sits in the short down slot's second
        // cell. Only "OAT" keeps "GO" alive there, so "OAT" eliminates the
        // fewest neighbor candidates and must come first.
        let (puzzle, domains) = setup("OX\nGO\nCAT\nDOG\nOAT");
        let assignment = Assignment::new();

        let ordered = Lcv.order(&puzzle, &domains, &assignment, across());
        assert_eq!(ordered[0], "OAT");

        let eliminations: Vec<usize> = ordered
            .iter()
            .map(|w| Lcv::eliminations(&puzzle, &domains, &assignment, across(), w))
            .collect();
        assert!(eliminations.is_sorted());
        assert_eq!(ordered.len(), domains.len(across()));
    }

    #[test]
    fn test_lcv_counts_multibyte_crossings_by_character() {
        // "ÉAT" keeps "OÉ" alive at the short down slot's second letter;
        // "ÃAT" rules it out, so "ÉAT" must come first.
        let (puzzle, domains) = setup("OÉ\nÉAT\nÃAT");
        let assignment = Assignment::new();

        let ordered = Lcv.order(&puzzle, &domains, &assignment, across());
        assert_eq!(ordered[0], "ÉAT");
        assert_eq!(
            Lcv::eliminations(&puzzle, &domains, &assignment, across(), "ÉAT"),
            2
        );
        assert_eq!(
            Lcv::eliminations(&puzzle, &domains, &assignment, across(), "ÃAT"),
            3
        );
    }

    #[test]
    fn test_lcv_is_a_permutation_of_the_domain() {
        let (puzzle, domains) = setup("OX\nGO\nCAT\nDOG\nOAT");
        let assignment = Assignment::new();

        let mut ordered = Lcv.order(&puzzle, &domains, &assignment, across());
        ordered.sort_unstable();
        let mut domain: Vec<String> = domains.candidates(across()).map(str::to_owned).collect();
        domain.sort_unstable();
        assert_eq!(ordered, domain);
    }

    #[test]
    fn test_lcv_ignores_assigned_neighbors() {
        let (puzzle, domains) = setup("OX\nGO\nCAT\nDOG\nOAT");
        let mut assignment = Assignment::new();
        assignment.insert(short_down(), "GO".into());
        assignment.insert(long_down(), "OAT".into());

        // With both crossing slots assigned, every candidate eliminates zero
        // and the order is purely lexicographic.
        let ordered = Lcv.order(&puzzle, &domains, &assignment, across());
        assert_eq!(ordered, vec!["CAT".to_owned(), "DOG".into(), "OAT".into()]);
    }

    #[test]
    fn test_lexicographic_order_is_sorted_domain() {
        let (puzzle, domains) = setup("OX\nGO\nCAT\nDOG\nOAT");
        let assignment = Assignment::new();
        let ordered = Lexicographic.order(&puzzle, &domains, &assignment, across());
        assert_eq!(ordered, vec!["CAT".to_owned(), "DOG".into(), "OAT".into()]);
    }
}
