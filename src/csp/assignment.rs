#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Partial variable-to-word assignments built up during search.

use crate::puzzle::crossword::{letter_at, Crossword};
use crate::puzzle::variable::Variable;
use rustc_hash::{FxHashMap, FxHashSet};

/// A partial mapping from slots to chosen words.
///
/// Unassigned slots are simply absent. The search extends and retracts this
/// in place; [`Assignment::is_consistent`] is the global validity check run
/// after each tentative extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment(FxHashMap<Variable, String>);

impl Assignment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every one of the puzzle's `total` slots has a word.
    #[must_use]
    pub fn is_complete(&self, total: usize) -> bool {
        self.0.len() == total
    }

    #[must_use]
    pub fn contains(&self, var: Variable) -> bool {
        self.0.contains_key(&var)
    }

    #[must_use]
    pub fn get(&self, var: Variable) -> Option<&str> {
        self.0.get(&var).map(String::as_str)
    }

    pub fn insert(&mut self, var: Variable, word: String) {
        self.0.insert(var, word);
    }

    pub fn remove(&mut self, var: Variable) {
        self.0.remove(&var);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, &str)> {
        self.0.iter().map(|(&var, word)| (var, word.as_str()))
    }

    /// Whether the assignment violates no constraint: all words distinct,
    /// every word's length equal to its slot's length, and every pair of
    /// assigned crossing slots agreeing at the shared offsets.
    #[must_use]
    pub fn is_consistent(&self, crossword: &Crossword) -> bool {
        let distinct: FxHashSet<&str> = self.0.values().map(String::as_str).collect();
        if distinct.len() != self.0.len() {
            return false;
        }

        for (&var, word) in &self.0 {
            if word.chars().count() != var.length {
                return false;
            }
        }

        for (&x, word_x) in &self.0 {
            for y in crossword.neighbors(x) {
                let Some(word_y) = self.0.get(&y) else {
                    continue;
                };
                let Some((i, j)) = crossword.overlap(x, y) else {
                    continue;
                };
                if letter_at(word_x, i) != letter_at(word_y, j) {
                    return false;
                }
            }
        }

        true
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

    fn plus_puzzle() -> Crossword {
        Crossword::new(PLUS, "ACRE\nABED\nIDEA\nTSAR").unwrap()
    }

    fn down() -> Variable {
        Variable::new(0, 1, 4, Direction::Down)
    }

    fn across() -> Variable {
        Variable::new(2, 0, 4, Direction::Across)
    }

    #[test]
    fn test_empty_is_consistent_and_incomplete() {
        let puzzle = plus_puzzle();
        let assignment = Assignment::new();
        assert!(assignment.is_consistent(&puzzle));
        assert!(!assignment.is_complete(puzzle.variables().len()));
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_agreeing_overlap_is_consistent() {
        let puzzle = plus_puzzle();
        let mut assignment = Assignment::new();
        // Down slot's third letter must equal across slot's second letter.
        assignment.insert(down(), "ABED".into());
        assignment.insert(across(), "TEAM".into());
        assert!(assignment.is_consistent(&puzzle));
        assert!(assignment.is_complete(2));
    }

    #[test]
    fn test_disagreeing_overlap_is_inconsistent() {
        let puzzle = plus_puzzle();
        let mut assignment = Assignment::new();
        assignment.insert(down(), "ABED".into());
        assignment.insert(across(), "TSAR".into());
        assert!(!assignment.is_consistent(&puzzle));
    }

    #[test]
    fn test_multibyte_overlap_compares_characters() {
        let puzzle = plus_puzzle();
        let mut assignment = Assignment::new();
        // Byte index 2 of "ABÉD" and byte index 1 of "AÃCD" hold the same
        // UTF-8 lead byte, but the letters at the crossing differ.
        assignment.insert(down(), "ABÉD".into());
        assignment.insert(across(), "AÃCD".into());
        assert!(!assignment.is_consistent(&puzzle));

        assignment.insert(across(), "AÉCD".into());
        assert!(assignment.is_consistent(&puzzle));
    }

    #[test]
    fn test_duplicate_words_are_inconsistent() {
        let structure = "___\n###\n___";
        let puzzle = Crossword::new(structure, "CAT\nDOG").unwrap();
        let mut assignment = Assignment::new();
        for &var in puzzle.variables() {
            assignment.insert(var, "CAT".into());
        }
        assert!(!assignment.is_consistent(&puzzle));
    }

    #[test]
    fn test_wrong_length_is_inconsistent() {
        let puzzle = plus_puzzle();
        let mut assignment = Assignment::new();
        assignment.insert(down(), "CAT".into());
        assert!(!assignment.is_consistent(&puzzle));
    }

    #[test]
    fn test_remove_retracts() {
        let puzzle = plus_puzzle();
        let mut assignment = Assignment::new();
        assignment.insert(down(), "ABED".into());
        assert!(assignment.contains(down()));
        assignment.remove(down());
        assert!(!assignment.contains(down()));
        assert!(assignment.is_consistent(&puzzle));
    }
}
