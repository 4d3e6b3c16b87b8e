#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Terminal rendering of a (possibly partial) assignment.

use crate::csp::assignment::Assignment;
use crate::puzzle::crossword::Crossword;
use crate::puzzle::variable::Direction;
use std::fmt;

/// Projects an assignment onto the grid: one optional letter per cell.
#[must_use]
pub fn letter_grid(crossword: &Crossword, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; crossword.width()]; crossword.height()];
    for (var, word) in assignment.iter() {
        for (k, ch) in word.chars().enumerate() {
            let (row, col) = match var.direction {
                Direction::Across => (var.row, var.col + k),
                Direction::Down => (var.row + k, var.col),
            };
            letters[row][col] = Some(ch);
        }
    }
    letters
}

/// A grid ready for `Display`: letters in fillable cells, `█` elsewhere.
#[derive(Debug, Clone, Copy)]
pub struct Rendered<'a> {
    crossword: &'a Crossword,
    assignment: &'a Assignment,
}

impl<'a> Rendered<'a> {
    #[must_use]
    pub const fn new(crossword: &'a Crossword, assignment: &'a Assignment) -> Self {
        Self {
            crossword,
            assignment,
        }
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters = letter_grid(self.crossword, self.assignment);
        for (row, line) in letters.iter().enumerate() {
            for (col, letter) in line.iter().enumerate() {
                if self.crossword.is_fillable(row, col) {
                    write!(f, "{}", letter.unwrap_or(' '))?;
                } else {
                    write!(f, "█")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
