#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The puzzle model: grid structure, vocabulary, and the precomputed overlap
//! and neighbor relations consumed by the solver.
//!
//! A structure file describes the grid one row per line, with `_` marking a
//! fillable cell and any other character a blocked one. Maximal horizontal and
//! vertical runs of at least two fillable cells become [`Variable`]s. The
//! vocabulary file holds one candidate word per line; words are uppercased and
//! deduplicated on load.
//!
//! All of this is immutable after construction. The solver only reads it.

use crate::puzzle::variable::{Cells, Direction, Variable};
use bit_vec::BitVec;
use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::io;
use std::path::Path;

/// Errors produced while loading a puzzle.
///
/// The solver core never sees malformed data; everything below is caught
/// here, before a [`Crossword`] exists.
#[derive(Debug)]
pub enum PuzzleError {
    /// Reading a structure or vocabulary file failed.
    Io(io::Error),
    /// The structure file contained no rows or no columns.
    EmptyGrid,
    /// The structure contained no run of two or more fillable cells.
    NoSlots,
    /// The vocabulary file contained no words.
    EmptyVocabulary,
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read puzzle file: {e}"),
            Self::EmptyGrid => write!(f, "structure has no rows or columns"),
            Self::NoSlots => write!(f, "structure contains no fillable slots"),
            Self::EmptyVocabulary => write!(f, "vocabulary contains no words"),
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PuzzleError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Immutable description of a crossword puzzle: which cells are fillable,
/// which slots exist, how they cross, and which words may fill them.
#[derive(Debug, Clone)]
pub struct Crossword {
    height: usize,
    width: usize,
    /// Row-major fillable-cell mask.
    structure: BitVec,
    /// All slots, sorted by `Variable` order.
    variables: Vec<Variable>,
    words: FxHashSet<String>,
    /// For each ordered pair of crossing slots `(x, y)`, the offsets `(i, j)`
    /// such that `x`'s `i`-th letter shares a cell with `y`'s `j`-th letter.
    /// Pairs that do not cross are absent.
    overlaps: FxHashMap<(Variable, Variable), (usize, usize)>,
    neighbors: FxHashMap<Variable, FxHashSet<Variable>>,
}

impl Crossword {
    /// Builds a puzzle from structure text and vocabulary text.
    ///
    /// # Errors
    ///
    /// [`PuzzleError::EmptyGrid`] if the structure has no cells,
    /// [`PuzzleError::NoSlots`] if it has no run of two or more fillable
    /// cells, and [`PuzzleError::EmptyVocabulary`] if no words parse.
    pub fn new(structure: &str, words: &str) -> Result<Self, PuzzleError> {
        let rows: Vec<&str> = structure
            .lines()
            .filter(|line| !line.trim_end().is_empty())
            .collect();
        let height = rows.len();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(PuzzleError::EmptyGrid);
        }

        // Short rows are padded with blocked cells.
        let mut mask = BitVec::from_elem(height * width, false);
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                if ch == '_' {
                    mask.set(r * width + c, true);
                }
            }
        }

        let variables = find_variables(&mask, height, width);
        if variables.is_empty() {
            return Err(PuzzleError::NoSlots);
        }

        let words: FxHashSet<String> = words
            .lines()
            .map(|w| w.trim().to_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Err(PuzzleError::EmptyVocabulary);
        }

        let (overlaps, neighbors) = compute_overlaps(&variables);

        Ok(Self {
            height,
            width,
            structure: mask,
            variables,
            words,
            overlaps,
            neighbors,
        })
    }

    /// Loads a puzzle from a structure file and a vocabulary file.
    ///
    /// # Errors
    ///
    /// [`PuzzleError::Io`] if either file cannot be read, plus everything
    /// [`Crossword::new`] reports.
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        structure_path: P,
        words_path: Q,
    ) -> Result<Self, PuzzleError> {
        let structure = std::fs::read_to_string(structure_path)?;
        let words = std::fs::read_to_string(words_path)?;
        Self::new(&structure, &words)
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Whether the cell at `(row, col)` may hold a letter.
    #[must_use]
    pub fn is_fillable(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.structure[row * self.width + col]
    }

    /// All slots of the puzzle, in deterministic `Variable` order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The full candidate vocabulary.
    #[must_use]
    pub const fn words(&self) -> &FxHashSet<String> {
        &self.words
    }

    /// The offsets `(i, j)` at which `x` and `y` cross, or `None` if they do
    /// not constrain each other directly. Symmetric: `overlap(x, y)` is
    /// `Some((i, j))` iff `overlap(y, x)` is `Some((j, i))`.
    #[must_use]
    pub fn overlap(&self, x: Variable, y: Variable) -> Option<(usize, usize)> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// The slots sharing at least one cell with `x`.
    pub fn neighbors(&self, x: Variable) -> impl Iterator<Item = Variable> + '_ {
        self.neighbors.get(&x).into_iter().flatten().copied()
    }

    /// Number of slots crossing `x`.
    #[must_use]
    pub fn degree(&self, x: Variable) -> usize {
        self.neighbors.get(&x).map_or(0, FxHashSet::len)
    }
}

/// The `index`-th letter of `word`, counting characters rather than bytes.
///
/// Overlap offsets index cells, and one cell holds one character, so every
/// comparison against an overlap offset must go through this rather than byte
/// indexing; the vocabulary is not restricted to ASCII.
#[must_use]
pub fn letter_at(word: &str, index: usize) -> Option<char> {
    word.chars().nth(index)
}

/// Scans the fillable mask for maximal runs of length two or more.
fn find_variables(mask: &BitVec, height: usize, width: usize) -> Vec<Variable> {
    let fillable = |r: usize, c: usize| mask[r * width + c];
    let mut variables = Vec::new();

    for row in 0..height {
        let mut col = 0;
        while col < width {
            let start = col;
            while col < width && fillable(row, col) {
                col += 1;
            }
            if col - start >= 2 {
                variables.push(Variable::new(row, start, col - start, Direction::Across));
            }
            col += 1;
        }
    }

    for col in 0..width {
        let mut row = 0;
        while row < height {
            let start = row;
            while row < height && fillable(row, col) {
                row += 1;
            }
            if row - start >= 2 {
                variables.push(Variable::new(start, col, row - start, Direction::Down));
            }
            row += 1;
        }
    }

    variables.sort_unstable();
    variables
}

type OverlapMap = FxHashMap<(Variable, Variable), (usize, usize)>;
type NeighborMap = FxHashMap<Variable, FxHashSet<Variable>>;

/// For every pair of distinct slots, finds the shared cell (if any) and
/// records both orderings of the offset pair.
fn compute_overlaps(variables: &[Variable]) -> (OverlapMap, NeighborMap) {
    let cells: Vec<Cells> = variables.iter().map(Variable::cells).collect();
    let mut overlaps = OverlapMap::default();
    let mut neighbors: NeighborMap = variables
        .iter()
        .map(|&v| (v, FxHashSet::default()))
        .collect();

    for ((a, cells_a), (b, cells_b)) in variables
        .iter()
        .zip(&cells)
        .tuple_combinations()
    {
        let crossing = cells_a
            .iter()
            .enumerate()
            .cartesian_product(cells_b.iter().enumerate())
            .find(|((_, ca), (_, cb))| ca == cb);

        if let Some(((i, _), (j, _))) = crossing {
            overlaps.insert((*a, *b), (i, j));
            overlaps.insert((*b, *a), (j, i));
            neighbors.entry(*a).or_default().insert(*b);
            neighbors.entry(*b).or_default().insert(*a);
        }
    }

    (overlaps, neighbors)
}
