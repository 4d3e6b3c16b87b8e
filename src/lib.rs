#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This crate fills crossword grids by treating them as constraint satisfaction problems.
//!
//! Each slot in the grid is a variable whose domain is the vocabulary;
//! crossing slots constrain each other at their shared cell. Domains are
//! pruned by node consistency and AC-3 propagation, and a backtracking search
//! with MRV, degree, and least-constraining-value heuristics finds a complete
//! assignment or proves that none exists.

/// The `csp` module implements the solving core: domain stores, AC-3
/// propagation, search heuristics, and the backtracking solver.
pub mod csp;

/// The `puzzle` module implements the puzzle model: grid structure, slots and
/// their overlaps, vocabulary loading, and terminal rendering.
pub mod puzzle;
