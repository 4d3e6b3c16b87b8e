#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod assignment;
pub mod domains;
pub mod heuristics;
pub mod propagation;
pub mod solver;
