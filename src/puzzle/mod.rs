#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod crossword;
pub mod render;
pub mod variable;
