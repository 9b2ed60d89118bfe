//! Automaton construction from byte patterns.

mod aho_corasick;

#[cfg(test)]
mod aho_corasick_tests;

pub use aho_corasick::{AhoCorasick, ContentKind, OUTPUT_TYPE_KEY, build};
