//! Core module tests
//!
//! Contains test suites for core functionality:
//! - HOCON parsing into the generic tree
//! - Binding tree building and ordering
//! - Duplicate mnemonic detection

#[cfg(test)]
mod conflict_tests;
#[cfg(test)]
mod parser_tests;
