//! Tower middleware builders.

pub mod cors;
