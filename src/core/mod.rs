//! Core text processing
//!
//! Formatting applied to translated code before it reaches the buffer.

pub mod reindent;
