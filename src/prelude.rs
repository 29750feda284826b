//! Commonly used imports
//!
//! Use `use lazyseq::prelude::*;` for the traits and the fluent wrapper.

// Core types
pub use crate::{Cursor, Error, Outcome, Payload, Resolve, Seq, Sequence, Step};

// Pending callback results
pub use crate::defer;
