//! Document number sequences.
//!
//! The engine only needs [`SequenceGenerator`]; [`Sequences`] is an
//! in-memory implementation backed by zero-padded [`NumberSequence`] counters.

mod generator;
mod sequence;

pub use generator::{SequenceGenerator, Sequences};
pub use sequence::NumberSequence;
