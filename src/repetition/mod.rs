//! The turn-level repetition engine.
//!
//! 1. [`TurnAnalyzer`] turns text into classified n-grams
//! 2. [`count_repetitions`] compares them with the [`Register`]
//! 3. the caller replaces the speaker's register entry afterwards

pub mod classifier;
pub mod counter;
pub mod register;

pub use classifier::*;
pub use counter::*;
pub use register::*;
