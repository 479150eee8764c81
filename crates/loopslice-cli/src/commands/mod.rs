//! Command implementations for the loopslice CLI.

pub mod convert;
