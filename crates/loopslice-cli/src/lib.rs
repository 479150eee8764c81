//! loopslice CLI library.
//!
//! This crate provides the conversion pipeline behind the `loopslice` binary:
//! reading a decoded loop, rendering it in fixed-size batches, and writing the
//! audio file together with its slice metadata.

pub mod commands;
pub mod export;
pub mod input;
pub mod paths;
pub mod render;
pub mod wav;
