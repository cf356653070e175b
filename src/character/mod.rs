//! Character resources, leveling and unlock bookkeeping.

#![allow(unused_imports)]

pub mod progression;

pub use progression::*;
