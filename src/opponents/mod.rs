//! Customer templates, drop tables and encounter selection.

#![allow(unused_imports)]

pub mod data;
pub mod roster;

pub use data::*;
pub use roster::*;
