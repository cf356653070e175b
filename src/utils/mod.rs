//! Shared helpers.

#![allow(unused_imports)]

pub mod persistence;

pub use persistence::*;
