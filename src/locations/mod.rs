//! Market locations and their unlock gating.

#![allow(unused_imports)]

pub mod data;

pub use data::*;
