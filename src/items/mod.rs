//! Item catalog, inventory and item-use effects.

#![allow(unused_imports)]

pub mod data;
pub mod inventory;

pub use data::*;
pub use inventory::*;
