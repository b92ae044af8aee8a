//! Shared domain types for the MyFridge recipe corpus.
//!
//! Every field of [`Recipe`] is explicit and defaulted at the load boundary:
//! upstream imports come from heterogeneous sources that omit keys freely, so
//! absence is resolved here once instead of with presence checks scattered
//! through the engine.

mod inventory;
mod recipe;

pub use inventory::*;
pub use recipe::*;
