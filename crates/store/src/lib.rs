//! Persistence for the recipe corpus document.
//!
//! The corpus is one ordered JSON array of recipe records. [`RecipeStore`] is
//! an explicit handle with a `load`/`reload`/`save` lifecycle, passed to
//! callers by reference; there is no ambient global state. All writes go to a
//! scratch file first and are swapped in with an atomic rename, so concurrent
//! readers never observe a partially written corpus.

mod checkpoint;
mod error;
mod recipe_store;

pub use checkpoint::*;
pub use error::*;
pub use recipe_store::*;
