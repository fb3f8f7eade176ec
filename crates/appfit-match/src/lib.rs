//! Fuzzy reconciliation of application names.
//!
//! The lookup maps normalized keys to original inventory names; the
//! matcher resolves a free-text name to the best original name or to no
//! match. See [`score::token_set_ratio`] for the similarity measure.

pub mod matcher;
pub mod score;

pub use matcher::{Lookup, Matcher};
pub use score::token_set_ratio;
