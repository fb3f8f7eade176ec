//! Data model shared across the appfit workspace.

pub mod bank;
pub mod criteria_map;
pub mod criterion;
pub mod evaluation;
pub mod pending;
pub mod record;
pub mod verdict;

pub use bank::Bank;
pub use criteria_map::CriteriaMap;
pub use criterion::Criterion;
pub use evaluation::Evaluation;
pub use pending::PendingEntry;
pub use record::{Inventory, Record};
pub use verdict::Verdict;
