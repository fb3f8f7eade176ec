//! Criteria evaluation for the portfolio assessment.
//!
//! [`evaluate`] turns one application record into the fixed set of nine
//! verdicts, reading columns through a [`appfit_model::CriteriaMap`] and
//! interpreting them per the selected [`RuleSet`].

pub mod evaluator;
pub mod rules;

pub use evaluator::evaluate;
pub use rules::RuleSet;
