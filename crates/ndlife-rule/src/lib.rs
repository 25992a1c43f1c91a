//! Generalized birth/survival rules for ndlife simulations.
//!
//! A [`RuleSet`] maps `(currently alive, live neighbor count)` to the next
//! alive state through two lookup tables built once at construction. Any
//! subset of neighbor counts is accepted for either table, so the rule can
//! be an arbitrary step function over the neighbor-count domain.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod notation;
pub mod rule;

pub use rule::RuleSet;
