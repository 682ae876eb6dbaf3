//! Curated tables and the small rules built on them.
//!
//! - `aliases`: common/trade names mapped to canonical INCI names.
//! - `botanical`: Latin binomial tails and phrase canonicalization.
//! - `policy`: classification overrides (undisclosed mixtures, allergens).

pub(crate) mod aliases;
pub(crate) mod botanical;
pub(crate) mod policy;
