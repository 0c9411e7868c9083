//! Heirshare Types
//!
//! This crate defines the plain data types shared across the heirshare
//! workspace (currently `heirshare-calculator` and `heirshare-core`). It holds
//! no arithmetic and no succession logic, which keeps the dependency graph
//! acyclic: the calculator crate adds exact fraction operations on top of
//! [`Fraction`], and the core crate builds the heir forest and the engines.

#![deny(warnings)]
#![deny(missing_docs)]

mod types;

pub use types::{
    DonationRule, Fraction, Heir, HeirId, Relationship, RedistributionWarning, RuleId, ShareMap,
    WarningKind,
};
