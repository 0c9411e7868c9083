//! Heirshare Prelude
//!
//! Re-exports the items most callers need from `heirshare-types`,
//! `heirshare-calculator` and `heirshare-core`, so an application can depend on
//! one crate and a single glob import.

#![deny(warnings)]
#![deny(missing_docs)]

// Input and output data --------------------------------------------------------------------------

pub use heirshare_types::{
    DonationRule, Fraction, Heir, HeirId, RedistributionWarning, Relationship, RuleId, ShareMap,
    WarningKind,
};

// Engine, pipeline and editing -------------------------------------------------------------------

pub use heirshare_core::{
    EngineConfig, EstateSession, HeirForest, StatutoryEngine, SuccessionError, SuccessionPipeline,
    SuccessionReport, SuccessionResult, UnknownHeirPolicy, WinningOrder, calculate,
};

// Fraction helpers ------------------------------------------------------------------------------

pub use heirshare_calculator::{CalculatorError, FeeApportionment, normalize};
