#![deny(warnings)]
#![allow(missing_docs)]
//! Statutory succession engine.
//!
//! Computes each heir's share of an estate under the four orders of
//! succession with right of representation, applies contractual donations
//! between heirs and renders the result over a common denominator.
//!
//! ```
//! use heirshare_core::{calculate, WinningOrder};
//! use heirshare_types::{Fraction, Heir, Relationship};
//!
//! let heirs = [
//!     Heir::new("s", "Spouse", Relationship::Spouse),
//!     Heir::new("c", "Child", Relationship::Child),
//! ];
//! let report = calculate(&heirs, &[]).unwrap();
//! assert_eq!(report.winning_order, WinningOrder::Descendants);
//! assert_eq!(report.final_shares["c"], Fraction::HALF);
//! ```

/// Engine configuration (TOML and environment)
pub mod config;
/// Statutory distribution over the registered orders
pub mod engine;
/// Error taxonomy
pub mod error;
/// Arena of heir records addressed by id
pub mod forest;
/// The four orders of succession
pub mod orders;
/// Statutory distribution → redistribution → common denominator
pub mod pipeline;
/// Donation rules between heirs
pub mod redistribution;
/// Right of representation
pub mod representation;
/// Editable forest plus rules
pub mod session;

pub use config::{EngineConfig, UnknownHeirPolicy};
pub use engine::{Distribution, StatutoryEngine, WinningOrder, compute_initial_shares};
pub use error::{ErrorSeverity, SuccessionError, SuccessionResult};
pub use forest::{HeirForest, HeirRecord};
pub use orders::{OrderKind, OrderRegistry, SuccessionOrder};
pub use pipeline::{SuccessionPipeline, SuccessionReport, calculate};
pub use redistribution::{
    AllocationStatus, RedistributionOutcome, allocation_status, apply_redistributions,
    eligible_donors,
};
pub use session::EstateSession;
