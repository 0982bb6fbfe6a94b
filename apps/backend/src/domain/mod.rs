//! Pure darts domain logic.
//!
//! Everything in this module is side-effect free: dart values and validation,
//! visit scoring (bust/checkout), turn order, checkout suggestions, and the
//! projection that folds a leg's visit history into live state. The services
//! layer owns persistence; this layer owns the rules.

pub mod checkout;
pub mod dart;
pub mod projection;
pub mod rules;
pub mod scoring;

pub use dart::{Dart, Multiplier};
pub use projection::{project_leg, LegProjection, VisitSummary};
pub use rules::PlayerSlot;
pub use scoring::{score_visit, VisitOutcome};
